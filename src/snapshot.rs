// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local JSON snapshot of the store. The remote API is the canonical
//! persistence; this file only carries the dashboard's in-memory state
//! between invocations, and is written once a mutation reaches a terminal
//! state — a rolled-back mutation leaves it byte-identical.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;

use crate::store::Store;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev.tallybook", "Tallybook", "tallybook"));

pub fn snapshot_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tallybook.json"))
}

pub fn load_or_init(path: &Path) -> Result<Store> {
    if !path.exists() {
        return Ok(Store::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Read snapshot at {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Parse snapshot at {}", path.display()))
}

pub fn save(path: &Path, store: &Store) -> Result<()> {
    let raw = serde_json::to_string_pretty(store)?;
    fs::write(path, raw).with_context(|| format!("Write snapshot at {}", path.display()))
}
