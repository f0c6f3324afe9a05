// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod cli;
pub mod commands;
pub mod coordinator;
pub mod effects;
pub mod models;
pub mod resolver;
pub mod snapshot;
pub mod store;
pub mod utils;
