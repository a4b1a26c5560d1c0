// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod app;
pub mod cli;
pub mod error;
pub mod ledger;
pub mod loans;
pub mod models;
pub mod session;
pub mod storage;
pub mod utils;
pub mod commands;
