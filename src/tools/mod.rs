// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Agent-callable tools. Each takes the [`Agent`](crate::agent::Agent) context
//! by reference and keeps no state between calls.

pub mod balance;
pub mod lend;

pub use balance::get_balance;
pub use lend::{
    get_lending_details, lend_asset, withdraw_asset, LuloError, LuloFailure, LuloOperation,
};
