// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Third-party API integrations.

pub mod lulo;

pub use lulo::{
    LendRequest, LendingAccountDetails, LendingSettings, LuloApiError, LuloClient, WithdrawRequest,
};
