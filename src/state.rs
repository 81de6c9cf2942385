// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::agent::Agent;

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
    /// Fallback Lulo key when a request carries no `x-api-key` header.
    pub lulo_api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(agent: Agent, lulo_api_key: Option<String>) -> Self {
        Self {
            agent: Arc::new(agent),
            lulo_api_key: lulo_api_key.map(Arc::from),
        }
    }
}
