use std::sync::Arc;

use crate::core::config::Settings;
use crate::db::Ledger;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    ledger: Ledger,
}

impl AppState {
    pub(crate) fn new(settings: Settings, ledger: Ledger) -> Self {
        Self { inner: Arc::new(InnerState { settings, ledger }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn ledger(&self) -> &Ledger {
        &self.inner.ledger
    }
}
