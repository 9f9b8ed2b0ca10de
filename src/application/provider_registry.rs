//! ProviderRegistry - Fixed set of ad networks and the one in use.
//!
//! Networks are registered once at startup and a single one is selected by
//! id. The coordinator captures the selection when it is built; switching
//! networks mid-session is not supported.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::ProviderId;
use crate::ports::AdProvider;

/// Provider instances keyed by id, plus the active selection.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderId, Arc<dyn AdProvider>>,
    active: Option<ProviderId>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a provider under its own id, replacing any previous one.
    pub fn register(&mut self, provider: Arc<dyn AdProvider>) -> &mut Self {
        let id = provider.id();
        if self.providers.insert(id.clone(), provider).is_some() {
            warn!(provider = %id, "Replaced previously registered ad provider");
        }
        self
    }

    /// Selects the active provider.
    ///
    /// Unknown ids clear the selection: the controller then runs with no
    /// network attached. Returns whether a provider is now active.
    pub fn select(&mut self, id: &ProviderId) -> bool {
        if self.providers.contains_key(id) {
            info!(provider = %id, "Selected ad provider");
            self.active = Some(id.clone());
            true
        } else {
            warn!(provider = %id, "Unknown ad provider, ads will be inactive");
            self.active = None;
            false
        }
    }

    /// The selected provider, or `None` if nothing is selected.
    pub fn active(&self) -> Option<Arc<dyn AdProvider>> {
        self.active
            .as_ref()
            .and_then(|id| self.providers.get(id))
            .map(Arc::clone)
    }

    pub fn active_id(&self) -> Option<&ProviderId> {
        self.active.as_ref()
    }

    pub fn contains(&self, id: &ProviderId) -> bool {
        self.providers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
