//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::{LogNotifier, Notifier, PromotionPolicy};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for persistence operations
    pub repository: Arc<dyn FullRepository>,
    /// Outbound notification hook
    pub notifier: Arc<dyn Notifier>,
    /// Waitlist promotion policy applied after cancellations
    pub promotion_policy: PromotionPolicy,
}

impl AppState {
    /// Create a new application state with the given repository, a logging
    /// notifier and the default promotion policy.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            notifier: Arc::new(LogNotifier),
            promotion_policy: PromotionPolicy::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_promotion_policy(mut self, policy: PromotionPolicy) -> Self {
        self.promotion_policy = policy;
        self
    }
}
