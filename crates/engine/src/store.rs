//! Selection store shared by every node and the top bar.
//!
//! The store is an ordinary value owned by the application and passed by
//! reference to whoever reads or writes it. Consumers detect changes by
//! comparing [`SelectionStore::revision`] with the revision they last synced.

use tiernav_types::{SelectionPath, StaleSelectionPolicy};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    path: SelectionPath,
    service_title: String,
    policy: StaleSelectionPolicy,
    revision: u64,
}

impl SelectionStore {
    pub fn new(policy: StaleSelectionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn path(&self) -> &SelectionPath {
        &self.path
    }

    pub fn main(&self) -> &str {
        &self.path.main
    }

    pub fn sub(&self) -> &str {
        &self.path.sub
    }

    pub fn tertiary(&self) -> &str {
        &self.path.tertiary
    }

    pub fn service_title(&self) -> &str {
        &self.service_title
    }

    pub fn policy(&self) -> StaleSelectionPolicy {
        self.policy
    }

    /// Bumped on every write, including writes that store the same value.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Overwrites the tier-1 selection.
    pub fn set_main(&mut self, title: impl Into<String>) {
        self.path.main = title.into();
        if self.policy == StaleSelectionPolicy::ClearDescendants {
            self.path.sub.clear();
            self.path.tertiary.clear();
        }
        self.bump("main");
    }

    /// Overwrites the tier-2 selection without checking it belongs to `main`.
    pub fn set_sub(&mut self, title: impl Into<String>) {
        self.path.sub = title.into();
        if self.policy == StaleSelectionPolicy::ClearDescendants {
            self.path.tertiary.clear();
        }
        self.bump("sub");
    }

    pub fn set_tertiary(&mut self, title: impl Into<String>) {
        self.path.tertiary = title.into();
        self.bump("tertiary");
    }

    /// Clears all three tiers. The service title is left alone.
    pub fn reset(&mut self) {
        self.path.clear();
        self.bump("reset");
    }

    pub fn set_service_title(&mut self, title: impl Into<String>) {
        self.service_title = title.into();
        self.bump("service");
    }

    pub fn reset_service(&mut self) {
        self.service_title.clear();
        self.bump("service");
    }

    fn bump(&mut self, field: &str) {
        self.revision = self.revision.wrapping_add(1);
        debug!(
            field,
            main = %self.path.main,
            sub = %self.path.sub,
            tertiary = %self.path.tertiary,
            revision = self.revision,
            "selection store updated"
        );
    }
}
