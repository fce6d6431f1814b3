use serde::{Deserialize, Serialize};

/// The active selection across the three menu tiers.
///
/// An empty string means "nothing selected at this tier". The tiers are not
/// cross-checked: a `sub` may still name a child of a previously selected
/// `main`, depending on the store's [`StaleSelectionPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPath {
    /// Tier-1 section title.
    pub main: String,
    /// Tier-2 subsection title.
    pub sub: String,
    /// Tier-3 leaf title.
    pub tertiary: String,
}

impl SelectionPath {
    pub fn new(main: impl Into<String>, sub: impl Into<String>, tertiary: impl Into<String>) -> Self {
        Self {
            main: main.into(),
            sub: sub.into(),
            tertiary: tertiary.into(),
        }
    }

    /// Returns `true` when no tier holds a selection.
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.sub.is_empty() && self.tertiary.is_empty()
    }

    pub fn clear(&mut self) {
        self.main.clear();
        self.sub.clear();
        self.tertiary.clear();
    }
}

/// What happens to lower tiers when a higher tier is overwritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleSelectionPolicy {
    /// Lower tiers keep their last value (`sub` can outlive its `main`).
    #[default]
    Preserve,
    /// Writing a tier clears every tier below it.
    ClearDescendants,
}
