//! Shared types for the tiernav workspace: menu configuration models, the
//! selection path, and the message/effect vocabulary used by the TUI runtime.

mod menu;
mod selection;

pub use menu::{IconKind, MenuDataset, MenuItem, NavSettings};
pub use selection::{SelectionPath, StaleSelectionPolicy};

/// Addresses one visible row of the menu panel.
///
/// Indices are positions in the dataset tree: `node` is the tier-1 index,
/// `child` the tier-2 index inside it and `leaf` the tier-3 index inside the
/// child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuTarget {
    Node(usize),
    Child { node: usize, child: usize },
    Leaf { node: usize, child: usize, leaf: usize },
}

impl MenuTarget {
    /// Tier-1 index this row belongs to.
    pub fn node_index(&self) -> usize {
        match *self {
            Self::Node(node) | Self::Child { node, .. } | Self::Leaf { node, .. } => node,
        }
    }
}

/// Messages that can be sent to update the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Animation/housekeeping tick
    Tick,
    /// Terminal resized
    Resize(u16, u16),
}

/// Side effects reported by components and applied by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Flip panel visibility (top bar toggle)
    TogglePanel,
    /// Set panel visibility explicitly; idempotent
    SetPanelOpen(bool),
    /// Close the panel from the scrim or the panel's close affordance
    DismissPanel,
    /// Activate a menu row
    Activate(MenuTarget),
    /// Clear the selection path
    ResetSelection,
    /// Leave the application
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_report_their_section() {
        assert_eq!(MenuTarget::Node(2).node_index(), 2);
        assert_eq!(MenuTarget::Child { node: 1, child: 4 }.node_index(), 1);
        assert_eq!(MenuTarget::Leaf { node: 3, child: 0, leaf: 1 }.node_index(), 3);
    }
}
