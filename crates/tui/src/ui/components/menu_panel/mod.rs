//! Collapsible menu panel.
//!
//! Draws every tier-1 section with as much of its body as the height
//! animation currently shows, keeps a keyboard cursor over the visible rows
//! and maps clicks on rows, the close affordance or the wheel to effects.

mod menu_panel_component;
mod state;

pub use menu_panel_component::MenuPanelComponent;
pub use state::MenuPanelState;
