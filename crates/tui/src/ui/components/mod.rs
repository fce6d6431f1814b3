//! UI components: top bar and menu panel.

pub mod component;
pub mod menu_panel;
pub mod top_bar;

pub use component::*;
