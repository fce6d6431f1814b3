//! Top bar: panel toggle, breadcrumb trail and user label.
//!
//! The bar never writes navigation state. It reads the selection path for the
//! breadcrumb and reports [`tiernav_types::Effect::TogglePanel`] when the
//! toggle is activated.

mod state;
mod top_bar_component;

pub use state::TopBarState;
pub use top_bar_component::TopBarComponent;
