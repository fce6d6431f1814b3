//! # tiernav TUI
//!
//! Terminal front end for a three-tier collapsible navigation menu. A top bar
//! shows the breadcrumb of the current selection and a toggle; the menu panel
//! draws each section with its measured-height open/close animation, pinned
//! beside the content on wide terminals and as an overlay with a scrim on
//! narrow ones.
//!
//! ## Architecture
//!
//! Navigation state lives in `tiernav-engine` (`SelectionStore`, `MenuPanel`,
//! `FrameScheduler`). Components render from [`app::App`] and report
//! `Effect`s; the runtime applies them and drives animation ticks.

mod app;
mod ui;

use anyhow::Result;
use tiernav_types::MenuDataset;

pub use app::TuiOptions;

/// Runs the interactive menu until the user quits.
///
/// # Errors
///
/// Returns an error when the terminal cannot be put into raw mode or drawn to.
pub async fn run(dataset: MenuDataset, options: TuiOptions) -> Result<()> {
    ui::runtime::run_app(dataset, options).await
}
