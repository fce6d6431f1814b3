//! Component system for the menu TUI.
//!
//! Components are self-contained UI elements: they react to input, render into
//! a given `Rect`, and report side effects back to the runtime as [`Effect`]s
//! instead of mutating navigation state themselves.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect, text::Span};
use tiernav_types::{Effect, Msg};

use crate::app::App;

/// A UI component with its own local behavior.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: `handle_key_events()` / `handle_mouse_events()` when
///    input is routed to the component
/// 2. **Messages**: `handle_message()` for application-wide messages
/// 3. **Rendering**: `render()` draws into the provided area and may record
///    layout for later hit testing
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events. Components check their own recorded areas.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Rendering may update layout bookkeeping in `app` (hit areas, last
    /// rendered rect) but never navigation state.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hints bar while the component is focused.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'static>> {
        Vec::new()
    }
}

/// Returns the index of the rect in `targets` containing `(x, y)`, provided the
/// point also falls inside `area`.
pub fn find_target_index_by_mouse_position(area: &Rect, targets: &[Rect], x: u16, y: u16) -> Option<usize> {
    let position = ratatui::layout::Position::new(x, y);
    if !area.contains(position) {
        return None;
    }
    targets.iter().position(|rect| rect.contains(position))
}
