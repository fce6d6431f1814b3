use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// Focus and hit-testing state of the top bar.
#[derive(Debug, Clone)]
pub struct TopBarState {
    /// Focus flag of the panel toggle, the only focusable part of the bar.
    pub toggle_focus: FocusFlag,
    /// Last rendered area of the whole bar.
    pub last_area: Rect,
    /// Last rendered area of the toggle glyph.
    pub toggle_area: Rect,
}

impl TopBarState {
    pub fn new() -> Self {
        Self {
            toggle_focus: FocusFlag::named("top_bar.toggle"),
            last_area: Rect::default(),
            toggle_area: Rect::default(),
        }
    }
}

impl Default for TopBarState {
    fn default() -> Self {
        Self::new()
    }
}

impl HasFocus for TopBarState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.toggle_focus.clone()
    }

    fn area(&self) -> Rect {
        self.toggle_area
    }
}
