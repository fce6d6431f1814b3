use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tiernav_types::MenuTarget;

/// Cursor, focus and hit-testing state of the menu panel.
#[derive(Debug, Clone)]
pub struct MenuPanelState {
    /// Focus flag of the panel in the global focus tree.
    pub container_focus: FocusFlag,
    /// Row under the keyboard cursor. May point at a row that is currently
    /// collapsed; [`MenuPanelState::cursor_index`] resolves that.
    pub cursor: Option<MenuTarget>,
    /// Last rendered area of the panel, border included.
    pub last_area: Rect,
    /// Per-row areas of the last render, parallel to `row_targets`.
    pub row_areas: Vec<Rect>,
    pub row_targets: Vec<MenuTarget>,
    /// Close affordance; empty unless the panel is an overlay.
    pub close_area: Rect,
}

impl MenuPanelState {
    pub fn new() -> Self {
        Self {
            container_focus: FocusFlag::named("menu_panel"),
            cursor: None,
            last_area: Rect::default(),
            row_areas: Vec::new(),
            row_targets: Vec::new(),
            close_area: Rect::default(),
        }
    }

    pub fn set_cursor(&mut self, target: MenuTarget) {
        self.cursor = Some(target);
    }

    /// Index of the cursor within `targets`.
    ///
    /// A cursor on a row that has been collapsed away falls back to its
    /// section header. Without a cursor the first row is used.
    pub fn cursor_index(&self, targets: &[MenuTarget]) -> Option<usize> {
        if targets.is_empty() {
            return None;
        }
        let Some(cursor) = self.cursor else {
            return Some(0);
        };
        targets
            .iter()
            .position(|target| *target == cursor)
            .or_else(|| targets.iter().position(|target| *target == MenuTarget::Node(cursor.node_index())))
            .or(Some(0))
    }

    /// Moves the cursor by one row, wrapping at both ends.
    pub fn cycle_cursor(&mut self, targets: &[MenuTarget], forward: bool) {
        let Some(current) = self.cursor_index(targets) else {
            return;
        };
        let len = targets.len();
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        self.cursor = Some(targets[next]);
    }

    pub fn cursor_to_first(&mut self, targets: &[MenuTarget]) {
        self.cursor = targets.first().copied();
    }

    pub fn cursor_to_last(&mut self, targets: &[MenuTarget]) {
        self.cursor = targets.last().copied();
    }

    /// Target the cursor currently resolves to.
    pub fn cursor_target(&self, targets: &[MenuTarget]) -> Option<MenuTarget> {
        self.cursor_index(targets).map(|index| targets[index])
    }
}

impl Default for MenuPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl HasFocus for MenuPanelState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<MenuTarget> {
        vec![
            MenuTarget::Node(0),
            MenuTarget::Child { node: 0, child: 0 },
            MenuTarget::Node(1),
        ]
    }

    #[test]
    fn cursor_wraps_in_both_directions() {
        let rows = rows();
        let mut state = MenuPanelState::new();
        state.cycle_cursor(&rows, false);
        assert_eq!(state.cursor, Some(MenuTarget::Node(1)));
        state.cycle_cursor(&rows, true);
        assert_eq!(state.cursor, Some(MenuTarget::Node(0)));
        state.cursor_to_last(&rows);
        assert_eq!(state.cursor_target(&rows), Some(MenuTarget::Node(1)));
    }

    #[test]
    fn collapsed_cursor_falls_back_to_its_header() {
        let mut state = MenuPanelState::new();
        state.set_cursor(MenuTarget::Leaf { node: 1, child: 2, leaf: 0 });
        assert_eq!(state.cursor_target(&rows()), Some(MenuTarget::Node(1)));
        assert_eq!(state.cursor_target(&[]), None);
    }
}
