use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use tiernav_engine::MenuNode;
use tiernav_types::{Effect, MenuItem, MenuTarget, SelectionPath};

use crate::app::App;
use crate::ui::components::component::{Component, find_target_index_by_mouse_position};
use crate::ui::theme::Theme;
use crate::ui::theme::theme_helpers::{self as th, menu_row_style};

const CLOSE_GLYPH: &str = "✕";
const OPEN_CHEVRON: &str = "▾";
const CLOSED_CHEVRON: &str = "▸";
const LEAF_BULLET: &str = "·";

/// Renders the collapsible sections and routes row activations.
#[derive(Debug, Default)]
pub struct MenuPanelComponent;

/// One drawable row resolved against the dataset and the selection path.
struct Row<'a> {
    target: MenuTarget,
    item: &'a MenuItem,
    active: bool,
    /// `Some(open)` for section headers and expandable children.
    chevron: Option<bool>,
}

impl<'a> Row<'a> {
    fn resolve(node: &'a MenuNode, target: MenuTarget, path: &SelectionPath) -> Option<Self> {
        let section = node.item();
        let node_active = node.is_open(path);
        match target {
            MenuTarget::Node(_) => Some(Self {
                target,
                item: section,
                active: node_active,
                chevron: Some(node.focus_flag()),
            }),
            MenuTarget::Child { child, .. } => {
                let item = section.children.get(child)?;
                Some(Self {
                    target,
                    item,
                    active: node_active && path.sub == item.title,
                    chevron: item.has_children().then(|| node.open_child_key() == item.title),
                })
            }
            MenuTarget::Leaf { child, leaf, .. } => {
                let parent = section.children.get(child)?;
                let item = parent.children.get(leaf)?;
                Some(Self {
                    target,
                    item,
                    active: node_active && path.sub == parent.title && path.tertiary == item.title,
                    chevron: None,
                })
            }
        }
    }

    fn label(&self) -> Line<'a> {
        match self.target {
            MenuTarget::Node(_) => {
                let glyph = self.item.icon().glyph().unwrap_or(" ");
                Line::from(vec![Span::raw(format!(" {glyph} ")), Span::raw(self.item.title.as_str())])
            }
            MenuTarget::Child { .. } => Line::from(vec![Span::raw("    "), Span::raw(self.item.title.as_str())]),
            MenuTarget::Leaf { .. } => Line::from(vec![
                Span::raw(format!("      {LEAF_BULLET} ")),
                Span::raw(self.item.title.as_str()),
            ]),
        }
    }
}

impl MenuPanelComponent {
    fn visible_targets(app: &App) -> Vec<MenuTarget> {
        app.panel.visible_targets(app.now())
    }

    fn render_row(frame: &mut Frame, area: Rect, row: &Row<'_>, theme: &dyn Theme, cursor: bool) {
        let style: Style = menu_row_style(theme, row.active, cursor);
        frame.render_widget(Paragraph::new(row.label()).style(style), area);
        if let Some(open) = row.chevron
            && area.width > 2
        {
            let chevron_area = Rect::new(area.right() - 2, area.y, 1, 1);
            let chevron = if open { OPEN_CHEVRON } else { CLOSED_CHEVRON };
            frame.render_widget(Paragraph::new(chevron).style(style), chevron_area);
        }
    }
}

impl Component for MenuPanelComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let targets = Self::visible_targets(app);
        let state = &mut app.menu;
        let mut effects = vec![];
        match key.code {
            KeyCode::Down => state.cycle_cursor(&targets, true),
            KeyCode::Up => state.cycle_cursor(&targets, false),
            KeyCode::Home => state.cursor_to_first(&targets),
            KeyCode::End => state.cursor_to_last(&targets),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right => {
                if let Some(target) = state.cursor_target(&targets) {
                    effects.push(Effect::Activate(target));
                }
            }
            KeyCode::Left => {
                if let Some(target) = state.cursor_target(&targets) {
                    state.set_cursor(MenuTarget::Node(target.node_index()));
                }
            }
            KeyCode::Esc if app.panel.is_overlay() => effects.push(Effect::DismissPanel),
            _ => {}
        }
        effects
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let position = Position::new(mouse.column, mouse.row);
        if !app.menu.last_area.contains(position) {
            return Vec::new();
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if app.menu.close_area.contains(position) {
                    return vec![Effect::DismissPanel];
                }
                app.focus.focus(&app.menu);
                let state = &app.menu;
                find_target_index_by_mouse_position(&state.last_area, &state.row_areas, mouse.column, mouse.row)
                    .and_then(|index| state.row_targets.get(index).copied())
                    .map(|target| vec![Effect::Activate(target)])
                    .unwrap_or_default()
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let targets = Self::visible_targets(app);
                app.menu.cycle_cursor(&targets, mouse.kind == MouseEventKind::ScrollDown);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let focused = app.menu.container_focus.get();
        let block = th::block(theme, Some(app.panel.title()), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let close_area = if app.panel.is_overlay() && area.width > 4 {
            let close = Rect::new(area.right() - 3, area.y, 1, 1);
            frame.render_widget(Paragraph::new(CLOSE_GLYPH).style(theme.accent_primary_style()), close);
            close
        } else {
            Rect::default()
        };

        let targets = Self::visible_targets(app);
        let cursor = app.menu.cursor_index(&targets).filter(|_| focused);
        let height = usize::from(inner.height);
        let offset = match cursor {
            Some(index) if height > 0 => index.saturating_sub(height - 1),
            _ => 0,
        };

        let path = app.store.path();
        let mut row_areas = Vec::with_capacity(height);
        let mut row_targets = Vec::with_capacity(height);
        for (index, target) in targets.iter().enumerate().skip(offset).take(height) {
            let Some(node) = app.panel.node(target.node_index()) else {
                continue;
            };
            let Some(row) = Row::resolve(node, *target, path) else {
                continue;
            };
            let row_area = Rect::new(inner.x, inner.y + (row_areas.len() as u16), inner.width, 1);
            Self::render_row(frame, row_area, &row, theme, cursor == Some(index));
            row_areas.push(row_area);
            row_targets.push(*target);
        }

        let state = &mut app.menu;
        state.last_area = area;
        state.row_areas = row_areas;
        state.row_targets = row_targets;
        state.close_area = close_area;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let theme = &*app.ctx.theme;
        if app.panel.is_overlay() {
            th::build_hint_spans(theme, &[(" ↑/↓", " Navigate "), (" Enter", " Open "), (" Esc", " Close ")])
        } else {
            th::build_hint_spans(theme, &[(" ↑/↓", " Navigate "), (" Enter", " Open "), (" ←", " Section ")])
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};
    use tiernav_engine::ManualClock;
    use tiernav_types::Msg;

    use super::*;
    use crate::app::test_support::app;

    fn draw(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        let mut component = MenuPanelComponent;
        terminal
            .draw(|frame| component.render(frame, frame.area(), app))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .replace(' ', "")
            })
            .collect()
    }

    fn settle(app: &mut App, clock: &ManualClock) {
        app.update(&Msg::Tick);
        clock.advance(Duration::from_millis(300));
        app.update(&Msg::Tick);
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn collapsed_sections_show_only_headers() {
        let (mut app, _) = app();
        let rows = draw(&mut app, 30, 8);
        assert!(rows[0].contains("신성델타테크"), "{rows:?}");
        assert!(rows[1].contains("생산관리") && rows[1].ends_with("▸│"), "{rows:?}");
        assert!(rows[2].contains("품질관리"));
        assert!(rows[3].contains("설정") && rows[3].ends_with("▸│"), "{rows:?}");
        assert_eq!(app.menu.row_targets.len(), 3);
    }

    #[test]
    fn opened_section_reveals_its_body_after_settling() {
        let (mut app, clock) = app();
        app.apply(Effect::Activate(MenuTarget::Node(0)));
        settle(&mut app, &clock);

        let rows = draw(&mut app, 30, 8);
        assert!(rows[1].contains('▾'), "{rows:?}");
        assert!(rows[2].contains("일일리포트"));
        assert!(rows[3].contains("라인현황") && rows[3].contains('▸'));
        assert!(rows[4].contains("품질관리"));
        assert!(rows[5].contains("설정") && rows[5].contains('▸'), "{rows:?}");
    }

    #[test]
    fn keyboard_walks_rows_and_activates_the_cursor() {
        let (mut app, clock) = app();
        let mut component = MenuPanelComponent;
        draw(&mut app, 30, 8);

        assert_eq!(component.handle_key_events(&mut app, key(KeyCode::Enter)), vec![Effect::Activate(MenuTarget::Node(0))]);
        app.apply(Effect::Activate(MenuTarget::Node(0)));
        settle(&mut app, &clock);

        component.handle_key_events(&mut app, key(KeyCode::Down));
        component.handle_key_events(&mut app, key(KeyCode::Down));
        assert_eq!(
            component.handle_key_events(&mut app, key(KeyCode::Right)),
            vec![Effect::Activate(MenuTarget::Child { node: 0, child: 1 })]
        );

        component.handle_key_events(&mut app, key(KeyCode::Left));
        assert_eq!(app.menu.cursor, Some(MenuTarget::Node(0)));
        component.handle_key_events(&mut app, key(KeyCode::End));
        assert_eq!(app.menu.cursor, Some(MenuTarget::Node(2)));
    }

    #[test]
    fn clicking_a_row_activates_it() {
        let (mut app, _) = app();
        let mut component = MenuPanelComponent;
        draw(&mut app, 30, 8);
        assert_eq!(
            component.handle_mouse_events(&mut app, click(5, 2)),
            vec![Effect::Activate(MenuTarget::Node(1))]
        );
        assert!(component.handle_mouse_events(&mut app, click(5, 7)).is_empty());
    }

    #[test]
    fn overlay_mode_offers_a_close_affordance() {
        let (mut app, _) = app();
        let mut component = MenuPanelComponent;
        draw(&mut app, 30, 8);
        assert_eq!(app.menu.close_area, Rect::default());

        app.update(&Msg::Resize(80, 24));
        let rows = draw(&mut app, 30, 8);
        assert!(rows[0].contains(CLOSE_GLYPH), "{rows:?}");
        assert_eq!(component.handle_mouse_events(&mut app, click(27, 0)), vec![Effect::DismissPanel]);
        assert_eq!(component.handle_key_events(&mut app, key(KeyCode::Esc)), vec![Effect::DismissPanel]);
    }
}
