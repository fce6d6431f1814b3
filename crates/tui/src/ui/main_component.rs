use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Position,
    prelude::*,
    widgets::{Block, Clear, Paragraph, Wrap},
};
use tiernav_types::{Effect, Msg};

use super::components::menu_panel::MenuPanelComponent;
use super::components::top_bar::TopBarComponent;
use super::components::Component;
use super::theme::theme_helpers as th;
use crate::app::App;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regions {
    pub top_bar: Rect,
    pub hints: Rect,
    pub content: Rect,
    /// Empty while the panel is hidden.
    pub panel: Rect,
    /// Empty unless the panel is an overlay; then the whole frame.
    pub scrim: Rect,
}

/// Splits `area` into the top bar, body and hints bar, then places the panel.
///
/// A pinned panel takes its columns away from the content. An overlay panel
/// is drawn over the content, and the scrim covers the whole frame behind it,
/// top bar included.
pub fn layout_regions(area: Rect, visible: bool, overlay: bool, panel_width: u16) -> Regions {
    let [top_bar, body, hints] = Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let width = panel_width.min(body.width);

    if !visible {
        return Regions {
            top_bar,
            hints,
            content: body,
            ..Regions::default()
        };
    }
    if overlay {
        return Regions {
            top_bar,
            hints,
            content: body,
            panel: Rect { width, ..body },
            scrim: area,
        };
    }
    let [panel, content] = Layout::horizontal([Constraint::Length(width), Constraint::Min(0)]).areas(body);
    Regions {
        top_bar,
        hints,
        content,
        panel,
        scrim: Rect::default(),
    }
}

#[derive(Debug, Default)]
pub struct MainView {
    pub top_bar_view: TopBarComponent,
    pub menu_view: MenuPanelComponent,
    regions: Regions,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives focus back to the first region after the focus tree lost its
    /// focused widget.
    pub fn restore_focus(&mut self, app: &mut App) {
        if app.panel.is_visible() {
            app.focus.focus(&app.menu);
        } else {
            app.focus.first();
        }
    }

    fn render_content(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some(app.store.service_title()), false).style(th::base_style(theme));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = match app.selected_item() {
            Some(item) => vec![
                Line::styled(item.title.as_str(), theme.accent_emphasis_style()),
                Line::styled(item.link.as_str(), theme.text_secondary_style()),
            ],
            None => vec![Line::styled("Select a menu entry", theme.text_muted_style())],
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        app.update(msg);
        Vec::new()
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Tab => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                app.focus.prev();
                return Vec::new();
            }
            KeyCode::Char('q') => return vec![Effect::Quit],
            KeyCode::Char('m') => return vec![Effect::TogglePanel],
            KeyCode::Char('r') => return vec![Effect::ResetSelection],
            _ => {}
        }

        if app.top_bar.toggle_focus.get() {
            return self.top_bar_view.handle_key_events(app, key);
        }
        if app.panel.is_visible() && app.menu.container_focus.get() {
            return self.menu_view.handle_key_events(app, key);
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let position = Position::new(mouse.column, mouse.row);
        let mut effects = self.top_bar_view.handle_mouse_events(app, mouse);
        if !app.panel.is_visible() || !effects.is_empty() {
            return effects;
        }

        if app.panel.shows_scrim()
            && mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && self.regions.scrim.contains(position)
            && !self.regions.panel.contains(position)
        {
            effects.push(Effect::DismissPanel);
            return effects;
        }
        effects.extend(self.menu_view.handle_mouse_events(app, mouse));
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        frame.render_widget(Paragraph::new("").style(th::base_style(&*app.ctx.theme)), area);

        let regions = layout_regions(
            area,
            app.panel.is_visible(),
            app.panel.is_overlay(),
            app.ctx.settings.panel_width,
        );
        self.regions = regions;

        self.top_bar_view.render(frame, regions.top_bar, app);
        Self::render_content(frame, regions.content, app);

        if app.panel.is_visible() {
            if app.panel.shows_scrim() {
                frame.render_widget(Block::default().style(app.ctx.theme.scrim_style()), regions.scrim);
                frame.render_widget(Clear, regions.panel);
            }
            self.menu_view.render(frame, regions.panel, app);
        }

        let hints = Paragraph::new(Line::from(self.get_hint_spans(app))).style(app.ctx.theme.text_muted_style());
        frame.render_widget(hints, regions.hints);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        let theme = &*app.ctx.theme;
        let mut hint_spans = vec![Span::styled("Hints: ", theme.text_muted_style())];
        if app.top_bar.toggle_focus.get() {
            hint_spans.extend(self.top_bar_view.get_hint_spans(app));
        } else if app.panel.is_visible() && app.menu.container_focus.get() {
            hint_spans.extend(self.menu_view.get_hint_spans(app));
        }
        hint_spans.extend(th::build_hint_spans(
            theme,
            &[(" Tab", " Focus "), (" m", " Menu "), (" r", " Reset "), (" q", " Quit ")],
        ));
        hint_spans
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use tiernav_types::MenuTarget;

    use super::*;
    use crate::app::test_support::app;

    fn draw(app: &mut App, view: &mut MainView, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|frame| view.render(frame, frame.area(), app)).expect("draw");
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>().replace(' ', ""))
            .collect()
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
    fn pinned_panel_shrinks_the_content() {
        let regions = layout_regions(Rect::new(0, 0, 120, 30), true, false, 32);
        assert_eq!(regions.top_bar, Rect::new(0, 0, 120, 1));
        assert_eq!(regions.hints, Rect::new(0, 29, 120, 1));
        assert_eq!(regions.panel, Rect::new(0, 1, 32, 28));
        assert_eq!(regions.content, Rect::new(32, 1, 88, 28));
        assert_eq!(regions.scrim, Rect::default());
    }

    #[test]
    fn overlay_panel_floats_over_a_scrim() {
        let regions = layout_regions(Rect::new(0, 0, 80, 24), true, true, 32);
        assert_eq!(regions.content, Rect::new(0, 1, 80, 22));
        assert_eq!(regions.scrim, Rect::new(0, 0, 80, 24));
        assert_eq!(regions.panel, Rect::new(0, 1, 32, 22));

        let narrow = layout_regions(Rect::new(0, 0, 20, 10), true, true, 32);
        assert_eq!(narrow.panel.width, 20);
    }

    #[test]
    fn hidden_panel_leaves_the_body_to_the_content() {
        let regions = layout_regions(Rect::new(0, 0, 80, 24), false, true, 32);
        assert_eq!(regions.panel, Rect::default());
        assert_eq!(regions.scrim, Rect::default());
        assert_eq!(regions.content, Rect::new(0, 1, 80, 22));
    }

    #[test]
    fn clicking_the_scrim_dismisses_the_panel() {
        let (mut app, _) = app();
        let mut view = MainView::new();
        app.update(&Msg::Resize(80, 20));
        draw(&mut app, &mut view, 80, 20);

        assert_eq!(view.handle_mouse_events(&mut app, click(60, 10)), vec![Effect::DismissPanel]);
        assert_ne!(view.handle_mouse_events(&mut app, click(10, 3)), vec![Effect::DismissPanel]);
    }

    #[test]
    fn scrim_reaches_over_the_top_bar() {
        let (mut app, _) = app();
        let mut view = MainView::new();
        app.update(&Msg::Resize(80, 20));
        draw(&mut app, &mut view, 80, 20);

        assert_eq!(view.handle_mouse_events(&mut app, click(1, 0)), vec![Effect::TogglePanel]);
        assert_eq!(view.handle_mouse_events(&mut app, click(40, 0)), vec![Effect::DismissPanel]);
        assert_eq!(view.handle_mouse_events(&mut app, click(40, 19)), vec![Effect::DismissPanel]);

        let scrim_bg = app.ctx.theme.scrim_style().bg;
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        terminal.draw(|frame| view.render(frame, frame.area(), &mut app)).expect("draw");
        assert_eq!(Some(terminal.backend().buffer()[(40, 0)].bg), scrim_bg);
    }

    #[test]
    fn global_keys_map_to_effects() {
        let (mut app, _) = app();
        let mut view = MainView::new();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Char('q'))), vec![Effect::Quit]);
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Char('m'))), vec![Effect::TogglePanel]);
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Char('r'))), vec![Effect::ResetSelection]);

        view.handle_key_events(&mut app, key(KeyCode::Tab));
        assert!(app.top_bar.toggle_focus.get());
        assert_eq!(view.handle_key_events(&mut app, key(KeyCode::Enter)), vec![Effect::TogglePanel]);
    }

    #[test]
    fn content_shows_the_selected_entry() {
        let (mut app, _) = app();
        let mut view = MainView::new();
        app.update(&Msg::Resize(120, 12));
        let rows = draw(&mut app, &mut view, 120, 12);
        assert!(rows.iter().any(|row| row.contains("Selectamenuentry")), "{rows:?}");

        app.apply(Effect::Activate(MenuTarget::Node(1)));
        let rows = draw(&mut app, &mut view, 120, 12);
        assert!(rows.iter().any(|row| row.contains("/quality")), "{rows:?}");
        assert!(rows[0].contains("품질관리"), "{rows:?}");
    }
}
