use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
};
use tiernav_engine::{CrumbKind, crumbs};
use tiernav_types::Effect;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers::{self as th, render_button};

const MENU_GLYPH: &str = "☰";
const CLOSE_GLYPH: &str = "✕";
const TOGGLE_WIDTH: u16 = 3;

/// Renders the breadcrumb bar and owns the panel toggle.
#[derive(Debug, Default)]
pub struct TopBarComponent;

impl TopBarComponent {
    fn breadcrumb_line(app: &App) -> Line<'_> {
        if !app.gate.allows(&app.store) {
            return Line::default();
        }
        let theme = &*app.ctx.theme;
        let spans: Vec<Span> = crumbs(app.store.path())
            .into_iter()
            .map(|crumb| {
                let style = match crumb.kind {
                    CrumbKind::Main => theme.text_primary_style().add_modifier(Modifier::BOLD),
                    CrumbKind::Separator => theme.text_muted_style(),
                    CrumbKind::Sub => theme.text_primary_style(),
                    CrumbKind::Tertiary => theme.accent_secondary_style(),
                };
                Span::styled(crumb.text, style)
            })
            .collect();
        Line::from(spans)
    }
}

impl Component for TopBarComponent {
    fn handle_key_events(&mut self, _app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => vec![Effect::TogglePanel],
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }
        if !app.top_bar.toggle_area.contains(Position::new(mouse.column, mouse.row)) {
            return Vec::new();
        }
        app.focus.focus(&app.top_bar);
        vec![Effect::TogglePanel]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        frame.render_widget(Paragraph::new("").style(th::base_style(theme)), area);

        let user_label = app.ctx.settings.user_label.as_str();
        let user_width = u16::try_from(user_label.width()).unwrap_or(u16::MAX).saturating_add(2);
        let [toggle_area, _, crumb_area, user_area] = Layout::horizontal([
            Constraint::Length(TOGGLE_WIDTH),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(user_width),
        ])
        .areas(area);

        let glyph = if app.panel.is_visible() { CLOSE_GLYPH } else { MENU_GLYPH };
        render_button(frame, toggle_area, glyph, theme, app.top_bar.toggle_focus.get(), false);

        frame.render_widget(Paragraph::new(Self::breadcrumb_line(app)), crumb_area);
        frame.render_widget(
            Paragraph::new(user_label).right_aligned().style(theme.text_secondary_style()),
            user_area,
        );

        app.top_bar.last_area = area;
        app.top_bar.toggle_area = toggle_area;
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'static>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" Enter", " Toggle menu "), (" Tab", " Menu ")])
    }
}
