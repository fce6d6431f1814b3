//! Application state for the menu TUI.
//!
//! `App` owns the navigation core (store, panel, scheduler), the per-widget UI
//! state, the theme and the focus tree. Components read from it while
//! rendering and hand back [`Effect`]s that [`App::apply`] executes.

use std::time::Duration;

use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use tiernav_engine::{Activation, BreadcrumbGate, Clock, FrameScheduler, MenuPanel, Scheduler, SelectionStore};
use tiernav_types::{Effect, MenuDataset, MenuItem, Msg, NavSettings};
use tracing::{debug, info};

use crate::ui::components::menu_panel::MenuPanelState;
use crate::ui::components::top_bar::TopBarState;
use crate::ui::theme::{LoadedTheme, Theme};

/// Startup options that are not part of the menu file.
#[derive(Debug, Clone, Default)]
pub struct TuiOptions {
    /// Theme requested on the command line.
    pub theme: Option<String>,
    /// Service title to set at startup, overriding the menu file.
    pub service_title: Option<String>,
}

/// Cross-cutting context shared by every component.
pub struct SharedCtx {
    pub theme: Box<dyn Theme>,
    pub active_theme_id: &'static str,
    pub settings: NavSettings,
}

pub struct App {
    pub ctx: SharedCtx,
    pub store: SelectionStore,
    pub panel: MenuPanel,
    pub scheduler: FrameScheduler,
    pub gate: BreadcrumbGate,
    pub top_bar: TopBarState,
    pub menu: MenuPanelState,
    pub focus: Focus,
    container_focus: FocusFlag,
}

impl App {
    pub fn new(dataset: &MenuDataset, theme: LoadedTheme, options: TuiOptions, clock: impl Clock + 'static) -> Self {
        let settings = dataset.settings.clone();
        let mut store = SelectionStore::new(settings.stale_selection);
        if let Some(service) = options.service_title.or_else(|| settings.service_title.clone()) {
            store.set_service_title(service);
        }

        let mut scheduler = FrameScheduler::new(clock);
        let mut panel = MenuPanel::new(dataset);
        panel.sync(&store, &mut scheduler);

        let mut app = Self {
            ctx: SharedCtx {
                theme: theme.theme,
                active_theme_id: theme.definition.id,
                settings: settings.clone(),
            },
            store,
            panel,
            scheduler,
            gate: BreadcrumbGate::new(settings.breadcrumb_service),
            top_bar: TopBarState::new(),
            menu: MenuPanelState::new(),
            focus: Focus::default(),
            container_focus: FocusFlag::named("app"),
        };
        app.focus = FocusBuilder::build_for(&app);
        app.focus.focus(&app.menu);
        info!(
            title = %dataset.title,
            sections = dataset.data.len(),
            theme = app.ctx.active_theme_id,
            "menu ready"
        );
        app
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// `true` while any section is mid-transition or has tasks queued.
    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_idle() || self.panel.is_animating(self.now())
    }

    /// Processes a runtime message. Returns `true` when a redraw is needed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        match msg {
            Msg::Tick => {
                let changed = self.panel.advance(&mut self.scheduler);
                changed || self.panel.is_animating(self.now())
            }
            Msg::Resize(width, _) => {
                self.panel.set_viewport_width(*width);
                true
            }
        }
    }

    /// Executes one effect reported by a component.
    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::TogglePanel => self.panel.flip(),
            Effect::SetPanelOpen(open) => self.panel.toggle_panel(open),
            Effect::DismissPanel => self.panel.dismiss(),
            Effect::Activate(target) => {
                let outcome = self.panel.activate(target, &mut self.store, &mut self.scheduler);
                self.menu.set_cursor(target);
                if outcome == Activation::Claimed
                    && let Some(item) = self.panel.item_at(target)
                {
                    info!(title = %item.title, link = %item.link, "navigated");
                }
            }
            Effect::ResetSelection => {
                self.store.reset();
                self.panel.sync(&self.store, &mut self.scheduler);
            }
            Effect::Quit => {}
        }
        self.keep_focus_visible();
    }

    /// Deepest dataset item on the current selection path.
    pub fn selected_item(&self) -> Option<&MenuItem> {
        let path = self.store.path();
        let section = self.panel.nodes().iter().find(|node| node.is_open(path))?.item();
        let Some(child) = section.children.iter().find(|child| child.title == path.sub) else {
            return Some(section);
        };
        Some(
            child
                .children
                .iter()
                .find(|leaf| leaf.title == path.tertiary)
                .unwrap_or(child),
        )
    }

    /// Cancels every pending animation task before shutdown.
    pub fn dispose(&mut self) {
        self.panel.dispose(&mut self.scheduler);
    }

    fn keep_focus_visible(&mut self) {
        if !self.panel.is_visible() && self.menu.container_focus.get() {
            debug!("panel hidden while focused; moving focus to the top bar");
            let old_focus = std::mem::take(&mut self.focus);
            self.focus = FocusBuilder::rebuild_for(self, Some(old_focus));
            self.focus.focus(&self.top_bar);
        }
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        self.top_bar.build(builder);
        if self.panel.is_visible() {
            self.menu.build(builder);
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}


#[cfg(test)]
mod tests {
    use tiernav_engine::HeightValue;
    use tiernav_types::MenuTarget;

    use super::test_support::*;
    use super::*;

    #[test]
    fn service_title_comes_from_options_first() {
        let mut dataset = dataset();
        dataset.settings.service_title = Some("OTHER".to_string());
        let (app, _) = app_with(&dataset, Some("SCTT"));
        assert_eq!(app.store.service_title(), "SCTT");

        let (app, _) = app_with(&dataset, None);
        assert_eq!(app.store.service_title(), "OTHER");
    }

    #[test]
    fn ticks_drive_the_open_animation() {
        let (mut app, clock) = app();
        app.apply(Effect::Activate(MenuTarget::Node(0)));
        assert!(app.is_animating());

        assert!(app.update(&Msg::Tick));
        assert_eq!(app.panel.nodes()[0].height(), HeightValue::Px(2));

        clock.advance(Duration::from_millis(300));
        app.update(&Msg::Tick);
        assert_eq!(app.panel.nodes()[0].height(), HeightValue::Auto);
        assert!(!app.is_animating());
    }

    #[test]
    fn selected_item_follows_the_deepest_tier() {
        let (mut app, _) = app();
        assert!(app.selected_item().is_none());

        app.apply(Effect::Activate(MenuTarget::Node(0)));
        assert_eq!(app.selected_item().map(|item| item.link.as_str()), Some("/production"));

        app.apply(Effect::Activate(MenuTarget::Child { node: 0, child: 1 }));
        app.apply(Effect::Activate(MenuTarget::Leaf { node: 0, child: 1, leaf: 1 }));
        assert_eq!(app.selected_item().map(|item| item.link.as_str()), Some("/production/lines/2"));

        app.apply(Effect::ResetSelection);
        assert!(app.selected_item().is_none());
        assert_eq!(app.panel.open_count(app.store.path()), 0);
    }

    #[test]
    fn hiding_the_panel_moves_focus_to_the_top_bar() {
        let (mut app, _) = app();
        assert!(app.menu.container_focus.get());

        app.apply(Effect::TogglePanel);
        assert!(!app.panel.is_visible());
        assert!(app.top_bar.toggle_focus.get());

        app.apply(Effect::SetPanelOpen(true));
        app.apply(Effect::SetPanelOpen(true));
        assert!(app.panel.is_visible());
    }

    #[test]
    fn resize_switches_between_rail_and_overlay() {
        let (mut app, _) = app();
        app.update(&Msg::Resize(140, 40));
        assert!(!app.panel.is_overlay());
        app.update(&Msg::Resize(80, 40));
        assert!(app.panel.shows_scrim());
    }
}
