//! The menu panel: an ordered set of sections plus the panel's own
//! visibility.
//!
//! The panel is either a pinned rail (wide viewports) or an overlay with a
//! scrim behind it (narrow viewports). Visibility is independent of the
//! selection store; the top bar and the scrim drive it.

use std::time::Duration;

use tiernav_types::{MenuDataset, MenuItem, MenuTarget, SelectionPath};
use tracing::debug;

use crate::node::{Activation, MenuNode};
use crate::schedule::{FrameScheduler, Scheduler};
use crate::store::SelectionStore;

#[derive(Debug, Clone)]
pub struct MenuPanel {
    title: String,
    nodes: Vec<MenuNode>,
    visible: bool,
    overlay_breakpoint: u16,
    viewport_width: u16,
    synced_revision: Option<u64>,
}

impl MenuPanel {
    pub fn new(dataset: &MenuDataset) -> Self {
        let transition = dataset.settings.transition();
        let nodes = dataset
            .data
            .iter()
            .cloned()
            .enumerate()
            .map(|(index, item)| MenuNode::new(index, item, transition))
            .collect();
        Self {
            title: dataset.title.clone(),
            nodes,
            visible: true,
            overlay_breakpoint: dataset.settings.overlay_breakpoint,
            viewport_width: u16::MAX,
            synced_revision: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn nodes(&self) -> &[MenuNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&MenuNode> {
        self.nodes.get(index)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sets visibility. Setting the current value again does nothing.
    pub fn toggle_panel(&mut self, open: bool) {
        if self.visible != open {
            debug!(open, "menu panel visibility changed");
        }
        self.visible = open;
    }

    /// Inverts visibility, as the top bar button does.
    pub fn flip(&mut self) {
        self.toggle_panel(!self.visible);
    }

    /// Scrim click or close affordance: always closes.
    pub fn dismiss(&mut self) {
        self.toggle_panel(false);
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        self.viewport_width = width;
    }

    pub fn is_overlay(&self) -> bool {
        self.viewport_width < self.overlay_breakpoint
    }

    pub fn shows_scrim(&self) -> bool {
        self.visible && self.is_overlay()
    }

    /// The dataset item a row points at.
    pub fn item_at(&self, target: MenuTarget) -> Option<&MenuItem> {
        let node = self.nodes.get(target.node_index())?.item();
        match target {
            MenuTarget::Node(_) => Some(node),
            MenuTarget::Child { child, .. } => node.children.get(child),
            MenuTarget::Leaf { child, leaf, .. } => node.children.get(child)?.children.get(leaf),
        }
    }

    /// Routes a row activation to its node, then propagates the store.
    pub fn activate(&mut self, target: MenuTarget, store: &mut SelectionStore, scheduler: &mut dyn Scheduler) -> Activation {
        let Some(node) = self.nodes.get_mut(target.node_index()) else {
            return Activation::Ignored;
        };
        let outcome = match target {
            MenuTarget::Node(_) => node.activate(store),
            MenuTarget::Child { child, .. } => node.activate_child(child, store),
            MenuTarget::Leaf { child, leaf, .. } => node.activate_leaf(child, leaf, store),
        };
        self.sync(store, scheduler);
        outcome
    }

    /// Lets every node observe the store if it changed since the last sync.
    /// Returns `true` when any node crossed an open/close edge.
    pub fn sync(&mut self, store: &SelectionStore, scheduler: &mut dyn Scheduler) -> bool {
        if self.synced_revision == Some(store.revision()) {
            return false;
        }
        self.synced_revision = Some(store.revision());
        let path = store.path();
        let mut changed = false;
        for node in &mut self.nodes {
            changed |= node.sync(path, scheduler);
        }
        changed
    }

    /// Runs every task due on this frame. Returns `true` when any node
    /// changed its committed height or phase.
    pub fn advance(&mut self, scheduler: &mut FrameScheduler) -> bool {
        let mut changed = false;
        for task in scheduler.take_due() {
            if let Some(node) = self.nodes.get_mut(task.owner) {
                changed |= node.on_task(&task, scheduler);
            }
        }
        changed
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        self.nodes.iter().any(|node| node.is_animating(now))
    }

    pub fn open_count(&self, path: &SelectionPath) -> usize {
        self.nodes.iter().filter(|node| node.is_open(path)).count()
    }

    /// Rows currently on screen, top to bottom: each section header followed
    /// by however much of its body the animation shows.
    pub fn visible_targets(&self, now: Duration) -> Vec<MenuTarget> {
        let mut targets = Vec::new();
        for node in &self.nodes {
            targets.push(MenuTarget::Node(node.index()));
            let shown = usize::from(node.visible_rows(now));
            targets.extend(node.content_rows().into_iter().take(shown));
        }
        targets
    }

    /// Cancels every pending task of every node.
    pub fn dispose(&mut self, scheduler: &mut dyn Scheduler) {
        for node in &mut self.nodes {
            node.dispose(scheduler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Clock, ManualClock};

    fn dataset() -> MenuDataset {
        MenuDataset::new(
            "신성델타테크",
            vec![
                MenuItem::new("생산관리", "/production").with_children(vec![
                    MenuItem::new("일일리포트", "/production/daily"),
                    MenuItem::new("주간리포트", "/production/weekly"),
                ]),
                MenuItem::new("품질관리", "/quality").with_children(vec![MenuItem::new("불량현황", "/quality/defects")]),
                MenuItem::new("설정", "/settings"),
            ],
        )
    }

    #[test]
    fn toggle_is_idempotent_and_scrim_always_closes() {
        let mut panel = MenuPanel::new(&dataset());
        assert!(panel.is_visible());
        panel.toggle_panel(true);
        assert!(panel.is_visible());

        panel.flip();
        assert!(!panel.is_visible());
        panel.dismiss();
        assert!(!panel.is_visible());

        panel.toggle_panel(true);
        panel.dismiss();
        assert!(!panel.is_visible());
    }

    #[test]
    fn scrim_only_below_the_breakpoint() {
        let mut panel = MenuPanel::new(&dataset());
        panel.set_viewport_width(140);
        assert!(!panel.is_overlay());
        assert!(!panel.shows_scrim());

        panel.set_viewport_width(80);
        assert!(panel.is_overlay());
        assert!(panel.shows_scrim());

        panel.toggle_panel(false);
        assert!(!panel.shows_scrim());
    }

    #[test]
    fn visible_targets_follow_the_animation() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::new(clock.clone());
        let mut store = SelectionStore::default();
        let mut panel = MenuPanel::new(&dataset());
        panel.sync(&store, &mut scheduler);
        assert_eq!(panel.visible_targets(clock.now()).len(), 3);

        panel.activate(MenuTarget::Node(0), &mut store, &mut scheduler);
        panel.advance(&mut scheduler);
        clock.advance(Duration::from_millis(300));
        panel.advance(&mut scheduler);

        let targets = panel.visible_targets(clock.now());
        assert_eq!(targets.len(), 5);
        assert_eq!(targets[1], MenuTarget::Child { node: 0, child: 0 });
        assert!(!panel.is_animating(clock.now()));
    }

    #[test]
    fn item_at_resolves_every_tier() {
        let panel = MenuPanel::new(&dataset());
        assert_eq!(panel.item_at(MenuTarget::Node(2)).map(|item| item.link.as_str()), Some("/settings"));
        assert_eq!(
            panel.item_at(MenuTarget::Child { node: 0, child: 1 }).map(|item| item.title.as_str()),
            Some("주간리포트")
        );
        assert!(panel.item_at(MenuTarget::Leaf { node: 0, child: 0, leaf: 0 }).is_none());
        assert!(panel.item_at(MenuTarget::Node(9)).is_none());
    }

    #[test]
    fn sync_skips_unchanged_revisions() {
        let mut scheduler = FrameScheduler::new(ManualClock::new());
        let mut store = SelectionStore::default();
        let mut panel = MenuPanel::new(&dataset());
        store.set_main("품질관리");
        assert!(panel.sync(&store, &mut scheduler));
        assert!(!panel.sync(&store, &mut scheduler));
        assert_eq!(panel.open_count(store.path()), 1);
    }
}
