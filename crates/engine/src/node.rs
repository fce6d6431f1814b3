//! Runtime state of one tier-1 menu section.
//!
//! Whether a node is open is never stored: it is `store.main == title`,
//! evaluated whenever someone asks. The node only remembers the last value it
//! *observed* so [`MenuNode::sync`] can run the open/close entry actions once
//! per edge.

use std::time::Duration;

use tiernav_types::{MenuItem, MenuTarget, SelectionPath};
use tracing::debug;

use crate::animation::{AnimationPhase, FixedMeasure, HeightAnimation, HeightValue};
use crate::schedule::{ScheduledTask, Scheduler};
use crate::store::SelectionStore;

/// Outcome of a user activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The activation wrote to the store.
    Claimed,
    /// The activation was swallowed (already open, or not reachable).
    Ignored,
}

#[derive(Debug, Clone)]
pub struct MenuNode {
    index: usize,
    item: MenuItem,
    observed_open: bool,
    focus_flag: bool,
    open_child_key: String,
    animation: HeightAnimation,
}

impl MenuNode {
    pub fn new(index: usize, item: MenuItem, transition: Duration) -> Self {
        Self {
            index,
            item,
            observed_open: false,
            focus_flag: false,
            open_child_key: String::new(),
            animation: HeightAnimation::new(index, transition),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn title(&self) -> &str {
        &self.item.title
    }

    pub fn is_open(&self, path: &SelectionPath) -> bool {
        path.main == self.item.title
    }

    /// Chevron indicator; mirrors the open state as of the last sync.
    pub fn focus_flag(&self) -> bool {
        self.focus_flag
    }

    /// Title of the child whose own children are expanded, or `""`.
    pub fn open_child_key(&self) -> &str {
        &self.open_child_key
    }

    pub fn height(&self) -> HeightValue {
        self.animation.height()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.animation.phase()
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        self.animation.is_animating(now)
    }

    /// Rows of the collapsible body in display order.
    pub fn content_rows(&self) -> Vec<MenuTarget> {
        let mut rows = Vec::new();
        for (child_index, child) in self.item.children.iter().enumerate() {
            rows.push(MenuTarget::Child {
                node: self.index,
                child: child_index,
            });
            if child.has_children() && child.title == self.open_child_key {
                rows.extend((0..child.children.len()).map(|leaf| MenuTarget::Leaf {
                    node: self.index,
                    child: child_index,
                    leaf,
                }));
            }
        }
        rows
    }

    pub fn intrinsic_rows(&self) -> u16 {
        u16::try_from(self.content_rows().len()).unwrap_or(u16::MAX)
    }

    /// Body rows drawn at `now`, never more than the content has.
    pub fn visible_rows(&self, now: Duration) -> u16 {
        let intrinsic = self.intrinsic_rows();
        self.animation.displayed_rows(now, intrinsic).min(intrinsic)
    }

    /// Current layout measurement of the body.
    pub fn measure(&self, now: Duration) -> FixedMeasure {
        let intrinsic = self.intrinsic_rows();
        FixedMeasure {
            scroll_height: intrinsic,
            rendered_height: self.animation.displayed_rows(now, intrinsic),
        }
    }

    /// Claims the tier-1 slot unless this node already holds it.
    ///
    /// Re-activating the open node is swallowed: a section only closes when a
    /// sibling opens or the store is reset.
    pub fn activate(&mut self, store: &mut SelectionStore) -> Activation {
        if self.is_open(store.path()) {
            debug!(title = %self.item.title, "section already open; ignoring activation");
            return Activation::Ignored;
        }
        store.set_main(self.item.title.clone());
        self.open_child_key.clear();
        Activation::Claimed
    }

    /// Selects a tier-2 row. Rows with children also become the expanded
    /// child. Re-activating the expanded child is swallowed only while it is
    /// still the selected `sub`.
    pub fn activate_child(&mut self, child: usize, store: &mut SelectionStore) -> Activation {
        if !self.is_open(store.path()) {
            return Activation::Ignored;
        }
        let Some(child_item) = self.item.children.get(child) else {
            return Activation::Ignored;
        };
        if child_item.has_children() {
            if self.open_child_key == child_item.title && store.sub() == child_item.title {
                debug!(title = %child_item.title, "subsection already expanded; ignoring activation");
                return Activation::Ignored;
            }
            self.open_child_key = child_item.title.clone();
        }
        store.set_sub(child_item.title.clone());
        Activation::Claimed
    }

    /// Selects a tier-3 row under the expanded child.
    pub fn activate_leaf(&mut self, child: usize, leaf: usize, store: &mut SelectionStore) -> Activation {
        if !self.is_open(store.path()) {
            return Activation::Ignored;
        }
        let Some(child_item) = self.item.children.get(child) else {
            return Activation::Ignored;
        };
        if child_item.title != self.open_child_key {
            return Activation::Ignored;
        }
        let Some(leaf_item) = child_item.children.get(leaf) else {
            return Activation::Ignored;
        };
        if store.sub() != child_item.title {
            store.set_sub(child_item.title.clone());
        }
        store.set_tertiary(leaf_item.title.clone());
        Activation::Claimed
    }

    /// Re-derives the open state and runs entry actions on an edge.
    ///
    /// Returns `true` when an edge was observed.
    pub fn sync(&mut self, path: &SelectionPath, scheduler: &mut dyn Scheduler) -> bool {
        let open = self.is_open(path);
        if open == self.observed_open {
            return false;
        }
        self.observed_open = open;
        self.focus_flag = open;

        let measure = self.measure(scheduler.now());
        if open {
            self.animation.open(&measure, scheduler);
        } else {
            self.animation.close(&measure, scheduler);
            self.open_child_key.clear();
        }
        debug!(title = %self.item.title, open, "section edge");
        true
    }

    /// Feeds a due scheduler task owned by this node.
    pub fn on_task(&mut self, task: &ScheduledTask, scheduler: &mut dyn Scheduler) -> bool {
        let measure = self.measure(scheduler.now());
        self.animation.on_task(task, &measure, scheduler)
    }

    /// Cancels everything this node has queued.
    pub fn dispose(&mut self, scheduler: &mut dyn Scheduler) {
        self.animation.cancel_pending(scheduler);
    }
}
