//! # Tiernav Engine
//!
//! Navigation state for a hierarchical, collapsible menu: one shared
//! [`SelectionStore`], a [`MenuNode`] per tier-1 section with its measured
//! height animation, the [`MenuPanel`] that owns the nodes and its own
//! visibility, and the breadcrumb derived from the store.
//!
//! Nothing here renders or sleeps. Timing goes through a [`Scheduler`], so a
//! host drives frames from its event loop and tests step a [`ManualClock`].
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use tiernav_engine::{FrameScheduler, HeightValue, ManualClock, MenuPanel, SelectionStore, breadcrumb};
//! use tiernav_types::{MenuDataset, MenuItem, MenuTarget};
//!
//! let dataset = MenuDataset::new(
//!     "신성델타테크",
//!     vec![MenuItem::new("생산관리", "/production").with_children(vec![MenuItem::new("일일리포트", "/production/daily")])],
//! );
//! let clock = ManualClock::new();
//! let mut scheduler = FrameScheduler::new(clock.clone());
//! let mut store = SelectionStore::default();
//! let mut panel = MenuPanel::new(&dataset);
//!
//! panel.activate(MenuTarget::Node(0), &mut store, &mut scheduler);
//! panel.advance(&mut scheduler);
//! assert_eq!(panel.nodes()[0].height(), HeightValue::Px(1));
//!
//! clock.advance(Duration::from_millis(300));
//! panel.advance(&mut scheduler);
//! assert_eq!(panel.nodes()[0].height(), HeightValue::Auto);
//!
//! panel.activate(MenuTarget::Child { node: 0, child: 0 }, &mut store, &mut scheduler);
//! assert_eq!(breadcrumb(store.path()), "생산관리 / 일일리포트");
//! ```
//!
//! ## Architecture
//!
//! - **`store`**: the selection path plus the service title, with a revision
//!   counter for change detection
//! - **`schedule`**: clocks and the frame/timeout queue
//! - **`animation`**: the two-phase height state machine
//! - **`node`**: activation rules and open/close edge handling per section
//! - **`panel`**: the node list, visibility, overlay breakpoint and task
//!   dispatch
//! - **`breadcrumb`**: trail formatting and the service gate

pub mod animation;
pub mod breadcrumb;
pub mod node;
pub mod panel;
pub mod schedule;
pub mod store;

pub use animation::{AnimationPhase, ContentMeasure, FixedMeasure, HeightAnimation, HeightTween, HeightValue};
pub use breadcrumb::{BreadcrumbGate, Crumb, CrumbKind, breadcrumb, crumbs};
pub use node::{Activation, MenuNode};
pub use panel::MenuPanel;
pub use schedule::{Clock, FrameScheduler, ManualClock, ScheduledTask, Scheduler, SystemClock, TaskHandle, TaskKind};
pub use store::SelectionStore;
