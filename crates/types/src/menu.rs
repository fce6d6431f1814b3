//! Menu configuration models.
//!
//! A [`MenuDataset`] is what a host hands to the navigation panel: an ordered
//! tree of [`MenuItem`]s plus the presentation settings that go with it. The
//! tree is read-only input; nothing in the navigation core mutates it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::StaleSelectionPolicy;

/// One entry in the navigation tree.
///
/// Tier-1 items are rendered as collapsible sections, their `children` as
/// subsections and the grandchildren as leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    #[serde(default)]
    pub link: String,
    /// Icon identifier (for example `factory` or `barChart`).
    #[serde(default, rename = "icon", alias = "iconType", alias = "icon_type")]
    pub icon_type: String,
    #[serde(default, rename = "sections", alias = "children")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            icon_type: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon_type: impl Into<String>) -> Self {
        self.icon_type = icon_type.into();
        self
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn icon(&self) -> IconKind {
        IconKind::from_icon_type(&self.icon_type)
    }
}

/// Known icon identifiers and their terminal glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    BarChart,
    BarChartSquare,
    CheckList,
    LinkBreak,
    Setting,
    Monitor,
    Factory,
    None,
}

impl IconKind {
    pub fn from_icon_type(icon_type: &str) -> Self {
        match icon_type {
            "barChart" => Self::BarChart,
            "barChart2" => Self::BarChartSquare,
            "checkFill" => Self::CheckList,
            "LinkSimpleBreak" => Self::LinkBreak,
            "setting" => Self::Setting,
            "monitor" => Self::Monitor,
            "factory" => Self::Factory,
            _ => Self::None,
        }
    }

    pub fn glyph(self) -> Option<&'static str> {
        match self {
            Self::BarChart => Some("▥"),
            Self::BarChartSquare => Some("▦"),
            Self::CheckList => Some("☑"),
            Self::LinkBreak => Some("⛓"),
            Self::Setting => Some("⚙"),
            Self::Monitor => Some("▭"),
            Self::Factory => Some("⌂"),
            Self::None => None,
        }
    }
}

/// Presentation settings shipped alongside a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSettings {
    /// Expand/collapse transition length; also the settle delay.
    pub transition_ms: u64,
    /// Terminal width (columns) below which the panel becomes an overlay.
    pub overlay_breakpoint: u16,
    /// Panel width in columns.
    pub panel_width: u16,
    pub stale_selection: StaleSelectionPolicy,
    /// When set, the breadcrumb is only shown while the service title matches.
    pub breadcrumb_service: Option<String>,
    /// Service title the host sets at startup.
    pub service_title: Option<String>,
    /// Label shown at the right edge of the top bar.
    pub user_label: String,
    /// Preferred theme identifier.
    pub theme: Option<String>,
}

impl NavSettings {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            transition_ms: 300,
            overlay_breakpoint: 100,
            panel_width: 32,
            stale_selection: StaleSelectionPolicy::default(),
            breadcrumb_service: None,
            service_title: None,
            user_label: "관리자".to_string(),
            theme: None,
        }
    }
}

/// A complete menu configuration for one panel instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDataset {
    /// Dataset title, shown in the panel header.
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub settings: NavSettings,
    pub data: Vec<MenuItem>,
}

impl MenuDataset {
    pub fn new(title: impl Into<String>, data: Vec<MenuItem>) -> Self {
        Self {
            title: title.into(),
            settings: NavSettings::default(),
            data,
        }
    }

    /// Titles of tier-1 items that appear more than once.
    ///
    /// Open state is keyed by title, so duplicates open together.
    pub fn duplicate_titles(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.data.len());
        let mut duplicates: Vec<&str> = Vec::new();
        for item in &self.data {
            let title = item.title.as_str();
            if seen.contains(&title) {
                if !duplicates.contains(&title) {
                    duplicates.push(title);
                }
            } else {
                seen.push(title);
            }
        }
        duplicates
    }
}
