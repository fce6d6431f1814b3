//! Menu configuration loading.
//!
//! A menu file is YAML (`.yaml`/`.yml`) or JSON (`.json`) holding a
//! [`MenuDataset`]. The file to use is picked from an explicit path, then the
//! `TIERNAV_MENU_PATH` environment variable, then the built-in sample menu.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tiernav_types::{MenuDataset, MenuItem};
use tracing::{info, warn};

use crate::{env_path, expand_tilde};

/// Environment variable pointing at a menu file.
pub const MENU_PATH_ENV: &str = "TIERNAV_MENU_PATH";

/// Error surfaced when a menu file cannot be loaded.
#[derive(Debug, Error)]
pub enum NavConfigError {
    #[error("failed to read menu file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML menu: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON menu: {0}")]
    Json(#[from] serde_json::Error),
    /// Anything other than `.yaml`, `.yml` or `.json`.
    #[error("unsupported menu file extension {0:?} (expected .yaml, .yml or .json)")]
    UnsupportedExtension(String),
    #[error("menu file {0} has no entries under `data`")]
    MissingDataset(PathBuf),
}

/// Where a dataset came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuSource {
    /// Passed on the command line.
    Path(PathBuf),
    /// Taken from `TIERNAV_MENU_PATH`.
    Env(PathBuf),
    Builtin,
}

impl MenuSource {
    /// Resolves the menu source from an optional explicit path.
    pub fn resolve(explicit: Option<&str>) -> Self {
        if let Some(path) = explicit.map(str::trim).filter(|path| !path.is_empty()) {
            return Self::Path(expand_tilde(path));
        }
        match env_path(MENU_PATH_ENV) {
            Some(path) => Self::Env(path),
            None => Self::Builtin,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Path(path) | Self::Env(path) => Some(path),
            Self::Builtin => None,
        }
    }

    pub fn load(&self) -> Result<MenuDataset, NavConfigError> {
        match self.path() {
            Some(path) => load_dataset(path),
            None => Ok(builtin_dataset()),
        }
    }
}

impl fmt::Display for MenuSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Env(path) => write!(f, "{} (from {MENU_PATH_ENV})", path.display()),
            Self::Builtin => f.write_str("built-in sample"),
        }
    }
}

/// Reads and parses a menu file, choosing the format by extension.
pub fn load_dataset(path: &Path) -> Result<MenuDataset, NavConfigError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let content = fs::read_to_string(path).map_err(|source| NavConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_dataset(&content, &extension)?;
    if dataset.data.is_empty() {
        return Err(NavConfigError::MissingDataset(path.to_path_buf()));
    }

    let duplicates = dataset.duplicate_titles();
    if !duplicates.is_empty() {
        warn!(
            path = %path.display(),
            titles = ?duplicates,
            "menu has duplicate section titles; they will open and close together"
        );
    }
    info!(path = %path.display(), sections = dataset.data.len(), "loaded menu");
    Ok(dataset)
}

/// Parses menu text in the format named by `extension`.
pub fn parse_dataset(content: &str, extension: &str) -> Result<MenuDataset, NavConfigError> {
    match extension {
        "yaml" | "yml" => Ok(serde_yaml::from_str(content)?),
        "json" => Ok(serde_json::from_str(content)?),
        other => Err(NavConfigError::UnsupportedExtension(other.to_string())),
    }
}

/// Sample plant-management menu used when no file is configured.
pub fn builtin_dataset() -> MenuDataset {
    let mut dataset = MenuDataset::new(
        "신성델타테크",
        vec![
            MenuItem::new("생산관리", "/production").with_icon("factory").with_children(vec![
                MenuItem::new("일일리포트", "/production/daily"),
                MenuItem::new("주간리포트", "/production/weekly"),
                MenuItem::new("라인현황", "/production/lines").with_children(vec![
                    MenuItem::new("1라인", "/production/lines/1"),
                    MenuItem::new("2라인", "/production/lines/2"),
                    MenuItem::new("3라인", "/production/lines/3"),
                ]),
            ]),
            MenuItem::new("품질관리", "/quality").with_icon("checkFill").with_children(vec![
                MenuItem::new("불량현황", "/quality/defects"),
                MenuItem::new("검사이력", "/quality/inspections"),
            ]),
            MenuItem::new("실적분석", "/analytics").with_icon("barChart").with_children(vec![
                MenuItem::new("월간실적", "/analytics/monthly"),
                MenuItem::new("설비별실적", "/analytics/equipment"),
            ]),
            MenuItem::new("설비모니터링", "/monitoring").with_icon("monitor").with_children(vec![
                MenuItem::new("가동률", "/monitoring/uptime"),
                MenuItem::new("알람이력", "/monitoring/alarms"),
            ]),
            MenuItem::new("연동관리", "/integration").with_icon("LinkSimpleBreak").with_children(vec![MenuItem::new(
                "ERP 연동",
                "/integration/erp",
            )]),
            MenuItem::new("설정", "/settings").with_icon("setting").with_children(vec![
                MenuItem::new("계정관리", "/settings/accounts"),
                MenuItem::new("코드관리", "/settings/codes"),
            ]),
        ],
    );
    dataset.settings.breadcrumb_service = Some("SCTT".to_string());
    dataset.settings.service_title = Some("SCTT".to_string());
    dataset
}
