//! Configuration and filesystem helpers for tiernav.

pub mod nav_config;
pub mod path_processing;

pub use nav_config::{MENU_PATH_ENV, MenuSource, NavConfigError, builtin_dataset, load_dataset, parse_dataset};
pub use path_processing::{LOG_PATH_ENV, default_log_path, env_path, expand_tilde};
