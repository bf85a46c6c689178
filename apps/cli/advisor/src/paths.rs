//! Default locations for config and log files.

use std::path::PathBuf;

const APP_DIR_NAME: &str = "liquor-advisor";
const LOG_DIR_NAME: &str = "logs";

/// `{config_dir}/liquor-advisor`, or the working directory if the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `{data_local_dir}/liquor-advisor/logs`, or `./logs`.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_DIR_NAME)
}
