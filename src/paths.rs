//! Path resolution for itemdesk directories.
//!
//! Provides XDG-compliant data paths for the default database location.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "itemdesk";
const DB_FILE: &str = "itemdesk.db";

/// Get XDG-compliant data directory for itemdesk.
///
/// Uses `$XDG_DATA_HOME/itemdesk`, falling back to
/// `$HOME/.local/share/itemdesk`. Without either variable the directory is
/// resolved relative to the working directory.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|_| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Get database file path (data_dir/itemdesk.db).
pub fn get_db_path() -> PathBuf {
    get_data_dir().join(DB_FILE)
}
