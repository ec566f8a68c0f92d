//! Environment overrides for Settings.
//!
//! Kept in its own test binary: it mutates process environment variables.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use orgtree::config::{local_config_path, Settings};
use orgtree::domain::UnresolvedPolicy;

#[test]
fn given_env_vars_when_load_then_override_local_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "data_file = \"/local/org.json\"\nunresolved = \"reject\"\n",
    )
    .unwrap();

    std::env::set_var("ORGTREE_DATA_FILE", "/env/org.json");
    std::env::set_var("ORGTREE_UNRESOLVED", "skip");
    let settings = Settings::load(Some(dir.path()));
    std::env::remove_var("ORGTREE_DATA_FILE");
    std::env::remove_var("ORGTREE_UNRESOLVED");

    let settings = settings.expect("load settings");
    assert_eq!(settings.data_file, Some(PathBuf::from("/env/org.json")));
    assert_eq!(settings.unresolved, UnresolvedPolicy::Skip);
}
