//! Locating configuration files.

use std::path::PathBuf;

use directories::ProjectDirs;

/// File name looked up when no `--config` is given.
const CONFIG_FILE: &str = "nameplate.yaml";

/// The first default configuration file that exists: `./nameplate.yaml`,
/// then the user config directory.
pub fn default_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE);
    let user = ProjectDirs::from("io", "nameplate", "nameplate")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE));

    std::iter::once(local)
        .chain(user)
        .find(|path| path.is_file())
}
