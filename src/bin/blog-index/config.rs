use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use blog_index::config::{read_config, Config, CFG_FILE_NAME};

fn get_config_path(root_dir: &Path) -> Option<PathBuf> {
    if root_dir.join(CFG_FILE_NAME).exists() {
        return Some(root_dir.join(CFG_FILE_NAME));
    }

    let cfg_path = dirs::config_dir()?.join("blog-index").join(CFG_FILE_NAME);
    if cfg_path.exists() {
        return Some(cfg_path);
    }

    None
}

/// Loads the configuration from `cfg_path`, or from the first
/// `blog-index.toml` found in the blog root or the user config dir. Falls
/// back to the defaults when there is none.
pub(crate) fn open_config(root_dir: &Path, cfg_path: Option<PathBuf>) -> Result<(Config, Option<PathBuf>)> {
    let config_path = match cfg_path {
        Some(path) => path,
        None => match get_config_path(root_dir) {
            None => return Ok((Config::default(), None)),
            Some(path) => path,
        },
    };

    let config = read_config(&config_path)
        .with_context(|| format!("Loading configuration from {}", config_path.display()))?;

    Ok((config, Some(config_path)))
}
