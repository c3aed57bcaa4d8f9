use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;

use crate::view::tag_groups::{default_tag_groups, TagGroup};

pub const CFG_FILE_NAME: &str = "blog-index.toml";

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Paths {
    /// Relative to the blog root.
    pub output_file: PathBuf,
    /// Relative to the blog root. Never scanned for posts.
    pub exclude: Vec<PathBuf>,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            output_file: PathBuf::from("README.md"),
            exclude: vec![],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Site {
    pub title: String,
    pub intro: String,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            title: "Tech Notes".to_string(),
            intro: "Notes, write-ups and post-mortems about software, infrastructure and the \
                    tools in between. The index below is regenerated on every change."
                .to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub site: Site,
    pub log: Option<Log>,
    pub tag_groups: Vec<TagGroup>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            paths: Paths::default(),
            site: Site::default(),
            log: None,
            tag_groups: default_tag_groups(),
        }
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    }
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content).map_err(|e| {
        io::Error::new(e.kind(), format!("{} ({})", e, cfg_path.display()))
    })
}
