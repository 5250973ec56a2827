use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Site {
    pub name: String,
    pub url: String,
    pub author: String,
    pub job_title: Option<String>,
    pub default_title: String,
    pub default_description: String,
    pub default_keywords: String,
    pub default_og_image: String,
    #[serde(default)]
    pub same_as: Vec<String>,
}

#[derive(Deserialize, Clone)]
pub struct Sanity {
    pub project_id: String,
    pub dataset: String,
    pub api_version: Option<String>,
    #[serde(default)]
    pub use_cdn: bool,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Clone)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
}

#[derive(Deserialize, Clone)]
pub struct Defaults {
    pub initial_visible: Option<u32>,
    pub load_more_step: Option<u32>,
    pub rss_page_size: Option<u32>,
}

#[derive(Deserialize, Clone)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
    /// Rotated files kept on disk, 0 keeps everything.
    pub max_files: Option<usize>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub site: Site,
    pub sanity: Sanity,
    pub paths: Paths,
    pub defaults: Defaults,
    pub server: Server,
    pub log: Option<Log>,
}

pub const DEFAULT_API_VERSION: &str = "2023-05-03";
pub const DEFAULT_INITIAL_VISIBLE: u32 = 4;
pub const DEFAULT_LOAD_MORE_STEP: u32 = 3;
pub const DEFAULT_RSS_PAGE_SIZE: u32 = 20;
pub const DEFAULT_LOG_MAX_FILES: usize = 60;

impl Defaults {
    pub fn initial_visible(&self) -> u32 {
        self.initial_visible.unwrap_or(DEFAULT_INITIAL_VISIBLE)
    }

    pub fn load_more_step(&self) -> u32 {
        // A zero step would leave "load more" offered forever
        self.load_more_step.filter(|step| *step > 0).unwrap_or(DEFAULT_LOAD_MORE_STEP)
    }

    pub fn rss_page_size(&self) -> u32 {
        self.rss_page_size.unwrap_or(DEFAULT_RSS_PAGE_SIZE)
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
    let str_path = path.to_string_lossy();
    Ok(PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir)?,
        public_dir: parse_path(cfg.paths.public_dir)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
