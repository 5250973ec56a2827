use std::env;
use std::path::PathBuf;

use folio::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let mut candidates = vec![];
    if let Some(exe_dir) = env::current_exe().ok().and_then(|p| p.parent().map(PathBuf::from)) {
        candidates.push(exe_dir);
    }
    if let Ok(cur_dir) = env::current_dir() {
        candidates.push(cur_dir);
    }
    if let Some(cfg_dir) = dirs::config_dir() {
        candidates.push(cfg_dir);
    }

    candidates.into_iter()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

fn default_log_location() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("Folio").join("log").join("server.log"))
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err("Could not find Folio configuration".to_string()),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let mut config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    if let Some(mut log) = config.log {
        log.location = log.location.or_else(default_log_location);
        match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled without a file location. Using stdout"),
        }
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}
