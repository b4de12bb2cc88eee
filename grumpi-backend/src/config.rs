use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const DATA_DIR: &str = "GRUMPI_DATA_DIR";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 3000;
    pub const DATA_DIR: &str = "./data";
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var(env_vars::PORT)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults::PORT);

        let data_dir = env::var(env_vars::DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(defaults::DATA_DIR));

        Config { port, data_dir }
    }

    /// Path of the trainer table file inside the data directory.
    pub fn trainers_file(&self) -> PathBuf {
        self.data_dir.join("trainers.json")
    }

    /// Path of the read-only combat item catalog file.
    pub fn combat_items_file(&self) -> PathBuf {
        self.data_dir.join("combat_items.json")
    }
}
