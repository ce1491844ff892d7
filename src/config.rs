use anyhow::Context;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub struct Config {
    pub listings_url: Option<String>,
    pub listings_file: Option<PathBuf>,
    pub favorites_dir: PathBuf,
    pub viewer_id: Option<String>,
    pub keyword: Option<String>,
    pub http_timeout: Duration,
}

impl Config {
    /// Read settings from the process environment, after loading a `.env`
    /// file from the working directory if one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            listings_url: optional("LISTINGS_URL"),
            listings_file: optional("LISTINGS_FILE").map(PathBuf::from),
            favorites_dir: optional("FAVORITES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".favorites")),
            viewer_id: optional("VIEWER_ID"),
            keyword: optional("KEYWORD"),
            http_timeout: Duration::from_secs(seconds("HTTP_TIMEOUT_SECS", 30)?),
        })
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn seconds(name: &str, default: u64) -> anyhow::Result<u64> {
    match optional(name) {
        Some(v) => v.trim().parse().with_context(|| format!("{name} must be a number of seconds")),
        None => Ok(default),
    }
}
