use std::sync::OnceLock;

use camino::{Utf8Path, Utf8PathBuf};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{bug_msg, ConfigError};

pub type SharedConfig = RwLock<Config>;

// this will be initialized by the app itself
pub static CONFIG: OnceLock<SharedConfig> = OnceLock::new();

/// Where the config lives, relative to the data directory.
pub const CONFIG_FILE: &str = "shared_prefs/config.toml";

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Path to the app's data directory. The catalog database lives here.
    pub data_dir: Utf8PathBuf,

    /// Whether the initial destinations should be added when the catalog is
    /// empty and hasn't been seeded before.
    #[serde(default = "default_seed_on_first_run")]
    pub seed_on_first_run: bool,

    /// Information for automatically reporting bugs.
    pub bug_report_info: BugReportInfo,
}

fn default_seed_on_first_run() -> bool {
    true
}

impl Config {
    pub fn new(data_dir: Utf8PathBuf, seed_on_first_run: bool, bug_report_info: BugReportInfo) -> Self {
        Self {
            data_dir,
            seed_on_first_run,
            bug_report_info,
        }
    }

    /// Attempts to read a previous `Config` from disk.
    ///
    /// Note that this may fail across versions, requiring new configs.
    #[tracing::instrument]
    pub async fn from_disk(data_dir: &Utf8Path) -> Result<Self, ConfigError> {
        // read the config from disk
        let s = tokio::fs::read_to_string(data_dir.join(CONFIG_FILE))
            .await
            .map_err(ConfigError::ReadFailed)?;

        // parse with `toml` crate
        let s: Self = toml::from_str(s.as_str()).map_err(ConfigError::ParseFailed)?;

        // ensure paths are equal
        if s.data_dir.as_path() != data_dir {
            tracing::error!(
                "loaded config from disk, but it had some weird paths. {}",
                bug_msg().await
            );
            return Err(ConfigError::PathMismatch);
        }

        Ok(s)
    }

    /// Use this EXACTLY ONCE to initialize the config.
    ///
    /// The app should be the only one calling this.
    pub async fn init_config(config: Config) {
        if CONFIG.get().is_none() {
            CONFIG
                .set(RwLock::new(config))
                .expect("the config should not be configured yet");
        } else {
            tracing::error!(
                "attempted to init the config, but the config is already running. {}",
                bug_msg().await
            )
        }
    }

    /// Grabs the config for reading.
    ///
    /// Note that while you're reading the config, others cannot write to it.
    /// DO NOT HOLD ONTO IT FOR A LONG TIME.
    pub async fn read() -> RwLockReadGuard<'static, Config> {
        CONFIG
            .get()
            .expect("should have initialized already")
            .read()
            .await
    }

    pub async fn write() -> RwLockWriteGuard<'static, Config> {
        CONFIG
            .get()
            .expect("should have initialized already")
            .write()
            .await
    }
}

/// Some info to help with bug reporting.
#[derive(Clone, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct BugReportInfo {
    pub app_name: String,
    pub app_version: String,

    /// the device string (e.g. `Google Pixel 6 Pro (raven)`)
    pub device: String,

    pub commit: String,
    pub repo: String,
}
