#[macro_use]
extern crate tracing;

mod app_config;
mod args;

use app_config::AppConfig;
pub use app_config::{
    get_config_dir,
    get_data_dir,
};
pub use args::Args;
use eyre::{
    eyre,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    collections::HashMap,
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten, skip_serializing)]
    pub app_config: AppConfig,
    /// Base URL of the local client API.
    pub api_url: Url,
    /// Websocket endpoint of the session state channel. Published by the hosting
    /// environment; the observer cannot start without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub websocket_url: Option<Url>,
    /// Post one summary line per player into the champion-select chat.
    #[serde(default = "enabled")]
    pub textchat: bool,
    /// Render the overlay panel.
    #[serde(default = "enabled")]
    pub popup: bool,
    /// Humantime duration waited after entering champion select before the roster is queried.
    #[serde(default = "default_settle_delay")]
    pub settle_delay: String,
    /// Last match index requested from the history endpoint (the first is always 0).
    #[serde(default = "default_history_end_index")]
    pub history_end_index: u32,
    #[serde(default = "default_overlay_file")]
    pub overlay_file: String,
}

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

fn enabled() -> bool {
    true
}

fn default_settle_delay() -> String {
    "15s".to_string()
}

fn default_history_end_index() -> u32 {
    20
}

fn default_overlay_file() -> String {
    "overlay.html".to_string()
}

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl config::Source for Config {
    fn clone_into_box(&self) -> Box<dyn config::Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut cache = HashMap::<String, config::Value>::new();
        cache.insert("api_url".to_string(), self.api_url.to_string().into());
        if let Some(url) = &self.websocket_url {
            cache.insert("websocket_url".to_string(), url.to_string().into());
        }
        cache.insert("textchat".to_string(), self.textchat.into());
        cache.insert("popup".to_string(), self.popup.into());
        cache.insert("settle_delay".to_string(), self.settle_delay.clone().into());
        cache.insert("history_end_index".to_string(), (self.history_end_index as u64).into());
        cache.insert("overlay_file".to_string(), self.overlay_file.clone().into());
        Ok(cache)
    }
}

impl Config {
    /// Layers the embedded defaults, `config.yaml` in the config directory, `CHAMP_REVEAL_*`
    /// environment variables and finally the command line arguments.
    pub fn new(args: Args) -> Result<Self, config::ConfigError> {
        Self::build(args, true)
    }

    /// Like [`Config::new`], but never fails: if the user's configuration cannot be read the
    /// defaults (chat and overlay both enabled) are used together with the arguments.
    pub fn load(args: Args) -> Self {
        match Self::build(args.clone(), true) {
            Ok(config) => config,
            Err(err) => {
                warn!("Unable to load configuration, falling back to defaults: {err}");
                Self::build(args, false).unwrap_or_default()
            }
        }
    }

    fn build(args: Args, with_user_sources: bool) -> Result<Self, config::ConfigError> {
        let data_dir = get_data_dir();
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?;

        builder = builder.add_source(Config::default());

        if with_user_sources {
            let config_files = [("config.yaml", config::FileFormat::Yaml)];

            for (file, format) in &config_files {
                let source = config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false);
                builder = builder.add_source(source);
            }

            builder = builder.add_source(
                config::Environment::with_prefix(app_config::PROJECT_NAME.as_str())
                    .prefix_separator("_")
                    .try_parsing(true),
            );
        }

        builder = builder.add_source(args);

        let cfg: Self = builder.build()?.try_deserialize()?;

        Ok(cfg)
    }

    pub fn settle_delay(&self) -> Result<Duration> {
        humantime::parse_duration(&self.settle_delay)
            .map_err(|e| eyre!("Invalid settle delay '{}': {}", self.settle_delay, e))
    }

    pub fn data_dir(&self) -> &Path {
        &self.app_config.data_dir
    }

    pub fn overlay_path(&self) -> PathBuf {
        self.app_config.data_dir.join(&self.overlay_file)
    }

    /// Whether any output sink is enabled at all.
    pub fn has_sinks(&self) -> bool {
        self.textchat || self.popup
    }
}
