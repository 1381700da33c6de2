use clap::Parser;

/// Reveals champion-select participants' recent form in chat and in an overlay.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// Base URL of the local client API.
    #[clap(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Websocket endpoint of the session state channel.
    #[clap(long, value_name = "URL", env = "CHAMP_REVEAL_WEBSOCKET_URL")]
    pub websocket_url: Option<String>,

    /// Do not post the summaries to the champion-select chat.
    #[clap(long = "no-textchat", action)]
    pub no_textchat: bool,

    /// Do not render the overlay panel.
    #[clap(long = "no-popup", action)]
    pub no_popup: bool,

    /// How long to wait after entering champion select before fetching stats (e.g. "15s", "2s 500ms").
    #[clap(long, value_name = "DURATION")]
    pub settle_delay: Option<String>,

    /// Enables debug logging.
    #[clap(long = "verbose", short, action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(api_url) = &self.api_url {
                cache.insert("api_url".to_string(), api_url.clone().into());
            }
            if let Some(websocket_url) = &self.websocket_url {
                cache.insert("websocket_url".to_string(), websocket_url.clone().into());
            }
            if self.no_textchat {
                cache.insert("textchat".to_string(), false.into());
            }
            if self.no_popup {
                cache.insert("popup".to_string(), false.into());
            }
            if let Some(settle_delay) = &self.settle_delay {
                cache.insert("settle_delay".to_string(), settle_delay.clone().into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();
    let data_dir_path = crate::get_data_dir().display().to_string();

    format!(
        "{}

Authors: {author}

Config directory: {config_dir_path}
Data directory: {data_dir_path}",
        clap::crate_version!()
    )
}
