use champ_reveal_config::get_data_dir;
use eyre::{
    Context as _,
    Result,
};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt,
    prelude::*,
    EnvFilter,
};

lazy_static::lazy_static! {
    static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }))
}

/// Logs to stderr and to `<data dir>/champ-reveal.log`. `RUST_LOG` takes precedence over `verbose`.
pub fn log_init(verbose: bool) -> Result<()> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory).context("Failed to create directory")?;
    let log_path = directory.join(LOG_FILE.as_str());
    let log_file =
        std::fs::File::create(&log_path).with_context(|| format!("Failed to create log file {log_path:?}"))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter(verbose)))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false)
                .with_filter(filter(verbose)),
        )
        .with(tracing_error::ErrorLayer::default())
        .try_init()
        .context("Failed to initialize tracing subscriber")
}
