use champ_reveal::{
    init_errors,
    logging,
    App,
    Args,
};
use clap::Parser;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    let args = Args::parse();
    logging::log_init(args.verbose)?;

    App::new(args)?.run().await
}
