use anyhow::Result;
use clap::Parser;
use intellitrack::{cli, config, logging, runner};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init_logging(&args.log_level);
    let settings = config::Settings::from_args(&args)?;
    runner::run(settings).await
}
