use bassfit::{Args, init_logging, run};
use clap::Parser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let _log_guard = init_logging(&args.log_level, args.log_file.as_deref())?;

    run(&args)?;

    tracing::info!("Run finished");
    Ok(())
}
