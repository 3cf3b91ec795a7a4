use anyhow::{anyhow, Context, Result};
use ftail::Ftail;
use log::{LevelFilter, info};

const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Console gets warnings (or info when verbose), the state-dir log file gets
/// everything from info up.
pub fn init_logger(verbose: bool) -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix(PKG_NAME);
    let logs_file = xdg_dirs
        .place_state_file(format!("{PKG_NAME}.log"))
        .context("Could not create log directory")?;

    let console_level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    Ftail::new()
        .console(console_level)
        .single_file(&logs_file, true, LevelFilter::Info)
        .init()
        .map_err(|e| anyhow!("Could not initialize logger: {}", e))?;

    info!("Logging to {}", logs_file.display());
    Ok(())
}
