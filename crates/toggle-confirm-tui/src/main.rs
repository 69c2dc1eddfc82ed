// Toggle confirm terminal demo entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load settings (copying defaults on first run)
// 3. Mount toggles on the screen
// 4. Run the TUI event loop until the user quits

use std::path::PathBuf;

use anyhow::Context;
use toggle_confirm_tui::settings;
use toggle_confirm_tui::tui;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Toggle confirm starting up");

    // 2. Load settings from the given directory, or the current one
    let base_dir = match std::env::args_os().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let settings = settings::load_settings(&base_dir).context("failed to load settings")?;
    info!(
        "Settings loaded from {}: {} toggles",
        base_dir.display(),
        settings.toggles.len()
    );

    // 3. Mount toggles
    let view_state = tui::ViewState::from_settings(&settings);

    // 4. Run the TUI (blocks until the user quits)
    if let Err(e) = tui::run(view_state).await {
        error!("TUI error: {}", e);
        return Err(e);
    }

    info!("Toggle confirm shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("toggle-confirm.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("toggle_confirm_core=info,toggle_confirm_tui=info,warn")
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
