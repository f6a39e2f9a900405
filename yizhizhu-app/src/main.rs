//! Yizhizhu - Software copyright filing assistant
//!
//! Entry point. It handles:
//! 1. CLI argument parsing (--config, --workspace)
//! 2. Loading the settings file
//! 3. Launching the GTK4/Libadwaita main window

use anyhow::Result;
use clap::Parser;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use yizhizhu_app::ui;
use yizhizhu_common::config::{Settings, SettingsService};
use yizhizhu_common::paths;

/// Yizhizhu - assemble the paperwork for a software copyright registration
#[derive(Parser, Debug)]
#[command(name = "yizhizhu")]
#[command(about = "Software copyright filing assistant")]
#[command(version)]
struct Args {
    /// Settings file (default: config/config.json in the working directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Open the code browser at this directory
    #[arg(long, value_name = "DIR")]
    workspace: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();

    info!("Yizhizhu v{}", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.unwrap_or_else(paths::app::config_path);
    let settings = match SettingsService::load(&config_path) {
        Ok(service) => service,
        Err(e) => {
            // Keep running with defaults; saving will report the problem again
            warn!("Could not prepare settings file: {}", e);
            SettingsService::in_memory(config_path, Settings::default())
        }
    };

    let workspace = args.workspace.filter(|dir| {
        let ok = dir.is_dir();
        if !ok {
            warn!("Ignoring --workspace {}: not a directory", dir.display());
        }
        ok
    });

    run_gui(settings, workspace)
}

fn run_gui(settings: SettingsService, workspace: Option<PathBuf>) -> Result<()> {
    if std::env::var("DISPLAY").is_err() && std::env::var("WAYLAND_DISPLAY").is_err() {
        eprintln!("Error: No display server detected (X11 or Wayland).");
        eprintln!("Yizhizhu is a desktop application and needs a graphical session.");
        std::process::exit(1);
    }

    if let Err(e) = gtk::init() {
        eprintln!("Failed to initialize GTK4: {}", e);
        eprintln!("Please ensure GTK4 is installed on your system.");
        std::process::exit(1);
    }

    if let Err(e) = adw::init() {
        eprintln!("Failed to initialize Libadwaita: {}", e);
        eprintln!("Please ensure Libadwaita is installed on your system.");
        std::process::exit(1);
    }

    let app = ui::app::YizhizhuApplication::new(Rc::new(RefCell::new(settings)), workspace);
    let exit_code = app.run();

    std::process::exit(exit_code.into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["yizhizhu"]).unwrap();
        assert!(args.config.is_none());
        assert!(args.workspace.is_none());
    }

    #[test]
    fn test_config_and_workspace_flags() {
        let args = Args::try_parse_from([
            "yizhizhu",
            "--config",
            "/tmp/yzz.json",
            "--workspace",
            "/tmp/src",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/yzz.json")));
        assert_eq!(args.workspace, Some(PathBuf::from("/tmp/src")));
    }
}
