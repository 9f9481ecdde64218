//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;
pub mod text;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::debug;

use dekont_core::DekontConfig;

/// `<user config dir>/dekont/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dekont")
        .join("config.json")
}

/// Load the file given with `--config`, else the default file when it
/// exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DekontConfig> {
    if let Some(path) = config_path {
        return Ok(DekontConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using configuration from {}", path.display());
        Ok(DekontConfig::from_file(&path)?)
    } else {
        Ok(DekontConfig::default())
    }
}

/// Print a failure as `{"error": "..."}` on stdout.
pub fn report_failure(err: &anyhow::Error) -> ExitCode {
    let message = format!("{:#}", err);
    tracing::error!("{}", message);
    println!("{}", serde_json::json!({ "error": message }));
    ExitCode::FAILURE
}
