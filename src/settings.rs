use std::path::Path;

use ruio_lib::{Config, Depth, RuioError};
use tracing_subscriber::EnvFilter;

/// Install the stderr tracing subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ruio={default_level},ruio_lib={default_level}")));
    // A second init (tests driving several commands) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load config from a TOML file, `$RUIO_CONFIG`, or return defaults.
/// Priority: explicit path > $RUIO_CONFIG > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, RuioError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        RuioError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        RuioError::Config(prefix)
    })?;
    Ok(cfg)
}

/// CLI depth when given, clamped to the config bounds; otherwise the config default.
pub fn resolve_depth(cli_depth: Option<i64>, config: &Config) -> Depth {
    match cli_depth {
        Some(value) => config.depth.clamp(value),
        None => config.depth.initial(),
    }
}

/// Format effective config as a single-line string.
pub fn format_effective_config(config: &Config, depth: Depth, source: Option<&Path>) -> String {
    let source = source
        .map(|p| p.display().to_string())
        .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective config [{source}]: depth={depth} (bounds {}..={}), exclusion_class={}, border={}: {}, hover={}: {}",
        config.depth.min,
        config.depth.max,
        config.exclusion_class,
        config.border.property,
        config.border.value,
        config.hover.property,
        config.hover.value,
    )
}
