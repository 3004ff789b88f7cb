// Layered settings: built-in defaults < config file < NBPROBE_* env < flags

use anyhow::{Context, Result};
use clap::Args;
use nbprobe_core::domain::ByteRange;
use nbprobe_core::{AuthScheme, ProbeConfig};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
/// (any extension the `config` crate understands: `nbprobe.toml`, `nbprobe.json`, ...)
const DEFAULT_CONFIG_NAME: &str = "nbprobe";

const ENV_PREFIX: &str = "NBPROBE";

/// Flags overriding file and environment settings
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// Server URL (front-end paths and `?token=` are accepted)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// File the server's access token was written to
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,

    /// Directory receiving one JSON file per probe
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// How the token is sent: query or header
    #[arg(long, global = true)]
    pub auth: Option<AuthScheme>,

    /// File path for the byte-range probe, relative to the server root
    #[arg(long, global = true)]
    pub range_path: Option<String>,

    /// Byte range for the range probe (e.g., 0-1)
    #[arg(long, global = true)]
    pub range: Option<ByteRange>,

    /// Skip the byte-range probe
    #[arg(long, global = true)]
    pub no_range: bool,
}

/// Load the probe configuration
///
/// # Arguments
/// * `config_file` - Explicit config file (must exist); otherwise an optional
///   `nbprobe.*` in the working directory is used
/// * `overrides` - Command-line flags, applied last
pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<ProbeConfig> {
    load_with_env(config_file, overrides, None)
}

/// Same as [`load`], reading `NBPROBE_*` variables from `env` instead of the
/// process environment when given
pub fn load_with_env(
    config_file: Option<&Path>,
    overrides: &Overrides,
    env: Option<config::Map<String, String>>,
) -> Result<ProbeConfig> {
    let defaults = config::Config::try_from(&ProbeConfig::default())
        .context("Failed to encode default settings")?;

    let file = match config_file {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let mut settings: ProbeConfig = config::Config::builder()
        .add_source(defaults)
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        )
        .build()
        .context("Failed to load settings")?
        .try_deserialize()
        .context("Invalid settings")?;

    apply_overrides(&mut settings, overrides);
    expand_paths(&mut settings);
    settings.validate()?;

    Ok(settings)
}

fn apply_overrides(settings: &mut ProbeConfig, overrides: &Overrides) {
    if let Some(url) = &overrides.url {
        settings.base_url = url.clone();
    }
    if let Some(path) = &overrides.token_file {
        settings.token_file = path.clone();
    }
    if let Some(dir) = &overrides.output_dir {
        settings.output_dir = dir.clone();
    }
    if let Some(auth) = overrides.auth {
        settings.auth = auth;
    }

    if overrides.no_range {
        settings.range_probe = None;
        return;
    }
    if overrides.range_path.is_some() || overrides.range.is_some() {
        let mut probe = settings.range_probe.take().unwrap_or_default();
        if let Some(path) = &overrides.range_path {
            probe.path = path.clone();
        }
        if let Some(range) = overrides.range {
            probe.range = range;
        }
        settings.range_probe = Some(probe);
    }
}

fn expand_paths(settings: &mut ProbeConfig) {
    settings.token_file = expand(&settings.token_file);
    settings.output_dir = expand(&settings.output_dir);
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
