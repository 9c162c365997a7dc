//! Configuration types for ssvlog.
//!
//! [`Config::load`] reads `~/.config/ssvlog/config.toml` (or an explicit path)
//! layered on top of hardcoded defaults; the file is optional.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem (useful in tests). Command-line flags only ever switch options
//! on, so they are applied after loading with [`Options::merge`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[filter]
no_spam   = false

[errors]
traceback = false

[input]
journal   = false

[output]
color     = true
theme     = ""
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/ssvlog/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub errors: ErrorsConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[filter]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    /// Drop DEBUG records and high-frequency, low-value events.
    #[serde(default)]
    pub no_spam: bool,
}

/// `[errors]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorsConfig {
    /// Append the node's `errorVerbose` traceback to error lines.
    #[serde(default)]
    pub traceback: bool,
}

/// `[input]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    /// Input comes from `journalctl` rather than `docker logs`.
    #[serde(default)]
    pub journal: bool,
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_color")]
    pub color: bool,
    /// Path to a theme TOML file; empty means the built-in theme.
    #[serde(default)]
    pub theme: String,
}

fn default_color() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            theme: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `path`, or from the default location when `path` is `None`,
    /// layered on top of the built-in defaults. A missing file at the default
    /// location is not an error; a missing explicit path is.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };
        tracing::debug!(path = %path.display(), required, "loading config");

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// The options the formatting core reads.
    pub fn options(&self) -> Options {
        Options {
            no_spam: self.filter.no_spam,
            full_errors: self.errors.traceback,
            docker_mode: !self.input.journal,
        }
    }

    /// The theme file to load, if one is configured.
    pub fn theme_path(&self) -> Option<PathBuf> {
        (!self.output.theme.is_empty()).then(|| PathBuf::from(&self.output.theme))
    }
}

/// The three switches the core consumes, read-only for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Suppress spam-flagged events and every DEBUG record.
    pub no_spam: bool,
    /// Append extended tracebacks to error lines.
    pub full_errors: bool,
    /// Timestamp is the bare first column (`docker logs`) instead of following
    /// a journal prefix.
    pub docker_mode: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            no_spam: false,
            full_errors: false,
            docker_mode: true,
        }
    }
}

impl Options {
    /// Apply command-line switches on top of file options. Flags can only turn
    /// behaviour on; `journal` turns docker mode off.
    pub fn merge(self, no_spam: bool, full_errors: bool, journal: bool) -> Self {
        Self {
            no_spam: self.no_spam || no_spam,
            full_errors: self.full_errors || full_errors,
            docker_mode: self.docker_mode && !journal,
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("ssvlog")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
