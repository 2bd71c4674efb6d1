//! Caller-side configuration.
//!
//! None of these settings change engine arithmetic; they pick projection
//! options and presentation details for the CLI and report writers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::whatif::{OverridePolicy, ProjectionOptions};

/// Top-level gradecast configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradecastConfig {
    /// Score assumed for ungraded work in projections; unset leaves it unscored.
    #[serde(default)]
    pub ungraded_default: Option<f64>,
    /// Let what-if overrides replace recorded scores.
    #[serde(default)]
    pub allow_graded_overrides: bool,
    /// Where `report` writes its files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Decimal places in terminal output.
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./gradecast-reports")
}

fn default_decimals() -> usize {
    1
}

impl Default for GradecastConfig {
    fn default() -> Self {
        Self {
            ungraded_default: None,
            allow_graded_overrides: false,
            output_dir: default_output_dir(),
            decimals: default_decimals(),
        }
    }
}

impl GradecastConfig {
    /// Projection options implied by this config.
    pub fn projection_options(&self) -> ProjectionOptions {
        let policy = if self.allow_graded_overrides {
            OverridePolicy::AllowGraded
        } else {
            OverridePolicy::UngradedOnly
        };
        ProjectionOptions {
            ungraded_default: self.ungraded_default,
            policy,
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("GRADECAST_UNGRADED_DEFAULT") {
            let score: f64 = value
                .trim()
                .parse()
                .with_context(|| format!("GRADECAST_UNGRADED_DEFAULT is not a number: {value}"))?;
            self.ungraded_default = Some(score);
        }
        if let Ok(dir) = std::env::var("GRADECAST_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradecast.toml` in the current directory
/// 2. `~/.config/gradecast/config.toml`
///
/// Environment variable overrides: `GRADECAST_UNGRADED_DEFAULT`, `GRADECAST_OUTPUT_DIR`.
pub fn load_config() -> Result<GradecastConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradecastConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradecast.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => GradecastConfig::default(),
    };

    config.apply_env_overrides()?;
    validate_config(&config)?;

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<GradecastConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = toml::from_str::<GradecastConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn validate_config(config: &GradecastConfig) -> Result<()> {
    if let Some(score) = config.ungraded_default {
        anyhow::ensure!(
            score.is_finite() && (0.0..=100.0).contains(&score),
            "ungraded_default must be within 0..=100 (got {score})"
        );
    }
    anyhow::ensure!(
        config.decimals <= 6,
        "decimals must be at most 6 (got {})",
        config.decimals
    );
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradecast"))
}

/// Starter config written by `gradecast init`.
pub const STARTER_CONFIG: &str = r#"# gradecast configuration

# Score assumed for ungraded assessments in what-if projections.
# Leave unset to report them as unscored instead.
# ungraded_default = 75

# Allow what-if overrides to replace recorded scores.
allow_graded_overrides = false

# Where `gradecast report` writes snapshots.
output_dir = "./gradecast-reports"

# Decimal places in terminal output.
decimals = 1
"#;
