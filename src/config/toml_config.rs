use serde::{Deserialize, Serialize};

use crate::config::CliConfig;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, Validate,
};

pub const DEFAULT_TITLE: &str = "Crime Data Analysis in Tamil Nadu (2014–Present)";
pub const DEFAULT_FIGURE_WIDTH_INCHES: f64 = 6.0;

/// Optional overrides loaded from a TOML file passed via `--config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportToml {
    pub title: Option<String>,
    pub figure_width_inches: Option<f64>,
    pub output_path: Option<String>,
    pub emit_data: Option<bool>,
}

impl ReportToml {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let parsed = toml::from_str(content)?;
        Ok(parsed)
    }
}

/// Effective settings for a run: CLI values with TOML overrides applied on
/// top. TOML wins when both specify a field.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub output_path: String,
    pub title: String,
    pub figure_width_inches: f64,
    pub emit_data: bool,
}

impl ResolvedConfig {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let overrides = match &cli.config {
            Some(path) => ReportToml::from_file(path)?,
            None => ReportToml::default(),
        };
        Ok(Self::merge(cli, overrides))
    }

    pub fn merge(cli: &CliConfig, overrides: ReportToml) -> Self {
        Self {
            output_path: overrides.output_path.unwrap_or_else(|| cli.output_path.clone()),
            title: overrides.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            figure_width_inches: overrides
                .figure_width_inches
                .unwrap_or(DEFAULT_FIGURE_WIDTH_INCHES),
            emit_data: overrides.emit_data.unwrap_or(cli.emit_data),
        }
    }
}

impl ConfigProvider for ResolvedConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_title(&self) -> &str {
        &self.title
    }

    fn figure_width_inches(&self) -> f64 {
        self.figure_width_inches
    }

    fn emit_data(&self) -> bool {
        self.emit_data
    }
}

impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        validate_non_empty_string("title", &self.title)?;
        validate_range("figure_width_inches", self.figure_width_inches, 1.0, 8.0)?;
        Ok(())
    }
}
