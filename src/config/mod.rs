pub mod toml_config;

use clap::Parser;
use serde::{Deserialize, Serialize};

pub use toml_config::{ReportToml, ResolvedConfig, DEFAULT_FIGURE_WIDTH_INCHES, DEFAULT_TITLE};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "crime-report")]
#[command(about = "Renders crime statistics charts and assembles them into a DOCX report")]
pub struct CliConfig {
    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Optional TOML file overriding report settings")]
    pub config: Option<String>,

    #[arg(long, help = "Also write the underlying data as CSV and JSON")]
    pub emit_data: bool,

    #[arg(long, help = "Enable system resource monitoring")]
    pub monitor: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
