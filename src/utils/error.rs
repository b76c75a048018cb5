use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Chart rendering failed: {message}")]
    ChartError { message: String },

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    // docx-rs packs through its own bundled zip version, so no #[from] here.
    #[error("Document build error: {message}")]
    DocxError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config file parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;

// Plotters drawing errors are generic over the backend error type, which rules
// out a plain #[from] conversion.
impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ReportError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ReportError::ChartError {
            message: err.to_string(),
        }
    }
}

impl ReportError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::ChartError { .. } => {
                "Could not render one of the charts.".to_string()
            }
            ReportError::ImageError(_) => "Could not encode a chart as PNG.".to_string(),
            ReportError::DocxError { .. } => "Could not build the DOCX report.".to_string(),
            ReportError::CsvError(_) => "Could not write the data export.".to_string(),
            ReportError::IoError(e) => format!("File operation failed: {}", e),
            ReportError::SerializationError(_) => {
                "Could not serialize the dataset.".to_string()
            }
            ReportError::TomlError(_)
            | ReportError::ConfigError { .. }
            | ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            ReportError::ProcessingError { message } => {
                format!("Data processing failed: {}", message)
            }
            ReportError::ValidationError { message } => {
                format!("Validation failed: {}", message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::ChartError { .. } | ReportError::ImageError(_) => {
                "Check that system fonts are available and retry."
            }
            ReportError::DocxError { .. } => "Retry; if it persists, report the error output.",
            ReportError::IoError(_) => {
                "Check that the output directory is writable and has free space."
            }
            ReportError::TomlError(_) => "Fix the TOML syntax in the config file.",
            ReportError::ConfigError { .. }
            | ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. }
            | ReportError::ValidationError { .. } => {
                "Adjust the CLI flags or config file values and retry."
            }
            ReportError::CsvError(_)
            | ReportError::SerializationError(_)
            | ReportError::ProcessingError { .. } => {
                "This points at a dataset inconsistency; report it."
            }
        }
    }
}
