use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{marker} script tag not found")]
    MarkerNotFoundError { marker: String },

    #[error("closing script tag not found")]
    ClosingTagNotFoundError,

    #[error("Conversion of {} failed with {status}", input.display())]
    ConversionFailedError { input: PathBuf, status: ExitStatus },

    #[error("Failed to run converter '{program}': {source}")]
    ConversionSpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Series directory {} is outside {}", dir.display(), images_dir.display())]
    SeriesOutsideImagesError { dir: PathBuf, images_dir: PathBuf },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidArgumentError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Document,
    Conversion,
    Io,
}

impl PortfolioError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PortfolioError::ConfigParseError { .. }
            | PortfolioError::SeriesOutsideImagesError { .. }
            | PortfolioError::InvalidArgumentError { .. } => ErrorCategory::Config,
            PortfolioError::MarkerNotFoundError { .. }
            | PortfolioError::ClosingTagNotFoundError
            | PortfolioError::SerializationError(_) => ErrorCategory::Document,
            PortfolioError::ConversionFailedError { .. }
            | PortfolioError::ConversionSpawnError { .. } => ErrorCategory::Conversion,
            PortfolioError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Config => 2,
            ErrorCategory::Document => 3,
            ErrorCategory::Conversion => 4,
            ErrorCategory::Io => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PortfolioError::ConfigParseError { path, .. } => {
                format!("The config file {} is not valid JSON", path.display())
            }
            PortfolioError::MarkerNotFoundError { .. } | PortfolioError::ClosingTagNotFoundError => {
                format!("The HTML file cannot be updated: {}", self)
            }
            PortfolioError::ConversionFailedError { input, .. } => {
                format!("Could not convert {} to JPEG", input.display())
            }
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PortfolioError::ConfigParseError { .. } => {
                "Fix the JSON syntax or delete the file to use the built-in defaults"
            }
            PortfolioError::MarkerNotFoundError { .. } => {
                "Add the data script tag with the exact id and type attributes to the HTML file"
            }
            PortfolioError::ClosingTagNotFoundError => "Close the data script tag with </script>",
            PortfolioError::ConversionFailedError { .. } => {
                "Check that the raw file is readable, then run again; finished files are skipped"
            }
            PortfolioError::ConversionSpawnError { .. } => {
                "Install the converter or pass another one with --converter"
            }
            PortfolioError::SeriesOutsideImagesError { .. } => {
                "Point the series dir at a folder inside the images directory"
            }
            PortfolioError::InvalidArgumentError { .. } => "Check the command line arguments",
            PortfolioError::SerializationError(_) | PortfolioError::IoError(_) => {
                "Check file permissions and available disk space"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
