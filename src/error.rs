use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("Invalid colour format: {0}")]
    InvalidFormat(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to decode {}: {message}", path.display())]
    DecodeError { path: PathBuf, message: String },

    #[error("Failed to encode {}: {message}", path.display())]
    EncodeError { path: PathBuf, message: String },

    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Cancelled before processing started")]
    Cancelled,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`CleanError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl CleanError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a colour format error.
    invalid_format => InvalidFormat,
    /// Create an invalid argument error.
    invalid_argument => InvalidArgument,
    /// Create a render error.
    render => RenderError,
}

impl CleanError {
    /// Create a decode error for the image at `path`.
    pub fn decode(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::DecodeError {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create an encode error for the image at `path`.
    pub fn encode(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::EncodeError {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create a write error for the file or directory at `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }

    /// True for errors detected before any page is processed.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat(_) | Self::InvalidArgument(_) | Self::InputNotFound(_)
        )
    }
}

impl From<pdfium_render::prelude::PdfiumError> for CleanError {
    fn from(e: pdfium_render::prelude::PdfiumError) -> Self {
        Self::RenderError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;
