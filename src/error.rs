// error.rs - Viewer error kinds
//
// External failures (no file, network/server) are caught at the submission
// boundary and turned into one alert. Everything else is a transform failure
// that propagates to the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    /// Submit was pressed without a file.
    #[error("no file selected")]
    NoFileSelected,

    /// A previous submission has not finished yet.
    #[error("an upload is already in progress")]
    UploadInFlight,

    /// The picked file's bytes could not be read.
    #[error("could not read the selected file: {0}")]
    FileRead(String),

    /// The request failed or the service answered with an error.
    #[error("network or server error: {0}")]
    NetworkOrServer(String),

    /// Image bytes could not be turned into pixels.
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Mesh vertex count and depth grid cell count disagree.
    #[error("dimension mismatch: mesh has {expected} vertices, depth grid has {actual} cells")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl ViewerError {
    /// Failures that come from outside the depth/mesh transform.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            ViewerError::NoFileSelected
                | ViewerError::UploadInFlight
                | ViewerError::FileRead(_)
                | ViewerError::NetworkOrServer(_)
        )
    }

    /// Text shown to the user when the failure is alerted.
    pub fn user_message(&self) -> &'static str {
        match self {
            ViewerError::NoFileSelected => "Please upload a file.",
            ViewerError::UploadInFlight => "An upload is already in progress.",
            _ => "Something went wrong.",
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;

impl From<image::ImageError> for ViewerError {
    fn from(e: image::ImageError) -> Self {
        ViewerError::Decode(e.to_string())
    }
}
