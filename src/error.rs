use thiserror::Error;

use crate::background::MAX_UPLOAD_BYTES;

#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("File must be an image (JPG, PNG, GIF, etc.).")]
    NotAnImage,
    #[error("File size cannot exceed {}MB.", MAX_UPLOAD_BYTES / (1024 * 1024))]
    TooLarge { size: u64 },
    #[error("could not read background file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("Invalid Spotify URL. Please use a valid playlist link.")]
    Unrecognized,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
}
