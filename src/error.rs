use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EraserError>;

/// Everything that can go wrong between picking a file and writing the cutout
#[derive(Error, Debug)]
pub enum EraserError {
    /// The chosen file could not be opened or decoded
    #[error("cannot read {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Model file missing, unreadable or rejected by tract
    #[error("model error: {0}")]
    Model(String),

    #[error("inference error: {0}")]
    Inference(String),

    /// Encoding or writing the output PNG failed
    #[error("cannot save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The background worker could not be started or vanished without a result
    #[error("worker error: {0}")]
    Worker(String),
}

impl EraserError {
    pub fn model<S: Into<String>>(msg: S) -> Self {
        Self::Model(msg.into())
    }

    pub fn inference<S: Into<String>>(msg: S) -> Self {
        Self::Inference(msg.into())
    }

    pub fn worker<S: Into<String>>(msg: S) -> Self {
        Self::Worker(msg.into())
    }
}
