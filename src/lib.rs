//! Background eraser: pick an image, strip its background with a segmentation
//! model, preview the cutout over a checkerboard and save it as a PNG.
//!
//! Everything that does not need a live window lives here so the binaries in
//! `src/bin` stay thin.

pub mod app;
pub mod button;
pub mod checkerboard;
pub mod codec;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod palette;
pub mod preview;
pub mod progress;
pub mod removal;
pub mod shapes;

pub use app::{Command, EraserApp, Status, StatusTone};
pub use error::{EraserError, Result};
pub use removal::{BackgroundRemover, U2NetRemover};
