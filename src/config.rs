use std::path::{Path, PathBuf};

use clap::Args;

use crate::removal::{U2NetRemover, DEFAULT_INPUT_SIZE};

pub const MODEL_FILE: &str = "u2net.onnx";

/// Options shared by the window and the command-line tool
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// ONNX segmentation model to use. Defaults to $U2NET_HOME/u2net.onnx,
    /// then ~/.u2net/u2net.onnx
    #[arg(long, env = "BG_ERASER_MODEL")]
    pub model: Option<PathBuf>,

    /// Square input resolution the model was exported with
    #[arg(long, default_value_t = DEFAULT_INPUT_SIZE)]
    pub input_size: u32,
}

impl ModelArgs {
    pub fn model_path(&self) -> PathBuf {
        resolve_model_path(
            self.model.as_deref(),
            std::env::var_os("U2NET_HOME").map(PathBuf::from).as_deref(),
            dirs::home_dir().as_deref(),
        )
    }

    pub fn remover(&self) -> U2NetRemover {
        U2NetRemover::new(self.model_path(), self.input_size)
    }
}

/// Explicit path first, then the model directory, then `~/.u2net`
pub fn resolve_model_path(
    explicit: Option<&Path>,
    model_home: Option<&Path>,
    home: Option<&Path>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(dir) = model_home {
        return dir.join(MODEL_FILE);
    }
    home.map(|home| home.join(".u2net"))
        .unwrap_or_else(|| PathBuf::from(".u2net"))
        .join(MODEL_FILE)
}
