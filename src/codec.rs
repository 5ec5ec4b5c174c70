// Reading source images and writing cutouts

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat, ImageReader, RgbaImage};

use crate::error::{EraserError, Result};

/// Extensions offered by the open dialog
pub const INPUT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Whether `path` carries one of the accepted image extensions
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            INPUT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Decode `path`, sniffing the format from content so misnamed files still load
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let decode_err = |source: ImageError| EraserError::Decode {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_err(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_err)
}

/// `path` with `.png` appended when it has no extension at all
pub fn with_png_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

/// Encode `image` as PNG with alpha, regardless of the chosen extension
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<PathBuf> {
    let path = with_png_extension(path);
    image
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| EraserError::Save {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}
