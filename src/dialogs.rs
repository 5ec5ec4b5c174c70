// Native dialogs, behind a trait so the window logic can run without a desktop

use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::codec::INPUT_EXTENSIONS;

pub trait Dialogs {
    /// Image to process, `None` when the user cancels
    fn pick_image(&mut self) -> Option<PathBuf>;

    /// Destination for the cutout, `None` when the user cancels
    fn pick_save_path(&mut self) -> Option<PathBuf>;

    fn show_error(&mut self, title: &str, message: &str);

    fn show_info(&mut self, title: &str, message: &str);
}

#[derive(Debug, Default)]
pub struct NativeDialogs;

impl Dialogs for NativeDialogs {
    fn pick_image(&mut self) -> Option<PathBuf> {
        let path = FileDialog::new()
            .add_filter("Image Files", INPUT_EXTENSIONS)
            .pick_file();
        if let Some(path) = &path {
            log::info!("Selected file: {}", path.display());
        }
        path
    }

    fn pick_save_path(&mut self) -> Option<PathBuf> {
        FileDialog::new()
            .set_title("Save Transparent Image")
            .set_file_name("untitled.png")
            .add_filter("PNG Image", &["png"])
            .add_filter("All Files", &["*"])
            .save_file()
    }

    fn show_error(&mut self, title: &str, message: &str) {
        let _ = MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn show_info(&mut self, title: &str, message: &str) {
        let _ = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
