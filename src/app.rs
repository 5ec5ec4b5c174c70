//! Window state and the upload → remove → preview → save flow.
//!
//! All fields are touched from the UI thread only. The one long operation,
//! decoding plus background removal, runs on a short-lived worker thread that
//! reports back through a channel; [`EraserApp::poll`] applies the result.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use eframe::epaint::{vec2, Color32};
use image::RgbaImage;

use crate::button::{label_font, AnimatedButton};
use crate::codec;
use crate::dialogs::Dialogs;
use crate::error::{EraserError, Result};
use crate::palette::{
    ACCENT, ACCENT_GLOW, ERROR, SAVE_IDLE, SAVE_READY_TEXT, SUCCESS, TEXT_MUTED, TEXT_PRIMARY,
};
use crate::preview::{Preview, PreviewFrame};
use crate::progress::ProgressBar;
use crate::removal::BackgroundRemover;

pub const UPLOAD_LABEL: &str = "Upload Image";
pub const PROCESSING_LABEL: &str = "Processing…";
pub const SAVE_LABEL: &str = "Save Image";

pub const READY_MESSAGE: &str = "Upload an image to get started";
pub const WORKING_MESSAGE: &str = "Removing background…";
pub const DONE_MESSAGE: &str = "Background removed successfully  ✓";

const BUTTON_SIZE: [f32; 2] = [190.0, 46.0];

/// Called from the worker after it posted its result, so the UI wakes up
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// What the buttons ask the window to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Upload,
    Save,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Active,
    Success,
    Error,
}

impl StatusTone {
    pub fn color(self) -> Color32 {
        match self {
            StatusTone::Idle => TEXT_MUTED,
            StatusTone::Active => ACCENT,
            StatusTone::Success => SUCCESS,
            StatusTone::Error => ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub tone: StatusTone,
    pub message: String,
}

impl Status {
    fn new(tone: StatusTone, message: impl Into<String>) -> Self {
        Self {
            tone,
            message: message.into(),
        }
    }
}

struct Job {
    outcome: Receiver<Result<RgbaImage>>,
    source: PathBuf,
    started: Instant,
}

pub struct EraserApp {
    remover: Arc<dyn BackgroundRemover>,
    dialogs: Box<dyn Dialogs>,
    commands: Receiver<Command>,
    upload_button: AnimatedButton,
    save_button: AnimatedButton,
    status: Status,
    progress: ProgressBar,
    preview: Preview,
    preview_revision: u64,
    processed: Option<RgbaImage>,
    // In-flight slot: a second upload is refused while this is set
    job: Option<Job>,
    waker: Option<Waker>,
}

fn command_action(tx: &Sender<Command>, command: Command) -> crate::button::Action {
    let tx = tx.clone();
    Box::new(move || {
        // Only fails once the window is gone
        let _ = tx.send(command);
    })
}

impl EraserApp {
    pub fn new(remover: Arc<dyn BackgroundRemover>, dialogs: Box<dyn Dialogs>) -> Self {
        let (tx, commands) = mpsc::channel();

        let upload_button = AnimatedButton::new(
            UPLOAD_LABEL,
            Some(command_action(&tx, Command::Upload)),
            vec2(BUTTON_SIZE[0], BUTTON_SIZE[1]),
            ACCENT,
            ACCENT_GLOW,
            TEXT_PRIMARY,
            label_font(),
        );
        let mut save_button = AnimatedButton::new(
            SAVE_LABEL,
            Some(command_action(&tx, Command::Save)),
            vec2(BUTTON_SIZE[0], BUTTON_SIZE[1]),
            SAVE_IDLE,
            SUCCESS,
            TEXT_MUTED,
            label_font(),
        );
        save_button.set_disabled(true, None);

        log::info!("Using {} background remover", remover.name());

        Self {
            remover,
            dialogs,
            commands,
            upload_button,
            save_button,
            status: Status::new(StatusTone::Idle, READY_MESSAGE),
            progress: ProgressBar::default(),
            preview: Preview::Placeholder,
            preview_revision: 0,
            processed: None,
            job: None,
            waker: None,
        }
    }

    pub fn set_waker(&mut self, waker: Waker) {
        self.waker = Some(waker);
    }

    /// One UI-thread step: run queued button commands, collect a finished job
    /// and advance the progress animation
    pub fn update(&mut self, now: Instant) {
        self.handle_commands();
        self.poll();
        self.progress.advance(now);
    }

    /// Run every queued button command. Returns whether there were any.
    pub fn handle_commands(&mut self) -> bool {
        let mut handled = false;
        while let Ok(command) = self.commands.try_recv() {
            handled = true;
            match command {
                Command::Upload => self.upload(),
                Command::Save => self.save(),
            }
        }
        handled
    }

    pub fn upload(&mut self) {
        if self.is_processing() {
            log::warn!("Upload ignored, a removal is still running");
            return;
        }
        let Some(path) = self.dialogs.pick_image() else {
            log::debug!("Open dialog cancelled");
            return;
        };
        self.start_processing(path);
    }

    /// A file dropped on the window takes the same path as a picked one
    pub fn accept_dropped(&mut self, path: PathBuf) -> bool {
        if !codec::is_supported(&path) {
            log::warn!("Ignoring dropped file {}", path.display());
            return false;
        }
        self.start_processing(path)
    }

    /// Switch to the processing look and hand `path` to a fresh worker.
    /// Returns whether a job actually started.
    pub fn start_processing(&mut self, path: PathBuf) -> bool {
        if self.is_processing() {
            log::warn!("Refusing {}, a removal is still running", path.display());
            return false;
        }

        self.upload_button.set_disabled(true, Some(PROCESSING_LABEL));
        self.save_button.set_disabled(true, None);
        self.status = Status::new(StatusTone::Active, WORKING_MESSAGE);
        self.set_preview(Preview::Placeholder);
        self.progress.start(Instant::now());

        log::info!("Removing background from {}", path.display());
        let (tx, rx) = mpsc::channel();
        let remover = Arc::clone(&self.remover);
        let waker = self.waker.clone();
        let source = path.clone();

        let spawned = thread::Builder::new()
            .name("bg-removal".to_owned())
            .spawn(move || {
                let outcome = codec::load_image(&source).and_then(|image| remover.remove(&image));
                // The receiver is gone only if the window closed meanwhile
                let _ = tx.send(outcome);
                if let Some(wake) = waker {
                    wake();
                }
            });

        match spawned {
            Ok(_detached) => {
                self.job = Some(Job {
                    outcome: rx,
                    source: path,
                    started: Instant::now(),
                });
            }
            Err(e) => {
                self.apply_outcome(Err(EraserError::worker(format!(
                    "cannot start background worker: {e}"
                ))));
                return false;
            }
        }
        true
    }

    /// Apply the worker result if it has arrived. Never blocks.
    pub fn poll(&mut self) -> bool {
        let Some(job) = &self.job else {
            return false;
        };
        let outcome = match job.outcome.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                Err(EraserError::worker("worker stopped without a result"))
            }
        };
        self.apply_outcome(outcome);
        true
    }

    /// Block until the running job reports or `timeout` passes
    pub fn wait_for_job(&mut self, timeout: Duration) -> bool {
        let Some(job) = &self.job else {
            return false;
        };
        let outcome = match job.outcome.recv_timeout(timeout) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => return false,
            Err(RecvTimeoutError::Disconnected) => {
                Err(EraserError::worker("worker stopped without a result"))
            }
        };
        self.apply_outcome(outcome);
        true
    }

    /// Finish the current job with `outcome`, whether it came from the worker or not
    pub fn apply_outcome(&mut self, outcome: Result<RgbaImage>) {
        if let Some(job) = self.job.take() {
            log::info!(
                "Job for {} finished in {}ms",
                job.source.display(),
                job.started.elapsed().as_millis()
            );
        }
        match outcome {
            Ok(image) => self.on_success(image),
            Err(e) => self.on_error(&e),
        }
    }

    fn on_success(&mut self, image: RgbaImage) {
        self.progress.stop(true, Instant::now());
        self.set_preview(Preview::Result(PreviewFrame::new(&image)));

        self.upload_button.set_disabled(false, Some(UPLOAD_LABEL));
        self.save_button.restyle(SUCCESS, SAVE_READY_TEXT);
        self.save_button.set_disabled(false, Some(SAVE_LABEL));

        self.status = Status::new(StatusTone::Success, DONE_MESSAGE);
        self.processed = Some(image);
    }

    fn on_error(&mut self, error: &EraserError) {
        let message = error.to_string();
        log::error!("Background removal failed: {message}");

        self.progress.stop(false, Instant::now());
        self.upload_button.set_disabled(false, Some(UPLOAD_LABEL));
        // An earlier cutout stays saveable
        if self.processed.is_some() {
            self.save_button.set_disabled(false, None);
        }
        self.status = Status::new(StatusTone::Error, format!("Error: {message}"));
        self.dialogs.show_error("Error", &message);
    }

    pub fn save(&mut self) {
        let Some(image) = &self.processed else {
            return;
        };
        let Some(path) = self.dialogs.pick_save_path() else {
            log::debug!("Save dialog cancelled");
            return;
        };

        match codec::save_png(image, &path) {
            Ok(written) => {
                log::info!("Saved cutout to {}", written.display());
                self.status.message = format!("Saved → {}", display_name(&written));
                self.dialogs.show_info(
                    "Saved!",
                    &format!("Image saved to:\n{}", written.display()),
                );
            }
            Err(e) => {
                log::error!("{e}");
                self.dialogs.show_error("Save Error", &e.to_string());
            }
        }
    }

    fn set_preview(&mut self, preview: Preview) {
        self.preview = preview;
        self.preview_revision += 1;
    }

    pub fn next_repaint(&self, now: Instant) -> Option<Duration> {
        self.progress.next_repaint(now)
    }

    pub fn is_processing(&self) -> bool {
        self.job.is_some()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn progress(&self) -> &ProgressBar {
        &self.progress
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Bumped every time the preview changes, so textures can be re-uploaded lazily
    pub fn preview_revision(&self) -> u64 {
        self.preview_revision
    }

    pub fn processed(&self) -> Option<&RgbaImage> {
        self.processed.as_ref()
    }

    pub fn upload_button(&self) -> &AnimatedButton {
        &self.upload_button
    }

    pub fn save_button(&self) -> &AnimatedButton {
        &self.save_button
    }

    pub fn buttons_mut(&mut self) -> (&mut AnimatedButton, &mut AnimatedButton) {
        (&mut self.upload_button, &mut self.save_button)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
