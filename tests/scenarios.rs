// End-to-end flows through EraserApp with scripted dialogs and a stand-in remover

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bg_eraser::app::{DONE_MESSAGE, PROCESSING_LABEL, UPLOAD_LABEL};
use bg_eraser::dialogs::Dialogs;
use bg_eraser::{BackgroundRemover, EraserApp, EraserError, Result, StatusTone};
use image::{DynamicImage, Rgb, RgbImage, RgbaImage};

const JOB_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Default)]
struct Script {
    open: Vec<Option<PathBuf>>,
    save: Vec<Option<PathBuf>>,
    errors: Vec<(String, String)>,
    infos: Vec<(String, String)>,
    save_prompts: usize,
}

struct ScriptedDialogs(Rc<RefCell<Script>>);

impl Dialogs for ScriptedDialogs {
    fn pick_image(&mut self) -> Option<PathBuf> {
        self.0.borrow_mut().open.pop().flatten()
    }

    fn pick_save_path(&mut self) -> Option<PathBuf> {
        let mut script = self.0.borrow_mut();
        script.save_prompts += 1;
        script.save.pop().flatten()
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.0
            .borrow_mut()
            .errors
            .push((title.to_owned(), message.to_owned()));
    }

    fn show_info(&mut self, title: &str, message: &str) {
        self.0
            .borrow_mut()
            .infos
            .push((title.to_owned(), message.to_owned()));
    }
}

/// Keeps the colors and makes the left half transparent
struct HalfCutout;

impl BackgroundRemover for HalfCutout {
    fn name(&self) -> &str {
        "half-cutout"
    }

    fn remove(&self, image: &DynamicImage) -> Result<RgbaImage> {
        let mut out = image.to_rgba8();
        let half = out.width() / 2;
        for (x, _, pixel) in out.enumerate_pixels_mut() {
            pixel[3] = if x < half { 0 } else { 255 };
        }
        Ok(out)
    }
}

struct AlwaysFails;

impl BackgroundRemover for AlwaysFails {
    fn name(&self) -> &str {
        "always-fails"
    }

    fn remove(&self, _image: &DynamicImage) -> Result<RgbaImage> {
        Err(EraserError::inference("segmentation model rejected the input"))
    }
}

/// Blocks every job until the test lets it through
struct Gated(Mutex<Receiver<()>>);

impl BackgroundRemover for Gated {
    fn name(&self) -> &str {
        "gated"
    }

    fn remove(&self, image: &DynamicImage) -> Result<RgbaImage> {
        let gate = self
            .0
            .lock()
            .map_err(|_| EraserError::inference("gate poisoned"))?;
        gate.recv()
            .map_err(|_| EraserError::inference("gate closed"))?;
        Ok(image.to_rgba8())
    }
}

struct Panics;

impl BackgroundRemover for Panics {
    fn name(&self) -> &str {
        "panics"
    }

    fn remove(&self, _image: &DynamicImage) -> Result<RgbaImage> {
        panic!("remover crashed");
    }
}

fn app_with(remover: impl BackgroundRemover + 'static) -> (EraserApp, Rc<RefCell<Script>>) {
    let script = Rc::new(RefCell::new(Script::default()));
    let app = EraserApp::new(
        Arc::new(remover),
        Box::new(ScriptedDialogs(Rc::clone(&script))),
    );
    (app, script)
}

fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    DynamicImage::ImageRgb8(image).save(&path).unwrap();
    path
}

#[test]
fn upload_valid_jpeg_shows_fitted_preview() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_jpeg(dir.path(), "photo.jpg", 500, 500);
    let (mut app, script) = app_with(HalfCutout);
    script.borrow_mut().open.push(Some(input));

    app.upload();
    assert!(app.is_processing());
    assert!(app.upload_button().is_disabled());
    assert_eq!(app.upload_button().label(), PROCESSING_LABEL);
    assert!(app.save_button().is_disabled());
    assert_eq!(app.status().tone, StatusTone::Active);
    assert!(app.progress().is_running());
    assert!(app.preview().is_placeholder());

    assert!(app.wait_for_job(JOB_TIMEOUT));

    let processed = app.processed().expect("cutout retained");
    assert_eq!(processed.dimensions(), (500, 500));
    assert_eq!(processed.get_pixel(10, 10)[3], 0);
    assert_eq!(processed.get_pixel(400, 10)[3], 255);

    let frame = app.preview().frame().expect("result preview");
    assert_eq!(frame.checker.dimensions(), (420, 300));
    assert_eq!(frame.thumbnail.dimensions(), (260, 260));
    assert_eq!(frame.offset, (80, 20));

    assert_eq!(app.status().tone, StatusTone::Success);
    assert_eq!(app.status().message, DONE_MESSAGE);
    assert!(!app.save_button().is_disabled());
    assert!(!app.upload_button().is_disabled());
    assert_eq!(app.upload_button().label(), UPLOAD_LABEL);
    assert!(!app.progress().is_running());
    assert!(script.borrow().errors.is_empty());
}

#[test]
fn corrupt_file_reports_error_and_reenables_upload() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("corrupt.png");
    std::fs::write(&input, b"\x89PNG but not really").unwrap();
    let (mut app, script) = app_with(HalfCutout);
    script.borrow_mut().open.push(Some(input));

    app.upload();
    assert!(app.wait_for_job(JOB_TIMEOUT));

    let script = script.borrow();
    assert_eq!(script.errors.len(), 1);
    let (title, message) = &script.errors[0];
    assert_eq!(title, "Error");
    assert!(message.contains("corrupt.png"), "{message}");
    assert_eq!(app.status().tone, StatusTone::Error);
    assert_eq!(app.status().message, format!("Error: {message}"));
    assert!(!app.upload_button().is_disabled());
    assert!(app.save_button().is_disabled());
    assert!(app.processed().is_none());
}

#[test]
fn remover_failure_surfaces_its_message() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_jpeg(dir.path(), "photo.jpg", 32, 32);
    let (mut app, script) = app_with(AlwaysFails);
    script.borrow_mut().open.push(Some(input));

    app.upload();
    assert!(app.wait_for_job(JOB_TIMEOUT));

    assert_eq!(
        app.status().message,
        "Error: inference error: segmentation model rejected the input"
    );
    assert_eq!(
        script.borrow().errors[0].1,
        "inference error: segmentation model rejected the input"
    );
}

#[test]
fn failed_upload_after_success_keeps_previous_cutout_saveable() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_jpeg(dir.path(), "photo.jpg", 40, 30);
    let corrupt = dir.path().join("corrupt.png");
    std::fs::write(&corrupt, b"\x89PNG but not really").unwrap();
    let (mut app, script) = app_with(HalfCutout);

    script.borrow_mut().open.push(Some(good));
    app.upload();
    assert!(app.wait_for_job(JOB_TIMEOUT));
    let first = app.processed().cloned().expect("first cutout");

    script.borrow_mut().open.push(Some(corrupt));
    app.upload();
    assert!(app.save_button().is_disabled());
    assert!(app.wait_for_job(JOB_TIMEOUT));

    assert_eq!(app.status().tone, StatusTone::Error);
    assert_eq!(app.processed(), Some(&first));
    assert!(!app.save_button().is_disabled());
    assert!(!app.upload_button().is_disabled());
    assert_eq!(script.borrow().errors.len(), 1);
}

#[test]
fn save_writes_exact_pixels_with_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_jpeg(dir.path(), "photo.jpg", 64, 48);
    let output = dir.path().join("out.png");
    let (mut app, script) = app_with(HalfCutout);
    script.borrow_mut().open.push(Some(input));
    script.borrow_mut().save.push(Some(output.clone()));

    app.upload();
    assert!(app.wait_for_job(JOB_TIMEOUT));
    app.save();

    let written = image::open(&output).unwrap().to_rgba8();
    assert_eq!(Some(&written), app.processed());
    assert_eq!(written.get_pixel(0, 0)[3], 0);
    assert_eq!(app.status().message, "Saved → out.png");

    let script = script.borrow();
    assert_eq!(
        script.infos,
        vec![(
            "Saved!".to_owned(),
            format!("Image saved to:\n{}", output.display())
        )]
    );
}

#[test]
fn save_without_result_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let (mut app, script) = app_with(HalfCutout);
    script
        .borrow_mut()
        .save
        .push(Some(dir.path().join("out.png")));
    let status = app.status().clone();

    app.save();

    assert_eq!(script.borrow().save_prompts, 0);
    assert!(!dir.path().join("out.png").exists());
    assert_eq!(app.status(), &status);
}

#[test]
fn second_upload_is_refused_while_running() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_jpeg(dir.path(), "first.jpg", 16, 16);
    let second = write_jpeg(dir.path(), "second.jpg", 16, 16);
    let (release, gate): (Sender<()>, Receiver<()>) = mpsc::channel();
    let (mut app, script) = app_with(Gated(Mutex::new(gate)));

    assert!(app.start_processing(first));
    assert!(app.is_processing());
    assert!(!app.start_processing(second));

    // upload() bails out before it would ask for a file
    script.borrow_mut().open.push(Some(dir.path().join("third.jpg")));
    app.upload();
    assert_eq!(script.borrow().open.len(), 1);
    assert!(!app.poll());

    release.send(()).unwrap();
    assert!(app.wait_for_job(JOB_TIMEOUT));
    assert!(!app.is_processing());
    assert_eq!(app.processed().map(|i| i.dimensions()), Some((16, 16)));
}

#[test]
fn crashed_worker_is_reported_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_jpeg(dir.path(), "photo.jpg", 8, 8);
    let (mut app, script) = app_with(Panics);
    script.borrow_mut().open.push(Some(input));

    app.upload();
    assert!(app.wait_for_job(JOB_TIMEOUT));

    assert_eq!(app.status().tone, StatusTone::Error);
    assert!(!app.is_processing());
    assert_eq!(script.borrow().errors.len(), 1);
}

#[test]
fn worker_wakes_the_ui_after_posting() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_jpeg(dir.path(), "photo.jpg", 8, 8);
    let (mut app, script) = app_with(HalfCutout);
    let woken = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&woken);
    app.set_waker(Arc::new(move || flag.store(true, Ordering::SeqCst)));
    script.borrow_mut().open.push(Some(input));

    app.upload();
    assert!(app.wait_for_job(JOB_TIMEOUT));

    // The wake call follows the send, give it a moment to land
    for _ in 0..100 {
        if woken.load(Ordering::SeqCst) {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(woken.load(Ordering::SeqCst));
}
