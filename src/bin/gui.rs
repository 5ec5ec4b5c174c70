#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::sync::Arc;

use clap::Parser;
use eframe::egui;

// Local imports
use bg_eraser::config::ModelArgs;
use bg_eraser::dialogs::NativeDialogs;
use bg_eraser::EraserApp;

mod gui_app;

/// Remove image backgrounds and save transparent PNGs
#[derive(Parser, Debug)]
#[command(name = "bg-eraser", version)]
struct GuiArgs {
    #[command(flatten)]
    model: ModelArgs,
}

fn main() -> Result<(), eframe::Error> {
    // Log to stderr, `RUST_LOG=debug` for more
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = GuiArgs::parse();
    let remover = args.model.remover();
    log::info!(
        "Segmentation model: {} ({}px input)",
        remover.model_path().display(),
        remover.input_size()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 700.0])
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        "BG Eraser",
        options,
        Box::new(move |cc| {
            let mut eraser = EraserApp::new(Arc::new(remover), Box::new(NativeDialogs));
            let ctx = cc.egui_ctx.clone();
            eraser.set_waker(Arc::new(move || ctx.request_repaint()));

            Box::new(gui_app::App::new(cc, eraser))
        }),
    )
}
