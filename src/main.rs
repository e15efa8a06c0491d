use std::error::Error;

use chime::{playback, AlarmApp};
use eframe::{egui::ViewportBuilder, run_native};

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the logger
    simple_file_logger::init_logger!("chime").expect("couldn't initialize logger");

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([360.0, 560.0]),
        ..Default::default()
    };

    // the playback thread exits when the app drops the sender
    let (tx, rx) = std::sync::mpsc::channel();
    let player = playback::spawn(rx);

    run_native(
        "Chime",
        native_options,
        Box::new(|_| Ok(Box::new(AlarmApp::new(tx)))),
    )?;

    // the app (and with it the sender) is gone once run_native returns
    let _ = player.join();
    Ok(())
}
