#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

use std::{path::Path, sync::mpsc::Sender, time::Duration};

use alarm::{AlarmState, FireOutcome};
use eframe::egui::{
    self, CentralPanel, Context, ScrollArea, TopBottomPanel, ViewportCommand, Window,
};
use tray_icon::menu::MenuEvent;
use widgets::{ClockFace, TimePicker};

pub mod alarm;
pub mod communication;
pub mod playback;
pub mod tray;
pub mod widgets;

pub struct AlarmApp {
    state: AlarmState,
    picker: TimePicker,
    sender: Sender<communication::Message>,
    ringing: bool,
    no_tone_warning: bool,
    quitting: bool,
    /// the live tray icon, `None` when the session has no tray surface
    tray: Option<tray_icon::TrayIcon>,
}

impl AlarmApp {
    #[must_use]
    pub fn new(sender: Sender<communication::Message>) -> Self {
        Self {
            state: AlarmState::new(),
            picker: TimePicker::default(),
            sender,
            ringing: false,
            no_tone_warning: false,
            quitting: false,
            tray: tray::setup(),
        }
    }

    fn send(&self, message: communication::Message) {
        if self.sender.send(message).is_err() {
            log::error!("playback thread is gone");
        }
    }

    fn handle_tray_menu(&mut self, ctx: &Context) {
        while let Ok(event) = MenuEvent::receiver().try_recv() {
            match event.id().0.as_str() {
                tray::SHOW_ID => {
                    ctx.send_viewport_cmd(ViewportCommand::Visible(true));
                    ctx.send_viewport_cmd(ViewportCommand::Focus);
                }
                tray::QUIT_ID => {
                    self.quitting = true;
                    ctx.send_viewport_cmd(ViewportCommand::Close);
                }
                _ => {}
            }
        }
    }

    /// closing the window hides it to the tray, only the tray Quit entry
    /// actually ends the process. without a tray icon there is no way to
    /// bring the window back, so the close goes through instead.
    fn handle_close_request(&self, ctx: &Context) {
        if ctx.input(|i| i.viewport().close_requested())
            && hide_on_close(self.tray.is_some(), self.quitting)
        {
            ctx.send_viewport_cmd(ViewportCommand::CancelClose);
            ctx.send_viewport_cmd(ViewportCommand::Visible(false));
            tray::notify("Chime", "Still running in the tray");
        }
    }

    fn fire_alarm(&mut self, time: &str) {
        match self.state.fire() {
            FireOutcome::NoTone => {
                log::warn!("alarm {time} fired with no tone selected");
                self.no_tone_warning = true;
            }
            FireOutcome::Play { path, volume } => {
                log::info!("alarm {time} fired, playing {}", path.display());
                self.send(communication::Message::Play { path, volume });
                tray::notify("Alarm", "Wake up!");
                self.ringing = true;
            }
        }
    }

    fn stop_alarm(&mut self) {
        self.send(communication::Message::Stop);
        self.ringing = false;
    }

    fn select_tone(&mut self) {
        let file_dialog = rfd::FileDialog::new()
            .set_title("Select alarm tone")
            .add_filter("Audio", &["wav", "mp3"]);
        let file_dialog = match directories::UserDirs::new()
            .and_then(|dirs| dirs.audio_dir().map(Path::to_path_buf))
        {
            Some(audio_path) => file_dialog.set_directory(audio_path),
            None => file_dialog,
        };
        if let Some(path) = file_dialog.pick_file() {
            log::info!("tone set to {}", path.display());
            self.state.set_tone(path);
        }
    }

    fn render_header(ctx: &Context) {
        TopBottomPanel::top("digital_clock").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(
                        chrono::Local::now().format("%d %b %Y\n%H:%M:%S").to_string(),
                    )
                    .size(22.)
                    .strong(),
                );
            });
        });
    }

    fn list_alarms(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;
        for (i, alarm) in self.state.alarms().iter().enumerate() {
            if ui
                .selectable_label(self.state.selected() == Some(i), alarm)
                .clicked()
            {
                clicked = Some(i);
            }
        }
        if let Some(i) = clicked {
            self.state.select(i);
        }
    }

    fn render_dialogs(&mut self, ctx: &Context) {
        if self.ringing {
            Window::new("Alarm").auto_sized().show(ctx, |ui| {
                ui.label("Wake up!");
                if ui.button("Stop").clicked() {
                    self.stop_alarm();
                }
            });
        }
        if self.no_tone_warning {
            Window::new("No Tone").auto_sized().show(ctx, |ui| {
                ui.label("Select a tone first");
                if ui.button("Ok").clicked() {
                    self.no_tone_warning = false;
                }
            });
        }
    }
}

/// whether a close request should turn into hide-to-tray: only when a tray
/// icon actually exists and the user hasn't asked to quit
const fn hide_on_close(has_tray: bool, quitting: bool) -> bool {
    has_tray && !quitting
}

impl eframe::App for AlarmApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // the repaint cadence doubles as the alarm-check tick
        ctx.request_repaint_after(Duration::from_secs(1));
        ctx.set_visuals(egui::Visuals::dark());

        self.handle_tray_menu(ctx);
        self.handle_close_request(ctx);

        let now = chrono::Local::now().time();
        for time in self.state.tick(now) {
            self.fire_alarm(&time);
        }

        Self::render_header(ctx);
        CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add(ClockFace::new(now));
            });
            ui.separator();
            ui.horizontal(|ui| {
                self.picker.show(ui);
                if ui.button("Add Alarm").clicked() {
                    self.state.add(self.picker.hhmm());
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Select Tone").clicked() {
                    self.select_tone();
                }
                match self.state.tone() {
                    Some(path) => ui.label(
                        path.file_name()
                            .map_or_else(|| path.display().to_string(), |name| {
                                name.to_string_lossy().into_owned()
                            }),
                    ),
                    None => ui.label("no tone selected"),
                };
            });
            let mut volume = self.state.volume();
            if ui
                .add(
                    egui::Slider::new(&mut volume, 0.0..=100.0)
                        .integer()
                        .suffix("%")
                        .text("volume"),
                )
                .changed()
            {
                self.state.set_volume(volume);
                self.send(communication::Message::SetVolume(self.state.volume()));
            }
            ui.separator();
            ScrollArea::vertical().show(ui, |ui| {
                self.list_alarms(ui);
            });
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Delete Selected").clicked() {
                    self.state.delete_selected();
                }
                if ui.button("Snooze 5 min").clicked() {
                    self.stop_alarm();
                    let snoozed = self.state.snooze(chrono::Local::now().time());
                    log::info!("snoozed until {snoozed}");
                }
                if ui.button("Stop Alarm").clicked() {
                    self.stop_alarm();
                }
            });
        });
        self.render_dialogs(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_hides_only_when_a_tray_exists() {
        assert!(hide_on_close(true, false));
        // no tray means no Show/Quit menu, so the close has to go through
        assert!(!hide_on_close(false, false));
        // quitting from the tray must not be cancelled either
        assert!(!hide_on_close(true, true));
        assert!(!hide_on_close(false, true));
    }
}
