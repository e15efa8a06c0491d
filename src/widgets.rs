use chrono::{NaiveTime, Timelike};
use eframe::egui::{self, Color32, Painter, Pos2, Sense, Stroke, TextEdit, Vec2, Widget};

const FACE_FILL: Color32 = Color32::from_rgb(0x2d, 0x2d, 0x2d);
const HOUR_HAND: Color32 = Color32::from_rgb(0xff, 0x98, 0x00);
const MINUTE_HAND: Color32 = Color32::from_rgb(0x03, 0xa9, 0xf4);
const SECOND_HAND: Color32 = Color32::from_rgb(0xf4, 0x43, 0x36);

/// analog clock face drawn from a wall-clock time, purely presentational
pub struct ClockFace {
    time: NaiveTime,
    radius: Option<f32>,
}

impl ClockFace {
    #[must_use]
    pub const fn new(time: NaiveTime) -> Self {
        Self { time, radius: None }
    }

    #[must_use]
    pub const fn radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }
}

impl Widget for ClockFace {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let radius = self.radius.unwrap_or(100.);
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(radius * 2.), Sense::hover());
        let painter = ui.painter();
        let center = rect.center();
        painter.circle_filled(center, radius * 0.9, FACE_FILL);
        // twelve tick marks around the rim
        for i in 0..12u8 {
            let direction = dial_direction(f32::from(i) * 30.);
            painter.line_segment(
                [
                    center + direction * (radius * 0.8),
                    center + direction * (radius * 0.88),
                ],
                Stroke::new(2., Color32::WHITE),
            );
        }
        let (hour, minute, second) = hand_angles(self.time);
        hand(painter, center, hour, radius * 0.5, 0., Stroke::new(6., HOUR_HAND));
        hand(painter, center, minute, radius * 0.7, 0., Stroke::new(4., MINUTE_HAND));
        // the second hand gets a short tail past the pivot
        hand(
            painter,
            center,
            second,
            radius * 0.8,
            radius * 0.1,
            Stroke::new(2., SECOND_HAND),
        );
        response
    }
}

/// unit vector for a dial angle measured clockwise from 12 o'clock
fn dial_direction(angle: f32) -> Vec2 {
    Vec2::angled((angle - 90.).to_radians())
}

fn hand(painter: &Painter, center: Pos2, angle: f32, length: f32, tail: f32, stroke: Stroke) {
    let direction = dial_direction(angle);
    painter.line_segment([center - direction * tail, center + direction * length], stroke);
}

/// hour/minute/second hand angles in degrees: the hour hand creeps with the
/// minutes and the minute hand with the seconds
fn hand_angles(time: NaiveTime) -> (f32, f32, f32) {
    let hour = (time.hour() % 12) as f32;
    let minute = time.minute() as f32;
    let second = time.second() as f32;
    (
        30. * (hour + minute / 60.),
        6. * (minute + second / 60.),
        6. * second,
    )
}

/// 24h hour/minute spinner pair backing the "Add Alarm" input
pub struct TimePicker {
    hour: u8,
    minute: u8,
    hour_string: String,
    minute_string: String,
}

impl Default for TimePicker {
    fn default() -> Self {
        let time = chrono::Local::now().time();
        let (hour, minute) = (time.hour() as u8, time.minute() as u8);
        Self {
            hour,
            minute,
            hour_string: hour.to_string(),
            minute_string: minute.to_string(),
        }
    }
}

impl TimePicker {
    /// the picked time as the zero-padded value alarms are stored under
    #[must_use]
    pub fn hhmm(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            selector(ui, "Hour", &mut self.hour, 23, &mut self.hour_string);
            selector(ui, "Minute", &mut self.minute, 59, &mut self.minute_string);
        });
    }
}

fn selector(ui: &mut egui::Ui, label: &str, value: &mut u8, max: u8, text: &mut String) {
    ui.vertical(|ui| {
        ui.label(label);
        if ui.button("Up").clicked() && *value < max {
            *value += 1;
            *text = value.to_string();
        }
        if TextEdit::singleline(text)
            .desired_width(20.0)
            .char_limit(2)
            .ui(ui)
            .lost_focus()
        {
            // take the typed value if it parses and is in range
            if let Ok(parsed) = text.parse::<u8>() {
                *value = parsed.min(max);
            }
            // sync the shown text with the value regardless
            *text = value.to_string();
        }
        if ui.button("Down").clicked() && *value > 0 {
            *value -= 1;
            *text = value.to_string();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).unwrap()
    }

    #[test]
    fn hands_at_three_o_clock() {
        let (hour, minute, second) = hand_angles(at(3, 0, 0));
        assert_eq!(hour, 90.);
        assert_eq!(minute, 0.);
        assert_eq!(second, 0.);
    }

    #[test]
    fn hour_hand_creeps_with_the_minutes() {
        let (hour, minute, second) = hand_angles(at(10, 15, 30));
        assert_eq!(hour, 30. * (10. + 15. / 60.));
        assert_eq!(minute, 6. * 15.5);
        assert_eq!(second, 180.);
    }

    #[test]
    fn hour_hand_wraps_at_noon() {
        let (hour, _, _) = hand_angles(at(12, 0, 0));
        assert_eq!(hour, 0.);
        let (hour, _, _) = hand_angles(at(23, 0, 0));
        assert_eq!(hour, 330.);
    }

    #[test]
    fn picker_value_is_zero_padded() {
        let picker = TimePicker {
            hour: 7,
            minute: 5,
            hour_string: "7".to_string(),
            minute_string: "5".to_string(),
        };
        assert_eq!(picker.hhmm(), "07:05");
    }
}
