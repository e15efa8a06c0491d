use std::{collections::HashSet, path::PathBuf};

use chrono::NaiveTime;

/// how long a snooze pushes an alarm out
const SNOOZE_MINUTES: i64 = 5;

/// all alarm bookkeeping, kept free of gui/audio types so the matching logic
/// can be driven with plain times in tests
pub struct AlarmState {
    /// alarm times as zero-padded "HH:MM", insertion order, duplicates allowed
    alarms: Vec<String>,
    /// values that already fired during the current minute
    triggered: HashSet<String>,
    tone: Option<PathBuf>,
    /// 0-100, the playback side scales to 0.0-1.0
    volume: f32,
    selected: Option<usize>,
}

/// what should happen when a due alarm fires
#[derive(Debug, Clone, PartialEq)]
pub enum FireOutcome {
    Play { path: PathBuf, volume: f32 },
    NoTone,
}

impl Default for AlarmState {
    fn default() -> Self {
        Self {
            alarms: vec![],
            triggered: HashSet::new(),
            tone: None,
            volume: 50.0,
            selected: None,
        }
    }
}

impl AlarmState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn alarms(&self) -> &[String] {
        &self.alarms
    }

    pub fn add(&mut self, time: String) {
        self.alarms.push(time);
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        if index < self.alarms.len() {
            self.selected = Some(index);
        }
    }

    /// removes the selected entry, no-op without a selection
    pub fn delete_selected(&mut self) -> Option<String> {
        let index = self.selected.take().filter(|i| *i < self.alarms.len())?;
        Some(self.alarms.remove(index))
    }

    /// schedules a new alarm five minutes from `now` and returns its value,
    /// wrapping past midnight
    pub fn snooze(&mut self, now: NaiveTime) -> String {
        let time = (now + chrono::Duration::minutes(SNOOZE_MINUTES))
            .format("%H:%M")
            .to_string();
        self.alarms.push(time.clone());
        time
    }

    pub fn set_tone(&mut self, path: PathBuf) {
        self.tone = Some(path);
    }

    #[must_use]
    pub const fn tone(&self) -> Option<&PathBuf> {
        self.tone.as_ref()
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 100.0);
    }

    #[must_use]
    pub const fn volume(&self) -> f32 {
        self.volume
    }

    /// the once-a-second check: returns the alarm values that become due at
    /// `now`, each distinct value at most once per matching minute.
    ///
    /// entries from past minutes are dropped from the triggered set, so an
    /// alarm with the same value fires again the next time its minute comes
    /// around.
    pub fn tick(&mut self, now: NaiveTime) -> Vec<String> {
        let current = now.format("%H:%M").to_string();
        self.triggered.retain(|value| *value == current);
        let mut due = vec![];
        for alarm in &self.alarms {
            if *alarm == current && self.triggered.insert(alarm.clone()) {
                due.push(alarm.clone());
            }
        }
        due
    }

    /// decides what firing an alarm means right now, playback itself is the
    /// caller's job
    #[must_use]
    pub fn fire(&self) -> FireOutcome {
        self.tone
            .as_ref()
            .map_or(FireOutcome::NoTone, |path| FireOutcome::Play {
                path: path.clone(),
                volume: self.volume,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, second).unwrap()
    }

    #[test]
    fn add_appends_one_entry() {
        let mut state = AlarmState::new();
        state.add("07:30".to_string());
        assert_eq!(state.alarms(), ["07:30"]);
        // duplicates are allowed
        state.add("07:30".to_string());
        assert_eq!(state.alarms(), ["07:30", "07:30"]);
    }

    #[test]
    fn delete_removes_exactly_the_selected_entry() {
        let mut state = AlarmState::new();
        state.add("07:30".to_string());
        state.add("08:00".to_string());
        state.add("07:30".to_string());
        state.select(1);
        assert_eq!(state.delete_selected(), Some("08:00".to_string()));
        assert_eq!(state.alarms(), ["07:30", "07:30"]);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn delete_without_selection_is_a_noop() {
        let mut state = AlarmState::new();
        state.add("07:30".to_string());
        assert_eq!(state.delete_selected(), None);
        assert_eq!(state.alarms(), ["07:30"]);
    }

    #[test]
    fn tick_fires_once_per_minute() {
        let mut state = AlarmState::new();
        state.add("10:20".to_string());
        assert_eq!(state.tick(at(10, 20, 0)), ["10:20"]);
        // same minute, later seconds: already triggered
        assert_eq!(state.tick(at(10, 20, 1)), Vec::<String>::new());
        assert_eq!(state.tick(at(10, 20, 59)), Vec::<String>::new());
    }

    #[test]
    fn duplicate_values_fire_as_one() {
        let mut state = AlarmState::new();
        state.add("10:20".to_string());
        state.add("10:20".to_string());
        assert_eq!(state.tick(at(10, 20, 0)), ["10:20"]);
    }

    #[test]
    fn triggered_entries_rearm_after_the_minute_passes() {
        let mut state = AlarmState::new();
        state.add("10:20".to_string());
        assert_eq!(state.tick(at(10, 20, 0)), ["10:20"]);
        assert_eq!(state.tick(at(10, 21, 0)), Vec::<String>::new());
        // the matching minute elapsed, so the same value is live again
        assert_eq!(state.tick(at(10, 20, 0)), ["10:20"]);
    }

    #[test]
    fn tick_without_matching_alarm_fires_nothing() {
        let mut state = AlarmState::new();
        state.add("10:20".to_string());
        assert_eq!(state.tick(at(10, 19, 59)), Vec::<String>::new());
    }

    #[test]
    fn fire_without_tone_reports_no_tone() {
        let state = AlarmState::new();
        assert_eq!(state.fire(), FireOutcome::NoTone);
    }

    #[test]
    fn fire_with_tone_carries_path_and_volume() {
        let mut state = AlarmState::new();
        state.set_tone(PathBuf::from("/tmp/tone.wav"));
        state.set_volume(80.0);
        assert_eq!(
            state.fire(),
            FireOutcome::Play {
                path: PathBuf::from("/tmp/tone.wav"),
                volume: 80.0,
            }
        );
    }

    #[test]
    fn snooze_adds_an_alarm_five_minutes_out() {
        let mut state = AlarmState::new();
        assert_eq!(state.snooze(at(10, 15, 0)), "10:20");
        assert_eq!(state.alarms(), ["10:20"]);
    }

    #[test]
    fn snooze_wraps_past_midnight() {
        let mut state = AlarmState::new();
        assert_eq!(state.snooze(at(23, 58, 30)), "00:03");
    }

    #[test]
    fn volume_is_clamped() {
        let mut state = AlarmState::new();
        state.set_volume(150.0);
        assert_eq!(state.volume(), 100.0);
        state.set_volume(-3.0);
        assert_eq!(state.volume(), 0.0);
    }
}
