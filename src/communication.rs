use std::path::PathBuf;

/// everything the gui thread asks of the playback thread
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// start looping the tone at `path`, replacing whatever is playing
    Play { path: PathBuf, volume: f32 },
    /// retarget the live sink (and future plays) to the new 0-100 volume
    SetVolume(f32),
    /// silence the current tone, if any
    Stop,
}
