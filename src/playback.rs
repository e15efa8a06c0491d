use std::{fs, io::BufReader, sync::mpsc::Receiver, thread};

use rodio::{decoder, Sink, Source};

use crate::communication::Message;

/// spawns the playback thread: it owns the audio output stream and a single
/// sink for the active tone, and runs until the sender side hangs up.
///
/// open/decode failures are logged and swallowed so a bad tone file never
/// takes the clock down.
pub fn spawn(receiver: Receiver<Message>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stream_handle = match rodio::OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(err) => {
                log::error!("couldn't open audio output: {err}");
                return;
            }
        };
        let mut sink: Option<Sink> = None;
        while let Ok(message) = receiver.recv() {
            match message {
                Message::Play { path, volume } => {
                    let file = match fs::File::open(&path) {
                        Ok(file) => file,
                        Err(err) => {
                            log::error!("couldn't open tone {}: {err}", path.display());
                            continue;
                        }
                    };
                    match decoder::Decoder::new(BufReader::new(file)) {
                        Ok(source) => {
                            // a fresh sink replaces any tone still playing
                            let new_sink = Sink::connect_new(stream_handle.mixer());
                            new_sink.set_volume(volume / 100.0);
                            new_sink.append(source.repeat_infinite());
                            new_sink.play();
                            sink = Some(new_sink);
                        }
                        Err(err) => {
                            log::error!("couldn't decode tone {}: {err}", path.display());
                        }
                    }
                }
                Message::SetVolume(volume) => {
                    if let Some(sink) = &sink {
                        sink.set_volume(volume / 100.0);
                    }
                }
                Message::Stop => {
                    if let Some(sink) = &sink {
                        sink.stop();
                    }
                }
            }
        }
    })
}
