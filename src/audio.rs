/// Fire-and-forget sound playback.

use std::fs::File;
use std::io::BufReader;

use rodio::source::Buffered;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

/// A decoded sound kept in memory so it can be replayed any number of times.
pub type SoundEffect = Buffered<Decoder<BufReader<File>>>;

pub struct Audio {
    // Dropping the stream silences every sink, so it lives as long as `Audio`.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Audio {
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    /// Start `sound` on its own detached sink.  A missing sound or a sink
    /// that can't be created is silently ignored.
    pub fn play(&self, sound: Option<&SoundEffect>) {
        let Some(sound) = sound else {
            return;
        };
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.append(sound.clone());
            sink.detach();
        }
    }
}

/// Play through `audio` if an output device was opened at all.
pub fn play(audio: Option<&Audio>, sound: Option<&SoundEffect>) {
    if let Some(audio) = audio {
        audio.play(sound);
    }
}
