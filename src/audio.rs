//! Sound triggers for block edits plus optional background music. Built on
//! `rodio` behind the `audio` cargo feature; without it the bank compiles
//! to a no-op so headless builds never touch the platform audio stack.

pub const MUSIC_PATH: &str = "assets/music/theme.ogg";

#[derive(Copy, Clone, Debug)]
pub enum SoundEffect {
    BlockPlaced,
    BlockRemoved,
}

#[cfg(feature = "audio")]
pub use self::bank::SoundBank;

#[cfg(feature = "audio")]
mod bank {
    use std::fs::File;
    use std::io::BufReader;
    use std::time::Duration;

    use rodio::source::{SineWave, Source};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    use super::SoundEffect;

    impl SoundEffect {
        fn tone(self) -> (f32, f32) {
            match self {
                SoundEffect::BlockPlaced => (520.0, 0.09),
                SoundEffect::BlockRemoved => (360.0, 0.12),
            }
        }
    }

    pub struct SoundBank {
        // Dropping the stream kills playback, so it lives as long as the bank.
        stream: Option<(OutputStream, OutputStreamHandle)>,
        _music: Option<Sink>,
    }

    impl SoundBank {
        /// Opens the default output device. An unavailable device degrades
        /// to silence; it never fails the game.
        pub fn new(music_volume: f32, music_enabled: bool) -> Self {
            let stream = match OutputStream::try_default() {
                Ok(pair) => Some(pair),
                Err(e) => {
                    log::warn!("audio output unavailable: {e}");
                    None
                }
            };

            let music = if music_enabled {
                stream
                    .as_ref()
                    .and_then(|(_, handle)| Self::start_music(handle, music_volume))
            } else {
                None
            };

            Self {
                stream,
                _music: music,
            }
        }

        /// Loops the theme if one is shipped next to the executable.
        fn start_music(handle: &OutputStreamHandle, volume: f32) -> Option<Sink> {
            let file = File::open(super::MUSIC_PATH).ok()?;
            let source = Decoder::new(BufReader::new(file)).ok()?.repeat_infinite();

            let sink = Sink::try_new(handle).ok()?;
            sink.set_volume(volume);
            sink.append(source);
            log::info!("playing {} at volume {volume}", super::MUSIC_PATH);
            Some(sink)
        }

        pub fn play(&self, effect: SoundEffect) {
            let Some((_, handle)) = &self.stream else {
                return;
            };
            let (frequency, seconds) = effect.tone();
            let source = SineWave::new(frequency)
                .take_duration(Duration::from_secs_f32(seconds))
                .amplify(0.2);
            if let Err(e) = handle.play_raw(source) {
                log::warn!("failed to play {effect:?}: {e}");
            }
        }
    }
}

#[cfg(not(feature = "audio"))]
pub struct SoundBank;

#[cfg(not(feature = "audio"))]
impl SoundBank {
    pub fn new(_music_volume: f32, _music_enabled: bool) -> Self {
        SoundBank
    }

    pub fn play(&self, _effect: SoundEffect) {}
}
