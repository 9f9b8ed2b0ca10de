//! Bus event handlers.

mod audio_ducking;

pub use audio_ducking::AudioDuckingHandler;
