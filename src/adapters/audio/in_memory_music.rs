//! In-process stand-in for the playlist mixer and the player's audio
//! preference.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::ports::{MusicOutput, MusicPreference};

/// Mixer state plus the saved "music on" preference.
#[derive(Debug)]
pub struct InMemoryMusicOutput {
    muted: AtomicBool,
    music_enabled: AtomicBool,
    mute_calls: AtomicUsize,
    unmute_calls: AtomicUsize,
}

impl InMemoryMusicOutput {
    /// Unmuted, with the player's music preference on.
    pub fn new() -> Self {
        Self {
            muted: AtomicBool::new(false),
            music_enabled: AtomicBool::new(true),
            mute_calls: AtomicUsize::new(0),
            unmute_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_music_enabled(&self, enabled: bool) {
        self.music_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn mute_calls(&self) -> usize {
        self.mute_calls.load(Ordering::SeqCst)
    }

    pub fn unmute_calls(&self) -> usize {
        self.unmute_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryMusicOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicOutput for InMemoryMusicOutput {
    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    fn mute(&self) {
        self.mute_calls.fetch_add(1, Ordering::SeqCst);
        self.muted.store(true, Ordering::SeqCst);
    }

    fn unmute(&self) {
        self.unmute_calls.fetch_add(1, Ordering::SeqCst);
        self.muted.store(false, Ordering::SeqCst);
    }
}

impl MusicPreference for InMemoryMusicOutput {
    fn music_enabled(&self) -> bool {
        self.music_enabled.load(Ordering::SeqCst)
    }
}
