//! Music ports - Playlist muting and the player's music preference.
//!
//! Used by the audio ducking handler to silence background music while an
//! ad plays and restore it afterwards.

/// Port for the playlist mixer.
pub trait MusicOutput: Send + Sync {
    fn is_muted(&self) -> bool;

    fn mute(&self);

    fn unmute(&self);
}

/// Port for the player's saved audio preference.
pub trait MusicPreference: Send + Sync {
    /// Whether the player wants background music on.
    fn music_enabled(&self) -> bool;
}
