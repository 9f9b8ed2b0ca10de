//! In-memory per-process session bookkeeping.
//!
//! Owned by the coordinator and mutated only through it. Nothing here is
//! persisted; a restart starts from a fresh state.

use std::fmt;

use crate::domain::foundation::Timestamp;

/// Continuation supplied with a between-level ad request.
pub type AdCallback = Box<dyn FnOnce() + 'static>;

/// The gated interstitial currently on screen.
pub struct ShownInterstitial {
    callback: Option<AdCallback>,
    deadline: Option<Timestamp>,
}

impl ShownInterstitial {
    /// The caller's continuation, if one was supplied.
    pub fn into_callback(self) -> Option<AdCallback> {
        self.callback
    }
}

/// Counters, cache latches and the between-level interstitial on screen.
#[derive(Default)]
pub struct SessionState {
    interstitial_counter: u32,
    interstitials_cached: bool,
    rewarded_cached: bool,
    on_screen: Option<ShownInterstitial>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interstitial_counter(&self) -> u32 {
        self.interstitial_counter
    }

    /// Counts one gated show attempt. Saturates rather than wrapping.
    pub fn increment_interstitial_counter(&mut self) {
        self.interstitial_counter = self.interstitial_counter.saturating_add(1);
    }

    /// Called only when an ad is actually displayed.
    pub fn reset_interstitial_counter(&mut self) {
        self.interstitial_counter = 0;
    }

    pub fn interstitials_cached(&self) -> bool {
        self.interstitials_cached
    }

    pub fn rewarded_cached(&self) -> bool {
        self.rewarded_cached
    }

    /// Sets the interstitial latch. Returns `false` if it was already set.
    pub fn latch_interstitials_cached(&mut self) -> bool {
        !std::mem::replace(&mut self.interstitials_cached, true)
    }

    /// Sets the rewarded latch. Returns `false` if it was already set.
    pub fn latch_rewarded_cached(&mut self) -> bool {
        !std::mem::replace(&mut self.rewarded_cached, true)
    }

    /// True from a gated display until its close event or timeout.
    pub fn interstitial_on_screen(&self) -> bool {
        self.on_screen.is_some()
    }

    pub fn has_pending_callback(&self) -> bool {
        self.on_screen
            .as_ref()
            .is_some_and(|shown| shown.callback.is_some())
    }

    /// Marks a gated interstitial as displayed, with its optional continuation.
    ///
    /// Callers must check [`interstitial_on_screen`](Self::interstitial_on_screen)
    /// first; a pending continuation is never silently dropped.
    pub fn begin_interstitial(&mut self, callback: Option<AdCallback>, deadline: Option<Timestamp>) {
        debug_assert!(self.on_screen.is_none(), "interstitial already on screen");
        self.on_screen = Some(ShownInterstitial { callback, deadline });
    }

    /// Clears the on-screen interstitial and hands back its continuation. The
    /// slot is empty before the caller gets to run it.
    pub fn finish_interstitial(&mut self) -> Option<AdCallback> {
        self.on_screen.take().and_then(ShownInterstitial::into_callback)
    }

    /// Clears the on-screen interstitial only if its deadline has passed.
    pub fn take_expired_interstitial(&mut self, now: &Timestamp) -> Option<ShownInterstitial> {
        let expired = matches!(
            &self.on_screen,
            Some(ShownInterstitial { deadline: Some(deadline), .. }) if now.has_reached(deadline)
        );
        if expired {
            self.on_screen.take()
        } else {
            None
        }
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("interstitial_counter", &self.interstitial_counter)
            .field("interstitials_cached", &self.interstitials_cached)
            .field("rewarded_cached", &self.rewarded_cached)
            .field("interstitial_on_screen", &self.on_screen.is_some())
            .field("pending_callback", &self.has_pending_callback())
            .finish()
    }
}
