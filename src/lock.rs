//! Screen-lock classification from on-screen window metadata.
//!
//! When the session is locked, `loginwindow` puts a full-screen shield window
//! above everything else. The same process also owns ordinary login UI at
//! normal layers, so ownership alone is not enough: the shield is recognised
//! by a layer strictly above `LockPolicy::min_layer`.

use std::fmt;

use crate::platform::{WindowDescriptor, WindowSource};

/// Owner name of the macOS lock/login overlay.
pub const LOCK_OVERLAY_OWNER: &str = "loginwindow";

/// Layer the lock overlay is observed to exceed.
pub const LOCK_OVERLAY_MIN_LAYER: i64 = 2000;

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LockState::Locked => "LOCKED",
            LockState::Unlocked => "UNLOCKED",
        })
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Which window counts as the lock overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockPolicy {
    pub owner: String,
    pub min_layer: i64,
}

impl Default for LockPolicy {
    fn default() -> Self {
        Self {
            owner: LOCK_OVERLAY_OWNER.to_string(),
            min_layer: LOCK_OVERLAY_MIN_LAYER,
        }
    }
}

impl LockPolicy {
    /// Exact owner match and a layer strictly above the threshold.
    pub fn matches(&self, window: &WindowDescriptor) -> bool {
        window.owner_name == self.owner && window.layer > self.min_layer
    }
}

/// Stops at the first overlay window; the rest of the list is not inspected.
pub fn classify<'a, I>(windows: I, policy: &LockPolicy) -> LockState
where
    I: IntoIterator<Item = &'a WindowDescriptor>,
{
    match windows.into_iter().find(|w| policy.matches(w)) {
        Some(w) => {
            log::debug!("lock: overlay owner={} layer={}", w.owner_name, w.layer);
            LockState::Locked
        }
        None => LockState::Unlocked,
    }
}

/// Enumerates on-screen windows and classifies them.
///
/// A window list that cannot be obtained is treated as empty, so the probe
/// reports `Unlocked` instead of failing.
pub fn probe(source: &dyn WindowSource, policy: &LockPolicy) -> LockState {
    let windows = source.on_screen_windows().unwrap_or_else(|e| {
        log::warn!("lock: window list unavailable, assuming no windows: {e}");
        Vec::new()
    });
    classify(&windows, policy)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
