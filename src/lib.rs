//! lockprobe -- macOS UI automation primitives.
//!
//! Two leaf tools built on one small platform layer:
//! - `check-locked` reports whether the login window's lock shield is on
//!   screen (`LOCKED` / `UNLOCKED`).
//! - `tap <x> <y>` posts a synthetic move + left-click at a screen point.
//!
//! The library exposes the same operations so other automation code can
//! call them without spawning processes.

pub mod cli;
pub mod config;
pub mod lock;
pub mod platform;
pub mod tap;

pub use config::{Config, ConfigError};
pub use lock::{classify, probe, LockPolicy, LockState};
pub use platform::{
    PlatformError, Point, PointerEvent, PointerInjector, WindowDescriptor, WindowSource,
};
pub use tap::{parse_point, tap, TapTiming, UsageError};
