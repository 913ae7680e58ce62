//! Platform abstraction layer.
//!
//! Defines the `WindowSource` and `PointerInjector` traits plus the shared
//! `PlatformError`. The macOS backend lives in a child module; other targets
//! get factories that report `PlatformError::Unavailable`.

#[cfg(target_os = "macos")]
mod macos;

use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PlatformError {
    /// No backend exists for the running OS.
    #[error("platform unavailable: {0}")]
    Unavailable(String),

    /// The OS refused to build an input event.
    #[error("failed to create {kind} event at ({x}, {y})")]
    EventCreation { kind: &'static str, x: f64, y: f64 },

    #[error("{0}")]
    Other(String),
}

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Metadata the window server reports for one on-screen window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowDescriptor {
    /// Name of the owning process. Empty when the server omits it.
    pub owner_name: String,
    /// Stacking layer. 0 when the server omits it.
    pub layer: i64,
}

impl WindowDescriptor {
    pub fn new(owner_name: impl Into<String>, layer: i64) -> Self {
        Self {
            owner_name: owner_name.into(),
            layer,
        }
    }
}

/// A global screen coordinate in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    /// Renders as `x, y` using the round-trippable float form (`100.0`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}, {:?}", self.x, self.y)
    }
}

/// One step of a synthetic left-button gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Move(Point),
    Down(Point),
    Up(Point),
}

impl PointerEvent {
    pub fn point(&self) -> Point {
        match *self {
            PointerEvent::Move(p) | PointerEvent::Down(p) | PointerEvent::Up(p) => p,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PointerEvent::Move(_) => "move",
            PointerEvent::Down(_) => "mouse-down",
            PointerEvent::Up(_) => "mouse-up",
        }
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Read-only view of the window server's on-screen window list.
pub trait WindowSource {
    /// Returns every on-screen window, front to back.
    ///
    /// Fails only when the list could not be obtained at all; callers decide
    /// how to degrade.
    fn on_screen_windows(&self) -> Result<Vec<WindowDescriptor>, PlatformError>;
}

/// Posts synthetic pointer events into the system input pipeline.
pub trait PointerInjector {
    fn post(&self, event: PointerEvent) -> Result<(), PlatformError>;
}

// ---------------------------------------------------------------------------
// Factories
// ---------------------------------------------------------------------------

/// Returns the window-server backed window source for this OS.
pub fn create_window_source() -> Result<Box<dyn WindowSource>, PlatformError> {
    #[cfg(target_os = "macos")]
    {
        macos::create_window_source()
    }
    #[cfg(not(target_os = "macos"))]
    {
        Err(unsupported())
    }
}

/// Returns the HID-level pointer injector for this OS.
pub fn create_pointer_injector() -> Result<Box<dyn PointerInjector>, PlatformError> {
    #[cfg(target_os = "macos")]
    {
        macos::create_pointer_injector()
    }
    #[cfg(not(target_os = "macos"))]
    {
        Err(unsupported())
    }
}

#[cfg(not(target_os = "macos"))]
fn unsupported() -> PlatformError {
    PlatformError::Unavailable(format!(
        "{} is not supported; a macOS window server is required",
        std::env::consts::OS
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
