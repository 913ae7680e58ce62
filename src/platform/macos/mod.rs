//! macOS platform backend.
//!
//! Window list: CGWindowListCopyWindowInfo via `MacOSWindowSource`.
//! Injection: CGEventPost at kCGHIDEventTap via `MacOSPointerInjector`.
//!
//! Reading window owner names requires Screen Recording permission; without
//! it the window server returns reduced metadata. Injection requires
//! Accessibility permission; without it macOS drops the events silently.
//! Neither condition is an error here. Guide the user to:
//!   System Settings > Privacy & Security > Screen Recording / Accessibility

mod injector;
mod window_list;

use injector::MacOSPointerInjector;
use window_list::MacOSWindowSource;

use crate::platform::{PlatformError, PointerInjector, WindowSource};

// ---------------------------------------------------------------------------
// Factory: window source
// ---------------------------------------------------------------------------

/// Returns the CGWindowList-based window source.
pub fn create_window_source() -> Result<Box<dyn WindowSource>, PlatformError> {
    Ok(Box::new(MacOSWindowSource::new()))
}

// ---------------------------------------------------------------------------
// Factory: pointer injector
// ---------------------------------------------------------------------------

/// Returns the CGEventPost-based pointer injector.
///
/// Accessibility trust is checked here so the warning appears once per
/// process, before any event is posted.
pub fn create_pointer_injector() -> Result<Box<dyn PointerInjector>, PlatformError> {
    let injector = MacOSPointerInjector::new();
    if !injector.is_trusted() {
        log::warn!(
            "injector: Accessibility permission not granted; events may be ignored. \
             Grant it in System Settings > Privacy & Security > Accessibility."
        );
    }
    Ok(Box::new(injector))
}
