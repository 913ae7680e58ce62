//! macOS pointer injection via CGEventPost.
//!
//! `MacOSPointerInjector` implements `PointerInjector`. Injection is
//! synchronous: `CGEventPost` delivers the event before returning, so no
//! background thread is needed. Events carry no event source and are posted
//! at kCGHIDEventTap, so they enter the pipeline as if a physical mouse had
//! produced them.

use std::ffi::c_void;

use crate::platform::{PlatformError, Point, PointerEvent, PointerInjector};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// CGEventTapLocation: kCGHIDEventTap -- where HID system events enter.
const CG_HID_EVENT_TAP: u32 = 0;

/// CGEventType values for the three gesture steps.
const CG_EVENT_LEFT_MOUSE_DOWN: u32 = 1;
const CG_EVENT_LEFT_MOUSE_UP: u32 = 2;
const CG_EVENT_MOUSE_MOVED: u32 = 5;

/// CGMouseButton: kCGMouseButtonLeft. Ignored for moves but required by the call.
const CG_MOUSE_BUTTON_LEFT: u32 = 0;

// ---------------------------------------------------------------------------
// Raw FFI
// ---------------------------------------------------------------------------

type CGEventRef = *mut c_void;
type CGEventSourceRef = *mut c_void;

#[repr(C)]
#[derive(Clone, Copy)]
struct CGPoint {
    x: f64,
    y: f64,
}

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    /// Returns true if this process has been granted Accessibility permission.
    fn AXIsProcessTrusted() -> bool;

    fn CGEventCreateMouseEvent(
        source: CGEventSourceRef,
        mouse_type: u32,
        mouse_cursor_position: CGPoint,
        mouse_button: u32,
    ) -> CGEventRef;

    fn CGEventPost(tap_location: u32, event: CGEventRef);
}

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    fn CFRelease(cf: *const c_void);
}

// ---------------------------------------------------------------------------
// Public struct
// ---------------------------------------------------------------------------

/// Posts left-button mouse events via CGEventPost on macOS.
///
/// Stateless: each `post()` call creates a `CGEvent`, posts it, and releases
/// it immediately.
pub struct MacOSPointerInjector;

impl MacOSPointerInjector {
    pub fn new() -> Self {
        MacOSPointerInjector
    }

    pub fn is_trusted(&self) -> bool {
        unsafe { AXIsProcessTrusted() }
    }
}

/// Maps a gesture step to its CGEventType.
fn event_type(event: &PointerEvent) -> u32 {
    match event {
        PointerEvent::Move(_) => CG_EVENT_MOUSE_MOVED,
        PointerEvent::Down(_) => CG_EVENT_LEFT_MOUSE_DOWN,
        PointerEvent::Up(_) => CG_EVENT_LEFT_MOUSE_UP,
    }
}

// ---------------------------------------------------------------------------
// PointerInjector trait impl
// ---------------------------------------------------------------------------

impl PointerInjector for MacOSPointerInjector {
    fn post(&self, event: PointerEvent) -> Result<(), PlatformError> {
        let Point { x, y } = event.point();
        let inject_start = std::time::Instant::now();

        unsafe {
            let cg_event = CGEventCreateMouseEvent(
                std::ptr::null_mut(),
                event_type(&event),
                CGPoint { x, y },
                CG_MOUSE_BUTTON_LEFT,
            );
            if cg_event.is_null() {
                return Err(PlatformError::EventCreation {
                    kind: event.kind(),
                    x,
                    y,
                });
            }

            CGEventPost(CG_HID_EVENT_TAP, cg_event);
            CFRelease(cg_event.cast::<c_void>());
        }

        log::debug!(
            "injector: posted {} at ({}, {}) in {:.2}ms",
            event.kind(),
            x,
            y,
            inject_start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_steps_map_to_cg_event_types() {
        let p = Point::new(0.0, 0.0);
        assert_eq!(event_type(&PointerEvent::Move(p)), 5);
        assert_eq!(event_type(&PointerEvent::Down(p)), 1);
        assert_eq!(event_type(&PointerEvent::Up(p)), 2);
    }
}
