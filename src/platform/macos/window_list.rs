//! macOS on-screen window enumeration via CGWindowListCopyWindowInfo.
//!
//! `MacOSWindowSource` implements `WindowSource`. Each call copies a fresh
//! CFArray of CFDictionary window descriptions, extracts the owner name and
//! layer from every entry, and releases the array before returning. Nothing
//! is cached between calls.
//!
//! Memory ownership:
//!   Only the array returned by CGWindowListCopyWindowInfo is owned (Copy
//!   rule). Dictionaries, strings and numbers reached through it follow the
//!   Get rule and are never released individually.

use std::ffi::{c_char, c_void, CStr};

use crate::platform::{PlatformError, WindowDescriptor, WindowSource};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// kCGWindowListOptionOnScreenOnly.
const CG_WINDOW_LIST_OPTION_ON_SCREEN_ONLY: u32 = 1 << 0;

/// kCGWindowListOptionOnScreenAboveWindow. Combined with the null window id
/// this still selects every on-screen window.
const CG_WINDOW_LIST_OPTION_ON_SCREEN_ABOVE_WINDOW: u32 = 1 << 1;

/// kCGNullWindowID.
const CG_NULL_WINDOW_ID: u32 = 0;

/// kCFNumberSInt64Type.
const CF_NUMBER_SINT64_TYPE: isize = 4;

/// kCFStringEncodingUTF8.
const CF_STRING_ENCODING_UTF8: u32 = 0x0800_0100;

// ---------------------------------------------------------------------------
// Raw FFI types and declarations
// ---------------------------------------------------------------------------

type CFTypeRef = *const c_void;
type CFArrayRef = *const c_void;
type CFDictionaryRef = *const c_void;
type CFStringRef = *const c_void;
type CFNumberRef = *const c_void;
type CFTypeID = usize;
type CFIndex = isize;

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    /// Returns a new CFArray of window dictionaries, or null on failure.
    fn CGWindowListCopyWindowInfo(option: u32, relative_to_window: u32) -> CFArrayRef;

    static kCGWindowOwnerName: CFStringRef;
    static kCGWindowLayer: CFStringRef;
}

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    fn CFArrayGetCount(array: CFArrayRef) -> CFIndex;
    fn CFArrayGetValueAtIndex(array: CFArrayRef, idx: CFIndex) -> *const c_void;
    fn CFDictionaryGetValue(dict: CFDictionaryRef, key: *const c_void) -> *const c_void;

    fn CFGetTypeID(cf: CFTypeRef) -> CFTypeID;
    fn CFStringGetTypeID() -> CFTypeID;
    fn CFNumberGetTypeID() -> CFTypeID;

    fn CFStringGetLength(string: CFStringRef) -> CFIndex;
    fn CFStringGetMaximumSizeForEncoding(length: CFIndex, encoding: u32) -> CFIndex;
    fn CFStringGetCString(
        string: CFStringRef,
        buffer: *mut c_char,
        buffer_size: CFIndex,
        encoding: u32,
    ) -> bool;

    fn CFNumberGetValue(number: CFNumberRef, the_type: isize, value_ptr: *mut c_void) -> bool;

    fn CFRelease(cf: *const c_void);
}

// ---------------------------------------------------------------------------
// Public struct
// ---------------------------------------------------------------------------

/// Enumerates on-screen windows through the CoreGraphics window server API.
pub struct MacOSWindowSource;

impl MacOSWindowSource {
    pub fn new() -> Self {
        MacOSWindowSource
    }
}

// ---------------------------------------------------------------------------
// WindowSource trait impl
// ---------------------------------------------------------------------------

impl WindowSource for MacOSWindowSource {
    fn on_screen_windows(&self) -> Result<Vec<WindowDescriptor>, PlatformError> {
        let query_start = std::time::Instant::now();

        let array = unsafe {
            CGWindowListCopyWindowInfo(
                CG_WINDOW_LIST_OPTION_ON_SCREEN_ONLY | CG_WINDOW_LIST_OPTION_ON_SCREEN_ABOVE_WINDOW,
                CG_NULL_WINDOW_ID,
            )
        };
        if array.is_null() {
            return Err(PlatformError::Other(
                "CGWindowListCopyWindowInfo returned null".into(),
            ));
        }

        let windows = unsafe {
            let count = CFArrayGetCount(array);
            let mut windows = Vec::with_capacity(count.max(0) as usize);
            for idx in 0..count {
                let dict = CFArrayGetValueAtIndex(array, idx);
                if dict.is_null() {
                    continue;
                }
                windows.push(WindowDescriptor {
                    owner_name: read_string(dict, kCGWindowOwnerName).unwrap_or_default(),
                    layer: read_i64(dict, kCGWindowLayer).unwrap_or(0),
                });
            }
            CFRelease(array);
            windows
        };

        log::debug!(
            "window_list: {} on-screen windows in {:.2}ms",
            windows.len(),
            query_start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(windows)
    }
}

// ---------------------------------------------------------------------------
// Dictionary field readers
// ---------------------------------------------------------------------------

/// Reads a CFString value as UTF-8. `None` if absent or not a string.
unsafe fn read_string(dict: CFDictionaryRef, key: CFStringRef) -> Option<String> {
    let value = CFDictionaryGetValue(dict, key);
    if value.is_null() || CFGetTypeID(value) != CFStringGetTypeID() {
        return None;
    }

    let length = CFStringGetLength(value);
    // +1 for the NUL terminator.
    let capacity = CFStringGetMaximumSizeForEncoding(length, CF_STRING_ENCODING_UTF8) + 1;
    let mut buffer = vec![0 as c_char; capacity.max(1) as usize];
    if !CFStringGetCString(value, buffer.as_mut_ptr(), capacity, CF_STRING_ENCODING_UTF8) {
        return None;
    }

    Some(
        CStr::from_ptr(buffer.as_ptr())
            .to_string_lossy()
            .into_owned(),
    )
}

/// Reads a CFNumber value as i64. `None` if absent or not a number.
unsafe fn read_i64(dict: CFDictionaryRef, key: CFStringRef) -> Option<i64> {
    let value = CFDictionaryGetValue(dict, key);
    if value.is_null() || CFGetTypeID(value) != CFNumberGetTypeID() {
        return None;
    }

    let mut out: i64 = 0;
    let ok = CFNumberGetValue(
        value,
        CF_NUMBER_SINT64_TYPE,
        (&mut out as *mut i64).cast::<c_void>(),
    );
    ok.then_some(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_mask_combines_on_screen_flags() {
        assert_eq!(
            CG_WINDOW_LIST_OPTION_ON_SCREEN_ONLY | CG_WINDOW_LIST_OPTION_ON_SCREEN_ABOVE_WINDOW,
            0b11
        );
    }
}
