//! Synthetic left-click at a screen coordinate.
//!
//! A tap is three events posted at the same point: move, mouse-down,
//! mouse-up. The pause after the move lets hover state settle before the
//! press; the pause between press and release keeps UI frameworks from
//! dropping a zero-length click.

use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::platform::{PlatformError, Point, PointerEvent, PointerInjector};

/// Printed verbatim when the coordinates are missing or malformed.
pub const USAGE: &str = "Usage: tap <x> <y>";

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", USAGE)]
pub struct UsageError;

/// Parses the first two positional arguments as x and y.
///
/// Anything after the second argument is ignored. Negative and fractional
/// values pass through; padded, hexadecimal and non-finite values are
/// rejected.
pub fn parse_point<S: AsRef<str>>(args: &[S]) -> Result<Point, UsageError> {
    let [x, y, ..] = args else {
        return Err(UsageError);
    };
    Ok(Point::new(parse_coord(x.as_ref())?, parse_coord(y.as_ref())?))
}

fn parse_coord(arg: &str) -> Result<f64, UsageError> {
    match arg.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(UsageError),
    }
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Pauses inside the gesture. Defaults are empirical and may need tuning per
/// host or OS version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapTiming {
    /// After the move, before the press.
    pub hover_settle: Duration,
    /// Between press and release.
    pub press_hold: Duration,
}

impl Default for TapTiming {
    fn default() -> Self {
        Self {
            hover_settle: Duration::from_millis(100),
            press_hold: Duration::from_millis(50),
        }
    }
}

// ---------------------------------------------------------------------------
// Gesture
// ---------------------------------------------------------------------------

/// Posts move, down and up at `point`, pausing on the calling thread between
/// steps. The first failed post aborts the gesture.
pub fn tap(
    injector: &dyn PointerInjector,
    point: Point,
    timing: &TapTiming,
) -> Result<(), PlatformError> {
    injector.post(PointerEvent::Move(point))?;
    thread::sleep(timing.hover_settle);

    injector.post(PointerEvent::Down(point))?;
    thread::sleep(timing.press_hold);

    injector.post(PointerEvent::Up(point))?;

    log::debug!("tap: completed at ({point})");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::time::Instant;

    /// Records every posted event with the time it arrived.
    #[derive(Default)]
    struct RecordingInjector {
        posted: RefCell<Vec<(PointerEvent, Instant)>>,
        fail_on: Option<&'static str>,
    }

    impl PointerInjector for RecordingInjector {
        fn post(&self, event: PointerEvent) -> Result<(), PlatformError> {
            if self.fail_on == Some(event.kind()) {
                let Point { x, y } = event.point();
                return Err(PlatformError::EventCreation {
                    kind: event.kind(),
                    x,
                    y,
                });
            }
            self.posted.borrow_mut().push((event, Instant::now()));
            Ok(())
        }
    }

    impl RecordingInjector {
        fn events(&self) -> Vec<PointerEvent> {
            self.posted.borrow().iter().map(|(e, _)| *e).collect()
        }
    }

    const NO_PAUSE: TapTiming = TapTiming {
        hover_settle: Duration::ZERO,
        press_hold: Duration::ZERO,
    };

    #[test]
    fn parses_two_numbers() {
        assert_eq!(parse_point(&["100", "200"]), Ok(Point::new(100.0, 200.0)));
    }

    #[test]
    fn accepts_negative_and_fractional_values() {
        assert_eq!(parse_point(&["-12.5", "0.75"]), Ok(Point::new(-12.5, 0.75)));
        assert_eq!(parse_point(&["1e3", "+4"]), Ok(Point::new(1000.0, 4.0)));
    }

    #[test]
    fn extra_arguments_are_ignored() {
        assert_eq!(parse_point(&["1", "2", "three"]), Ok(Point::new(1.0, 2.0)));
    }

    #[test]
    fn missing_arguments_are_usage_errors() {
        let none: [&str; 0] = [];
        assert_eq!(parse_point(&none), Err(UsageError));
        assert_eq!(parse_point(&["100"]), Err(UsageError));
    }

    #[test]
    fn non_numeric_arguments_are_usage_errors() {
        assert_eq!(parse_point(&["abc", "200"]), Err(UsageError));
        assert_eq!(parse_point(&["100", "2OO"]), Err(UsageError));
        assert_eq!(parse_point(&["", "200"]), Err(UsageError));
    }

    #[test]
    fn padded_arguments_are_usage_errors() {
        assert_eq!(parse_point(&[" 100", "200"]), Err(UsageError));
        assert_eq!(parse_point(&["100", "200\n"]), Err(UsageError));
        assert_eq!(parse_point(&["100\t", "200"]), Err(UsageError));
    }

    #[test]
    fn hexadecimal_arguments_are_usage_errors() {
        assert_eq!(parse_point(&["0x1p4", "1"]), Err(UsageError));
        assert_eq!(parse_point(&["1", "0x10"]), Err(UsageError));
    }

    #[test]
    fn non_finite_arguments_are_usage_errors() {
        assert_eq!(parse_point(&["NaN", "1"]), Err(UsageError));
        assert_eq!(parse_point(&["1", "inf"]), Err(UsageError));
    }

    #[test]
    fn usage_error_renders_usage_line() {
        assert_eq!(UsageError.to_string(), "Usage: tap <x> <y>");
    }

    #[test]
    fn default_timing_matches_observed_values() {
        let timing = TapTiming::default();
        assert_eq!(timing.hover_settle, Duration::from_millis(100));
        assert_eq!(timing.press_hold, Duration::from_millis(50));
    }

    #[test]
    fn gesture_posts_move_down_up_at_same_point() {
        let injector = RecordingInjector::default();
        let point = Point::new(100.0, 200.0);

        tap(&injector, point, &NO_PAUSE).unwrap();

        assert_eq!(
            injector.events(),
            vec![
                PointerEvent::Move(point),
                PointerEvent::Down(point),
                PointerEvent::Up(point),
            ]
        );
    }

    #[test]
    fn gesture_pauses_between_steps() {
        let injector = RecordingInjector::default();
        let timing = TapTiming {
            hover_settle: Duration::from_millis(30),
            press_hold: Duration::from_millis(15),
        };

        tap(&injector, Point::new(5.0, 5.0), &timing).unwrap();

        let posted = injector.posted.borrow();
        assert_eq!(posted.len(), 3);
        assert!(posted[1].1.duration_since(posted[0].1) >= timing.hover_settle);
        assert!(posted[2].1.duration_since(posted[1].1) >= timing.press_hold);
    }

    #[test]
    fn failed_press_aborts_before_release() {
        let injector = RecordingInjector {
            fail_on: Some("mouse-down"),
            ..Default::default()
        };
        let point = Point::new(3.0, 4.0);

        let err = tap(&injector, point, &NO_PAUSE).unwrap_err();

        assert!(matches!(
            err,
            PlatformError::EventCreation {
                kind: "mouse-down",
                ..
            }
        ));
        assert_eq!(injector.events(), vec![PointerEvent::Move(point)]);
    }
}
