//! Property tests over the public API: what validates, and what ends up on the pins.

use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;

use embassy_futures::block_on;
use fourseg::{
    is_renderable, validate, FourSegDisplay, Gpio, Glyph, InvalidRenderRequest, Level,
    PinAssignment, PinId, PinRole, Timer,
};
use proptest::prelude::*;
use strum::VariantArray;

/// Up to four digits, each optionally followed by a decimal point
fn renderable() -> impl Strategy<Value = String> {
    prop::collection::vec((0u8..10, any::<bool>()), 0..=4).prop_map(|digits| {
        digits
            .into_iter()
            .map(|(digit, point)| {
                let mut s = String::new();
                s.push(char::from(b'0' + digit));
                if point {
                    s.push('.');
                }
                s
            })
            .collect()
    })
}

/// Tracks which digit enable lines are high, and the most that were ever high together
#[derive(Default)]
struct EnableTracker {
    levels: HashMap<PinId, Level>,
    most_selected: usize,
    settles: usize,
}

struct TrackingGpio<'a> {
    tracker: &'a RefCell<EnableTracker>,
    enables: [PinId; 4],
}

impl Gpio for TrackingGpio<'_> {
    type Error = Infallible;

    fn configure_output(&mut self, _pin: PinId) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write_digital(&mut self, pin: PinId, level: Level) -> Result<(), Self::Error> {
        let mut tracker = self.tracker.borrow_mut();
        tracker.levels.insert(pin, level);

        let selected = self
            .enables
            .iter()
            .filter(|pin| tracker.levels.get(*pin) == Some(&Level::High))
            .count();
        tracker.most_selected = tracker.most_selected.max(selected);

        Ok(())
    }
}

struct CountingTimer<'a>(&'a RefCell<EnableTracker>);

impl Timer for CountingTimer<'_> {
    async fn settle(&mut self) {
        self.0.borrow_mut().settles += 1;
    }
}

fn tracked_render(requests: &[String]) -> EnableTracker {
    let tracker = RefCell::new(EnableTracker::default());
    let pins = PinAssignment::default();
    let enables = [
        pins.pin(PinRole::Digit1),
        pins.pin(PinRole::Digit2),
        pins.pin(PinRole::Digit3),
        pins.pin(PinRole::Digit4),
    ];

    let mut display = FourSegDisplay::new(
        TrackingGpio {
            tracker: &tracker,
            enables,
        },
        CountingTimer(&tracker),
        pins,
    )
    .unwrap();

    for request in requests {
        block_on(display.render_value(request)).unwrap();
    }

    drop(display);
    tracker.into_inner()
}

proptest! {
    #[test]
    fn digits_with_single_points_validate(request in renderable()) {
        prop_assert_eq!(Ok(()), validate(&request));
    }

    #[test]
    fn any_other_character_fails(
        prefix in "[0-9]{0,2}",
        bad in any::<char>().prop_filter("not renderable", |c| !c.is_ascii_digit() && *c != '.'),
        suffix in "[0-9]{0,1}",
    ) {
        let request = format!("{prefix}{bad}{suffix}");
        prop_assert!(!is_renderable(&request), "{:?} validated", request);
    }

    #[test]
    fn adjacent_points_fail(prefix in renderable(), suffix in renderable()) {
        let request = format!("{prefix}..{suffix}");
        let is_repeated_point = matches!(
            validate(&request),
            Err(InvalidRenderRequest::RepeatedPoint { .. })
        );
        prop_assert!(is_repeated_point, "{:?}", request);
    }

    #[test]
    fn more_than_four_digits_fail(digits in "[0-9]{5,8}") {
        prop_assert_eq!(
            Err(InvalidRenderRequest::TooManyDigits(digits.len())),
            validate(&digits)
        );
    }

    #[test]
    fn never_two_digits_selected(
        requests in prop::collection::vec(prop_oneof![renderable(), "[0-9.x]{0,6}"], 1..6)
    ) {
        let tracker = tracked_render(&requests);
        prop_assert!(tracker.most_selected <= 1);
    }

    #[test]
    fn one_hold_per_digit_and_point(request in renderable()) {
        let tracker = tracked_render(std::slice::from_ref(&request));
        prop_assert_eq!(request.len(), tracker.settles);
    }
}

#[test]
fn every_glyph_lights_something() {
    for glyph in Glyph::VARIANTS {
        assert_ne!(0, glyph.pattern().bits(), "{glyph:?}");
    }
}
