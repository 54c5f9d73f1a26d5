//! Decide whether a string can be drawn on the display at all.

use core::fmt;

/// The most digits that fit on the display
pub const MAX_DIGITS: usize = 4;

/// The most decimal points that fit on the display; one per digit
pub const MAX_POINTS: usize = 4;

/// Why a render request can't be drawn.
///
/// [`crate::FourSegDisplay::render_value`] never returns this; it draws `Err` instead.  Use
/// [`validate`] directly to find out ahead of time why some input would be rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidRenderRequest {
    /// Something other than an ASCII digit or `.`, at the given char index
    UnsupportedChar { index: usize, c: char },
    /// A `.` immediately after another `.`, at the given char index
    RepeatedPoint { index: usize },
    /// More than [`MAX_DIGITS`] digits
    TooManyDigits(usize),
    /// More than [`MAX_POINTS`] decimal points
    TooManyPoints(usize),
}

impl fmt::Display for InvalidRenderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedChar { index, c } => {
                write!(f, "unsupported character {c:?} at index {index}")
            }
            Self::RepeatedPoint { index } => write!(f, "repeated decimal point at index {index}"),
            Self::TooManyDigits(count) => {
                write!(f, "{count} digits, at most {MAX_DIGITS} can be displayed")
            }
            Self::TooManyPoints(count) => {
                write!(f, "{count} decimal points, at most {MAX_POINTS} can be displayed")
            }
        }
    }
}

/// Check that `request` is something the display can draw: only ASCII digits and `.`, never two
/// `.` in a row, at most four of each.
///
/// Bad characters and repeated points are reported as soon as they're seen; the counts are only
/// checked once the whole string has been scanned.  The empty string is valid and draws nothing.
pub fn validate(request: &str) -> Result<(), InvalidRenderRequest> {
    let mut digits = 0usize;
    let mut points = 0usize;
    let mut previous_was_point = false;

    for (index, c) in request.chars().enumerate() {
        match c {
            '.' if previous_was_point => return Err(InvalidRenderRequest::RepeatedPoint { index }),
            '.' => {
                points += 1;
                previous_was_point = true;
            }
            c if c.is_ascii_digit() => {
                digits += 1;
                previous_was_point = false;
            }
            c => return Err(InvalidRenderRequest::UnsupportedChar { index, c }),
        }
    }

    if digits > MAX_DIGITS {
        return Err(InvalidRenderRequest::TooManyDigits(digits));
    }

    if points > MAX_POINTS {
        return Err(InvalidRenderRequest::TooManyPoints(points));
    }

    Ok(())
}

/// Shorthand for `validate(request).is_ok()`
pub fn is_renderable(request: &str) -> bool {
    validate(request).is_ok()
}
