//! The glyphs the display can draw, and the segment patterns that draw them.
//!
//! Segments are named the usual way: `A` is the top bar, then clockwise `B` through `F`, and `G` is
//! the middle bar.
//!
//! ```text
//!  AAA
//! F   B
//!  GGG
//! E   C
//!  DDD
//! ```

/// One of the seven bars of a 7-segment digit.  The decimal point is not a segment; it has its own
/// line (see [`crate::PinRole::DecimalPoint`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::VariantArray)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Segment {
    /// The bit for this segment in a [`GlyphPattern`]; `A` is bit 0 and `G` is bit 6.
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Which of the seven segments are lit to draw one character.
///
/// Bit 0 is segment `A`, bit 6 is segment `G`; a set bit means lit.  Bit 7 is always clear, the
/// decimal point is driven separately.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphPattern(u8);

impl GlyphPattern {
    /// Build a pattern from a raw segment mask.  Bit 7 is discarded.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b0111_1111)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_lit(self, segment: Segment) -> bool {
        self.0 & segment.mask() != 0
    }
}

/// Segment masks for the decimal digits, indexed by digit value.
const DIGIT_PATTERNS: [GlyphPattern; 10] = [
    GlyphPattern(0x3F), /* 0 */
    GlyphPattern(0x06), /* 1 */
    GlyphPattern(0x5B), /* 2 */
    GlyphPattern(0x4F), /* 3 */
    GlyphPattern(0x66), /* 4 */
    GlyphPattern(0x6D), /* 5 */
    GlyphPattern(0x7D), /* 6 */
    GlyphPattern(0x07), /* 7 */
    GlyphPattern(0x7F), /* 8 */
    GlyphPattern(0x6F), /* 9 */
];

/// Every character the display knows how to draw.
///
/// Besides the ten digits there are just enough letters to spell `Err`, `On` and `OFF`.  Since this
/// is a closed set there is no way to ask for a glyph that doesn't exist; converting from a digit
/// value or a `char` is where that check happens (see [`Self::from_digit`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::VariantArray)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    /// Capital `E`
    E,
    /// Lower case `r`
    R,
    /// Lower case `n`
    N,
    /// Capital `F`
    F,
    /// Capital `O`, which is drawn the same as `0`
    O,
}

impl Glyph {
    const DIGITS: [Glyph; 10] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
    ];

    /// The glyph for a digit value from 0 to 9, or `None` for anything larger
    pub fn from_digit(value: u8) -> Option<Self> {
        Self::DIGITS.get(usize::from(value)).copied()
    }

    /// The glyph for an ASCII decimal digit character, or `None` for any other character
    pub fn from_ascii_digit(c: char) -> Option<Self> {
        if c.is_ascii_digit() {
            Self::from_digit(c as u8 - b'0')
        } else {
            None
        }
    }

    /// The segment pattern that draws this glyph
    pub fn pattern(self) -> GlyphPattern {
        match self {
            Self::E => GlyphPattern(0x79),
            Self::R => GlyphPattern(0x50),
            Self::N => GlyphPattern(0x54),
            Self::F => GlyphPattern(0x71),
            Self::O => DIGIT_PATTERNS[0],
            // The digit variants are declared first and in order, so their discriminant is their
            // value
            digit => DIGIT_PATTERNS[digit as usize],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::VariantArray;

    #[test]
    fn digit_patterns_are_distinct() {
        for (i, a) in DIGIT_PATTERNS.iter().enumerate() {
            for (j, b) in DIGIT_PATTERNS.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "digits {i} and {j} render identically");
                }
            }
        }
    }

    #[test]
    fn digits_map_to_their_own_pattern() {
        for value in 0..10u8 {
            let glyph = Glyph::from_digit(value).unwrap();
            assert_eq!(DIGIT_PATTERNS[value as usize], glyph.pattern());

            let c = char::from(b'0' + value);
            assert_eq!(Some(glyph), Glyph::from_ascii_digit(c));
        }

        assert_eq!(None, Glyph::from_digit(10));
        assert_eq!(None, Glyph::from_ascii_digit('a'));
        assert_eq!(None, Glyph::from_ascii_digit('.'));
        // Fullwidth digit three; a digit, but not one we can draw
        assert_eq!(None, Glyph::from_ascii_digit('\u{ff13}'));
    }

    #[test]
    fn glyphs_have_expected_segments() {
        use Segment::*;

        // (glyph, lit segments)
        let cases: &[(Glyph, &[Segment])] = &[
            (Glyph::Zero, &[A, B, C, D, E, F]),
            (Glyph::One, &[B, C]),
            (Glyph::Two, &[A, B, D, E, G]),
            (Glyph::Three, &[A, B, C, D, G]),
            (Glyph::Four, &[B, C, F, G]),
            (Glyph::Five, &[A, C, D, F, G]),
            (Glyph::Six, &[A, C, D, E, F, G]),
            (Glyph::Seven, &[A, B, C]),
            (Glyph::Eight, &[A, B, C, D, E, F, G]),
            (Glyph::Nine, &[A, B, C, D, F, G]),
            (Glyph::E, &[A, D, E, F, G]),
            (Glyph::R, &[E, G]),
            (Glyph::N, &[C, E, G]),
            (Glyph::F, &[A, E, F, G]),
            (Glyph::O, &[A, B, C, D, E, F]),
        ];

        assert_eq!(Glyph::VARIANTS.len(), cases.len());

        for (glyph, lit) in cases {
            let pattern = glyph.pattern();
            for segment in Segment::VARIANTS {
                assert_eq!(
                    lit.contains(segment),
                    pattern.is_lit(*segment),
                    "glyph {glyph:?} segment {segment:?}"
                );
            }
        }
    }

    #[test]
    fn patterns_never_set_the_point_bit() {
        for glyph in Glyph::VARIANTS {
            assert_eq!(0, glyph.pattern().bits() & 0b1000_0000);
        }
        assert_eq!(0x7F, GlyphPattern::from_bits(0xFF).bits());
    }

    #[test]
    fn segment_masks() {
        assert_eq!(0b0000_0001, Segment::A.mask());
        assert_eq!(0b0100_0000, Segment::G.mask());
    }
}
