use crate::font::Segment;

/// Identifies one physical output line.  What the number means is up to the [`crate::Gpio`]
/// implementation; for the built-in ones it's an index into the array of pins they were given.
pub type PinId = u8;

/// The number of digits on the display
pub const DIGIT_COUNT: u8 = 4;

/// The 12 lines a multiplexed 4-digit display needs.
///
/// Seven segment lines and the decimal point line are shared by all four digits; each digit has
/// its own enable line, and only one of those is ever active at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::VariantArray, strum::IntoStaticStr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    SegmentA,
    SegmentB,
    SegmentC,
    SegmentD,
    SegmentE,
    SegmentF,
    SegmentG,
    DecimalPoint,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
}

impl PinRole {
    const COUNT: usize = 12;

    /// The role driving a segment
    pub fn for_segment(segment: Segment) -> Self {
        match segment {
            Segment::A => Self::SegmentA,
            Segment::B => Self::SegmentB,
            Segment::C => Self::SegmentC,
            Segment::D => Self::SegmentD,
            Segment::E => Self::SegmentE,
            Segment::F => Self::SegmentF,
            Segment::G => Self::SegmentG,
        }
    }

    /// The enable line for a 1-based digit slot.  Anything outside `1..=4` has no enable line.
    pub fn for_digit(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(Self::Digit1),
            2 => Some(Self::Digit2),
            3 => Some(Self::Digit3),
            4 => Some(Self::Digit4),
            _ => None,
        }
    }

    /// If this is a digit enable line, which 1-based slot it selects
    pub fn to_digit_slot(self) -> Option<u8> {
        match self {
            Self::Digit1 => Some(1),
            Self::Digit2 => Some(2),
            Self::Digit3 => Some(3),
            Self::Digit4 => Some(4),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Binds each [`PinRole`] to the physical line that carries it.
///
/// The default layout puts segments `A`..`G` on pins 0 to 6, the decimal point on 7 and digit
/// enables 1 to 4 on pins 8 to 11.
///
/// Nothing stops two roles from sharing a pin.  That's a wiring mistake the display can't detect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment([PinId; PinRole::COUNT]);

impl Default for PinAssignment {
    fn default() -> Self {
        Self([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11])
    }
}

impl PinAssignment {
    pub fn pin(&self, role: PinRole) -> PinId {
        self.0[role.index()]
    }

    /// Bind `role` to `pin`, returning the pin it was bound to before.
    ///
    /// This only records the binding.  [`crate::FourSegDisplay::rebind`] also configures the pin.
    pub fn set(&mut self, role: PinRole, pin: PinId) -> PinId {
        core::mem::replace(&mut self.0[role.index()], pin)
    }

    /// Builder-style [`Self::set`]
    pub fn with(mut self, role: PinRole, pin: PinId) -> Self {
        self.set(role, pin);
        self
    }

    /// All roles with the pin each is bound to, in [`PinRole`] declaration order
    pub fn iter(&self) -> impl Iterator<Item = (PinRole, PinId)> + '_ {
        use strum::VariantArray;
        PinRole::VARIANTS.iter().map(|role| (*role, self.pin(*role)))
    }
}
