use core::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::RangeInclusive,
    str::FromStr,
};

/// 7-bit bus address of a DS1631
///
/// The chip decodes A2..A0 into the low three bits, so every device lives in
/// the window `0x48..=0x4F`.
#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Address {
    raw: u8,
}

impl Default for Address {
    fn default() -> Self {
        Self { raw: Self::MIN }
    }
}

impl TryFrom<u8> for Address {
    type Error = AddressError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        if Self::WINDOW.contains(&raw) {
            Ok(Address { raw })
        } else {
            Err(AddressError::OutOfRange(raw))
        }
    }
}

impl From<Address> for u8 {
    fn from(addr: Address) -> u8 {
        addr.raw
    }
}

impl Address {
    /// The lowest DS1631 address (A2 = A1 = A0 = 0)
    pub const MIN: u8 = 0x48;

    /// Maximum number of devices on one bus
    pub const COUNT: u8 = 8;

    /// All addresses a DS1631 can answer on
    pub const WINDOW: RangeInclusive<u8> = Self::MIN..=Self::MIN + Self::COUNT - 1;

    /// Address selected by the A2, A1 and A0 pin levels
    pub fn from_pins(a2: bool, a1: bool, a0: bool) -> Self {
        let raw = Self::MIN | (u8::from(a2) << 2) | (u8::from(a1) << 1) | u8::from(a0);
        Address { raw }
    }

    /// Offset within the window, equals the A2..A0 pin state
    pub fn pins(&self) -> u8 {
        self.raw - Self::MIN
    }

    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// Every candidate address in ascending probe order
    pub fn candidates() -> impl Iterator<Item = Address> {
        Self::WINDOW.map(|raw| Address { raw })
    }
}

/// Error type
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    NotEnough,
    Invalid,
    OutOfRange(u8),
}

fn hex_to_u8(c: char) -> Option<u8> {
    c.to_digit(16).map(|d| d as u8)
}

impl FromStr for Address {
    type Err = AddressError;

    /// Accepts `48`, `0x48` or `0X4a`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let mut chars = s.chars();

        let raw = match (chars.next(), chars.next(), chars.next()) {
            (Some(h), Some(l), None) => match (hex_to_u8(h), hex_to_u8(l)) {
                (Some(h), Some(l)) => (h << 4) | l,
                _ => return Err(AddressError::Invalid),
            },
            (_, _, Some(_)) => return Err(AddressError::Invalid),
            _ => return Err(AddressError::NotEnough),
        };

        Address::try_from(raw)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "0x{:02x}", self.raw)
    }
}
