use core::fmt::{Display, Formatter, Result as FmtResult};

/// Temperature in 1/16 °C steps
///
/// Register words keep the same two's complement value left-aligned, with
/// the low nibble reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Temperature(pub i16);

impl Temperature {
    pub const CELSIUS_PER_BIT: f32 = 0.0625;

    /// Decode a temperature or threshold register word
    pub fn from_register(word: u16) -> Self {
        // arithmetic shift carries bit 11 of the result into bits 12..15
        Temperature(word as i16 >> 4)
    }

    /// Encode into a threshold register word, low nibble cleared
    pub fn to_register(self) -> u16 {
        (self.0 << 4) as u16
    }

    /// Whole degrees, saturating at the i16 range
    pub fn from_celsius(degrees: i16) -> Self {
        Temperature(degrees.saturating_mul(16))
    }

    pub fn raw(&self) -> i16 {
        self.0
    }

    pub fn celsius(&self) -> f32 {
        f32::from(self.0) * Self::CELSIUS_PER_BIT
    }

    /// See [`split_temp`]
    pub fn split(&self) -> (i16, i16) {
        split_temp(self.0)
    }
}

impl From<i16> for Temperature {
    fn from(raw: i16) -> Self {
        Temperature(raw)
    }
}

impl From<Temperature> for i16 {
    fn from(temperature: Temperature) -> i16 {
        temperature.0
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let (integer, fraction) = self.split();
        let sign = if self.0 < 0 && integer == 0 { "-" } else { "" };
        write!(f, "{}{}.{:04}°C", sign, integer, fraction.unsigned_abs())
    }
}

/// Split a value in 1/16 °C steps into two parts: integer and fraction N
/// The value may be calculated as: integer + fraction/10000
pub fn split_temp(temperature: i16) -> (i16, i16) {
    (temperature / 16, (temperature % 16) * 625)
}

#[cfg(test)]
mod tests {
    use super::{split_temp, Temperature};

    #[test]
    fn test_temp_conv() {
        assert_eq!(split_temp(0x07d0), (125, 0));
        assert_eq!(split_temp(0x0550), (85, 0));
        assert_eq!(split_temp(0x0191), (25, 625)); // 25.0625
        assert_eq!(split_temp(0x00A2), (10, 1250)); // 10.125
        assert_eq!(split_temp(0x0008), (0, 5000)); // 0.5
        assert_eq!(split_temp(0x0000), (0, 0)); // 0
        assert_eq!(split_temp(-8), (0, -5000)); // -0.5
        assert_eq!(split_temp(-162), (-10, -1250)); // -10.125
        assert_eq!(split_temp(-401), (-25, -625)); // -25.0625
        assert_eq!(split_temp(-880), (-55, 0)); // -55
    }

    #[test]
    fn decode_register() {
        assert_eq!(Temperature::from_register(0x0000), Temperature(0));
        assert_eq!(Temperature::from_register(0x0010), Temperature(1));
        assert_eq!(Temperature::from_register(0x0100), Temperature(16));
        assert_eq!(Temperature::from_register(0xFFF0), Temperature(-1));
        assert_eq!(Temperature::from_register(0x7D00), Temperature(2000)); // +125
        assert_eq!(Temperature::from_register(0x1910), Temperature(401)); // +25.0625
        assert_eq!(Temperature::from_register(0xFF80), Temperature(-8)); // -0.5
        assert_eq!(Temperature::from_register(0xC900), Temperature(-880)); // -55
        // reserved nibble is ignored
        assert_eq!(Temperature::from_register(0x001F), Temperature(1));
    }

    #[test]
    fn encode_threshold() {
        assert_eq!(Temperature(320).to_register(), 5120);
        assert_eq!(Temperature(-1).to_register(), 0xFFF0);
        assert_eq!(Temperature(-880).to_register(), 0xC900);
        let word = Temperature(-1234).to_register();
        assert_eq!(Temperature::from_register(word), Temperature(-1234));
    }

    #[test]
    fn celsius() {
        assert_eq!(Temperature::from_celsius(20), Temperature(320));
        assert_eq!(Temperature(401).celsius(), 25.0625);
        assert_eq!(Temperature(-8).celsius(), -0.5);
    }

    #[test]
    fn display() {
        assert_eq!(Temperature(401).to_string(), "25.0625°C");
        assert_eq!(Temperature(-8).to_string(), "-0.5000°C");
        assert_eq!(Temperature(-162).to_string(), "-10.1250°C");
    }
}
