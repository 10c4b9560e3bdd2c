//! Configuration register layout
//!
//! ```text
//!  7     6     5     4     3    2    1     0
//! DONE  THF   TLF   NVB   R1   R0   POL  1SHOT
//! ```

/// Conversion mode bit, set for one-shot
pub const ONE_SHOT: u8 = 0x01;
/// Output polarity bit, set for active high
pub const POLARITY: u8 = 0x02;
/// Resolution bits R1:R0
pub const RESOLUTION: u8 = 0x0C;
pub const RESOLUTION_SHIFT: u8 = 2;
/// Non-volatile memory busy
pub const NV_BUSY: u8 = 0x10;
/// Low temperature alarm latch
pub const ALARM_LOW: u8 = 0x20;
/// High temperature alarm latch
pub const ALARM_HIGH: u8 = 0x40;
pub const ALARM_SHIFT: u8 = 5;
/// Both alarm latches
pub const ALARMS: u8 = ALARM_LOW | ALARM_HIGH;
/// Conversion complete
pub const DONE: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Precision {
    /// 0.5°C steps
    Bits9 = 9,
    /// 0.25°C steps
    Bits10 = 10,
    /// 0.125°C steps
    Bits11 = 11,
    /// 0.0625°C steps (power-on default)
    Bits12 = 12,
}

impl Precision {
    /// Worst case conversion time
    pub fn time_ms(&self) -> u16 {
        match self {
            Precision::Bits9 => 94,
            Precision::Bits10 => 188,
            Precision::Bits11 => 375,
            Precision::Bits12 => 750,
        }
    }

    pub fn bits(&self) -> u8 {
        *self as u8
    }

    fn from_field(field: u8) -> Self {
        match field & 0x03 {
            0 => Precision::Bits9,
            1 => Precision::Bits10,
            2 => Precision::Bits11,
            _ => Precision::Bits12,
        }
    }

    fn field(&self) -> u8 {
        self.bits() - 9
    }
}

impl TryFrom<u8> for Precision {
    type Error = u8;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            9 => Ok(Precision::Bits9),
            10 => Ok(Precision::Bits10),
            11 => Ok(Precision::Bits11),
            12 => Ok(Precision::Bits12),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionMode {
    /// Free running conversions after `StartConvert`
    Continuous,
    /// A single conversion per `StartConvert`
    OneShot,
}

/// Thermostat output polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveLow,
    ActiveHigh,
}

impl From<bool> for Polarity {
    fn from(active_high: bool) -> Self {
        if active_high {
            Polarity::ActiveHigh
        } else {
            Polarity::ActiveLow
        }
    }
}

/// Threshold register selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alarm {
    Low,
    High,
}

impl Alarm {
    /// Latch bit in the configuration register
    pub fn flag(&self) -> u8 {
        match self {
            Alarm::Low => ALARM_LOW,
            Alarm::High => ALARM_HIGH,
        }
    }
}

/// Latched alarm flags, numbered like bits 6:5 of the configuration register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AlarmStatus {
    None = 0,
    Low = 1,
    High = 2,
    Both = 3,
}

impl AlarmStatus {
    pub fn is_low(&self) -> bool {
        matches!(self, AlarmStatus::Low | AlarmStatus::Both)
    }

    pub fn is_high(&self) -> bool {
        matches!(self, AlarmStatus::High | AlarmStatus::Both)
    }
}

impl From<AlarmStatus> for u8 {
    fn from(status: AlarmStatus) -> u8 {
        status as u8
    }
}

/// Configuration register value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Configuration(u8);

impl From<u8> for Configuration {
    fn from(raw: u8) -> Self {
        Configuration(raw)
    }
}

impl From<Configuration> for u8 {
    fn from(config: Configuration) -> u8 {
        config.0
    }
}

impl Configuration {
    pub fn raw(&self) -> u8 {
        self.0
    }

    pub fn mode(&self) -> ConversionMode {
        if self.0 & ONE_SHOT != 0 {
            ConversionMode::OneShot
        } else {
            ConversionMode::Continuous
        }
    }

    #[must_use]
    pub fn with_mode(self, mode: ConversionMode) -> Self {
        match mode {
            ConversionMode::Continuous => Configuration(self.0 & !ONE_SHOT),
            ConversionMode::OneShot => Configuration(self.0 | ONE_SHOT),
        }
    }

    pub fn polarity(&self) -> Polarity {
        Polarity::from(self.0 & POLARITY != 0)
    }

    #[must_use]
    pub fn with_polarity(self, polarity: Polarity) -> Self {
        match polarity {
            Polarity::ActiveLow => Configuration(self.0 & !POLARITY),
            Polarity::ActiveHigh => Configuration(self.0 | POLARITY),
        }
    }

    pub fn precision(&self) -> Precision {
        Precision::from_field((self.0 & RESOLUTION) >> RESOLUTION_SHIFT)
    }

    #[must_use]
    pub fn with_precision(self, precision: Precision) -> Self {
        Configuration((self.0 & !RESOLUTION) | (precision.field() << RESOLUTION_SHIFT))
    }

    pub fn alarm_status(&self) -> AlarmStatus {
        match (self.0 & ALARMS) >> ALARM_SHIFT {
            0 => AlarmStatus::None,
            1 => AlarmStatus::Low,
            2 => AlarmStatus::High,
            _ => AlarmStatus::Both,
        }
    }

    /// Clear a single alarm latch
    #[must_use]
    pub fn without_alarm(self, alarm: Alarm) -> Self {
        Configuration(self.0 & !alarm.flag())
    }

    /// Clear both alarm latches
    #[must_use]
    pub fn without_alarms(self) -> Self {
        Configuration(self.0 & !ALARMS)
    }

    pub fn is_conversion_done(&self) -> bool {
        self.0 & DONE != 0
    }

    pub fn is_nv_busy(&self) -> bool {
        self.0 & NV_BUSY != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_configuration() {
        // DONE set, 12 bit, active low, continuous
        let cfg = Configuration::from(0x8C);
        assert_eq!(cfg.precision(), Precision::Bits12);
        assert_eq!(cfg.polarity(), Polarity::ActiveLow);
        assert_eq!(cfg.mode(), ConversionMode::Continuous);
        assert_eq!(cfg.alarm_status(), AlarmStatus::None);
        assert!(cfg.is_conversion_done());
        assert!(!cfg.is_nv_busy());
    }

    #[test]
    fn precision_field() {
        let cfg = Configuration::from(0xF3);
        assert_eq!(cfg.with_precision(Precision::Bits9).raw(), 0xF3);
        assert_eq!(cfg.with_precision(Precision::Bits10).raw(), 0xF7);
        assert_eq!(cfg.with_precision(Precision::Bits11).raw(), 0xFB);
        assert_eq!(cfg.with_precision(Precision::Bits12).raw(), 0xFF);
        assert_eq!(Configuration::from(0xFF).with_precision(Precision::Bits9).raw(), 0xF3);

        for bits in 9..=12 {
            let precision = Precision::try_from(bits).unwrap();
            let cfg = Configuration::default().with_precision(precision);
            assert_eq!((cfg.raw() >> 2) & 0x03, bits - 9);
            assert_eq!(cfg.precision(), precision);
        }
    }

    #[test]
    fn precision_out_of_range() {
        assert_eq!(Precision::try_from(8), Err(8));
        assert_eq!(Precision::try_from(13), Err(13));
        assert_eq!(Precision::try_from(0), Err(0));
    }

    #[test]
    fn precision_conversion_time() {
        assert_eq!(Precision::Bits9.time_ms(), 94);
        assert_eq!(Precision::Bits10.time_ms(), 188);
        assert_eq!(Precision::Bits11.time_ms(), 375);
        assert_eq!(Precision::Bits12.time_ms(), 750);
    }

    #[test]
    fn modify_mode() {
        let cfg = Configuration::from(0x8C);
        assert_eq!(cfg.with_mode(ConversionMode::OneShot).raw(), 0x8D);
        assert_eq!(Configuration::from(0x8D).with_mode(ConversionMode::Continuous).raw(), 0x8C);
        assert_eq!(cfg.with_mode(ConversionMode::Continuous).raw(), 0x8C);
    }

    #[test]
    fn modify_polarity() {
        let cfg = Configuration::from(0x8C);
        assert_eq!(cfg.with_polarity(Polarity::ActiveHigh).raw(), 0x8E);
        assert_eq!(Configuration::from(0x8E).with_polarity(Polarity::ActiveLow).raw(), 0x8C);
        assert_eq!(Configuration::from(0x8E).polarity(), Polarity::ActiveHigh);
    }

    #[test]
    fn alarm_flags() {
        assert_eq!(Configuration::from(0x20).alarm_status(), AlarmStatus::Low);
        assert_eq!(Configuration::from(0x40).alarm_status(), AlarmStatus::High);
        assert_eq!(Configuration::from(0xEC).alarm_status(), AlarmStatus::Both);
        assert!(AlarmStatus::Both.is_low() && AlarmStatus::Both.is_high());
        assert!(!AlarmStatus::None.is_low());

        let cfg = Configuration::from(0xEC);
        assert_eq!(cfg.without_alarm(Alarm::Low).raw(), 0xCC);
        assert_eq!(cfg.without_alarm(Alarm::High).raw(), 0xAC);
        assert_eq!(cfg.without_alarms().raw(), 0x8C);
        assert_eq!(u8::from(AlarmStatus::Both), 3);
    }
}
