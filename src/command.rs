pub trait OpCode {
    fn op_code(&self) -> u8;
}

/// DS1631 command bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// Begin temperature conversions
    StartConvert = 0x51,
    /// Stop conversions in continuous mode
    StopConvert = 0x22,
    /// Software power-on-reset
    PowerOnReset = 0x54,
    /// High threshold (TH) word
    AccessTh = 0xA1,
    /// Low threshold (TL) word
    AccessTl = 0xA2,
    /// Last converted temperature word
    ReadTemperature = 0xAA,
    /// Configuration byte
    AccessConfig = 0xAC,
}

impl OpCode for Command {
    fn op_code(&self) -> u8 {
        *self as _
    }
}
