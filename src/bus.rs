use embedded_hal::i2c::{Error, ErrorKind, I2c};

/// I2C clock rates the DS1631 supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusSpeed {
    /// 100 kHz
    #[default]
    Standard,
    /// 400 kHz
    Fast,
}

impl BusSpeed {
    pub fn hz(&self) -> u32 {
        match self {
            BusSpeed::Standard => 100_000,
            BusSpeed::Fast => 400_000,
        }
    }
}

/// Transactional view of the bus the thermometers sit on
pub trait Bus {
    type Error: Error;

    /// Switch the bus clock
    fn set_speed(&mut self, speed: BusSpeed) -> Result<(), Self::Error>;

    /// Write `bytes` to `address` in one transaction
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Write `bytes`, then read into `buffer` after a repeated start
    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Address-only transaction, Ok(false) if nobody acknowledged
    fn probe(&mut self, address: u8) -> Result<bool, Self::Error> {
        match self.write(address, &[]) {
            Ok(()) => Ok(true),
            Err(error) if matches!(error.kind(), ErrorKind::NoAcknowledge(_)) => Ok(false),
            Err(error) => Err(error),
        }
    }
}

/// Bus with a clock fixed by the HAL configuration
impl<I> Bus for (I,)
where
    I: I2c,
{
    type Error = I::Error;

    fn set_speed(&mut self, speed: BusSpeed) -> Result<(), Self::Error> {
        debug!("bus clock is fixed, ignoring request for {} Hz", speed.hz());
        Ok(())
    }

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, bytes)
    }

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.0.write_read(address, bytes, buffer)
    }
}

/// Bus paired with a clock setter
impl<I, F> Bus for (I, F)
where
    I: I2c,
    F: FnMut(&mut I, BusSpeed) -> Result<(), I::Error>,
{
    type Error = I::Error;

    fn set_speed(&mut self, speed: BusSpeed) -> Result<(), Self::Error> {
        (self.1)(&mut self.0, speed)
    }

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, bytes)
    }

    fn write_read(
        &mut self,
        address: u8,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.0.write_read(address, bytes, buffer)
    }
}
