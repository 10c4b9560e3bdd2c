use core::fmt::{self, Debug};

/// Error type
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: Sized + Debug> {
    /// Device number outside the discovered registry
    InvalidDevice(u8),
    /// Precision outside 9..=12 bits
    InvalidPrecision(u8),
    /// One-shot conversion did not report DONE in time
    ConversionTimeout,
    BusError(E),
}

impl<E: Sized + Debug> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::BusError(e)
    }
}

impl<E: Sized + Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidDevice(device) => write!(f, "no thermometer with number {}", device),
            Error::InvalidPrecision(bits) => {
                write!(f, "precision of {} bits is not supported (9-12)", bits)
            }
            Error::ConversionTimeout => write!(f, "conversion did not complete in time"),
            Error::BusError(e) => write!(f, "I2C error: {:?}", e),
        }
    }
}
