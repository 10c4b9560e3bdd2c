use crate::{Bus, Command, Driver, Error};
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;

pub trait Sensor {
    type Error;

    /// returns the milliseconds required to wait until the measurement finished
    fn start_measurement(&mut self, device: u8) -> Result<u16, Self::Error>;

    /// returns the measured value in °C
    fn read_measurement(&mut self, delay: &mut impl DelayNs, device: u8)
        -> Result<f32, Self::Error>;

    /// returns the measured value in 1/16 °C
    fn read_measurement_raw(
        &mut self,
        delay: &mut impl DelayNs,
        device: u8,
    ) -> Result<i16, Self::Error>;
}

impl<E: Debug, B: Bus<Error = E>> Sensor for Driver<B> {
    type Error = Error<E>;

    fn start_measurement(&mut self, device: u8) -> Result<u16, Self::Error> {
        let address = self.address(device)?;
        let precision = self.read_configuration_at(address)?.precision();
        self.write_command(address, Command::StartConvert)?;
        Ok(precision.time_ms())
    }

    fn read_measurement(
        &mut self,
        delay: &mut impl DelayNs,
        device: u8,
    ) -> Result<f32, Self::Error> {
        self.read_temperature(delay, device).map(|t| t.celsius())
    }

    fn read_measurement_raw(
        &mut self,
        delay: &mut impl DelayNs,
        device: u8,
    ) -> Result<i16, Self::Error> {
        self.read_temperature(delay, device).map(|t| t.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::Sensor;
    use crate::{Address, Config, Driver, Error};
    use assert_approx_eq::assert_approx_eq;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock, Transaction};

    fn driver(expectations: &[Transaction]) -> Driver<(Mock,)> {
        let devices = [Address::from_pins(true, false, false)];
        Driver::with_devices((Mock::new(expectations),), Config::default(), &devices)
    }

    #[test]
    fn start_measurement_reports_conversion_time() {
        let expectations = [
            Transaction::write_read(0x4c, vec![0xAC], vec![0x01]),
            Transaction::write(0x4c, vec![0x51]),
            Transaction::write_read(0x4c, vec![0xAC], vec![0x0D]),
            Transaction::write(0x4c, vec![0x51]),
        ];
        let mut driver = driver(&expectations);
        assert_eq!(driver.start_measurement(0).unwrap(), 94);
        assert_eq!(driver.start_measurement(0).unwrap(), 750);
        assert!(matches!(driver.start_measurement(1), Err(Error::InvalidDevice(1))));

        let (mut mock,) = driver.release();
        mock.done();
    }

    #[test]
    fn read_measurement_in_celsius() {
        let words: [(u16, f32); 7] = [
            (0x7D00, 125.0),
            (0x1910, 25.0625),
            (0x0080, 0.5),
            (0x0000, 0.0),
            (0xFF80, -0.5),
            (0xE6F0, -25.0625),
            (0xC900, -55.0),
        ];

        for (word, celsius) in words {
            let expectations = [
                Transaction::write_read(0x4c, vec![0xAC], vec![0x8C]),
                Transaction::write_read(0x4c, vec![0xAA], word.to_be_bytes().to_vec()),
            ];
            let mut driver = driver(&expectations);
            let temp = driver.read_measurement(&mut NoopDelay::new(), 0).unwrap();
            assert_approx_eq!(temp, celsius, 1e-4);

            let (mut mock,) = driver.release();
            mock.done();
        }
    }

    #[test]
    fn read_measurement_raw_units() {
        let expectations = [
            Transaction::write_read(0x4c, vec![0xAC], vec![0x8C]),
            Transaction::write_read(0x4c, vec![0xAA], vec![0xFF, 0xF0]),
        ];
        let mut driver = driver(&expectations);
        assert_eq!(driver.read_measurement_raw(&mut NoopDelay::new(), 0).unwrap(), -1);

        let (mut mock,) = driver.release();
        mock.done();
    }
}
