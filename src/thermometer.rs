use crate::{
    Address, Alarm, AlarmStatus, Bus, Command, Configuration, ConversionMode, Driver, Error,
    Polarity, Precision, Temperature,
};
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;

impl<E: Debug, B: Bus<Error = E>> Driver<B> {
    /// Last converted temperature of a thermometer.
    ///
    /// In one-shot mode this first waits for the DONE flag, polling every
    /// `poll_interval_ms` until `conversion_timeout_ms` has passed.
    pub fn read_temperature(
        &mut self,
        delay: &mut impl DelayNs,
        device: u8,
    ) -> Result<Temperature, Error<E>> {
        let address = self.address(device)?;
        let config = self.read_configuration_at(address)?;
        if config.mode() == ConversionMode::OneShot {
            self.wait_for_conversion(delay, address, config)?;
        }
        let word = self.read_word(address, Command::ReadTemperature)?;
        Ok(Temperature::from_register(word))
    }

    fn wait_for_conversion(
        &mut self,
        delay: &mut impl DelayNs,
        address: Address,
        mut config: Configuration,
    ) -> Result<(), Error<E>> {
        let mut polls = self.config.max_polls();
        while !config.is_conversion_done() {
            if polls == 0 {
                warn!("conversion on {} did not finish", address);
                return Err(Error::ConversionTimeout);
            }
            polls -= 1;
            delay.delay_ms(self.config.poll_interval_ms);
            config = self.read_configuration_at(address)?;
        }
        Ok(())
    }

    /// Raw configuration byte of a thermometer
    pub fn configuration(&mut self, device: u8) -> Result<Configuration, Error<E>> {
        let address = self.address(device)?;
        self.read_configuration_at(address)
    }

    pub fn precision(&mut self, device: u8) -> Result<Precision, Error<E>> {
        self.configuration(device).map(|config| config.precision())
    }

    pub fn set_precision(&mut self, device: u8, precision: Precision) -> Result<(), Error<E>> {
        self.modify_configuration(device, |config| config.with_precision(precision))?;
        Ok(())
    }

    /// Like [`Driver::set_precision`], taking the resolution as 9 to 12 bits
    pub fn set_precision_bits(&mut self, device: u8, bits: u8) -> Result<(), Error<E>> {
        let precision = Precision::try_from(bits).map_err(Error::InvalidPrecision)?;
        self.set_precision(device, precision)
    }

    /// Writes a threshold and clears its latched alarm flag
    pub fn set_alarm_temperature(
        &mut self,
        device: u8,
        alarm: Alarm,
        temperature: Temperature,
    ) -> Result<(), Error<E>> {
        let address = self.address(device)?;
        self.write_word(address, threshold(alarm), temperature.to_register())?;
        self.modify_configuration(device, |config| config.without_alarm(alarm))?;
        Ok(())
    }

    pub fn alarm_temperature(&mut self, device: u8, alarm: Alarm) -> Result<Temperature, Error<E>> {
        let address = self.address(device)?;
        let word = self.read_word(address, threshold(alarm))?;
        Ok(Temperature::from_register(word))
    }

    /// Latched alarm flags. Reading clears both latches on the device.
    pub fn alarm_status(&mut self, device: u8) -> Result<AlarmStatus, Error<E>> {
        let config = self.modify_configuration(device, Configuration::without_alarms)?;
        Ok(config.alarm_status())
    }

    /// Sets or clears only the POL bit, the rest of the configuration is kept
    pub fn set_polarity(&mut self, device: u8, polarity: Polarity) -> Result<(), Error<E>> {
        self.modify_configuration(device, |config| config.with_polarity(polarity))?;
        Ok(())
    }

    /// Sets or clears only the 1SHOT bit, the rest of the configuration is kept
    pub fn set_mode(&mut self, device: u8, mode: ConversionMode) -> Result<(), Error<E>> {
        self.modify_configuration(device, |config| config.with_mode(mode))?;
        Ok(())
    }

    /// `false` selects one-shot mode. Like [`Driver::set_mode`] this touches
    /// the 1SHOT bit alone.
    pub fn set_continuous(&mut self, device: u8, continuous: bool) -> Result<(), Error<E>> {
        let mode = if continuous {
            ConversionMode::Continuous
        } else {
            ConversionMode::OneShot
        };
        self.set_mode(device, mode)
    }

    /// Starts conversions, a single one in one-shot mode
    pub fn start_conversion(&mut self, device: u8) -> Result<(), Error<E>> {
        let address = self.address(device)?;
        self.write_command(address, Command::StartConvert)
    }

    pub fn stop_conversion(&mut self, device: u8) -> Result<(), Error<E>> {
        let address = self.address(device)?;
        self.write_command(address, Command::StopConvert)
    }

    /// Software power-on-reset
    pub fn reset(&mut self, device: u8) -> Result<(), Error<E>> {
        let address = self.address(device)?;
        debug!("resetting {}", address);
        self.write_command(address, Command::PowerOnReset)
    }
}

fn threshold(alarm: Alarm) -> Command {
    match alarm {
        Alarm::Low => Command::AccessTl,
        Alarm::High => Command::AccessTh,
    }
}
