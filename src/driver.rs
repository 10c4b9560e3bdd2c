use crate::{Address, Bus, Command, Config, Configuration, ConversionMode, Error, OpCode};
use byteorder::{BigEndian, ByteOrder};
use core::fmt::Debug;
use heapless::Vec;

/// Upper bound of thermometers sharing one bus
pub const MAX_DEVICES: usize = Address::COUNT as usize;

/// DS1631 bus driver
///
/// Owns the bus for its whole lifetime. Thermometers are addressed by their
/// device number, the position at which [`Driver::discover`] found them.
pub struct Driver<B: Bus> {
    bus: B,
    pub(crate) config: Config,
    devices: Vec<Address, MAX_DEVICES>,
}

impl<E: Debug, B: Bus<Error = E>> Driver<B> {
    /// Wraps the bus without talking to it, the registry starts empty
    pub fn new(bus: B, config: Config) -> Self {
        Driver {
            bus,
            config,
            devices: Vec::new(),
        }
    }

    /// Sets the bus clock and runs [`Driver::discover`], returns the number of
    /// thermometers found.
    ///
    /// Only a failed clock change is an error. The bus stays inside the
    /// driver either way and [`Driver::release`] hands it back.
    pub fn initialize(&mut self) -> Result<u8, Error<E>> {
        self.bus.set_speed(self.config.speed)?;
        Ok(self.discover())
    }

    /// Probes every address of the DS1631 window in ascending order.
    ///
    /// Each thermometer that answers is stopped, switched to continuous mode
    /// and restarted before it is appended to the registry. Any previous
    /// registry content is dropped first. Returns the number of thermometers
    /// found, zero being a valid outcome.
    ///
    /// An address that fails with anything but a missing acknowledge is
    /// logged and left out of the registry, the scan carries on with the next
    /// address.
    pub fn discover(&mut self) -> u8 {
        self.devices.clear();

        for address in Address::candidates() {
            match self.bus.probe(address.raw()) {
                Ok(true) => {}
                Ok(false) => {
                    trace!("no device at {}", address);
                    continue;
                }
                Err(_) => {
                    warn!("bus fault at {}, skipped", address);
                    continue;
                }
            }

            if self.enable_continuous(address).is_err() {
                warn!("setup of {} failed, skipped", address);
                continue;
            }

            // the window has as many addresses as the registry has slots
            let _ = self.devices.push(address);
            debug!("thermometer {} at {}", self.devices.len() - 1, address);
        }

        self.device_count()
    }

    fn enable_continuous(&mut self, address: Address) -> Result<(), Error<E>> {
        self.write_command(address, Command::StopConvert)?;
        let switched = self.read_configuration_at(address).and_then(|config| {
            self.write_configuration_at(address, config.with_mode(ConversionMode::Continuous))
        });
        // restart even when the mode change failed
        let started = self.write_command(address, Command::StartConvert);
        switched.and(started)
    }

    /// Addresses in device number order
    pub fn devices(&self) -> &[Address] {
        &self.devices
    }

    pub fn device_count(&self) -> u8 {
        self.devices.len() as u8
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bus address of a device number
    pub fn address(&self, device: u8) -> Result<Address, Error<E>> {
        self.devices
            .get(device as usize)
            .copied()
            .ok_or(Error::InvalidDevice(device))
    }

    /// Gives the bus back
    pub fn release(self) -> B {
        self.bus
    }

    /// Sends a bare command
    pub fn write_command(&mut self, address: Address, cmd: impl OpCode) -> Result<(), Error<E>> {
        self.bus.write(address.raw(), &[cmd.op_code()])?;
        Ok(())
    }

    pub fn read_byte(&mut self, address: Address, cmd: impl OpCode) -> Result<u8, Error<E>> {
        let mut data = [0u8; 1];
        self.bus
            .write_read(address.raw(), &[cmd.op_code()], &mut data)?;
        Ok(data[0])
    }

    /// Reads two bytes, MSB first
    pub fn read_word(&mut self, address: Address, cmd: impl OpCode) -> Result<u16, Error<E>> {
        let mut data = [0u8; 2];
        self.bus
            .write_read(address.raw(), &[cmd.op_code()], &mut data)?;
        Ok(BigEndian::read_u16(&data))
    }

    pub fn write_byte(
        &mut self,
        address: Address,
        cmd: impl OpCode,
        byte: u8,
    ) -> Result<(), Error<E>> {
        self.bus.write(address.raw(), &[cmd.op_code(), byte])?;
        Ok(())
    }

    /// Writes two bytes, MSB first
    pub fn write_word(
        &mut self,
        address: Address,
        cmd: impl OpCode,
        word: u16,
    ) -> Result<(), Error<E>> {
        let mut data = [cmd.op_code(), 0, 0];
        BigEndian::write_u16(&mut data[1..], word);
        self.bus.write(address.raw(), &data)?;
        Ok(())
    }

    pub(crate) fn read_configuration_at(
        &mut self,
        address: Address,
    ) -> Result<Configuration, Error<E>> {
        self.read_byte(address, Command::AccessConfig)
            .map(Configuration::from)
    }

    pub(crate) fn write_configuration_at(
        &mut self,
        address: Address,
        config: Configuration,
    ) -> Result<(), Error<E>> {
        self.write_byte(address, Command::AccessConfig, config.into())
    }

    /// Read-modify-write of the configuration byte, returns the value read
    pub(crate) fn modify_configuration(
        &mut self,
        device: u8,
        modify: impl FnOnce(Configuration) -> Configuration,
    ) -> Result<Configuration, Error<E>> {
        let address = self.address(device)?;
        let config = self.read_configuration_at(address)?;
        self.write_configuration_at(address, modify(config))?;
        Ok(config)
    }

    #[cfg(test)]
    pub(crate) fn with_devices(bus: B, config: Config, devices: &[Address]) -> Self {
        let mut driver = Self::new(bus, config);
        for address in devices {
            let _ = driver.devices.push(*address);
        }
        driver
    }
}
