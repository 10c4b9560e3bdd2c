#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod fmt;

mod address;
mod bus;
mod command;
mod config;
mod driver;
mod registers;
mod result;
mod sensor;
mod temperature;
mod thermometer;

pub use address::{Address, AddressError};
pub use bus::{Bus, BusSpeed};
pub use command::{Command, OpCode};
pub use config::Config;
pub use driver::{Driver, MAX_DEVICES};
pub use registers::{Alarm, AlarmStatus, Configuration, ConversionMode, Polarity, Precision};
pub use result::Error;
pub use sensor::Sensor;
pub use temperature::{split_temp, Temperature};

/// Configuration register bit masks
pub mod bits {
    pub use crate::registers::{
        ALARMS, ALARM_HIGH, ALARM_LOW, ALARM_SHIFT, DONE, NV_BUSY, ONE_SHOT, POLARITY, RESOLUTION,
        RESOLUTION_SHIFT,
    };
}
