use crate::BusSpeed;

/// Driver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Bus clock requested during initialization
    pub speed: BusSpeed,
    /// Pause between configuration polls while a one-shot conversion runs
    pub poll_interval_ms: u32,
    /// Give up on a one-shot conversion after this long
    pub conversion_timeout_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: BusSpeed::Standard,
            poll_interval_ms: 10,
            // slowest conversion (12 bit) takes 750 ms
            conversion_timeout_ms: 1000,
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_speed(mut self, speed: BusSpeed) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_poll_interval_ms(mut self, interval: u32) -> Self {
        self.poll_interval_ms = interval;
        self
    }

    #[must_use]
    pub fn with_conversion_timeout_ms(mut self, timeout: u32) -> Self {
        self.conversion_timeout_ms = timeout;
        self
    }

    /// Number of re-reads of the configuration byte before timing out
    pub fn max_polls(&self) -> u32 {
        match self.poll_interval_ms {
            0 => self.conversion_timeout_ms.max(1),
            interval => (self.conversion_timeout_ms / interval).max(1),
        }
    }
}
