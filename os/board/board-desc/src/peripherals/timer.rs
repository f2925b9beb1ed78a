//! Time source selection and the base clock input.

use crate::error::ConfigError;
use core::fmt;

/// The five 16-bit PWM timers of the S3C24xx.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PwmTimer {
    Pwm0 = 0,
    Pwm1,
    Pwm2,
    Pwm3,
    /// Has no output pin; the usual choice for a free-running counter.
    Pwm4,
}

impl PwmTimer {
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for PwmTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PWM{}", self.index())
    }
}

/// Which timers back the kernel's clock-event and clock-source devices.
///
/// Recorded while mapping I/O and consumed when the time source starts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TimerSelection {
    event: PwmTimer,
    source: PwmTimer,
}

impl TimerSelection {
    #[must_use]
    pub const fn new(event: PwmTimer, source: PwmTimer) -> Self {
        Self { event, source }
    }

    /// Channel that raises the periodic/one-shot tick.
    #[must_use]
    pub const fn event(&self) -> PwmTimer {
        self.event
    }

    /// Channel that runs as the free-running counter.
    #[must_use]
    pub const fn source(&self) -> PwmTimer {
        self.source
    }

    /// # Errors
    /// [`ConfigError::TimerChannelsCollide`] when both roles use one channel.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.event as u8 == self.source as u8 {
            return Err(ConfigError::TimerChannelsCollide {
                channel: self.event,
            });
        }
        Ok(())
    }
}

/// Input to the base clock generators.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ClockConfig {
    xtal_hz: u32,
}

impl ClockConfig {
    #[must_use]
    pub const fn new(xtal_hz: u32) -> Self {
        Self { xtal_hz }
    }

    #[must_use]
    pub const fn xtal_hz(&self) -> u32 {
        self.xtal_hz
    }

    /// # Errors
    /// [`ConfigError::InvalidClock`] for a zero crystal frequency.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.xtal_hz == 0 {
            return Err(ConfigError::InvalidClock);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_and_source_must_differ() {
        assert!(TimerSelection::new(PwmTimer::Pwm3, PwmTimer::Pwm4).validate().is_ok());
        assert_eq!(
            TimerSelection::new(PwmTimer::Pwm4, PwmTimer::Pwm4).validate(),
            Err(ConfigError::TimerChannelsCollide {
                channel: PwmTimer::Pwm4
            })
        );
    }

    #[test]
    fn display_name() {
        assert_eq!(PwmTimer::Pwm3.to_string(), "PWM3");
    }

    #[test]
    fn zero_crystal_is_rejected() {
        assert_eq!(ClockConfig::new(0).validate(), Err(ConfigError::InvalidClock));
        assert!(ClockConfig::new(12_000_000).validate().is_ok());
    }
}
