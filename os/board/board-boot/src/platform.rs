use board_desc::peripherals::{
    ClockConfig, FramebufferConfig, I2cBoardInfo, I2cControllerConfig, NandPlatformConfig,
    TimerSelection, UartChannelConfig,
};
use board_desc::{DeviceDescriptor, HardwareError, IoMapper};
use core::fmt;

/// How the board should be reset.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RestartMode {
    /// Jump to the reset vector with the MMU and caches off.
    Soft,
    /// Let the watchdog pull the reset line.
    Hard,
}

impl fmt::Display for RestartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Soft => "soft",
            Self::Hard => "hard",
        })
    }
}

/// Services the boot orchestrator offers to a board during bring-up.
///
/// Every call performs bounded register writes or records static data; none
/// may block. Errors are fatal for the calling stage.
pub trait Platform: IoMapper {
    /// Start the PLLs and derive the core clocks from the crystal.
    ///
    /// # Errors
    /// The clock registers did not accept the configuration.
    fn init_clocks(&mut self, clock: &ClockConfig) -> Result<(), HardwareError>;

    /// Register the serial ports; the first becomes the early console.
    ///
    /// # Errors
    /// A port could not be set up.
    fn init_uarts(&mut self, uarts: &[UartChannelConfig]) -> Result<(), HardwareError>;

    /// Record which PWM channels will back the time source.
    ///
    /// # Errors
    /// The selection is not supported by the timer driver.
    fn set_timer_source(&mut self, timer: TimerSelection) -> Result<(), HardwareError>;

    /// Bring up the interrupt controller.
    ///
    /// # Errors
    /// The controller could not be initialised.
    fn init_irq(&mut self) -> Result<(), HardwareError>;

    /// # Errors
    /// The display driver's configuration slot rejected the data.
    fn set_display_platform_data(
        &mut self,
        framebuffer: &FramebufferConfig<'_>,
    ) -> Result<(), HardwareError>;

    /// `None` accepts the I2C controller driver's defaults.
    ///
    /// # Errors
    /// The controller driver's configuration slot rejected the data.
    fn set_i2c_platform_data(
        &mut self,
        config: Option<&I2cControllerConfig>,
    ) -> Result<(), HardwareError>;

    /// # Errors
    /// The NAND driver's configuration slot rejected the data.
    fn set_nand_platform_data(
        &mut self,
        nand: &NandPlatformConfig<'_>,
    ) -> Result<(), HardwareError>;

    /// Hand the devices, in order, to the device-activation mechanism.
    ///
    /// # Errors
    /// A device could not be registered.
    fn add_devices(&mut self, devices: &[DeviceDescriptor<'_>]) -> Result<(), HardwareError>;

    /// Announce devices that live on I2C bus `bus`.
    ///
    /// # Errors
    /// The board info could not be recorded.
    fn register_i2c_board_info(
        &mut self,
        bus: u8,
        devices: &[I2cBoardInfo<'_>],
    ) -> Result<(), HardwareError>;

    /// Set up suspend/resume support.
    ///
    /// # Errors
    /// Power management could not be initialised.
    fn pm_init(&mut self) -> Result<(), HardwareError>;

    /// Start the clock-event and clock-source devices.
    ///
    /// # Errors
    /// The timers could not be started.
    fn init_time(&mut self, timer: TimerSelection) -> Result<(), HardwareError>;

    /// Reset the board. `command` is the reboot command line, if any.
    fn restart(&mut self, mode: RestartMode, command: Option<&str>) -> !;
}
