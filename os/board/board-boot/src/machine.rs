use crate::error::BootError;
use crate::platform::{Platform, RestartMode};
use crate::sequencer::{BootSequencer, BootStage, BootState};
use board_desc::peripherals::TimerSelection;
use board_desc::{BoardBuilder, BoardDescriptor, HardwareError, LowSpeedBus};
use log::{debug, info, warn};

/// The registration record of a board: its descriptor and the four stage
/// callbacks, guarded by a [`BootSequencer`].
#[derive(Debug)]
pub struct Machine<'a> {
    board: BoardDescriptor<'a>,
    sequencer: BootSequencer,
    /// Selection recorded by `map_io`, consumed by `init_time`.
    timer: Option<TimerSelection>,
}

impl<'a> Machine<'a> {
    #[must_use]
    pub const fn new(board: BoardDescriptor<'a>) -> Self {
        Self {
            board,
            sequencer: BootSequencer::new(),
            timer: None,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.board.name()
    }

    #[must_use]
    pub const fn boot_tag_offset(&self) -> u32 {
        self.board.boot_tag_offset()
    }

    #[must_use]
    pub const fn board(&self) -> &BoardDescriptor<'a> {
        &self.board
    }

    #[must_use]
    pub const fn state(&self) -> BootState {
        self.sequencer.state()
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.sequencer.is_running()
    }

    /// The timer selection recorded while mapping I/O.
    #[must_use]
    pub const fn timer_selection(&self) -> Option<TimerSelection> {
        self.timer
    }

    /// Install the static mappings, start the clocks, register the serial
    /// ports and record the timer selection.
    ///
    /// # Errors
    /// An ordering error, or the first platform service that fails.
    pub fn map_io<P: Platform + ?Sized>(&mut self, platform: &mut P) -> Result<(), BootError> {
        let board = &self.board;
        let timer = &mut self.timer;
        self.sequencer.run(BootStage::MapIo, || {
            let hw = hardware(BootStage::MapIo);
            board.memory_map().install(&mut *platform).map_err(hw)?;
            debug!("{} static mappings installed", board.memory_map().len());
            platform.init_clocks(&board.clock()).map_err(hw)?;
            platform.init_uarts(board.uarts()).map_err(hw)?;
            platform.set_timer_source(board.timer()).map_err(hw)?;
            *timer = Some(board.timer());
            Ok(())
        })
    }

    /// Let the orchestrator bring up the interrupt controller.
    ///
    /// # Errors
    /// An ordering error, or the platform's failure.
    pub fn init_irq<P: Platform + ?Sized>(&mut self, platform: &mut P) -> Result<(), BootError> {
        self.sequencer.run(BootStage::InitIrq, || {
            platform
                .init_irq()
                .map_err(hardware(BootStage::InitIrq))
        })
    }

    /// Install platform data, register every device and the I2C board info,
    /// then start power management.
    ///
    /// # Errors
    /// An ordering error, or the first platform service that fails.
    pub fn init_machine<P: Platform + ?Sized>(
        &mut self,
        platform: &mut P,
    ) -> Result<(), BootError> {
        let board = &self.board;
        self.sequencer.run(BootStage::InitMachine, || {
            let hw = hardware(BootStage::InitMachine);
            if let Some(fb) = board.framebuffer() {
                platform.set_display_platform_data(fb).map_err(hw)?;
            }
            match board.registry().low_speed_bus() {
                Some(LowSpeedBus::Controller { platform_data, .. }) => {
                    platform.set_i2c_platform_data(*platform_data).map_err(hw)?;
                }
                Some(LowSpeedBus::GpioBitBang { .. }) => {
                    debug!("low-speed bus is bit-banged; controller left unconfigured");
                }
                None => {}
            }
            if let Some(nand) = board.nand() {
                platform.set_nand_platform_data(nand).map_err(hw)?;
            }
            platform
                .add_devices(board.registry().devices())
                .map_err(hw)?;
            if !board.i2c_devices().is_empty() {
                platform
                    .register_i2c_board_info(board.i2c_bus(), board.i2c_devices())
                    .map_err(hw)?;
            }
            platform.pm_init().map_err(hw)
        })
    }

    /// Start the time source chosen during `map_io`.
    ///
    /// # Errors
    /// An ordering error, or the platform's failure.
    pub fn init_time<P: Platform + ?Sized>(&mut self, platform: &mut P) -> Result<(), BootError> {
        let timer = self.timer;
        self.sequencer.run(BootStage::InitTime, || {
            // Reaching this stage implies map_io completed and recorded it.
            let timer = timer.ok_or(BootError::OutOfOrder {
                expected: BootStage::MapIo,
                requested: BootStage::InitTime,
            })?;
            platform
                .init_time(timer)
                .map_err(hardware(BootStage::InitTime))
        })
    }

    /// Run all four stages in order.
    ///
    /// # Errors
    /// The first stage that fails or is rejected.
    pub fn boot<P: Platform + ?Sized>(&mut self, platform: &mut P) -> Result<(), BootError> {
        self.map_io(platform)?;
        self.init_irq(platform)?;
        self.init_machine(platform)?;
        self.init_time(platform)?;
        info!("{}: running", self.name());
        Ok(())
    }

    /// Reset the board. Allowed in any state, including after a failure.
    pub fn restart<P: Platform + ?Sized>(
        &self,
        platform: &mut P,
        mode: RestartMode,
        command: Option<&str>,
    ) -> ! {
        if !self.is_running() {
            warn!("{}: restart requested in state {}", self.name(), self.state());
        }
        info!("{}: {mode} restart", self.name());
        platform.restart(mode, command)
    }
}

impl<'a> TryFrom<BoardBuilder<'a>> for Machine<'a> {
    type Error = BootError;

    /// Validate the board and wrap it, ready for `map_io`.
    fn try_from(builder: BoardBuilder<'a>) -> Result<Self, Self::Error> {
        Ok(Self::new(builder.build()?))
    }
}

fn hardware(stage: BootStage) -> impl Fn(HardwareError) -> BootError + Copy {
    move |source| BootError::Hardware { stage, source }
}
