use board_boot::{BootError, BootStage, BootState, Machine, Platform, RestartMode};
use board_desc::peripherals::{
    ClockConfig, FramebufferConfig, GpioI2cConfig, I2cBoardInfo, I2cControllerConfig,
    NandPlatformConfig, PartitionSize, StorageDeviceSet, TimerSelection, UartChannelConfig,
};
use board_desc::resource::check_conflicts;
use board_desc::{
    ConfigError, DeviceConfig, DeviceDescriptor, HardwareError, InstanceId, IoMapper,
    LowSpeedBus, MemoryRegion, ResourceClaim, Trigger,
};
use board_info::clock::LCD_FRAMEBUFFER_BUDGET;
use board_info::gpio::{GpioBank, GpioPin};
use board_memory_addresses::{MinimumGranularity, PageSize};
use mach_tq2440::tables;

const MIB: u64 = 1 << 20;

/// Records what the boot stages hand to the orchestrator.
#[derive(Default)]
struct Board {
    mapped: usize,
    devices: Vec<String>,
    controller_data: usize,
    board_info: Vec<(u8, &'static str)>,
}

impl IoMapper for Board {
    fn map_io(&mut self, _region: &MemoryRegion) -> Result<(), HardwareError> {
        self.mapped += 1;
        Ok(())
    }
}

impl Platform for Board {
    fn init_clocks(&mut self, clock: &ClockConfig) -> Result<(), HardwareError> {
        assert_eq!(clock.xtal_hz(), 12_000_000);
        Ok(())
    }

    fn init_uarts(&mut self, uarts: &[UartChannelConfig]) -> Result<(), HardwareError> {
        assert_eq!(uarts.len(), 3);
        Ok(())
    }

    fn set_timer_source(&mut self, _timer: TimerSelection) -> Result<(), HardwareError> {
        Ok(())
    }

    fn init_irq(&mut self) -> Result<(), HardwareError> {
        Ok(())
    }

    fn set_display_platform_data(
        &mut self,
        framebuffer: &FramebufferConfig<'_>,
    ) -> Result<(), HardwareError> {
        assert_eq!(framebuffer.default_panel().map(|d| d.width()), Some(480));
        Ok(())
    }

    fn set_i2c_platform_data(
        &mut self,
        config: Option<&I2cControllerConfig>,
    ) -> Result<(), HardwareError> {
        assert!(config.is_none());
        self.controller_data += 1;
        Ok(())
    }

    fn set_nand_platform_data(
        &mut self,
        _nand: &NandPlatformConfig<'_>,
    ) -> Result<(), HardwareError> {
        Ok(())
    }

    fn add_devices(&mut self, devices: &[DeviceDescriptor<'_>]) -> Result<(), HardwareError> {
        self.devices = devices.iter().map(ToString::to_string).collect();
        Ok(())
    }

    fn register_i2c_board_info(
        &mut self,
        bus: u8,
        devices: &[I2cBoardInfo<'_>],
    ) -> Result<(), HardwareError> {
        self.board_info
            .extend(devices.iter().map(|d| (bus, d.type_name())));
        Ok(())
    }

    fn pm_init(&mut self) -> Result<(), HardwareError> {
        Ok(())
    }

    fn init_time(&mut self, timer: TimerSelection) -> Result<(), HardwareError> {
        assert_eq!(timer, tables::TIMER);
        Ok(())
    }

    fn restart(&mut self, mode: RestartMode, _command: Option<&str>) -> ! {
        panic!("{mode} restart");
    }
}

fn machine() -> Machine<'static> {
    mach_tq2440::board_with(tables::IIC_CONTROLLER).unwrap()
}

#[test]
fn io_windows_are_disjoint_and_granular() {
    let board = mach_tq2440::descriptor(tables::IIC_CONTROLLER).unwrap();
    let regions = board.memory_map().regions();
    assert_eq!(regions.len(), 4);
    for (i, a) in regions.iter().enumerate() {
        assert!(a.length() > 0);
        assert_eq!(a.length() % MinimumGranularity::SIZE, 0);
        for b in &regions[i + 1..] {
            assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
        }
    }
    // Word and byte windows alias the same chip select.
    assert_eq!(regions[0].phys(), regions[2].phys());
}

#[test]
fn device_claims_do_not_conflict() {
    for bus in [tables::IIC_CONTROLLER, tables::GPIO_BUS] {
        let board = mach_tq2440::descriptor(bus).unwrap();
        let devices = board.registry().devices();
        for (i, a) in devices.iter().enumerate() {
            for b in &devices[i + 1..] {
                for ca in a.resources() {
                    for cb in b.resources() {
                        match (ca, cb) {
                            (ResourceClaim::Memory(ma), ResourceClaim::Memory(mb)) => {
                                assert!(!ma.overlaps(mb), "{a} and {b} share memory");
                            }
                            (ResourceClaim::Interrupt(ia), ResourceClaim::Interrupt(ib))
                                if ia.line() == ib.line() =>
                            {
                                assert_eq!(ia.trigger(), ib.trigger());
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn partitions_tile_the_chip() {
    for set in tables::NAND.sets() {
        let resolved = set.resolve().unwrap();
        for pair in resolved.windows(2) {
            assert_eq!(pair[1].offset, pair[0].offset + pair[0].size);
        }
        let remainders: Vec<_> = set
            .partitions()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.size() == PartitionSize::Remainder)
            .map(|(i, _)| i)
            .collect();
        assert!(remainders.len() <= 1);
        if let Some(&i) = remainders.first() {
            assert_eq!(i, set.partitions().len() - 1);
            let last = resolved[i];
            assert_eq!(last.size, set.capacity() - last.offset);
        }
    }
    assert_eq!(tables::NAND.sets()[0].resolve().unwrap()[2].size, 251 * MIB);
}

#[test]
fn uart_channels_are_distinct() {
    let mut ports: Vec<u8> = tables::UARTS.iter().map(UartChannelConfig::hwport).collect();
    ports.sort_unstable();
    ports.dedup();
    assert_eq!(ports, [0, 1, 2]);
    assert!(tables::UARTS[2].ulcon().infrared());
}

#[test]
fn eeprom_is_whole_pages() {
    let eeprom = tables::I2C_DEVICES[0].platform_data().unwrap();
    assert_eq!(eeprom.byte_len() % u32::from(eeprom.page_size()), 0);
    assert_eq!(eeprom.pages(), Some(32));
    assert!(eeprom.flags().take8addr());
    assert_eq!(tables::I2C_DEVICES[0].address(), 0x50);
}

#[test]
fn registry_keeps_board_order() {
    let m = machine();
    let names: Vec<_> = m.board().registry().iter().map(ToString::to_string).collect();
    assert_eq!(
        names,
        [
            "s3c2410-ohci",
            "s3c2410-lcd",
            "s3c2410-wdt",
            "s3c2410-i2c",
            "s3c24xx-iis",
            "dm9000.0",
            "s3c2410-rtc",
            "s3c2410-nand",
        ]
    );
    assert_eq!(m.boot_tag_offset(), 0x100);
}

#[test]
fn gpio_bus_replaces_the_controller() {
    let m = mach_tq2440::board_with(tables::GPIO_BUS).unwrap();
    let registry = m.board().registry();
    assert_eq!(registry.low_speed_bus_slot(), Some(3));
    assert!(registry.find("s3c2410-i2c").is_none());
    assert!(matches!(
        registry.devices()[3].config(),
        DeviceConfig::GpioI2c(_)
    ));

    let mut m = m;
    let mut p = Board::default();
    m.boot(&mut p).unwrap();
    assert_eq!(p.controller_data, 0);
    assert_eq!(p.devices[3], "i2c-gpio.0");
}

#[test]
fn bus_with_shared_pin_is_rejected() {
    static BROKEN: GpioI2cConfig =
        GpioI2cConfig::new(GpioPin::new(GpioBank::E, 15), GpioPin::new(GpioBank::E, 15));
    let bus = LowSpeedBus::GpioBitBang {
        device: DeviceDescriptor::new("i2c-gpio", InstanceId::Numbered(0), &[]),
        config: &BROKEN,
    };
    assert!(matches!(
        mach_tq2440::board_with(bus),
        Err(ConfigError::GpioI2cPinsShared { .. })
    ));
}

#[test]
fn default_bus_follows_the_feature() {
    let m = mach_tq2440::board().unwrap();
    let controller = m.board().registry().low_speed_bus().unwrap().is_controller();
    assert_eq!(controller, !cfg!(feature = "eeprom-gpio-i2c"));
}

#[test]
fn boot_visits_every_state_once() {
    let mut m = machine();
    let mut p = Board::default();
    let mut seen = vec![m.state()];

    m.map_io(&mut p).unwrap();
    seen.push(m.state());
    m.init_irq(&mut p).unwrap();
    seen.push(m.state());
    m.init_machine(&mut p).unwrap();
    seen.push(m.state());
    m.init_time(&mut p).unwrap();
    seen.push(m.state());

    assert_eq!(
        seen,
        [
            BootState::Uninitialized,
            BootState::IoMapped,
            BootState::InterruptsReady,
            BootState::MachineInitialized,
            BootState::TimeSourceReady,
        ]
    );
    assert!(m.is_running());
    assert_eq!(p.mapped, 4);
    assert_eq!(p.controller_data, 1);
    assert_eq!(p.devices.len(), 8);
    assert_eq!(p.board_info, [(0, "24c02")]);
}

#[test]
#[should_panic(expected = "hard restart")]
fn restart_never_returns() {
    let mut m = machine();
    let mut p = Board::default();
    m.boot(&mut p).unwrap();
    m.restart(&mut p, RestartMode::Hard, None);
}

#[test]
fn remainder_partition_resolves_against_capacity() {
    let set = StorageDeviceSet::new("tq2440-0", 1, 8 * MIB, &tables::PARTITIONS);
    let resolved = set.resolve().unwrap();
    let rootfs = resolved.iter().find(|p| p.name == "Rootfs").unwrap();
    assert_eq!(rootfs.offset, 5 * MIB);
    assert_eq!(rootfs.size, 3 * MIB);
}

#[test]
fn mismatched_triggers_on_one_line_conflict() {
    const A: [ResourceClaim; 1] = [ResourceClaim::irq_with(7, Trigger::RisingEdge)];
    const B: [ResourceClaim; 1] = [ResourceClaim::irq_with(7, Trigger::FallingEdge)];
    let devices = [
        DeviceDescriptor::new("device-a", InstanceId::Single, &A),
        DeviceDescriptor::new("device-b", InstanceId::Single, &B),
    ];
    match check_conflicts(&devices) {
        Err(ConfigError::InterruptConflict {
            first,
            second,
            line,
            ..
        }) => {
            assert_eq!(line, 7);
            let mut names = [first, second];
            names.sort_unstable();
            assert_eq!(names, ["device-a", "device-b"]);
        }
        other => panic!("expected an interrupt conflict, got {other:?}"),
    }
}

#[test]
fn panel_depth_must_be_supported() {
    let panel = tables::DISPLAYS[0];
    assert_eq!(panel.pixclock(), 100_000);
    assert_eq!((panel.width(), panel.height()), (480, 272));
    assert_eq!(panel.validate(LCD_FRAMEBUFFER_BUDGET), Ok(()));
    assert_eq!(
        panel.with_bits_per_pixel(3).validate(LCD_FRAMEBUFFER_BUDGET),
        Err(ConfigError::InvalidBitDepth { bits_per_pixel: 3 })
    );
}

#[test]
fn second_machine_init_is_an_ordering_violation() {
    let mut m = machine();
    let mut p = Board::default();
    m.boot(&mut p).unwrap();

    let err = m.init_machine(&mut p).unwrap_err();
    assert!(err.is_ordering_violation());
    assert_eq!(
        err,
        BootError::AlreadyCompleted {
            stage: BootStage::InitMachine
        }
    );
}
