//! Static configuration tables of the TQ2440.
//!
//! Everything here is `static` so descriptors can borrow it for `'static`.

use board_desc::peripherals::{
    ClockConfig, DisplayTimingConfig, Dm9000Config, EepromConfig, FramebufferConfig,
    GpioI2cConfig, I2cBoardInfo, LcdGpioConfig, NandPlatformConfig, NandTiming, PwmTimer,
    StorageDeviceSet, StoragePartition, TimerSelection, UartChannelConfig,
};
use board_desc::{
    DeviceConfig, DeviceDescriptor, InstanceId, LowSpeedBus, MemoryRegion, MemoryType,
    ResourceClaim, Trigger,
};
use board_info::clock::XTAL_HZ;
use board_info::gpio::{GpioBank, GpioPin};
use board_info::irq::{IRQ_EINT7, IRQ_IIC, IRQ_LCD, IRQ_RTC, IRQ_TICK, IRQ_USBH, IRQ_WDT};
use board_info::memory::{
    ISA_UPPER_OFFSET, PA_CS2, PA_CS4, PA_IIC, PA_IIS, PA_LCD, PA_NAND, PA_RTC, PA_USBHOST,
    PA_WATCHDOG, SZ_4M, SZ_64K, SZ_256, SZ_IIC, SZ_IIS, SZ_LCD, SZ_NAND, SZ_RTC, SZ_USBHOST,
    SZ_WATCHDOG, VA_ISA_BYTE, VA_ISA_WORD,
};
use board_registers::at24::At24Flags;
use board_registers::dm9000::Dm9000Flags;
use board_registers::lcd::Lcdcon5;
use board_registers::uart::{Ucon, Ufcon, Ulcon};

/// Name the boot loader knows the board by.
pub const MACHINE_NAME: &str = "TQ2440";

// ISA-style expansion bus on nGCS2. A24 selects the upper half, so both the
// word and the byte window get a 64 KiB alias of CS2 followed by 4 MiB of
// CS2 + 16 MiB.
pub static IO_DESC: [MemoryRegion; 4] = [
    MemoryRegion::new(VA_ISA_WORD, PA_CS2, SZ_64K, MemoryType::Device),
    MemoryRegion::new(
        VA_ISA_WORD.offset(SZ_64K),
        PA_CS2.offset(ISA_UPPER_OFFSET),
        SZ_4M,
        MemoryType::Device,
    ),
    MemoryRegion::new(VA_ISA_BYTE, PA_CS2, SZ_64K, MemoryType::Device),
    MemoryRegion::new(
        VA_ISA_BYTE.offset(SZ_64K),
        PA_CS2.offset(ISA_UPPER_OFFSET),
        SZ_4M,
        MemoryType::Device,
    ),
];

pub const CLOCK: ClockConfig = ClockConfig::new(XTAL_HZ);

/// Rx/Tx interrupt or polling, error and timeout interrupts, level-triggered
/// Tx interrupt, PCLK.
const UCON: Ucon = Ucon::from_bits(0x3c5);
/// 8N1.
const ULCON: Ulcon = Ulcon::from_bits(0x03);
/// 8N1 in infrared mode.
const ULCON_IRDA: Ulcon = Ulcon::from_bits(0x43);
/// FIFOs on, Rx trigger 8 bytes, Tx trigger 16 bytes.
const UFCON: Ufcon = Ufcon::from_bits(0x51);

pub static UARTS: [UartChannelConfig; 3] = [
    UartChannelConfig::new(0, UCON, ULCON, UFCON),
    UartChannelConfig::new(1, UCON, ULCON, UFCON),
    // IrDA
    UartChannelConfig::new(2, UCON, ULCON_IRDA, UFCON),
];

pub const TIMER: TimerSelection = TimerSelection::new(PwmTimer::Pwm3, PwmTimer::Pwm4);

/// The 4.3" 480x272 TFT (WXCAT43) shipped with the board.
pub static DISPLAYS: [DisplayTimingConfig; 1] = [DisplayTimingConfig::new(480, 272, 16, 100_000)
    .with_lcdcon5(
        Lcdcon5::new()
            .with_frm565(true)
            .with_invvline(true)
            .with_invvframe(true)
            .with_pwren(true)
            .with_hwswp(true),
    )
    .with_left_margin(2)
    .with_right_margin(2)
    .with_hsync_len(41)
    .with_upper_margin(2)
    .with_lower_margin(2)
    .with_vsync_len(10)];

/// Alternate function 2 (LCD) on every listed pin of a GPxCON register.
const fn lcd_function(pins: &[u32]) -> (u32, u32) {
    let mut value = 0;
    let mut mask = 0;
    let mut i = 0;
    while i < pins.len() {
        value |= 0b10 << (pins[i] * 2);
        mask |= 0b11 << (pins[i] * 2);
        i += 1;
    }
    (value, mask)
}

/// VCLK, VLINE, VFRAME, VM and VD0..VD7.
const GPC_LCD: (u32, u32) = lcd_function(&[1, 2, 3, 4, 8, 9, 10, 11, 12, 13, 14, 15]);
/// VD10..VD15 and VD18..VD23.
const GPD_LCD: (u32, u32) = lcd_function(&[2, 3, 4, 5, 6, 7, 10, 11, 12, 13, 14, 15]);

pub const LCD_GPIO: LcdGpioConfig = LcdGpioConfig::new()
    .with_gpcup((0xf << 1) | (0x3f << 10))
    .with_gpccon(GPC_LCD.0)
    .with_gpccon_mask(GPC_LCD.1)
    .with_gpdup((0x3f << 2) | (0x3f << 10))
    .with_gpdcon(GPD_LCD.0)
    .with_gpdcon_mask(GPD_LCD.1);

pub static FRAMEBUFFER: FramebufferConfig<'static> = FramebufferConfig::new(&DISPLAYS, LCD_GPIO)
    .with_default_display(0)
    .with_lpcsel(0);

const MIB: u64 = 1 << 20;

pub static PARTITIONS: [StoragePartition; 3] = [
    StoragePartition::new("Boot", 0, 2 * MIB),
    StoragePartition::new("Kernel", 2 * MIB, 3 * MIB),
    StoragePartition::remainder("Rootfs", 5 * MIB),
];

/// One K9F2G08 (256 MiB) chip.
pub static NAND_SETS: [StorageDeviceSet<'static>; 1] =
    [StorageDeviceSet::new("tq2440-0", 1, 256 * MIB, &PARTITIONS)];

pub static NAND: NandPlatformConfig<'static> =
    NandPlatformConfig::new(NandTiming::new(10, 25, 10), &NAND_SETS);

pub static EEPROM: EepromConfig =
    EepromConfig::new(SZ_256, 8, At24Flags::new().with_take8addr(true));

/// Devices on I2C bus 0.
pub static I2C_DEVICES: [I2cBoardInfo<'static>; 1] =
    [I2cBoardInfo::new("24c02", 0x50).with_platform_data(&EEPROM)];

pub static DM9000: Dm9000Config = Dm9000Config::new(Dm9000Flags::new().with_bus_16bit_only(true));

pub static GPIO_I2C: GpioI2cConfig =
    GpioI2cConfig::new(GpioPin::new(GpioBank::E, 15), GpioPin::new(GpioBank::E, 14));

static USB_HOST_RES: [ResourceClaim; 2] = [
    ResourceClaim::mem(PA_USBHOST, SZ_USBHOST),
    ResourceClaim::irq(IRQ_USBH),
];
static LCD_RES: [ResourceClaim; 2] = [ResourceClaim::mem(PA_LCD, SZ_LCD), ResourceClaim::irq(IRQ_LCD)];
static WDT_RES: [ResourceClaim; 2] = [
    ResourceClaim::mem(PA_WATCHDOG, SZ_WATCHDOG),
    ResourceClaim::irq(IRQ_WDT),
];
static IIC_RES: [ResourceClaim; 2] = [ResourceClaim::mem(PA_IIC, SZ_IIC), ResourceClaim::irq(IRQ_IIC)];
static IIS_RES: [ResourceClaim; 1] = [ResourceClaim::mem(PA_IIS, SZ_IIS)];
/// Address port at CS4, data port at CS4 + 4 (ADDR2 selects).
static DM9000_RES: [ResourceClaim; 3] = [
    ResourceClaim::mem(PA_CS4, 4),
    ResourceClaim::mem(PA_CS4.offset(4), 4),
    ResourceClaim::irq_with(IRQ_EINT7, Trigger::RisingEdge),
];
static RTC_RES: [ResourceClaim; 3] = [
    ResourceClaim::mem(PA_RTC, SZ_RTC),
    ResourceClaim::irq(IRQ_RTC),
    ResourceClaim::irq(IRQ_TICK),
];
static NAND_RES: [ResourceClaim; 1] = [ResourceClaim::mem(PA_NAND, SZ_NAND)];

/// Devices registered ahead of the low-speed bus.
pub static DEVICES_BEFORE_BUS: [DeviceDescriptor<'static>; 3] = [
    DeviceDescriptor::new("s3c2410-ohci", InstanceId::Single, &USB_HOST_RES),
    DeviceDescriptor::new("s3c2410-lcd", InstanceId::Single, &LCD_RES)
        .with_config(DeviceConfig::Display(&FRAMEBUFFER)),
    DeviceDescriptor::new("s3c2410-wdt", InstanceId::Single, &WDT_RES),
];

/// Devices registered after it.
pub static DEVICES_AFTER_BUS: [DeviceDescriptor<'static>; 4] = [
    DeviceDescriptor::new("s3c24xx-iis", InstanceId::Single, &IIS_RES),
    DeviceDescriptor::new("dm9000", InstanceId::Numbered(0), &DM9000_RES)
        .with_config(DeviceConfig::Network(&DM9000)),
    DeviceDescriptor::new("s3c2410-rtc", InstanceId::Single, &RTC_RES),
    DeviceDescriptor::new("s3c2410-nand", InstanceId::Single, &NAND_RES)
        .with_config(DeviceConfig::Storage(&NAND)),
];

/// The SoC's IIC controller, accepting the driver's defaults.
pub const IIC_CONTROLLER: LowSpeedBus<'static> = LowSpeedBus::Controller {
    device: DeviceDescriptor::new("s3c2410-i2c", InstanceId::Single, &IIC_RES),
    platform_data: None,
};

/// Bit-banged bus on GPE15 (SDA) and GPE14 (SCL).
pub const GPIO_BUS: LowSpeedBus<'static> = LowSpeedBus::GpioBitBang {
    device: DeviceDescriptor::new("i2c-gpio", InstanceId::Numbered(0), &[]),
    config: &GPIO_I2C,
};

const _: () = {
    assert!(GPC_LCD.0 & !GPC_LCD.1 == 0);
    assert!(GPD_LCD.0 & !GPD_LCD.1 == 0);
    assert!(VA_ISA_WORD.offset(SZ_64K + SZ_4M).as_u32() <= VA_ISA_BYTE.as_u32());
};
