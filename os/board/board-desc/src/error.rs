use crate::device::InstanceId;
use crate::peripherals::timer::PwmTimer;
use crate::resource::Trigger;
use board_info::gpio::GpioPin;
use board_info::irq::IrqNumber;
use board_memory_addresses::{PhysicalAddress, VirtualAddress};

/// A board description that violates one of its invariants.
///
/// These are programming errors in a board table. They are meant to be caught
/// when the descriptor is built (in tests, or at the very start of boot) and
/// are never recovered from at runtime.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("board descriptor is missing its {field}")]
    Missing { field: &'static str },

    #[error("I/O mapping #{index} at {virt} has zero length")]
    EmptyRegion { index: usize, virt: VirtualAddress },

    #[error(
        "I/O mapping #{index} ({virt} → {phys}, {length:#x} bytes) is not aligned to the {granularity:#x}-byte mapping granularity"
    )]
    MisalignedRegion {
        index: usize,
        virt: VirtualAddress,
        phys: PhysicalAddress,
        length: u32,
        granularity: u32,
    },

    #[error("I/O mapping #{index} at {virt} wraps past the end of the address space")]
    RegionWraps { index: usize, virt: VirtualAddress },

    #[error("I/O mappings #{first} ({first_virt}) and #{second} ({second_virt}) overlap")]
    OverlappingRegions {
        first: usize,
        first_virt: VirtualAddress,
        second: usize,
        second_virt: VirtualAddress,
    },

    #[error("device {device} claims an empty memory range {start}..={end}")]
    InvalidMemoryClaim {
        device: &'static str,
        start: PhysicalAddress,
        end: PhysicalAddress,
    },

    #[error("device {device} claims memory {start}..={end} more than once")]
    SelfOverlappingMemory {
        device: &'static str,
        start: PhysicalAddress,
        end: PhysicalAddress,
    },

    #[error("device {device} claims interrupt line {line} more than once")]
    DuplicateInterruptLine { device: &'static str, line: IrqNumber },

    #[error("devices {first} and {second} both claim memory {start}..={end}")]
    MemoryConflict {
        first: &'static str,
        second: &'static str,
        start: PhysicalAddress,
        end: PhysicalAddress,
    },

    #[error(
        "devices {first} ({first_trigger}) and {second} ({second_trigger}) claim interrupt line {line} with incompatible triggers"
    )]
    InterruptConflict {
        first: &'static str,
        second: &'static str,
        line: IrqNumber,
        first_trigger: Trigger,
        second_trigger: Trigger,
    },

    #[error("device {name}{id} is registered twice")]
    DuplicateDevice { name: &'static str, id: InstanceId },

    #[error("more than one low-speed bus implementation is registered")]
    DuplicateLowSpeedBus,

    #[error("UART channel {channel} is configured twice")]
    DuplicateUartChannel { channel: u8 },

    #[error("UART channel {channel} does not exist (the SoC has {channels})")]
    UartChannelOutOfRange { channel: u8, channels: u8 },

    #[error("pixel clock period must be positive")]
    InvalidPixelClock,

    #[error("{bits_per_pixel} bits per pixel is not a supported depth")]
    InvalidBitDepth { bits_per_pixel: u8 },

    #[error("display resolution {width}x{height} is empty")]
    EmptyResolution { width: u32, height: u32 },

    #[error("frame buffer needs {required} bytes but only {budget} are available")]
    FramebufferTooLarge { required: u64, budget: u32 },

    #[error("LCDCON5 pixel format bits do not match a depth of {bits_per_pixel} bpp")]
    PixelFormatMismatch { bits_per_pixel: u8 },

    #[error("frame buffer configuration lists no displays")]
    NoDisplays,

    #[error("default display #{index} does not exist ({displays} configured)")]
    DefaultDisplayOutOfRange { index: usize, displays: usize },

    #[error("GP{port}CON value {value:#010x} sets bits outside its mask {mask:#010x}")]
    LcdGpioOutsideMask { port: char, value: u32, mask: u32 },

    #[error("NAND platform data has no chip sets")]
    NoNandSets,

    #[error("NAND set {set} has no chips")]
    NoNandChips { set: &'static str },

    #[error("NAND timing {field} must be non-zero")]
    InvalidNandTiming { field: &'static str },

    #[error("NAND set {set} has no partitions")]
    EmptyPartitionTable { set: &'static str },

    #[error("partition {name} starts at {actual:#x}, expected {expected:#x}")]
    PartitionMisplaced {
        name: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error("partition {name} uses the remainder size but is not the last partition")]
    RemainderNotLast { name: &'static str },

    #[error("partition {name} is empty")]
    EmptyPartition { name: &'static str },

    #[error("partition {name} ends at {end:#x}, beyond the device capacity {capacity:#x}")]
    PartitionExceedsDevice {
        name: &'static str,
        end: u64,
        capacity: u64,
    },

    #[error("EEPROM of {byte_len} bytes cannot be split into {page_size}-byte pages")]
    InvalidEepromGeometry { byte_len: u32, page_size: u16 },

    #[error("I2C address {address:#04x} is not a valid 7-bit address")]
    InvalidI2cAddress { address: u16 },

    #[error("I2C address {address:#04x} on bus {bus} is used by {first} and {second}")]
    DuplicateI2cAddress {
        bus: u8,
        address: u16,
        first: &'static str,
        second: &'static str,
    },

    #[error("bit-banged I2C uses {pin} for both SDA and SCL")]
    GpioI2cPinsShared { pin: GpioPin },

    #[error("DM9000 flags {flags:#x} must select exactly one bus width")]
    InvalidBusWidth { flags: u32 },

    #[error("clock event and clock source both use {channel}")]
    TimerChannelsCollide { channel: PwmTimer },

    #[error("crystal frequency must be positive")]
    InvalidClock,
}

/// A hardware access the platform could not honour.
///
/// Returned by the orchestrator-provided services; it is fatal for the boot
/// stage that issued the access.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum HardwareError {
    #[error("{operation}: write to {address} was not honoured")]
    RegisterWrite {
        operation: &'static str,
        address: PhysicalAddress,
    },

    #[error("cannot map {virt} → {phys}")]
    MappingRejected {
        virt: VirtualAddress,
        phys: PhysicalAddress,
    },

    #[error("{operation} is not supported by this platform")]
    Unsupported { operation: &'static str },
}
