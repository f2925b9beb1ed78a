//! # Resource Claims
//!
//! Every device descriptor lists the hardware it occupies: memory-mapped
//! register windows and interrupt lines. Claims are declarations, not
//! allocations; the boot orchestrator does the actual binding. What this
//! module provides are the two consistency checks that must hold before the
//! list is handed over:
//!
//! * [`check_device_claims`]: a single device does not claim the same memory
//!   twice or the same interrupt line twice.
//! * [`check_conflicts`]: across devices, non-shared memory claims are
//!   disjoint, and devices sharing an interrupt line agree on its trigger.
//!
//! Both checks sort the claims and sweep them once, i.e. `O(n log n)`.
//!
//! Memory claims are inclusive on both ends, the way register windows are
//! written in SoC manuals (`0x4900_0000..=0x490F_FFFF`).

use crate::device::DeviceDescriptor;
use crate::error::ConfigError;
use alloc::vec::Vec;
use board_info::irq::IrqNumber;
use board_memory_addresses::PhysicalAddress;
use core::fmt;
use log::error;

/// Interrupt trigger mode as requested by a device.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Trigger {
    /// Whatever the interrupt controller is configured for.
    Default,
    RisingEdge,
    FallingEdge,
    BothEdges,
    HighLevel,
    LowLevel,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::RisingEdge => "rising edge",
            Self::FallingEdge => "falling edge",
            Self::BothEdges => "both edges",
            Self::HighLevel => "high level",
            Self::LowLevel => "low level",
        })
    }
}

/// A memory-mapped window `start..=end`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MemoryClaim {
    start: PhysicalAddress,
    end: PhysicalAddress,
    shared: bool,
}

impl MemoryClaim {
    /// A window covering `start..=end`.
    #[must_use]
    pub const fn new(start: PhysicalAddress, end: PhysicalAddress) -> Self {
        Self {
            start,
            end,
            shared: false,
        }
    }

    /// A window of `len` bytes starting at `start`.
    ///
    /// # Panics
    /// In `const` context, if `len` is zero or the window wraps.
    #[must_use]
    pub const fn sized(start: PhysicalAddress, len: u32) -> Self {
        match start.last_of(len) {
            Some(end) => Self::new(start, end),
            None => panic!("memory claim must be non-empty and fit the address space"),
        }
    }

    /// Mark the window as deliberately shared with other devices.
    #[must_use]
    pub const fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    #[must_use]
    pub const fn start(&self) -> PhysicalAddress {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> PhysicalAddress {
        self.end
    }

    #[must_use]
    pub const fn is_shared(&self) -> bool {
        self.shared
    }

    /// Size in bytes; `u64` so a claim covering the whole bus still fits.
    #[must_use]
    pub const fn len(&self) -> u64 {
        if self.end.as_u32() < self.start.as_u32() {
            return 0;
        }
        (self.end.as_u32() - self.start.as_u32()) as u64 + 1
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// An interrupt line and the trigger mode the device needs on it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InterruptClaim {
    line: IrqNumber,
    trigger: Trigger,
}

impl InterruptClaim {
    #[must_use]
    pub const fn new(line: IrqNumber, trigger: Trigger) -> Self {
        Self { line, trigger }
    }

    #[must_use]
    pub const fn line(&self) -> IrqNumber {
        self.line
    }

    #[must_use]
    pub const fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// Two claims on the same line can coexist only with identical triggers.
    #[must_use]
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.line != other.line || self.trigger == other.trigger
    }
}

/// One hardware resource a device occupies.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ResourceClaim {
    Memory(MemoryClaim),
    Interrupt(InterruptClaim),
}

impl ResourceClaim {
    /// Non-shared register window of `len` bytes at `start`.
    #[must_use]
    pub const fn mem(start: PhysicalAddress, len: u32) -> Self {
        Self::Memory(MemoryClaim::sized(start, len))
    }

    /// Interrupt line with the controller's default trigger.
    #[must_use]
    pub const fn irq(line: IrqNumber) -> Self {
        Self::Interrupt(InterruptClaim::new(line, Trigger::Default))
    }

    #[must_use]
    pub const fn irq_with(line: IrqNumber, trigger: Trigger) -> Self {
        Self::Interrupt(InterruptClaim::new(line, trigger))
    }

    #[must_use]
    pub const fn as_memory(&self) -> Option<&MemoryClaim> {
        match self {
            Self::Memory(m) => Some(m),
            Self::Interrupt(_) => None,
        }
    }

    #[must_use]
    pub const fn as_interrupt(&self) -> Option<&InterruptClaim> {
        match self {
            Self::Interrupt(i) => Some(i),
            Self::Memory(_) => None,
        }
    }
}

/// Check the claims of a single device against each other.
///
/// # Errors
/// * [`ConfigError::InvalidMemoryClaim`] for a window whose end precedes its start
/// * [`ConfigError::SelfOverlappingMemory`] for two overlapping windows
/// * [`ConfigError::DuplicateInterruptLine`] for a line listed twice
pub fn check_device_claims(device: &DeviceDescriptor<'_>) -> Result<(), ConfigError> {
    let name = device.name();

    let mut memory: Vec<&MemoryClaim> = device
        .resources()
        .iter()
        .filter_map(ResourceClaim::as_memory)
        .collect();
    if let Some(bad) = memory.iter().find(|m| m.is_empty()) {
        return Err(log_err(ConfigError::InvalidMemoryClaim {
            device: name,
            start: bad.start,
            end: bad.end,
        }));
    }
    memory.sort_unstable_by_key(|m| (m.start, m.end));
    for pair in memory.windows(2) {
        if pair[0].overlaps(pair[1]) {
            return Err(log_err(ConfigError::SelfOverlappingMemory {
                device: name,
                start: pair[1].start,
                end: pair[0].end.min(pair[1].end),
            }));
        }
    }

    let mut lines: Vec<IrqNumber> = device
        .resources()
        .iter()
        .filter_map(ResourceClaim::as_interrupt)
        .map(InterruptClaim::line)
        .collect();
    lines.sort_unstable();
    if let Some(pair) = lines.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(log_err(ConfigError::DuplicateInterruptLine {
            device: name,
            line: pair[0],
        }));
    }

    Ok(())
}

/// Check all devices of a board against each other.
///
/// Each device is first checked on its own with [`check_device_claims`].
///
/// # Errors
/// * [`ConfigError::MemoryConflict`] naming both devices and the overlapping
///   range, when two devices claim intersecting memory and at least one of
///   the claims is not shared
/// * [`ConfigError::InterruptConflict`] naming both devices and the line, when
///   two devices claim the same line with different triggers
pub fn check_conflicts(devices: &[DeviceDescriptor<'_>]) -> Result<(), ConfigError> {
    for device in devices {
        check_device_claims(device)?;
    }
    check_memory(devices)?;
    check_interrupts(devices)
}

fn check_memory(devices: &[DeviceDescriptor<'_>]) -> Result<(), ConfigError> {
    let mut claims: Vec<(&'static str, &MemoryClaim)> = devices
        .iter()
        .flat_map(|d| {
            d.resources()
                .iter()
                .filter_map(ResourceClaim::as_memory)
                .map(move |m| (d.name(), m))
        })
        .collect();
    claims.sort_by_key(|(_, m)| (m.start, m.end));

    // Furthest-reaching claim seen so far, of any kind and among the
    // exclusive ones. An exclusive claim must clear the former, a shared one
    // only the latter.
    let mut reach_any: Option<(&'static str, PhysicalAddress)> = None;
    let mut reach_exclusive: Option<(&'static str, PhysicalAddress)> = None;

    for &(name, claim) in &claims {
        let blocking = if claim.shared {
            reach_exclusive
        } else {
            reach_any
        };
        if let Some((owner, reach)) = blocking
            && claim.start <= reach
        {
            return Err(log_err(ConfigError::MemoryConflict {
                first: owner,
                second: name,
                start: claim.start,
                end: reach.min(claim.end),
            }));
        }

        if reach_any.is_none_or(|(_, r)| claim.end > r) {
            reach_any = Some((name, claim.end));
        }
        if !claim.shared && reach_exclusive.is_none_or(|(_, r)| claim.end > r) {
            reach_exclusive = Some((name, claim.end));
        }
    }

    Ok(())
}

fn check_interrupts(devices: &[DeviceDescriptor<'_>]) -> Result<(), ConfigError> {
    let mut claims: Vec<(&'static str, &InterruptClaim)> = devices
        .iter()
        .flat_map(|d| {
            d.resources()
                .iter()
                .filter_map(ResourceClaim::as_interrupt)
                .map(move |i| (d.name(), i))
        })
        .collect();
    // Stable, so within a line the first registered device is reported first.
    claims.sort_by_key(|(_, i)| i.line);

    for run in claims.chunk_by(|a, b| a.1.line == b.1.line) {
        let (first, head) = run[0];
        if let Some(&(second, other)) = run.iter().find(|(_, c)| !c.is_compatible_with(head)) {
            return Err(log_err(ConfigError::InterruptConflict {
                first,
                second,
                line: head.line,
                first_trigger: head.trigger,
                second_trigger: other.trigger,
            }));
        }
    }

    Ok(())
}

fn log_err(err: ConfigError) -> ConfigError {
    error!("{err}");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::InstanceId;

    const fn pa(v: u32) -> PhysicalAddress {
        PhysicalAddress::new(v)
    }

    fn device<'a>(name: &'static str, resources: &'a [ResourceClaim]) -> DeviceDescriptor<'a> {
        DeviceDescriptor::new(name, InstanceId::Single, resources)
    }

    #[test]
    fn sized_claim_is_inclusive() {
        let claim = MemoryClaim::sized(pa(0x2000_0000), 4);
        assert_eq!(claim.end(), pa(0x2000_0003));
        assert_eq!(claim.len(), 4);
    }

    #[test]
    fn same_line_different_trigger_conflicts() {
        let a = [ResourceClaim::irq_with(7, Trigger::RisingEdge)];
        let b = [ResourceClaim::irq_with(7, Trigger::FallingEdge)];
        let devices = [device("a", &a), device("b", &b)];
        assert_eq!(
            check_conflicts(&devices),
            Err(ConfigError::InterruptConflict {
                first: "a",
                second: "b",
                line: 7,
                first_trigger: Trigger::RisingEdge,
                second_trigger: Trigger::FallingEdge,
            })
        );
    }

    #[test]
    fn same_line_same_trigger_is_shared() {
        let a = [ResourceClaim::irq_with(7, Trigger::RisingEdge)];
        let b = [ResourceClaim::irq_with(7, Trigger::RisingEdge)];
        assert!(check_conflicts(&[device("a", &a), device("b", &b)]).is_ok());
    }

    #[test]
    fn overlapping_memory_names_both_devices() {
        let a = [ResourceClaim::mem(pa(0x5400_0000), 0x1000)];
        let b = [ResourceClaim::mem(pa(0x5400_0800), 0x1000)];
        assert_eq!(
            check_conflicts(&[device("i2c", &a), device("other", &b)]),
            Err(ConfigError::MemoryConflict {
                first: "i2c",
                second: "other",
                start: pa(0x5400_0800),
                end: pa(0x5400_0FFF),
            })
        );
    }

    #[test]
    fn conflict_found_behind_a_short_claim() {
        // `b` ends before `c` starts, but `a` still reaches into `c`.
        let a = [ResourceClaim::Memory(MemoryClaim::sized(pa(0x1000), 0x1000).shared())];
        let b = [ResourceClaim::Memory(MemoryClaim::sized(pa(0x1100), 0x10).shared())];
        let c = [ResourceClaim::mem(pa(0x1800), 0x10)];
        let err = check_conflicts(&[device("a", &a), device("c", &c), device("b", &b)]);
        assert_eq!(
            err,
            Err(ConfigError::MemoryConflict {
                first: "a",
                second: "c",
                start: pa(0x1800),
                end: pa(0x180F),
            })
        );
    }

    #[test]
    fn adjacent_memory_is_fine() {
        let a = [ResourceClaim::mem(pa(0x2000_0000), 4)];
        let b = [ResourceClaim::mem(pa(0x2000_0004), 4)];
        assert!(check_conflicts(&[device("a", &a), device("b", &b)]).is_ok());
    }

    #[test]
    fn shared_claims_may_overlap_each_other_only() {
        let a = [ResourceClaim::Memory(MemoryClaim::sized(pa(0x1000), 0x100).shared())];
        let b = [ResourceClaim::Memory(MemoryClaim::sized(pa(0x1080), 0x100).shared())];
        let c = [ResourceClaim::mem(pa(0x1100), 0x10)];
        assert!(check_conflicts(&[device("a", &a), device("b", &b)]).is_ok());
        assert!(matches!(
            check_conflicts(&[device("a", &a), device("b", &b), device("c", &c)]),
            Err(ConfigError::MemoryConflict { second: "c", .. })
        ));
    }

    #[test]
    fn device_cannot_claim_a_line_twice() {
        let a = [ResourceClaim::irq(30), ResourceClaim::irq(30)];
        assert_eq!(
            check_device_claims(&device("rtc", &a)),
            Err(ConfigError::DuplicateInterruptLine {
                device: "rtc",
                line: 30
            })
        );
    }

    #[test]
    fn device_cannot_overlap_itself() {
        let a = [
            ResourceClaim::mem(pa(0x2000_0000), 8),
            ResourceClaim::mem(pa(0x2000_0004), 4),
        ];
        assert!(matches!(
            check_device_claims(&device("net", &a)),
            Err(ConfigError::SelfOverlappingMemory { device: "net", .. })
        ));
    }

    #[test]
    fn inverted_claim_is_rejected() {
        let a = [ResourceClaim::Memory(MemoryClaim::new(pa(0x10), pa(0x0)))];
        assert!(matches!(
            check_device_claims(&device("bad", &a)),
            Err(ConfigError::InvalidMemoryClaim { device: "bad", .. })
        ));
    }
}
