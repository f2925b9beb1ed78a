//! # Interrupt Numbering
//!
//! Linear interrupt numbers as seen by the interrupt controller driver: the
//! first 16 numbers are reserved for the CPU, then the 32 main sources follow,
//! then the external interrupts EINT4..23 that are demultiplexed from the
//! `EINT4t7`/`EINT8t23` main sources.

/// An interrupt line number.
pub type IrqNumber = u32;

/// First main-controller interrupt.
pub const CPU_IRQ_OFFSET: IrqNumber = 16;

/// Main interrupt source `n`.
#[must_use]
pub const fn main(n: u32) -> IrqNumber {
    CPU_IRQ_OFFSET + n
}

pub const IRQ_TICK: IrqNumber = main(8);
pub const IRQ_WDT: IrqNumber = main(9);
pub const IRQ_LCD: IrqNumber = main(16);
pub const IRQ_USBH: IrqNumber = main(26);
pub const IRQ_IIC: IrqNumber = main(27);
pub const IRQ_RTC: IrqNumber = main(30);

/// External interrupt `n` (only valid for 4..=23).
#[must_use]
pub const fn eint(n: u32) -> IrqNumber {
    assert!(n >= 4 && n <= 23, "EINT0..3 are main sources");
    main(32) + (n - 4)
}

pub const IRQ_EINT7: IrqNumber = eint(7);

const _: () = {
    assert!(IRQ_TICK == 24);
    assert!(IRQ_RTC == 46);
    assert!(IRQ_EINT7 == 51);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_lines_are_distinct() {
        let mut lines = [
            IRQ_TICK, IRQ_WDT, IRQ_LCD, IRQ_USBH, IRQ_IIC, IRQ_RTC, IRQ_EINT7,
        ];
        lines.sort_unstable();
        assert!(lines.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn external_lines_follow_the_main_sources() {
        assert_eq!(eint(4), main(32));
        assert_eq!(eint(23) - eint(4), 19);
        assert_eq!(IRQ_EINT7, 51);
    }
}
