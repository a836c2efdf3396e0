//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the MDIO driver
//! on the host without hardware access.
//!
//! - [`MockMdioBus`]: register-level bus, logs every basic transaction
//! - [`MockPins`]: wire-level PHY, decodes Clause 22 frames from MDC edges
//! - [`MockDelay`]: accumulates requested delays
//! - [`MockLed`], [`MockButton`]: digital pins for the status indicator
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use core::convert::Infallible;
use std::collections::{HashMap, VecDeque};
use std::vec::Vec;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::error::Result;
use crate::hal::mdio::{MdioBus, mmd_ctrl, phy_reg};
use crate::hal::pins::{Direction, MdioPins};
use crate::internal::constants::PREAMBLE_BITS;

// =============================================================================
// PHY Register Model
// =============================================================================

/// Register contents of one simulated PHY
///
/// Models the MMD access window: `MMD_CTRL` selects a device and a
/// function, `MMD_DATA` then reads/writes either the device's address
/// pointer or the addressed register.
#[derive(Debug, Default, Clone)]
pub struct RegisterFile {
    basic: HashMap<u8, u16>,
    mmd: HashMap<(u16, u16), u16>,
    mmd_addr: HashMap<u16, u16>,
}

impl RegisterFile {
    pub fn get(&self, reg: u8) -> Option<u16> {
        self.basic.get(&reg).copied()
    }

    pub fn set(&mut self, reg: u8, value: u16) {
        self.basic.insert(reg, value);
    }

    pub fn get_mmd(&self, devad: u16, addr: u16) -> Option<u16> {
        self.mmd.get(&(devad, addr)).copied()
    }

    pub fn set_mmd(&mut self, devad: u16, addr: u16, value: u16) {
        self.mmd.insert((devad, addr), value);
    }

    fn window(&self) -> (u16, bool) {
        let ctrl = self.get(phy_reg::MMD_CTRL).unwrap_or(0);
        let data_mode = ctrl & mmd_ctrl::FUNC_MASK != mmd_ctrl::FUNC_ADDRESS;
        (ctrl & mmd_ctrl::DEVAD_MASK, data_mode)
    }

    /// Register read as the PHY would answer it
    pub fn read(&self, reg: u8) -> u16 {
        if reg != phy_reg::MMD_DATA {
            return self.get(reg).unwrap_or(0);
        }
        let (devad, data_mode) = self.window();
        let addr = self.mmd_addr.get(&devad).copied().unwrap_or(0);
        if data_mode {
            self.get_mmd(devad, addr).unwrap_or(0)
        } else {
            addr
        }
    }

    /// Register write as the PHY would apply it
    pub fn write(&mut self, reg: u8, value: u16) {
        if reg != phy_reg::MMD_DATA {
            self.set(reg, value);
            return;
        }
        let (devad, data_mode) = self.window();
        if data_mode {
            let addr = self.mmd_addr.get(&devad).copied().unwrap_or(0);
            self.set_mmd(devad, addr, value);
        } else {
            self.mmd_addr.insert(devad, value);
        }
    }
}

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// One basic transaction seen by [`MockMdioBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MdioOp {
    Read { phy: u8, reg: u8 },
    Write { phy: u8, reg: u8, value: u16 },
}

/// Mock MDIO bus for testing register-level consumers without hardware
///
/// # Example
///
/// ```ignore
/// let mut mdio = MockMdioBus::new();
/// mdio.set_register(0, 0x01, 0x0065); // BMSR with link up
///
/// assert!(is_link_up(&mut mdio, 0).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MockMdioBus {
    /// Register files by PHY address
    phys: RefCell<HashMap<u8, RegisterFile>>,
    /// Record of every basic transaction
    log: RefCell<Vec<MdioOp>>,
}

impl MockMdioBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a basic register value without logging a transaction
    pub fn set_register(&self, phy_addr: u8, reg_addr: u8, value: u16) {
        self.phys
            .borrow_mut()
            .entry(phy_addr)
            .or_default()
            .set(reg_addr, value);
    }

    /// Set an MMD register value without logging a transaction
    pub fn set_mmd_register(&self, phy_addr: u8, devad: u16, addr: u16, value: u16) {
        self.phys
            .borrow_mut()
            .entry(phy_addr)
            .or_default()
            .set_mmd(devad, addr, value);
    }

    /// Get the current value of an MMD register
    pub fn get_mmd_register(&self, phy_addr: u8, devad: u16, addr: u16) -> Option<u16> {
        self.phys.borrow().get(&phy_addr)?.get_mmd(devad, addr)
    }

    /// All transactions in order
    pub fn transactions(&self) -> Vec<MdioOp> {
        self.log.borrow().clone()
    }

    /// Only the writes, as `(phy, reg, value)`
    pub fn writes(&self) -> Vec<(u8, u8, u16)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|op| match *op {
                MdioOp::Write { phy, reg, value } => Some((phy, reg, value)),
                MdioOp::Read { .. } => None,
            })
            .collect()
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        self.log.borrow_mut().push(MdioOp::Read {
            phy: phy_addr,
            reg: reg_addr,
        });
        Ok(self
            .phys
            .borrow_mut()
            .entry(phy_addr)
            .or_default()
            .read(reg_addr))
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        self.log.borrow_mut().push(MdioOp::Write {
            phy: phy_addr,
            reg: reg_addr,
            value,
        });
        self.phys
            .borrow_mut()
            .entry(phy_addr)
            .or_default()
            .write(reg_addr, value);
        Ok(())
    }
}

// =============================================================================
// Mock Pins (wire-level PHY)
// =============================================================================

/// One bit as seen on the wire at an MDC rising edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireBit {
    /// Line level during the clock-high phase
    pub level: bool,
    /// Whether the host was driving the line
    pub host_driven: bool,
}

/// Frame decoder state of the simulated PHY
#[derive(Debug, Clone, Copy)]
enum Phase {
    Preamble { ones: u32 },
    Header { shift: u16, count: u8 },
    ReadTurnaround { value: Option<u16>, cycle: u8 },
    ReadData { value: Option<u16>, index: u8 },
    WriteTurnaround { phy: u8, reg: u8, cycle: u8 },
    WriteData { phy: u8, reg: u8, shift: u16, count: u8 },
}

/// Wire-level mock of the two MDIO lines with an optional PHY attached
///
/// The PHY samples the line on each MDC rising edge and drives it during
/// the turnaround and data phases of read frames addressed to it. A
/// released line with nothing driving it reads high (pull-up).
#[derive(Debug)]
pub struct MockPins {
    phy_addr: Option<u8>,
    registers: RegisterFile,
    mdc: bool,
    direction: Direction,
    host_level: bool,
    line: bool,
    phase: Phase,
    wire: Vec<WireBit>,
    direction_changes: u32,
    frames: u32,
}

impl Default for MockPins {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPins {
    /// Lines with no PHY attached
    pub fn new() -> Self {
        Self {
            phy_addr: None,
            registers: RegisterFile::default(),
            mdc: false,
            direction: Direction::Output,
            host_level: true,
            line: true,
            phase: Phase::Preamble { ones: 0 },
            wire: Vec::new(),
            direction_changes: 0,
            frames: 0,
        }
    }

    /// Lines with a PHY answering at `phy_addr`
    pub fn with_phy(phy_addr: u8) -> Self {
        Self {
            phy_addr: Some(phy_addr),
            ..Self::new()
        }
    }

    pub fn set_register(&mut self, reg: u8, value: u16) {
        self.registers.set(reg, value);
    }

    pub fn wire_bits(&self) -> Vec<WireBit> {
        self.wire.clone()
    }

    pub fn direction_changes(&self) -> u32 {
        self.direction_changes
    }

    /// Completed frames decoded by the PHY (any address)
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn mdc_is_low(&self) -> bool {
        !self.mdc
    }

    fn addressed(&self, phy: u8) -> bool {
        self.phy_addr == Some(phy)
    }

    /// Level the PHY drives in the current cycle
    fn device_output(&self) -> Option<bool> {
        match self.phase {
            Phase::ReadTurnaround {
                value: Some(_),
                cycle: 1,
            } => Some(false),
            Phase::ReadData {
                value: Some(value),
                index,
            } => Some((value >> (15 - index)) & 1 != 0),
            _ => None,
        }
    }

    fn rising_edge(&mut self) {
        let host_driven = self.direction == Direction::Output;
        self.line = if host_driven {
            self.host_level
        } else {
            self.device_output().unwrap_or(true)
        };
        self.wire.push(WireBit {
            level: self.line,
            host_driven,
        });
        self.phase = self.next_phase(self.line);
    }

    fn next_phase(&mut self, bit: bool) -> Phase {
        match self.phase {
            Phase::Preamble { ones } if bit => Phase::Preamble { ones: ones + 1 },
            Phase::Preamble { ones } if ones >= PREAMBLE_BITS => Phase::Header { shift: 0, count: 1 },
            Phase::Preamble { .. } => Phase::Preamble { ones: 0 },
            Phase::Header { shift, count } => {
                let shift = (shift << 1) | bit as u16;
                if count + 1 < 14 {
                    return Phase::Header {
                        shift,
                        count: count + 1,
                    };
                }
                let start = (shift >> 12) & 0b11;
                let op = (shift >> 10) & 0b11;
                let phy = ((shift >> 5) & 0x1F) as u8;
                let reg = (shift & 0x1F) as u8;
                match (start, op) {
                    (0b01, 0b10) => Phase::ReadTurnaround {
                        value: self.addressed(phy).then(|| self.registers.read(reg)),
                        cycle: 0,
                    },
                    (0b01, 0b01) => Phase::WriteTurnaround { phy, reg, cycle: 0 },
                    _ => Phase::Preamble { ones: 0 },
                }
            }
            Phase::ReadTurnaround { value, cycle: 0 } => Phase::ReadTurnaround { value, cycle: 1 },
            Phase::ReadTurnaround { value, .. } => Phase::ReadData { value, index: 0 },
            Phase::ReadData { value, index } if index < 15 => Phase::ReadData {
                value,
                index: index + 1,
            },
            Phase::ReadData { .. } => {
                self.frames += 1;
                Phase::Preamble { ones: 0 }
            }
            Phase::WriteTurnaround { phy, reg, cycle: 0 } => {
                Phase::WriteTurnaround { phy, reg, cycle: 1 }
            }
            Phase::WriteTurnaround { phy, reg, .. } => Phase::WriteData {
                phy,
                reg,
                shift: 0,
                count: 0,
            },
            Phase::WriteData {
                phy,
                reg,
                shift,
                count,
            } => {
                let shift = (shift << 1) | bit as u16;
                if count < 15 {
                    return Phase::WriteData {
                        phy,
                        reg,
                        shift,
                        count: count + 1,
                    };
                }
                if self.addressed(phy) {
                    self.registers.write(reg, shift);
                }
                self.frames += 1;
                Phase::Preamble { ones: 0 }
            }
        }
    }
}

impl MdioPins for MockPins {
    fn set_mdc(&mut self, high: bool) -> Result<()> {
        if high && !self.mdc {
            self.mdc = true;
            self.rising_edge();
        }
        self.mdc = high;
        Ok(())
    }

    fn set_mdio_direction(&mut self, direction: Direction) -> Result<()> {
        self.direction = direction;
        self.direction_changes += 1;
        Ok(())
    }

    fn write_mdio(&mut self, high: bool) -> Result<()> {
        self.host_level = high;
        Ok(())
    }

    fn read_mdio(&mut self) -> Result<bool> {
        Ok(match self.direction {
            Direction::Output => self.host_level,
            Direction::Input => self.line,
        })
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u64 {
        self.total_ns() / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

// =============================================================================
// Mock Digital Pins
// =============================================================================

/// Output pin recording every level it is set to
#[derive(Debug, Default)]
pub struct MockLed {
    high: bool,
    history: Vec<bool>,
}

impl MockLed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.high
    }

    /// Number of low-to-high transitions
    pub fn rising_edges(&self) -> usize {
        let mut previous = false;
        let mut edges = 0;
        for &level in &self.history {
            if level && !previous {
                edges += 1;
            }
            previous = level;
        }
        edges
    }
}

impl ErrorType for MockLed {
    type Error = Infallible;
}

impl OutputPin for MockLed {
    fn set_low(&mut self) -> core::result::Result<(), Infallible> {
        self.high = false;
        self.history.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Infallible> {
        self.high = true;
        self.history.push(true);
        Ok(())
    }
}

/// Input pin replaying a scripted sequence of levels
///
/// Once the script runs out the pin stays at its idle level.
#[derive(Debug, Default)]
pub struct MockButton {
    script: VecDeque<bool>,
    idle: bool,
    reads: usize,
}

impl MockButton {
    /// Released button
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `reads` consecutive samples at `level`
    pub fn then(mut self, level: bool, reads: usize) -> Self {
        self.script.extend(core::iter::repeat_n(level, reads));
        self
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl ErrorType for MockButton {
    type Error = Infallible;
}

impl InputPin for MockButton {
    fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
        self.reads += 1;
        Ok(self.script.pop_front().unwrap_or(self.idle))
    }

    fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

// =============================================================================
// Self Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_file_mmd_window() {
        let mut regs = RegisterFile::default();
        regs.write(phy_reg::MMD_CTRL, 0x001F);
        regs.write(phy_reg::MMD_DATA, 0x0123);
        assert_eq!(regs.read(phy_reg::MMD_DATA), 0x0123);

        regs.write(phy_reg::MMD_CTRL, 0x401F);
        regs.write(phy_reg::MMD_DATA, 0xCAFE);
        assert_eq!(regs.get_mmd(0x1F, 0x0123), Some(0xCAFE));
        assert_eq!(regs.read(phy_reg::MMD_DATA), 0xCAFE);
    }

    #[test]
    fn mock_pins_idle_line_reads_high() {
        let mut pins = MockPins::new();
        pins.set_mdio_direction(Direction::Input).unwrap();
        pins.set_mdc(true).unwrap();
        assert!(pins.read_mdio().unwrap());
        assert_eq!(pins.frames(), 0);
    }

    #[test]
    fn mock_button_script() {
        let mut button = MockButton::new().then(true, 2);
        assert!(button.is_high().unwrap());
        assert!(button.is_high().unwrap());
        assert!(!button.is_high().unwrap());
        assert_eq!(button.reads(), 3);
    }
}
