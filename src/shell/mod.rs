//! Operator Command Layer
//!
//! Line-oriented `mdio_*` commands for poking PHY registers from a serial
//! console. The transport (USB CDC, UART, RTT) is the caller's business:
//! feed one line to [`Shell::execute`] and forward whatever it writes.
//!
//! | Command                    | Action                                         |
//! |----------------------------|------------------------------------------------|
//! | `mdio_port <n>`            | select channel                                 |
//! | `mdio_phy <n>`             | select device address                          |
//! | `mdio_r <reg>`             | extended read on the selected device           |
//! | `mdio_w <reg> <value>`     | extended write on the selected device          |
//! | `mdio_dump`                | read basic registers 0-31                      |
//! | `mdio_scan`                | read PHYIDR1 of every device on every channel  |
//!
//! Numbers accept `123`, `0x7B`, `x7b` or `h7B` style hex and `0b1111011`
//! style binary. The radix marker is a prefix: a trailing `h` keeps the
//! decimal value read so far. See [`parse_number`].
//!
//! # Example
//!
//! ```ignore
//! let shell = Shell::new(&CHANNELS);
//! let mut session = Session::default();
//!
//! shell.execute(&mut session, "mdio_phy 1", &mut uart)?;
//! shell.execute(&mut session, "mdio_r 0x1834", &mut uart)?;
//! // reg_1834(6196)= C001 (49153)
//! ```

use core::fmt::{self, Write};

use crate::hal::mdio::{MdioBus, phy_reg};
use crate::hal::mmd::RegisterId;
use crate::internal::constants::{MAX_PHY_ADDR, MAX_REG_ADDR};
use crate::sync::MdioChannels;

/// Most arguments any command takes
const MAX_ARGS: usize = 2;

// =============================================================================
// Session
// =============================================================================

/// Selection state for one console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session {
    /// Selected channel index
    pub channel: usize,
    /// Selected device address
    pub phy_addr: u8,
}

// =============================================================================
// Number Parsing
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum Radix {
    Decimal,
    Hex,
    Binary,
}

/// Parse a console number
///
/// Decimal digits accumulate. `x`, `X`, `h` or `H` switches to hex and `b`
/// or `B` to binary, continuing from the value parsed so far. Decimal mode
/// skips any other character; hex and binary mode stop at the first one
/// they do not recognize. A space ends the number in every mode.
///
/// ```ignore
/// assert_eq!(parse_number("42"), 42);
/// assert_eq!(parse_number("0x1834"), 0x1834);
/// assert_eq!(parse_number("0b101"), 5);
/// assert_eq!(parse_number("12h"), 12);
/// ```
pub fn parse_number(text: &str) -> u32 {
    let mut value: u32 = 0;
    let mut radix = Radix::Decimal;

    for c in text.chars() {
        if c == ' ' {
            break;
        }
        match radix {
            Radix::Decimal => match c {
                '0'..='9' => {
                    value = value.wrapping_mul(10).wrapping_add(c as u32 - '0' as u32);
                }
                'x' | 'X' | 'h' | 'H' => radix = Radix::Hex,
                'b' | 'B' => radix = Radix::Binary,
                _ => {}
            },
            Radix::Hex => match c.to_digit(16) {
                Some(digit) => value = (value << 4) | digit,
                None => break,
            },
            Radix::Binary => match c {
                '0' | '1' => value = (value << 1) | (c == '1') as u32,
                _ => break,
            },
        }
    }
    value
}

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Port,
    Phy,
    Read,
    Write,
    Dump,
    Scan,
}

impl Command {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "mdio_port" => Some(Self::Port),
            "mdio_phy" => Some(Self::Phy),
            "mdio_r" => Some(Self::Read),
            "mdio_w" => Some(Self::Write),
            "mdio_dump" => Some(Self::Dump),
            "mdio_scan" => Some(Self::Scan),
            _ => None,
        }
    }

    const fn argc(self) -> usize {
        match self {
            Self::Port | Self::Phy | Self::Read => 1,
            Self::Write => 2,
            Self::Dump | Self::Scan => 0,
        }
    }

    const fn usage(self) -> &'static str {
        match self {
            Self::Port => "usage: mdio_port <port number>   : select MDIO port",
            Self::Phy => "usage: mdio_phy <phy number>   : select PHY address",
            Self::Read => "usage: mdio_r <register>    : read register",
            Self::Write => "usage: mdio_w <register> <value>    : write register",
            Self::Dump => "usage: mdio_dump    : read all 32 registers from a single PHY",
            Self::Scan => "usage: mdio_scan    : read the ID register of every PHY",
        }
    }
}

/// Register identifier from a console argument, `None` when out of range
fn register_id(text: &str) -> Option<u16> {
    let reg = u16::try_from(parse_number(text)).ok()?;
    RegisterId::classify(reg).ok().map(|_| reg)
}

/// Command interpreter over a channel table
pub struct Shell<'a, B, const N: usize> {
    channels: &'a MdioChannels<B, N>,
}

impl<'a, B: MdioBus, const N: usize> Shell<'a, B, N> {
    /// Create an interpreter for `channels`
    pub const fn new(channels: &'a MdioChannels<B, N>) -> Self {
        Self { channels }
    }

    /// Execute one command line
    ///
    /// Empty lines are ignored. Only errors from `out` are returned; bus
    /// errors are reported on `out`.
    pub fn execute<W: Write>(&self, session: &mut Session, line: &str, out: &mut W) -> fmt::Result {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(());
        };
        let Some(command) = Command::from_name(name) else {
            return write!(out, "unknown command: {name}\r\n");
        };

        let mut args = [""; MAX_ARGS];
        let mut argc = 0;
        for word in words {
            if let Some(slot) = args.get_mut(argc) {
                *slot = word;
            }
            argc += 1;
        }
        if argc != command.argc() {
            return write!(out, "{}\r\n", command.usage());
        }

        match command {
            Command::Port => self.select_port(session, args[0], out),
            Command::Phy => select_phy(session, args[0], out),
            Command::Read => self.read_register(session, args[0], out),
            Command::Write => self.write_register(session, args[0], args[1], out),
            Command::Dump => self.dump(session, out),
            Command::Scan => self.scan(out),
        }
    }

    fn select_port<W: Write>(&self, session: &mut Session, arg: &str, out: &mut W) -> fmt::Result {
        let port = parse_number(arg) as usize;
        if port >= N {
            session.channel = 0;
            return write!(out, "invalid MDIO port (>{})\r\n", N.saturating_sub(1));
        }
        session.channel = port;
        write!(out, "selected MDIO port {port}\r\n")
    }

    fn read_register<W: Write>(&self, session: &Session, arg: &str, out: &mut W) -> fmt::Result {
        let Some(reg) = register_id(arg) else {
            return write!(out, "invalid reg ID\r\n");
        };
        match self
            .channels
            .read_extended(session.channel, session.phy_addr, reg)
        {
            Ok(value) => write!(out, "reg_{reg:X}({reg})= {value:04X} ({value})\r\n"),
            Err(e) => write!(out, "error: {e}\r\n"),
        }
    }

    fn write_register<W: Write>(
        &self,
        session: &Session,
        reg: &str,
        value: &str,
        out: &mut W,
    ) -> fmt::Result {
        let Some(reg) = register_id(reg) else {
            return write!(out, "invalid reg ID\r\n");
        };
        let value = parse_number(value) as u16;
        match self
            .channels
            .write_extended(session.channel, session.phy_addr, reg, value)
        {
            Ok(()) => write!(out, "reg_{reg:X}({reg}) written\r\n"),
            Err(e) => write!(out, "error: {e}\r\n"),
        }
    }

    fn dump<W: Write>(&self, session: &Session, out: &mut W) -> fmt::Result {
        for reg in 0..=MAX_REG_ADDR {
            match self.channels.read(session.channel, session.phy_addr, reg) {
                Ok(value) => write!(out, "reg_{reg:X}({reg})= {value:04X} ({value})\r\n")?,
                Err(e) => return write!(out, "error: {e}\r\n"),
            }
        }
        Ok(())
    }

    fn scan<W: Write>(&self, out: &mut W) -> fmt::Result {
        for port in 0..N {
            write!(out, "port {port}:\r\n")?;
            for phy_addr in 0..=MAX_PHY_ADDR {
                match self.channels.read(port, phy_addr, phy_reg::PHYIDR1) {
                    Ok(id) => write!(out, "PHY {phy_addr}: reg_2= {id:04X} ({id})\r\n")?,
                    Err(e) => {
                        write!(out, "error: {e}\r\n")?;
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

fn select_phy<W: Write>(session: &mut Session, arg: &str, out: &mut W) -> fmt::Result {
    let phy_addr = parse_number(arg);
    if phy_addr > MAX_PHY_ADDR as u32 {
        session.phy_addr = 0;
        return write!(out, "invalid PHY ID (>{MAX_PHY_ADDR})\r\n");
    }
    session.phy_addr = phy_addr as u8;
    write!(out, "selected PHY ID {phy_addr}\r\n")
}

// =============================================================================
// Unit Tests
// =============================================================================
