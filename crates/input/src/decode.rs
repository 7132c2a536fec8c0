//! Raw byte decoder for remote terminals.
//!
//! Remote clients send raw terminal bytes: printable characters, control
//! bytes, ANSI escape sequences for the arrow keys and, for telnet clients,
//! option negotiation. [`ByteDecoder`] turns that stream into
//! [`InputEvent`]s. It keeps state across reads, so a sequence split over two
//! packets still decodes.
//!
//! An ESC at the end of a read stays pending: it may be the first byte of an
//! arrow sequence whose tail is still in flight. The caller decides when it
//! has waited long enough and calls [`ByteDecoder::flush_pending`] to turn it
//! into [`Key::Esc`].
//!
//! The decoder also picks up the client's TERMINAL-TYPE reply (RFC 1091).

use arrayvec::ArrayVec;

use crate::types::{InputEvent, Key};

pub const IAC: u8 = 255;
pub const DONT: u8 = 254;
pub const DO: u8 = 253;
pub const WONT: u8 = 252;
pub const WILL: u8 = 251;
pub const SB: u8 = 250;
pub const SE: u8 = 240;
pub const OPT_ECHO: u8 = 1;
pub const OPT_SGA: u8 = 3;
pub const OPT_TTYPE: u8 = 24;
pub const OPT_NAWS: u8 = 31;
pub const TTYPE_IS: u8 = 0;
pub const TTYPE_SEND: u8 = 1;

/// Sent on connect: server echoes (so the client doesn't), suppress go-ahead
/// (character-at-a-time input), ask the client to report its window size and
/// its terminal type.
///
/// The TERMINAL-TYPE SEND goes out right behind the DO. Clients handle the
/// bytes in order, so it arrives after they have agreed to the option; the
/// ones that refuse it ignore the subnegotiation.
pub const TELNET_HANDSHAKE: [u8; 18] = [
    IAC, WILL, OPT_ECHO, IAC, WILL, OPT_SGA, IAC, DO, OPT_NAWS, IAC, DO, OPT_TTYPE, IAC, SB,
    OPT_TTYPE, TTYPE_SEND, IAC, SE,
];

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    /// Saw ESC.
    Escape,
    /// Inside `ESC [` or `ESC O`, waiting for the final byte.
    Csi,
    /// Saw `\r`; a following `\n` or NUL belongs to the same Enter.
    CarriageReturn,
    /// Saw IAC.
    Iac,
    /// Saw IAC WILL/WONT/DO/DONT; the next byte is the option.
    IacOption(u8),
    /// Inside IAC SB ... IAC SE.
    Subneg,
    /// Saw IAC inside a subnegotiation.
    SubnegIac,
}

/// What the client said about TERMINAL-TYPE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermTypeReply {
    Pending,
    Refused,
    Reported(String),
}

#[derive(Debug, Clone)]
pub struct ByteDecoder {
    state: State,
    subneg: ArrayVec<u8, 64>,
    term_type: TermTypeReply,
}

impl ByteDecoder {
    pub fn new() -> Self {
        Self {
            state: State::Ground,
            subneg: ArrayVec::new(),
            term_type: TermTypeReply::Pending,
        }
    }

    /// Decode one read's worth of bytes, appending events to `out`.
    pub fn feed(&mut self, bytes: &[u8], out: &mut Vec<InputEvent>) {
        for &b in bytes {
            self.step(b, out);
        }
    }

    /// True while an ESC is waiting for the rest of a possible sequence.
    pub fn has_pending(&self) -> bool {
        self.state == State::Escape
    }

    /// Give up waiting and report a pending ESC as the Esc key.
    pub fn flush_pending(&mut self, out: &mut Vec<InputEvent>) {
        if self.state == State::Escape {
            out.push(InputEvent::Key(Key::Esc));
            self.state = State::Ground;
        }
    }

    pub fn term_type(&self) -> &TermTypeReply {
        &self.term_type
    }

    fn step(&mut self, b: u8, out: &mut Vec<InputEvent>) {
        match self.state {
            State::Ground => self.ground(b, out),
            State::CarriageReturn => {
                self.state = State::Ground;
                if b != b'\n' && b != 0 {
                    self.ground(b, out);
                }
            }
            State::Escape => match b {
                b'[' | b'O' => self.state = State::Csi,
                ESC => out.push(InputEvent::Key(Key::Esc)),
                _ => {
                    out.push(InputEvent::Key(Key::Esc));
                    self.state = State::Ground;
                    self.ground(b, out);
                }
            },
            State::Csi => match b {
                // Parameter and intermediate bytes.
                0x20..=0x3f => {}
                0x40..=0x7e => {
                    self.state = State::Ground;
                    let key = match b {
                        b'A' => Some(Key::Up),
                        b'B' => Some(Key::Down),
                        b'C' => Some(Key::Right),
                        b'D' => Some(Key::Left),
                        _ => None,
                    };
                    if let Some(k) = key {
                        out.push(InputEvent::Key(k));
                    }
                }
                _ => self.state = State::Ground,
            },
            State::Iac => match b {
                SB => {
                    self.subneg.clear();
                    self.state = State::Subneg;
                }
                WILL | WONT | DO | DONT => self.state = State::IacOption(b),
                // IAC IAC is a literal 0xff, which is not a key we bind.
                _ => self.state = State::Ground,
            },
            State::IacOption(verb) => {
                self.state = State::Ground;
                if b == OPT_TTYPE && verb == WONT && self.term_type == TermTypeReply::Pending {
                    self.term_type = TermTypeReply::Refused;
                }
            }
            State::Subneg => {
                if b == IAC {
                    self.state = State::SubnegIac;
                } else {
                    let _ = self.subneg.try_push(b);
                }
            }
            State::SubnegIac => match b {
                SE => {
                    self.state = State::Ground;
                    if let Some(ev) = self.finish_subneg() {
                        out.push(ev);
                    }
                    self.subneg.clear();
                }
                IAC => {
                    let _ = self.subneg.try_push(IAC);
                    self.state = State::Subneg;
                }
                _ => self.state = State::Ground,
            },
        }
    }

    fn ground(&mut self, b: u8, out: &mut Vec<InputEvent>) {
        match b {
            ESC => self.state = State::Escape,
            IAC => self.state = State::Iac,
            b'\r' => {
                out.push(InputEvent::Key(Key::Enter));
                self.state = State::CarriageReturn;
            }
            b'\n' => out.push(InputEvent::Key(Key::Enter)),
            CTRL_C => out.push(InputEvent::Key(Key::Interrupt)),
            0x20..=0x7e => out.push(InputEvent::Key(Key::Char(b as char))),
            _ => {}
        }
    }

    fn finish_subneg(&mut self) -> Option<InputEvent> {
        match self.subneg.as_slice() {
            [OPT_TTYPE, TTYPE_IS, name @ ..] => {
                let name = String::from_utf8_lossy(name).trim().to_string();
                if !name.is_empty() {
                    self.term_type = TermTypeReply::Reported(name);
                }
                None
            }
            [OPT_NAWS, w1, w0, h1, h0, ..] => {
                let width = u16::from_be_bytes([*w1, *w0]);
                let height = u16::from_be_bytes([*h1, *h0]);
                if width == 0 || height == 0 {
                    return None;
                }
                Some(InputEvent::Resize { width, height })
            }
            _ => None,
        }
    }
}

impl Default for ByteDecoder {
    fn default() -> Self {
        Self::new()
    }
}
