use super::eci::CharacterSet;
use super::tables::{Action, Table};
use crate::error::FormatError;
use log::debug;

/// Group separator emitted for `FLG(0)`
const FNC1: char = '\u{1d}';

pub(crate) struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    pub(crate) fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.idx)
    }

    fn skip_to_end(&mut self) {
        self.idx = self.bits.len();
    }

    /// Next `n` bits MSB first, `None` if fewer remain
    pub(crate) fn read_bits(&mut self, n: usize) -> Option<u32> {
        if self.remaining() < n {
            return None;
        }
        let val = self.bits[self.idx..self.idx + n]
            .iter()
            .fold(0u32, |acc, &b| (acc << 1) | b as u32);
        self.idx += n;
        Some(val)
    }
}

/// Latch and shift table of the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ModeState {
    latch: Table,
    shift: Table,
}

impl ModeState {
    fn new() -> Self {
        Self {
            latch: Table::Upper,
            shift: Table::Upper,
        }
    }

    fn unshift(&mut self) {
        self.shift = self.latch;
    }
}

/// Text under construction: decoded text plus bytes waiting for a charset
struct Output {
    text: String,
    pending: Vec<u8>,
    charset: CharacterSet,
}

impl Output {
    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.text.push_str(&self.charset.decode(&self.pending));
            self.pending.clear();
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        self.text
    }
}

/// Decode a corrected, unstuffed bit stream into text.
///
/// Bytes accumulate until a `FLG` escape or the end of the stream and are
/// then decoded with the active character set, which starts as `charset`.
/// A stream that runs out in the middle of a field yields what was decoded
/// so far.
pub fn decode_high_level(bits: &[bool], charset: CharacterSet) -> Result<String, FormatError> {
    let mut reader = BitReader::new(bits);
    let mut mode = ModeState::new();
    let mut out = Output {
        text: String::new(),
        pending: Vec::new(),
        charset,
    };

    while reader.remaining() > 0 {
        if mode.shift == Table::Binary {
            let Some(mut length) = reader.read_bits(5) else {
                break;
            };
            if length == 0 {
                let Some(long) = reader.read_bits(11) else {
                    break;
                };
                length = long + 31;
            }
            for _ in 0..length {
                match reader.read_bits(8) {
                    Some(byte) => out.pending.push(byte as u8),
                    None => {
                        reader.skip_to_end();
                        break;
                    }
                }
            }
            mode.unshift();
            continue;
        }

        let Some(code) = reader.read_bits(mode.shift.code_bits()) else {
            break;
        };
        let Some(action) = mode.shift.action(code) else {
            break;
        };
        match action {
            Action::Literal(bytes) => {
                out.pending.extend_from_slice(bytes);
                mode.unshift();
            }
            Action::Latch(table) => {
                mode.latch = table;
                mode.shift = table;
            }
            Action::Shift(table) => mode.shift = table,
            Action::Flag => {
                let Some(n) = reader.read_bits(3) else {
                    break;
                };
                out.flush();
                match n {
                    0 => out.text.push(FNC1),
                    7 => {
                        debug!("AztecDecoder: FLG(7) is reserved");
                        return Err(FormatError::IllegalFlag);
                    }
                    _ => {
                        if reader.remaining() < 4 * n as usize {
                            mode.unshift();
                            continue;
                        }
                        let Some(charset) = read_eci(&mut reader, n)? else {
                            break;
                        };
                        out.charset = charset;
                    }
                }
                mode.unshift();
            }
        }
    }

    Ok(out.finish())
}

/// Read an ECI designator of `digits` 4-bit digits and resolve its charset.
/// `None` when the stream ends inside the digits.
fn read_eci(
    reader: &mut BitReader<'_>,
    digits: u32,
) -> Result<Option<CharacterSet>, FormatError> {
    let mut eci = 0u32;
    for _ in 0..digits {
        let Some(digit) = reader.read_bits(4) else {
            return Ok(None);
        };
        if !(2..=11).contains(&digit) {
            debug!("AztecDecoder: ECI digit code {digit} out of range");
            return Err(FormatError::InvalidEciDigit(digit));
        }
        eci = eci * 10 + (digit - 2);
    }
    CharacterSet::from_eci(eci).map(Some).ok_or_else(|| {
        debug!("AztecDecoder: no character set for ECI {eci}");
        FormatError::UnknownEci(eci)
    })
}
