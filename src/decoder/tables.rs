//! Aztec character tables.
//!
//! Each mode maps a 5-bit code (4-bit in DIGIT) to an action. Literals carry
//! the bytes they stand for; PUNCT has a few two-byte entries.

/// Character mode of the high-level decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// Capital letters, the initial mode
    Upper,
    /// Small letters
    Lower,
    /// Control characters and ASCII symbols
    Mixed,
    /// Punctuation and the FLG escape
    Punct,
    /// Digits, comma and period in 4-bit codes
    Digit,
    /// Raw 8-bit byte run
    Binary,
}

/// What a code means in a given table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit these bytes
    Literal(&'static [u8]),
    /// Switch mode until the next latch
    Latch(Table),
    /// Use a table for the next code only
    Shift(Table),
    /// `FLG(n)` escape: FNC1 or ECI
    Flag,
}

use Action::{Flag, Latch, Literal, Shift};
use Table::{Binary, Digit, Lower, Mixed, Punct, Upper};

impl Table {
    /// Width of one code in this table. BINARY has no codes of its own.
    pub fn code_bits(self) -> usize {
        match self {
            Digit => 4,
            _ => 5,
        }
    }

    /// Action for `code`, `None` for BINARY or an out-of-range code
    pub fn action(self, code: u32) -> Option<Action> {
        let table: &[Action] = match self {
            Upper => &UPPER,
            Lower => &LOWER,
            Mixed => &MIXED,
            Punct => &PUNCT,
            Digit => &DIGIT,
            Binary => return None,
        };
        table.get(code as usize).copied()
    }
}

const UPPER: [Action; 32] = [
    Shift(Punct),
    Literal(b" "),
    Literal(b"A"),
    Literal(b"B"),
    Literal(b"C"),
    Literal(b"D"),
    Literal(b"E"),
    Literal(b"F"),
    Literal(b"G"),
    Literal(b"H"),
    Literal(b"I"),
    Literal(b"J"),
    Literal(b"K"),
    Literal(b"L"),
    Literal(b"M"),
    Literal(b"N"),
    Literal(b"O"),
    Literal(b"P"),
    Literal(b"Q"),
    Literal(b"R"),
    Literal(b"S"),
    Literal(b"T"),
    Literal(b"U"),
    Literal(b"V"),
    Literal(b"W"),
    Literal(b"X"),
    Literal(b"Y"),
    Literal(b"Z"),
    Latch(Lower),
    Latch(Mixed),
    Latch(Digit),
    Shift(Binary),
];

const LOWER: [Action; 32] = [
    Shift(Punct),
    Literal(b" "),
    Literal(b"a"),
    Literal(b"b"),
    Literal(b"c"),
    Literal(b"d"),
    Literal(b"e"),
    Literal(b"f"),
    Literal(b"g"),
    Literal(b"h"),
    Literal(b"i"),
    Literal(b"j"),
    Literal(b"k"),
    Literal(b"l"),
    Literal(b"m"),
    Literal(b"n"),
    Literal(b"o"),
    Literal(b"p"),
    Literal(b"q"),
    Literal(b"r"),
    Literal(b"s"),
    Literal(b"t"),
    Literal(b"u"),
    Literal(b"v"),
    Literal(b"w"),
    Literal(b"x"),
    Literal(b"y"),
    Literal(b"z"),
    Shift(Upper),
    Latch(Mixed),
    Latch(Digit),
    Shift(Binary),
];

const MIXED: [Action; 32] = [
    Shift(Punct),
    Literal(b" "),
    Literal(b"\x01"),
    Literal(b"\x02"),
    Literal(b"\x03"),
    Literal(b"\x04"),
    Literal(b"\x05"),
    Literal(b"\x06"),
    Literal(b"\x07"),
    Literal(b"\x08"),
    Literal(b"\t"),
    Literal(b"\n"),
    Literal(b"\x0b"),
    Literal(b"\x0c"),
    Literal(b"\r"),
    Literal(b"\x1b"),
    Literal(b"\x1c"),
    Literal(b"\x1d"),
    Literal(b"\x1e"),
    Literal(b"\x1f"),
    Literal(b"@"),
    Literal(b"\\"),
    Literal(b"^"),
    Literal(b"_"),
    Literal(b"`"),
    Literal(b"|"),
    Literal(b"~"),
    Literal(b"\x7f"),
    Latch(Lower),
    Latch(Upper),
    Latch(Punct),
    Shift(Binary),
];

const PUNCT: [Action; 32] = [
    Flag,
    Literal(b"\r"),
    Literal(b"\r\n"),
    Literal(b". "),
    Literal(b", "),
    Literal(b": "),
    Literal(b"!"),
    Literal(b"\""),
    Literal(b"#"),
    Literal(b"$"),
    Literal(b"%"),
    Literal(b"&"),
    Literal(b"'"),
    Literal(b"("),
    Literal(b")"),
    Literal(b"*"),
    Literal(b"+"),
    Literal(b","),
    Literal(b"-"),
    Literal(b"."),
    Literal(b"/"),
    Literal(b":"),
    Literal(b";"),
    Literal(b"<"),
    Literal(b"="),
    Literal(b">"),
    Literal(b"?"),
    Literal(b"["),
    Literal(b"]"),
    Literal(b"{"),
    Literal(b"}"),
    Latch(Upper),
];

const DIGIT: [Action; 16] = [
    Shift(Punct),
    Literal(b" "),
    Literal(b"0"),
    Literal(b"1"),
    Literal(b"2"),
    Literal(b"3"),
    Literal(b"4"),
    Literal(b"5"),
    Literal(b"6"),
    Literal(b"7"),
    Literal(b"8"),
    Literal(b"9"),
    Literal(b","),
    Literal(b"."),
    Latch(Upper),
    Shift(Upper),
];
