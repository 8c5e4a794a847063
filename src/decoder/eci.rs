//! Character sets selectable through ECI escapes.

use encoding_rs::Encoding;
use std::fmt;

/// Byte-to-text interpretation for decoded byte runs
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterSet {
    /// IBM code page 437
    Cp437,
    /// ISO-8859-1, every byte maps to the same code point
    #[default]
    Iso8859_1,
    /// US-ASCII; bytes above 0x7f become U+FFFD
    Ascii,
    /// Any other set, decoded through `encoding_rs`
    Encoded(&'static Encoding),
}

impl CharacterSet {
    /// Character set assigned to an ECI value
    pub fn from_eci(value: u32) -> Option<Self> {
        use encoding_rs::*;
        let set = match value {
            0 | 2 => Self::Cp437,
            1 | 3 => Self::Iso8859_1,
            4 => Self::Encoded(ISO_8859_2),
            5 => Self::Encoded(ISO_8859_3),
            6 => Self::Encoded(ISO_8859_4),
            7 => Self::Encoded(ISO_8859_5),
            8 => Self::Encoded(ISO_8859_6),
            9 => Self::Encoded(ISO_8859_7),
            10 => Self::Encoded(ISO_8859_8),
            // windows-1254 and windows-874 extend ISO-8859-9 and -11 in 0x80..0x9f only
            11 => Self::Encoded(WINDOWS_1254),
            12 => Self::Encoded(ISO_8859_10),
            13 => Self::Encoded(WINDOWS_874),
            15 => Self::Encoded(ISO_8859_13),
            16 => Self::Encoded(ISO_8859_14),
            17 => Self::Encoded(ISO_8859_15),
            18 => Self::Encoded(ISO_8859_16),
            20 => Self::Encoded(SHIFT_JIS),
            21 => Self::Encoded(WINDOWS_1250),
            22 => Self::Encoded(WINDOWS_1251),
            23 => Self::Encoded(WINDOWS_1252),
            24 => Self::Encoded(WINDOWS_1256),
            25 => Self::Encoded(UTF_16BE),
            26 => Self::Encoded(UTF_8),
            27 | 170 => Self::Ascii,
            28 => Self::Encoded(BIG5),
            29 => Self::Encoded(GB18030),
            30 => Self::Encoded(EUC_KR),
            _ => return None,
        };
        Some(set)
    }

    /// Canonical label of the set
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cp437 => "Cp437",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::Ascii => "US-ASCII",
            Self::Encoded(encoding) => encoding.name(),
        }
    }

    /// Decode `bytes`; malformed sequences become U+FFFD
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Iso8859_1 => bytes.iter().map(|&b| b as char).collect(),
            Self::Ascii => bytes
                .iter()
                .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
                .collect(),
            Self::Cp437 => bytes
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        b as char
                    } else {
                        CP437_HIGH[(b - 0x80) as usize]
                    }
                })
                .collect(),
            Self::Encoded(encoding) => encoding
                .decode_without_bom_handling(bytes)
                .0
                .into_owned(),
        }
    }
}

impl fmt::Debug for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç',
    'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù',
    'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º',
    '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖',
    '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟',
    '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫',
    '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ',
    'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈',
    '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00a0}',
];
