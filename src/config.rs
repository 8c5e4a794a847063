//! Process-wide knobs read once from the environment.
//!
//! Invalid values fall back to the defaults. Every knob can be overridden
//! per call through [`DecodeOptions`].

use crate::decoder::CharacterSet;
use std::sync::OnceLock;

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_usize(name: &str) -> Option<usize> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static TRY_MIRRORED: OnceLock<bool> = OnceLock::new();

/// `AZTEC_TRY_MIRRORED`, default on
pub fn try_mirrored() -> bool {
    *TRY_MIRRORED.get_or_init(|| parse_env_bool_u8("AZTEC_TRY_MIRRORED", true))
}

static DEFAULT_ECI: OnceLock<u32> = OnceLock::new();

/// `AZTEC_DEFAULT_ECI`, default 3 (ISO-8859-1)
pub fn default_eci() -> u32 {
    *DEFAULT_ECI.get_or_init(|| parse_env_u32("AZTEC_DEFAULT_ECI", 3))
}

/// Character set for [`default_eci`]; unknown values mean ISO-8859-1
pub fn default_charset() -> CharacterSet {
    charset_for_eci(default_eci())
}

fn charset_for_eci(eci: u32) -> CharacterSet {
    CharacterSet::from_eci(eci).unwrap_or_default()
}

static MAX_DIM: OnceLock<Option<usize>> = OnceLock::new();

/// `AZTEC_MAX_DIM`: loaded images larger than this are downscaled
pub fn max_image_dim() -> Option<usize> {
    *MAX_DIM.get_or_init(|| parse_env_usize("AZTEC_MAX_DIM").filter(|&d| d > 0))
}

/// Per-call decoding options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Retry reading the symbol as a mirror image when the normal read fails
    pub try_mirrored: bool,
    /// Character set for bytes seen before any ECI escape
    pub default_charset: CharacterSet,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            try_mirrored: try_mirrored(),
            default_charset: default_charset(),
        }
    }
}
