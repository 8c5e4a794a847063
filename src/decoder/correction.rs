use crate::error::FormatError;
use crate::reed_solomon::{
    AZTEC_DATA_6, AZTEC_DATA_8, AZTEC_DATA_10, AZTEC_DATA_12, GaloisField, ReedSolomonDecoder,
};
use log::debug;

/// Data bits after error correction and unstuffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectedBits {
    /// Unstuffed data bits
    pub bits: Vec<bool>,
    /// Codewords repaired by Reed-Solomon
    pub errors_corrected: usize,
    /// Share of check codewords, in percent
    pub ec_level: u32,
}

/// Codeword width for a symbol with `layers` layers
pub fn codeword_size(layers: usize) -> usize {
    match layers {
        0..=2 => 6,
        3..=8 => 8,
        9..=22 => 10,
        _ => 12,
    }
}

fn field_for(codeword_size: usize) -> &'static GaloisField {
    match codeword_size {
        6 => &*AZTEC_DATA_6,
        8 => &*AZTEC_DATA_8,
        10 => &*AZTEC_DATA_10,
        _ => &*AZTEC_DATA_12,
    }
}

/// Split raw layer bits into codewords, correct them and unstuff the data
/// codewords. Leading bits that do not fill a whole codeword are skipped.
pub fn correct_bits(
    raw: &[bool],
    layers: usize,
    data_blocks: usize,
) -> Result<CorrectedBits, FormatError> {
    let size = codeword_size(layers);
    let num_codewords = raw.len() / size;
    if num_codewords < data_blocks || num_codewords == 0 {
        debug!("AztecDecoder: {num_codewords} codewords for {data_blocks} data blocks");
        return Err(FormatError::TooFewCodewords {
            available: num_codewords,
            declared: data_blocks,
        });
    }

    let offset = raw.len() % size;
    let mut words: Vec<u32> = raw[offset..]
        .chunks_exact(size)
        .map(|chunk| chunk.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32))
        .collect();

    let errors_corrected = ReedSolomonDecoder::new(field_for(size))
        .decode(&mut words, num_codewords - data_blocks)
        .inspect_err(|e| debug!("AztecDecoder: data codewords uncorrectable: {e}"))?;

    let bits = unstuff(&words[..data_blocks], size)?;
    Ok(CorrectedBits {
        bits,
        errors_corrected,
        ec_level: (100 * (num_codewords - data_blocks) / num_codewords) as u32,
    })
}

/// Expand data codewords into bits. `1` and `mask - 1` carry `size - 1`
/// zeros or ones; `0` and `mask` are reserved.
pub fn unstuff(words: &[u32], size: usize) -> Result<Vec<bool>, FormatError> {
    let mask = (1u32 << size) - 1;
    let mut bits = Vec::with_capacity(words.len() * size);
    for &word in words {
        if word == 0 || word == mask {
            debug!("AztecDecoder: reserved codeword {word:#x}");
            return Err(FormatError::ReservedCodeword(word));
        }
        if word == 1 || word == mask - 1 {
            bits.extend(std::iter::repeat(word > 1).take(size - 1));
        } else {
            bits.extend((0..size).rev().map(|bit| word & (1 << bit) != 0));
        }
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reed_solomon::ReedSolomonEncoder;

    fn to_bits(words: &[u32], size: usize) -> Vec<bool> {
        words
            .iter()
            .flat_map(|&w| (0..size).rev().map(move |i| (w >> i) & 1 == 1))
            .collect()
    }

    #[test]
    fn test_codeword_sizes() {
        assert_eq!(codeword_size(1), 6);
        assert_eq!(codeword_size(2), 6);
        assert_eq!(codeword_size(3), 8);
        assert_eq!(codeword_size(8), 8);
        assert_eq!(codeword_size(9), 10);
        assert_eq!(codeword_size(22), 10);
        assert_eq!(codeword_size(23), 12);
        assert_eq!(codeword_size(32), 12);
    }

    #[test]
    fn test_unstuff() {
        assert_eq!(unstuff(&[0b000001], 6).unwrap(), vec![false; 5]);
        assert_eq!(unstuff(&[0b111110], 6).unwrap(), vec![true; 5]);
        assert_eq!(
            unstuff(&[0b101100, 0b000001], 6).unwrap(),
            vec![true, false, true, true, false, false, false, false, false, false, false]
        );
        assert_eq!(unstuff(&[0x0fe], 8).unwrap(), vec![true; 7]);
        assert_eq!(unstuff(&[0], 6), Err(FormatError::ReservedCodeword(0)));
        assert_eq!(unstuff(&[63], 6), Err(FormatError::ReservedCodeword(63)));
        assert_eq!(unstuff(&[0xfff], 12), Err(FormatError::ReservedCodeword(0xfff)));
    }

    #[test]
    fn test_correct_bits_repairs_and_reports_level() {
        // 2 layers compact-sized stream: 5 data words + 12 check words, 2 pad bits
        let mut words = vec![28, 9, 6, 13, 13, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        ReedSolomonEncoder::new(&AZTEC_DATA_6)
            .encode(&mut words, 12)
            .unwrap();
        words[1] ^= 0x15;
        words[10] ^= 0x3f;

        let mut raw = vec![true, false];
        raw.extend(to_bits(&words, 6));
        let corrected = correct_bits(&raw, 1, 5).unwrap();
        assert_eq!(corrected.errors_corrected, 2);
        assert_eq!(corrected.ec_level, 70);
        assert_eq!(corrected.bits, to_bits(&[28, 9, 6, 13, 13], 6));
    }

    #[test]
    fn test_correct_bits_failures() {
        let raw = vec![true; 20];
        assert_eq!(
            correct_bits(&raw, 1, 4),
            Err(FormatError::TooFewCodewords {
                available: 3,
                declared: 4
            })
        );

        // all-zero data is a valid Reed-Solomon block but a reserved codeword
        let mut zeros = vec![0u32; 6];
        ReedSolomonEncoder::new(&AZTEC_DATA_6)
            .encode(&mut zeros, 4)
            .unwrap();
        assert_eq!(
            correct_bits(&to_bits(&zeros, 6), 1, 2),
            Err(FormatError::ReservedCodeword(0))
        );

        let mut words = vec![5, 7, 0, 0, 0, 0];
        ReedSolomonEncoder::new(&AZTEC_DATA_6)
            .encode(&mut words, 4)
            .unwrap();
        assert_eq!(words, vec![5, 7, 7, 30, 47, 11]);
        for w in &mut words[..3] {
            *w ^= 1;
        }
        let result = correct_bits(&to_bits(&words, 6), 1, 2);
        assert!(matches!(result, Err(FormatError::ReedSolomon(_))), "{result:?}");
    }
}
