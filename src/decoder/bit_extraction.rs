use crate::models::BitMatrix;

/// Data bits held by `layers` layers
pub fn total_bits_in_layers(layers: usize, compact: bool) -> usize {
    ((if compact { 88 } else { 112 }) + 16 * layers) * layers
}

/// Map from logical coordinates (no reference grid) to module coordinates.
///
/// Full symbols carry a reference grid line every 16 modules out from the
/// center; logical coordinates skip over those lines.
pub fn alignment_map(compact: bool, layers: usize) -> Vec<usize> {
    let base_size = (if compact { 11 } else { 14 }) + layers * 4;
    if compact {
        return (0..base_size).collect();
    }

    let matrix_size = base_size + 1 + 2 * ((base_size / 2 - 1) / 15);
    let orig_center = base_size / 2;
    let center = matrix_size / 2;
    let mut map = vec![0; base_size];
    for i in 0..orig_center {
        let new_offset = i + i / 15;
        map[orig_center - i - 1] = center - new_offset - 1;
        map[orig_center + i] = center + new_offset + 1;
    }
    map
}

/// Read the data layers of a sampled symbol, outermost layer first.
///
/// Each layer is read as two-module-wide bands: the left column top to
/// bottom, the bottom row left to right, the right column bottom to top and
/// the top row right to left.
pub fn extract_bits(matrix: &BitMatrix, compact: bool, layers: usize) -> Vec<bool> {
    let map = alignment_map(compact, layers);
    let base_size = map.len();
    let mut raw = vec![false; total_bits_in_layers(layers, compact)];
    let get = |x: usize, y: usize| matrix.get(map[x], map[y]);

    let mut row_offset = 0;
    for i in 0..layers {
        let row_size = (layers - i) * 4 + if compact { 9 } else { 12 };
        let low = i * 2;
        let high = base_size - 1 - low;
        for j in 0..row_size {
            let column_offset = j * 2;
            for k in 0..2 {
                raw[row_offset + column_offset + k] = get(low + k, low + j);
                raw[row_offset + 2 * row_size + column_offset + k] = get(low + j, high - k);
                raw[row_offset + 4 * row_size + column_offset + k] = get(high - k, high - j);
                raw[row_offset + 6 * row_size + column_offset + k] = get(high - j, low + k);
            }
        }
        row_offset += row_size * 8;
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_bits() {
        assert_eq!(total_bits_in_layers(1, true), 104);
        assert_eq!(total_bits_in_layers(4, true), 608);
        assert_eq!(total_bits_in_layers(2, false), 288);
        assert_eq!(total_bits_in_layers(5, false), 960);
        assert_eq!(total_bits_in_layers(32, false), 19968);
    }

    #[test]
    fn test_alignment_map_skips_reference_grid() {
        assert_eq!(alignment_map(true, 2), (0..19).collect::<Vec<_>>());

        let full_2 = alignment_map(false, 2);
        assert_eq!(full_2.len(), 22);
        assert_eq!(&full_2[9..13], &[9, 10, 12, 13]);
        assert_eq!(full_2[21], 22);

        let full_5 = alignment_map(false, 5);
        assert_eq!(full_5.len(), 34);
        assert_eq!(&full_5[..3], &[0, 1, 3]);
        assert_eq!(&full_5[16..18], &[17, 19]);
        assert_eq!(&full_5[31..], &[33, 35, 36]);
        for line in [2, 18, 34] {
            assert!(!full_5.contains(&line));
        }
    }

    fn single_module_hits(size: usize, compact: bool, layers: usize, x: usize, y: usize) -> Vec<usize> {
        let mut matrix = BitMatrix::new_square(size);
        matrix.set(x, y, true);
        extract_bits(&matrix, compact, layers)
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect()
    }

    #[test]
    fn test_extract_band_order() {
        // corners of the outer layer start the left, bottom, right and top bands
        assert_eq!(single_module_hits(15, true, 1, 0, 0), vec![0]);
        assert_eq!(single_module_hits(15, true, 1, 1, 0), vec![1]);
        assert_eq!(single_module_hits(15, true, 1, 0, 1), vec![2]);
        assert_eq!(single_module_hits(15, true, 1, 0, 14), vec![26]);
        assert_eq!(single_module_hits(15, true, 1, 14, 14), vec![52]);
        assert_eq!(single_module_hits(15, true, 1, 14, 0), vec![78]);
        assert_eq!(single_module_hits(23, false, 2, 22, 22), vec![80]);
    }

    #[test]
    fn test_extract_reads_each_module_once() {
        for (size, compact, layers) in [(15, true, 1), (23, false, 2)] {
            let mut modules = 0;
            for y in 0..size {
                for x in 0..size {
                    let hits = single_module_hits(size, compact, layers, x, y);
                    assert!(hits.len() <= 1, "({x}, {y}) read {} times", hits.len());
                    modules += hits.len();
                }
            }
            assert_eq!(modules, total_bits_in_layers(layers, compact));
        }
        // the reference grid column of a full symbol is never data
        assert!(single_module_hits(23, false, 2, 11, 0).is_empty());
    }
}
