use crate::models::BitMatrix;

/// Convert grayscale image to binary using Otsu's thresholding method
/// Returns a BitMatrix where true = black, false = white
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    threshold_binarize(gray, width, height, otsu_threshold(gray))
}

/// Otsu's optimal threshold: pixels strictly below it are black
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut background_count = 0.0;
    let mut background_sum = 0.0;
    let mut max_variance = 0.0;
    let mut optimal_threshold = 128u8;

    // Threshold t splits the histogram into [0, t) and [t, 256)
    for t in 1..256usize {
        background_count += histogram[t - 1] as f64;
        background_sum += (t - 1) as f64 * histogram[t - 1] as f64;
        let foreground_count = total - background_count;
        if background_count == 0.0 || foreground_count == 0.0 {
            continue;
        }
        let background_mean = background_sum / background_count;
        let foreground_mean = (total_sum - background_sum) / foreground_count;
        let variance = background_count * foreground_count
            * (background_mean - foreground_mean).powi(2);
        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = t as u8;
        }
    }

    optimal_threshold
}

/// Simple global threshold binarization, rows processed in parallel
pub fn threshold_binarize(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    BitMatrix::from_fn(width, height, |x, y| {
        gray.get(y * width + x).is_some_and(|&v| v < threshold)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let gray = vec![100, 150, 200, 50]; // 2x2 image
        let binary = threshold_binarize(&gray, 2, 2, 128);

        assert!(binary.get(0, 0)); // 100 < 128
        assert!(!binary.get(1, 0)); // 150 >= 128
        assert!(!binary.get(0, 1)); // 200 >= 128
        assert!(binary.get(1, 1)); // 50 < 128
    }

    #[test]
    fn test_otsu_binarize() {
        let mut gray = vec![50u8; 50];
        gray.extend(vec![200u8; 50]);

        let threshold = otsu_threshold(&gray);
        assert!(threshold > 50 && threshold <= 200);

        let binary = otsu_binarize(&gray, 10, 10);
        assert!(binary.get(0, 0));
        assert!(!binary.get(0, 7));
        assert_eq!(binary.count_ones(), 50);
    }

    #[test]
    fn test_uniform_image_keeps_default_threshold() {
        assert_eq!(otsu_threshold(&[90u8; 64]), 128);
        assert_eq!(otsu_threshold(&[]), 128);
    }
}
