//! Split-height estimation.
//!
//! Halves of a split block are never re-measured. Their heights are estimated from the
//! measured height of the whole block, assuming rendered rows are spread uniformly over
//! source lines. Boundaries sit at list items and subsection starts, where that holds well
//! enough.

/// Estimated content rows of the part before `boundary_line`:
/// `⌈content_rows × boundary_line / total_lines⌉`.
pub fn estimate_split_rows(content_rows: usize, boundary_line: usize, total_lines: usize) -> usize {
    if total_lines == 0 {
        return 0;
    }
    let fraction = boundary_line as f64 / total_lines as f64;
    (content_rows as f64 * fraction).ceil() as usize
}

/// Estimated content rows of the part from `boundary_line` onward, never less than 1.
pub fn estimate_remainder_rows(
    content_rows: usize,
    boundary_line: usize,
    total_lines: usize,
) -> usize {
    let total = if total_lines == 0 { 1.0 } else { total_lines as f64 };
    let remaining = 1.0 - boundary_line as f64 / total;
    ((content_rows as f64 * remaining).ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_way_boundary() {
        assert_eq!(estimate_split_rows(40, 50, 100), 20);
        assert_eq!(estimate_remainder_rows(40, 50, 100), 20);
    }

    #[test]
    fn test_rounds_up() {
        // 10 × 1/3 = 3.33 → 4
        assert_eq!(estimate_split_rows(10, 1, 3), 4);
        // 10 × 2/3 = 6.67 → 7
        assert_eq!(estimate_remainder_rows(10, 1, 3), 7);
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(estimate_split_rows(12, 0, 0), 0);
        assert_eq!(estimate_remainder_rows(12, 0, 0), 12);
    }

    #[test]
    fn test_remainder_is_at_least_one_row() {
        assert_eq!(estimate_remainder_rows(5, 10, 10), 1);
        assert_eq!(estimate_remainder_rows(0, 2, 10), 1);
    }

    #[test]
    fn test_split_rows_grow_with_boundary() {
        let estimates: Vec<usize> = (0..=10).map(|b| estimate_split_rows(37, b, 10)).collect();
        assert!(estimates.windows(2).all(|w| w[0] <= w[1]));
    }
}
