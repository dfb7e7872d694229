//! Signed circular offsets relative to the focus.

/// Shortest signed circular distance from `position` to `focus` in a ring of
/// `count` items.
///
/// The result lies in `[-count/2, count/2]`. For an even count the exact
/// antipode resolves to `-count/2`, so it is laid out on the left. Returns
/// `None` for an empty ring.
pub fn resolve_offset(position: usize, focus: usize, count: usize) -> Option<isize> {
    if count == 0 {
        return None;
    }
    let n = count as i128;
    let r = (position as i128 - focus as i128).rem_euclid(n);
    let offset = if 2 * r >= n { r - n } else { r };
    Some(offset as isize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_only_at_focus() {
        for n in 1..=8usize {
            for f in 0..n {
                let zeros = (0..n)
                    .filter(|&p| resolve_offset(p, f, n) == Some(0))
                    .collect::<Vec<_>>();
                assert_eq!(zeros, vec![f]);
            }
        }
    }

    #[test]
    fn test_offset_range() {
        for n in 1..=12usize {
            let half = (n / 2) as isize;
            for f in 0..n {
                for p in 0..n {
                    let offset = resolve_offset(p, f, n).unwrap();
                    assert!((-half..=half).contains(&offset), "n={n} f={f} p={p}");
                }
            }
        }
    }

    #[test]
    fn test_even_antipode_is_left() {
        assert_eq!(resolve_offset(2, 0, 4), Some(-2));
        assert_eq!(resolve_offset(0, 2, 4), Some(-2));
        assert_eq!(resolve_offset(1, 0, 2), Some(-1));
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(resolve_offset(0, 4, 5), Some(1));
        assert_eq!(resolve_offset(4, 0, 5), Some(-1));
        assert_eq!(resolve_offset(0, 2, 5), Some(-2));
        assert_eq!(resolve_offset(4, 2, 5), Some(2));
    }

    #[test]
    fn test_empty_ring() {
        assert_eq!(resolve_offset(0, 0, 0), None);
    }
}
