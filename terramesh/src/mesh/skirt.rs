//! Skirt perimeter tracing.

/// Number of perimeter samples on an `n × n` grid.
#[inline]
pub fn perimeter_len(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        4 * (n - 1)
    }
}

/// Traces the perimeter of an `n × n` grid clockwise from `(0, 0)`.
///
/// Row 0 is the north edge, so clockwise runs east along row 0, south down
/// the last column, west along the last row and north up column 0. Corners
/// appear once. Returns `(row, column)` pairs.
pub fn perimeter(n: usize) -> Vec<(usize, usize)> {
    let mut edge = Vec::with_capacity(perimeter_len(n));
    if n < 2 {
        return edge;
    }
    let last = n - 1;

    // North, east, south, west.
    edge.extend((0..last).map(|col| (0, col)));
    edge.extend((0..last).map(|row| (row, last)));
    edge.extend((1..=last).rev().map(|col| (last, col)));
    edge.extend((1..=last).rev().map(|row| (row, 0)));

    edge
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_two_by_two() {
        assert_eq!(perimeter(2), vec![(0, 0), (0, 1), (1, 1), (1, 0)]);
    }

    #[test]
    fn test_three_by_three() {
        assert_eq!(
            perimeter(3),
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 2),
                (2, 2),
                (2, 1),
                (2, 0),
                (1, 0)
            ]
        );
    }

    #[test]
    fn test_length_and_uniqueness() {
        for n in 2..12 {
            let edge = perimeter(n);
            assert_eq!(edge.len(), perimeter_len(n));
            assert_eq!(edge.len(), 4 * (n - 1));

            let unique: HashSet<_> = edge.iter().copied().collect();
            assert_eq!(unique.len(), edge.len(), "corner repeated for n={}", n);
            assert!(edge
                .iter()
                .all(|&(r, c)| r == 0 || c == 0 || r == n - 1 || c == n - 1));
        }
    }

    #[test]
    fn test_consecutive_entries_are_adjacent() {
        let edge = perimeter(6);
        for i in 0..edge.len() {
            let (r0, c0) = edge[i];
            let (r1, c1) = edge[(i + 1) % edge.len()];
            let step = r0.abs_diff(r1) + c0.abs_diff(c1);
            assert_eq!(step, 1, "gap between {:?} and {:?}", edge[i], edge[(i + 1) % edge.len()]);
        }
    }

    #[test]
    fn test_degenerate_grid_has_no_perimeter() {
        assert!(perimeter(0).is_empty());
        assert!(perimeter(1).is_empty());
        assert_eq!(perimeter_len(1), 0);
    }
}
