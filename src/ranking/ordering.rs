use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Stable in-place sort on an extracted key.
///
/// Elements whose keys compare equal (or are incomparable) keep their input
/// order in both directions, so rank numbers stay deterministic across
/// re-renders.
pub fn sort_stable_by_key<T, K, F>(items: &mut [T], direction: Direction, key: F)
where
    F: Fn(&T) -> K,
    K: PartialOrd,
{
    items.sort_by(|a, b| {
        let ordering = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
        match direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    });
}

/// Sort key for a rating: missing, negative and NaN values sink to the bottom.
pub fn rating_key(rating: Option<f64>) -> f64 {
    match rating {
        Some(r) if r >= 0.0 => r,
        _ => f64::NEG_INFINITY,
    }
}
