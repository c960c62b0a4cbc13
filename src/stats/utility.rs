use std::collections::BTreeMap;

/// Distinct values with how often each occurs, most frequent first.
pub type Counts = Vec<(String, usize)>;

/// Most frequent value. Ties go to the lowest value in ascending order.
/// Returns `None` for empty input.
pub fn mode<T: Ord, I: IntoIterator<Item = T>>(values: I) -> Option<T> {
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        // strict comparison keeps the earlier (smaller) value on a tie
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Frequency of each distinct value, ordered by descending count and then
/// ascending value.
pub fn value_counts<'a, I: IntoIterator<Item = &'a str>>(values: I) -> Counts {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut counts: Counts = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    // stable sort keeps the alphabetical order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_picks_most_frequent() {
        assert_eq!(mode(vec![1, 1, 2, 3, 1, 2, 2, 1, 3, 1]), Some(1));
        assert_eq!(mode(vec!["b", "a", "b"]), Some("b"));
    }

    #[test]
    fn test_mode_tie_goes_to_lowest_value() {
        assert_eq!(mode(vec![3, 2, 3, 2]), Some(2));
        assert_eq!(mode(vec!["Tuesday", "Monday"]), Some("Monday"));
        assert_eq!(mode(vec![17, 8, 17, 8, 23]), Some(8));
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_value_counts_ordering() {
        let counts = value_counts(vec![
            "Customer",
            "Subscriber",
            "Subscriber",
            "Dependent",
            "Customer",
            "Subscriber",
        ]);
        assert_eq!(
            counts,
            vec![
                ("Subscriber".to_string(), 3),
                ("Customer".to_string(), 2),
                ("Dependent".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_value_counts_empty() {
        assert!(value_counts(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[600.0, 300.0, 1200.0]), Some(700.0));
    }
}
