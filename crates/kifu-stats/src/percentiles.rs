/// Mid-rank percentile of `value` within `population`.
///
/// ```text
/// rank = (count_below + 0.5 * count_equal) / n * 100
/// ```
///
/// Ties share the same rank, and a population where every value ties yields
/// exactly 50. Non-finite population members are ignored.
///
/// # Returns
///
/// `None` if the population holds fewer than two finite values, since a rank
/// within a single value carries no information.
///
/// # Examples
///
/// ```
/// use kifu_stats::percentiles::percentile_rank;
///
/// assert_eq!(percentile_rank(&[1.0, 2.0], 2.0), Some(75.0));
/// assert_eq!(percentile_rank(&[1.0, 2.0], 1.0), Some(25.0));
/// assert_eq!(percentile_rank(&[3.0, 3.0, 3.0], 3.0), Some(50.0));
/// assert_eq!(percentile_rank(&[3.0], 3.0), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn percentile_rank(population: &[f64], value: f64) -> Option<f64> {
    let mut below = 0_usize;
    let mut equal = 0_usize;
    let mut n = 0_usize;
    for &v in population.iter().filter(|v| v.is_finite()) {
        n += 1;
        match v.total_cmp(&value) {
            std::cmp::Ordering::Less => below += 1,
            std::cmp::Ordering::Equal => equal += 1,
            std::cmp::Ordering::Greater => {}
        }
    }
    if n < 2 {
        return None;
    }
    Some((below as f64 + 0.5 * equal as f64) / n as f64 * 100.0)
}
