/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency and dispersion
/// for a dataset of `f64` values. The review pipeline uses it for score-lead
/// volatility and for per-axis averages, so every field is computed in full
/// `f64` precision and never rounded here.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset (mean of the two middle values for even counts).
    pub median: f64,
    /// The population variance of the dataset.
    pub variance: f64,
    /// The population standard deviation of the dataset.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// Non-finite values are discarded before the statistics are computed.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one finite value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use kifu_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// The sum is accumulated in ascending order, so two datasets holding the
    /// same values in a different order produce bit-identical results.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = if count % 2 == 1 {
            sorted_values[count / 2]
        } else {
            f64::midpoint(sorted_values[count / 2 - 1], sorted_values[count / 2])
        };
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;
        let std_dev = variance.sqrt();

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            variance,
            std_dev,
        })
    }
}

/// Mean of the values, independent of their order.
///
/// Returns `None` for an empty input.
///
/// ```
/// # use kifu_stats::descriptive::order_independent_mean;
/// assert_eq!(order_independent_mean([4.0, 2.0, 3.0]), Some(3.0));
/// assert_eq!(order_independent_mean(std::iter::empty()), None);
/// ```
#[must_use]
pub fn order_independent_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    DescriptiveStats::new(values).map(|stats| stats.mean)
}

/// Successive differences `values[i + 1] - values[i]`.
#[must_use]
pub fn deltas(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}
