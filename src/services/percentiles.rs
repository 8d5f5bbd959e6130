/// Estimated days of many trials, sorted ascending.
///
/// Percentiles use nearest-rank on the position `p / 100 * (len - 1)`:
/// - `p <= 0` => first element.
/// - `p >= 100` => last element.
/// - empty => `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedDays(Vec<f64>);

impl SortedDays {
    pub fn new(mut days: Vec<f64>) -> Self {
        days.sort_by(f64::total_cmp);
        Self(days)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn into_values(self) -> Vec<f64> {
        self.0
    }

    pub fn percentile(&self, percentile: f64) -> Option<f64> {
        let last = self.0.len().checked_sub(1)?;
        let index = if percentile <= 0.0 {
            0
        } else if percentile >= 100.0 {
            last
        } else {
            ((percentile / 100.0) * last as f64).round() as usize
        };
        self.0.get(index).copied()
    }
}

impl FromIterator<f64> for SortedDays {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
