use serde::{Deserialize, Serialize};

/// Observed value range feeding one axis.
///
/// A fresh `Bounds` is empty (`min = +inf`, `max = -inf`) and widens as values
/// are appended. Padding and the requested marker footprint are carried along
/// so the layout pass can convert them into data units once the final scaler
/// is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min: f64,
    max: f64,
    min_delta: f64,
    padding_min: f64,
    padding_max: f64,
    requested_geometry_size: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            min_delta: f64::INFINITY,
            padding_min: 0.0,
            padding_max: 0.0,
            requested_geometry_size: 0.0,
        }
    }

    /// Builds bounds from raw values, also tracking the smallest positive gap
    /// between adjacent values.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        sorted.sort_by(f64::total_cmp);

        let mut bounds = Self::empty();
        for value in sorted.iter().copied() {
            bounds.append_value(value);
        }
        for pair in sorted.windows(2) {
            let gap = pair[1] - pair[0];
            if gap > 0.0 && gap < bounds.min_delta {
                bounds.min_delta = gap;
            }
        }
        bounds
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Smallest observed gap between adjacent values; `+inf` when unknown.
    #[must_use]
    pub fn min_delta(&self) -> f64 {
        self.min_delta
    }

    #[must_use]
    pub fn padding_min(&self) -> f64 {
        self.padding_min
    }

    #[must_use]
    pub fn padding_max(&self) -> f64 {
        self.padding_max
    }

    /// Marker footprint in pixels requested by the series feeding this axis.
    #[must_use]
    pub fn requested_geometry_size(&self) -> f64 {
        self.requested_geometry_size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.is_nan() || self.max.is_nan() || self.min > self.max
    }

    #[must_use]
    pub fn range(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max - self.min
        }
    }

    pub fn append_value(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Unions `other` into `self`.
    pub fn append_bounds(&mut self, other: &Bounds) {
        if !other.is_empty() {
            self.min = self.min.min(other.min);
            self.max = self.max.max(other.max);
        }
        self.min_delta = self.min_delta.min(other.min_delta);
        self.padding_min = self.padding_min.max(other.padding_min);
        self.padding_max = self.padding_max.max(other.padding_max);
        self.requested_geometry_size = self
            .requested_geometry_size
            .max(other.requested_geometry_size);
    }

    pub fn set_range(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    pub fn set_min_delta(&mut self, min_delta: f64) {
        self.min_delta = min_delta;
    }

    pub fn set_padding(&mut self, padding_min: f64, padding_max: f64) {
        self.padding_min = padding_min.max(0.0);
        self.padding_max = padding_max.max(0.0);
    }

    pub fn set_requested_geometry_size(&mut self, size_px: f64) {
        self.requested_geometry_size = size_px.max(0.0);
    }

    /// Widens a zero-width range symmetrically by `half_width` on each side.
    ///
    /// Returns `true` when the range was degenerate and got widened.
    pub fn widen_if_degenerate(&mut self, half_width: f64) -> bool {
        if self.is_empty() || self.max != self.min {
            return false;
        }
        let half_width = degenerate_half_width(self.min, half_width);
        self.min -= half_width;
        self.max += half_width;
        true
    }

    pub fn expand(&mut self, below: f64, above: f64) {
        if self.is_empty() {
            return;
        }
        self.min -= below.max(0.0);
        self.max += above.max(0.0);
    }
}

/// Half-width that opens a zero-width range around `value`.
///
/// Falls back to `0.5` for unusable widths and never goes below a few ulps of
/// `value`, so `value - w < value + w` holds at any magnitude.
#[must_use]
pub fn degenerate_half_width(value: f64, half_width: f64) -> f64 {
    let half_width = if half_width.is_finite() && half_width > 0.0 {
        half_width
    } else {
        0.5
    };
    half_width.max(value.abs() * f64::EPSILON * 4.0)
}

#[cfg(test)]
mod tests {
    use super::{Bounds, degenerate_half_width};

    #[test]
    fn from_values_tracks_range_and_smallest_gap() {
        let bounds = Bounds::from_values([4.0, 1.0, 2.5, 2.5, f64::NAN, 10.0]);
        assert_eq!(bounds.min(), 1.0);
        assert_eq!(bounds.max(), 10.0);
        assert_eq!(bounds.min_delta(), 1.5);
    }

    #[test]
    fn single_value_is_degenerate_until_widened() {
        let mut bounds = Bounds::from_values([3.0]);
        assert!(!bounds.is_empty());
        assert!(bounds.min_delta().is_infinite());

        assert!(bounds.widen_if_degenerate(0.5));
        assert_eq!((bounds.min(), bounds.max()), (2.5, 3.5));
        assert!(!bounds.widen_if_degenerate(0.5));
    }

    #[test]
    fn append_bounds_ignores_empty_ranges_but_keeps_padding() {
        let mut target = Bounds::from_values([0.0, 5.0]);
        let mut other = Bounds::empty();
        other.set_padding(1.0, 2.0);
        other.set_requested_geometry_size(12.0);

        target.append_bounds(&other);
        assert_eq!((target.min(), target.max()), (0.0, 5.0));
        assert_eq!(target.padding_max(), 2.0);
        assert_eq!(target.requested_geometry_size(), 12.0);
    }

    #[test]
    fn large_single_value_still_widens_to_a_real_range() {
        let mut bounds = Bounds::from_values([1e17]);
        assert!(bounds.widen_if_degenerate(0.5));
        assert!(bounds.max() > bounds.min());
        assert!(bounds.min() < 1e17 && bounds.max() > 1e17);

        assert_eq!(degenerate_half_width(3.0, 0.5), 0.5);
        assert_eq!(degenerate_half_width(3.0, f64::NAN), 0.5);
    }
}
