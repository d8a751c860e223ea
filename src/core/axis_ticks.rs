/// Value ticks drawn on the Y axis.
pub const VALUE_TICK_COUNT: usize = 5;
/// Upper bound on time labels drawn on the X axis.
pub const MAX_TIME_LABELS: usize = 12;

/// `tick_count` evenly spaced values across `range`, both ends included.
#[must_use]
pub fn axis_ticks(range: (f64, f64), tick_count: usize) -> Vec<f64> {
    if tick_count == 0 {
        return Vec::new();
    }

    if tick_count == 1 {
        return vec![range.0];
    }

    let denominator = (tick_count - 1) as f64;
    (0..tick_count)
        .map(|index| {
            let ratio = (index as f64) / denominator;
            range.0 * (1.0 - ratio) + range.1 * ratio
        })
        .collect()
}

/// Stride between labelled points so at most about `max_labels` are shown.
#[must_use]
pub fn label_stride(point_count: usize, max_labels: usize) -> usize {
    if max_labels == 0 || point_count <= max_labels {
        1
    } else {
        point_count.div_ceil(max_labels)
    }
}

/// Indices of points that receive a time label.
///
/// Every `stride`-th point is labelled and the last point always is, even
/// when it does not fall on the stride.
#[must_use]
pub fn select_label_indices(point_count: usize, max_labels: usize) -> Vec<usize> {
    let stride = label_stride(point_count, max_labels);
    (0..point_count)
        .filter(|index| index % stride == 0 || *index == point_count - 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{axis_ticks, label_stride, select_label_indices};

    #[test]
    fn ticks_cover_range_inclusively() {
        assert_eq!(axis_ticks((0.0, 100.0), 5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(axis_ticks((3.0, 9.0), 1), vec![3.0]);
        assert!(axis_ticks((3.0, 9.0), 0).is_empty());
        assert!(axis_ticks((f64::MIN, f64::MAX), 5)
            .iter()
            .all(|tick| tick.is_finite()));
    }

    #[test]
    fn stride_rounds_up() {
        assert_eq!(label_stride(12, 12), 1);
        assert_eq!(label_stride(13, 12), 2);
        assert_eq!(label_stride(25, 12), 3);
    }

    #[test]
    fn last_index_is_kept_off_stride() {
        assert_eq!(select_label_indices(14, 12), vec![0, 2, 4, 6, 8, 10, 12, 13]);
        assert_eq!(select_label_indices(3, 12), vec![0, 1, 2]);
        assert!(select_label_indices(0, 12).is_empty());
    }
}
