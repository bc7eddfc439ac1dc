use crate::core::AxisLimit;
use crate::error::{ChartError, ChartResult};
use crate::interaction::ZoomDirection;

const MIN_ZOOMING_SPEED: f64 = 0.1;
const MAX_ZOOMING_SPEED: f64 = 0.95;

/// Zoom request after direction/scale-factor validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum ZoomRequest {
    Speed { zoom_in: bool },
    ScaleFactor { factor: f64 },
}

pub(super) fn resolve_zoom_request(
    direction: ZoomDirection,
    scale_factor: Option<f64>,
) -> ChartResult<ZoomRequest> {
    match (direction, scale_factor) {
        (ZoomDirection::DefinedByScaleFactor, Some(factor)) => {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ChartError::InvalidData(
                    "zoom scale factor must be finite and > 0".to_owned(),
                ));
            }
            Ok(ZoomRequest::ScaleFactor { factor })
        }
        (ZoomDirection::DefinedByScaleFactor, None) => Err(ChartError::InvalidData(
            "DefinedByScaleFactor zoom requires a scale factor".to_owned(),
        )),
        (direction, Some(_)) => Err(ChartError::ScaleFactorDirectionMismatch { direction }),
        (ZoomDirection::ZoomIn, None) => Ok(ZoomRequest::Speed { zoom_in: true }),
        (ZoomDirection::ZoomOut, None) => Ok(ZoomRequest::Speed { zoom_in: false }),
    }
}

/// Span multiplier for one speed-based zoom step. Higher speeds zoom faster.
pub(super) fn resolve_speed_multiplier(zooming_speed: f64, zoom_in: bool) -> f64 {
    let speed = if zooming_speed.is_finite() {
        zooming_speed.clamp(MIN_ZOOMING_SPEED, MAX_ZOOMING_SPEED)
    } else {
        MIN_ZOOMING_SPEED
    };
    let multiplier = 1.0 - speed;
    if zoom_in { multiplier } else { 1.0 / multiplier }
}

/// New `[min, max]` for a speed-based zoom keeping `pivot` at the same
/// relative position inside the window.
///
/// Returns `None` when the zoom-in would go below the axis zoom floor.
pub(super) fn resolve_speed_zoom(
    limit: AxisLimit,
    pivot: f64,
    zooming_speed: f64,
    zoom_in: bool,
    edge_fraction: f64,
) -> Option<(f64, f64)> {
    let span = limit.span();
    let multiplier = resolve_speed_multiplier(zooming_speed, zoom_in);
    let relative = (pivot - limit.min) / span;
    let target = span * multiplier;
    let min = pivot - target * relative;
    let max = pivot + target * (1.0 - relative);
    clamp_zoom(limit, min, max, zoom_in, edge_fraction)
}

/// New `[min, max]` for a pinch-style zoom. A factor above one shrinks the
/// window symmetrically, below one grows it.
pub(super) fn resolve_scale_factor_zoom(
    limit: AxisLimit,
    scale_factor: f64,
    edge_fraction: f64,
) -> Option<(f64, f64)> {
    let delta = 1.0 - scale_factor;
    let (sign, zoom_in) = if delta < 0.0 { (-1.0, true) } else { (1.0, false) };
    let half = limit.span() * delta.abs() * 0.5 * sign;
    clamp_zoom(limit, limit.min - half, limit.max + half, zoom_in, edge_fraction)
}

fn clamp_zoom(
    limit: AxisLimit,
    mut min: f64,
    mut max: f64,
    zoom_in: bool,
    edge_fraction: f64,
) -> Option<(f64, f64)> {
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }
    if zoom_in {
        if max - min < limit.min_zoom_delta {
            return None;
        }
    } else {
        let edge = limit.span() * edge_fraction;
        if max > limit.data_max {
            max = max.min(limit.data_max + edge);
        }
        if min < limit.data_min {
            min = min.max(limit.data_min - edge);
        }
    }
    if !min.is_finite() || !max.is_finite() || min >= max {
        return None;
    }
    Some((min, max))
}

/// Shifts `[min, max]` by `delta` data units, stopping at the data edge
/// plus `edge_fraction` of the span. The span is preserved and the window
/// never moves against the drag.
pub(super) fn resolve_pan(limit: AxisLimit, delta: f64, edge_fraction: f64) -> (f64, f64) {
    let span = limit.span();
    let edge = span * edge_fraction;
    if delta > 0.0 {
        let cap = (limit.data_max + edge).max(limit.max);
        let max = (limit.max + delta).min(cap);
        return (max - span, max);
    }
    if delta < 0.0 {
        let floor = (limit.data_min - edge).min(limit.min);
        let min = (limit.min + delta).max(floor);
        return (min, min + span);
    }
    (limit.min, limit.max)
}

/// Slides an out-of-bounds window back inside the data range, keeping its
/// span. When the window is wider than the data, the start edge wins.
///
/// Returns `None` when the window is already where it would land.
pub(super) fn resolve_bounce_back(limit: AxisLimit) -> Option<(f64, f64)> {
    let span = limit.span();
    let min = if limit.min < limit.data_min {
        limit.data_min
    } else if limit.max > limit.data_max {
        (limit.data_max - span).max(limit.data_min)
    } else {
        return None;
    };
    if min == limit.min {
        return None;
    }
    Some((min, min + span))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{
        ZoomRequest, resolve_bounce_back, resolve_pan, resolve_scale_factor_zoom,
        resolve_speed_multiplier, resolve_speed_zoom, resolve_zoom_request,
    };
    use crate::core::AxisLimit;
    use crate::error::ChartError;
    use crate::interaction::ZoomDirection;

    fn limit(min: f64, max: f64) -> AxisLimit {
        AxisLimit {
            min,
            max,
            min_zoom_delta: 1.0,
            data_min: 0.0,
            data_max: 100.0,
        }
    }

    #[test]
    fn explicit_scale_factor_requires_matching_direction() {
        let err = resolve_zoom_request(ZoomDirection::ZoomIn, Some(1.2)).expect_err("mismatch");
        assert!(matches!(
            err,
            ChartError::ScaleFactorDirectionMismatch {
                direction: ZoomDirection::ZoomIn
            }
        ));
        assert_eq!(
            resolve_zoom_request(ZoomDirection::DefinedByScaleFactor, Some(1.2)).expect("ok"),
            ZoomRequest::ScaleFactor { factor: 1.2 }
        );
        assert!(resolve_zoom_request(ZoomDirection::DefinedByScaleFactor, None).is_err());
    }

    #[test]
    fn speed_is_clamped_and_zoom_out_inverts_the_multiplier() {
        assert_relative_eq!(resolve_speed_multiplier(0.0, true), 0.9);
        assert_relative_eq!(resolve_speed_multiplier(2.0, true), 0.05, epsilon = 1e-12);
        assert_relative_eq!(resolve_speed_multiplier(0.2, false), 1.25);
    }

    #[test]
    fn speed_zoom_keeps_pivot_relative_position() {
        let (min, max) = resolve_speed_zoom(limit(0.0, 100.0), 25.0, 0.5, true, 0.05)
            .expect("zoomed");
        assert_relative_eq!(min, 12.5);
        assert_relative_eq!(max, 62.5);
    }

    #[test]
    fn zoom_in_below_floor_is_rejected() {
        let mut floor = limit(40.0, 41.5);
        floor.min_zoom_delta = 1.0;
        assert!(resolve_speed_zoom(floor, 40.5, 0.5, true, 0.05).is_none());
    }

    #[test]
    fn zoom_out_is_capped_at_data_edge_plus_fraction() {
        let (min, max) = resolve_speed_zoom(limit(0.0, 100.0), 50.0, 0.5, false, 0.05)
            .expect("zoomed");
        assert_relative_eq!(min, -5.0);
        assert_relative_eq!(max, 105.0);
    }

    #[test]
    fn scale_factor_above_one_zooms_in_symmetrically() {
        let (min, max) =
            resolve_scale_factor_zoom(limit(20.0, 60.0), 1.5, 0.05).expect("zoomed");
        assert_relative_eq!(min, 30.0);
        assert_relative_eq!(max, 50.0);
    }

    #[test]
    fn pan_stops_at_data_edge_plus_fraction() {
        let (min, max) = resolve_pan(limit(80.0, 100.0), 15.0, 0.15);
        assert_relative_eq!(max, 103.0);
        assert_relative_eq!(min, 83.0);

        let (min, max) = resolve_pan(limit(10.0, 30.0), -25.0, 0.05);
        assert_relative_eq!(min, -1.0);
        assert_relative_eq!(max, 19.0);

        assert_eq!(resolve_pan(limit(10.0, 30.0), 5.0, 0.05), (15.0, 35.0));
    }

    #[test]
    fn pan_across_the_data_edge_moves_exactly_by_the_delta() {
        let (min, max) = resolve_pan(limit(79.0, 99.0), 2.0, 0.15);
        assert_relative_eq!(min, 81.0);
        assert_relative_eq!(max, 101.0);

        let (min, max) = resolve_pan(limit(1.0, 21.0), -2.0, 0.15);
        assert_relative_eq!(min, -1.0);
        assert_relative_eq!(max, 19.0);
    }

    #[test]
    fn pan_beyond_the_edge_bound_never_moves_against_the_drag() {
        assert_eq!(resolve_pan(limit(90.0, 110.0), 5.0, 0.05), (90.0, 110.0));
        assert_eq!(resolve_pan(limit(-10.0, 10.0), -5.0, 0.05), (-10.0, 10.0));
    }

    #[test]
    fn bounce_back_slides_window_inside_data() {
        assert_eq!(resolve_bounce_back(limit(-3.0, 17.0)), Some((0.0, 20.0)));
        assert_eq!(resolve_bounce_back(limit(85.0, 103.0)), Some((82.0, 100.0)));
        assert_eq!(resolve_bounce_back(limit(10.0, 20.0)), None);
        assert_eq!(resolve_bounce_back(limit(-10.0, 120.0)), Some((0.0, 130.0)));
    }

    #[test]
    fn bounce_back_of_a_window_wider_than_the_data_settles() {
        assert_eq!(resolve_bounce_back(limit(0.0, 130.0)), None);
    }
}
