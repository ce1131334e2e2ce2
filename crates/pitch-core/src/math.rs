use crate::{Angle, Vector2};

/// Clamp `value` into `[min, max]`. `min` wins if the bounds are inverted.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Arithmetic mean, 0 for an empty sample.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, 0 for an empty sample.
pub fn stdev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// A vector of length `distance` pointing along `heading`.
pub fn vector_from_dist_heading(distance: f64, heading: Angle) -> Vector2 {
    Vector2::new(
        distance * heading.radians().cos(),
        distance * heading.radians().sin(),
    )
}

/// The point of segment `pq` closest to `x`.
///
/// `p` and `q` are interchangeable. If they are less than 1 mm apart the segment is
/// degenerate and `p` is returned.
pub fn closest_point_on_segment(x: Vector2, p: Vector2, q: Vector2) -> Vector2 {
    let pq = q - p;
    if pq.norm() < 1.0 {
        return p;
    }

    let lambda = (x - p).dot(&pq) / pq.dot(&pq);
    if lambda <= 0.0 {
        p
    } else if lambda >= 1.0 {
        q
    } else {
        p + pq * lambda
    }
}

/// Linear interpolation of `x` between `(x0, y0)` and `(x1, y1)`, saturating outside the range.
pub fn interpolate_clamped(x: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    if x <= x0 {
        y0
    } else if x >= x1 {
        y1
    } else {
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }
}
