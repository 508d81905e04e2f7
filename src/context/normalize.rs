//! Coordinate normalization for geodetic (degrees) and planar coordinates.
//!
//! All functions here are pure and total: any finite input produces an in-range output.

/// Normalize a longitude into `[-180, 180]`.
///
/// Values already in range are returned untouched, so `180` and `-180` are both preserved. An
/// out-of-range value that wraps exactly onto the boundary keeps the sign of the input: `540`
/// becomes `180` and `-540` becomes `-180`.
#[inline]
pub fn norm_lon_deg(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        return lon;
    }
    let off = (lon + 180.0) % 360.0;
    if off < 0.0 {
        180.0 + off
    } else if off == 0.0 && lon > 0.0 {
        180.0
    } else {
        -180.0 + off
    }
}

/// Normalize a latitude into `[-90, 90]` by reflecting over the poles.
///
/// Returns the latitude and whether an odd number of poles was crossed. When it was, the
/// companion longitude must be shifted by 180 degrees; see [`norm_point_deg`].
#[inline]
pub fn norm_lat_deg(lat: f64) -> (f64, bool) {
    if (-90.0..=90.0).contains(&lat) {
        return (lat, false);
    }
    let off = (lat + 90.0).rem_euclid(360.0);
    if off <= 180.0 {
        (off - 90.0, false)
    } else {
        (270.0 - off, true)
    }
}

/// Normalize a longitude/latitude pair, moving the longitude to the far side of the globe when
/// the latitude crossed a pole.
#[inline]
pub fn norm_point_deg(lon: f64, lat: f64) -> (f64, f64) {
    let (lat, crossed_pole) = norm_lat_deg(lat);
    let lon = if crossed_pole { lon + 180.0 } else { lon };
    (norm_lon_deg(lon), lat)
}

/// Wrap a planar x value into `[min_x, min_x + width)`.
#[inline]
pub fn wrap_planar(x: f64, min_x: f64, width: f64) -> f64 {
    if width <= 0.0 || !width.is_finite() {
        return x;
    }
    min_x + (x - min_x).rem_euclid(width)
}
