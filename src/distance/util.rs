//! Spherical trigonometry helpers and unit conversions.
//!
//! Functions suffixed `_rad` take and return radians; `_deg` variants work in degrees.

use std::f64::consts::PI;

use float_next_after::NextAfter;

use crate::context::normalize::norm_lon_deg;
use crate::shape::rectangle::lon_in_range;
use crate::shape::Rectangle;

/// Degrees per radian. Used as the default sphere radius so that distances come out in degrees
/// of arc.
pub const DEGREES_PER_RADIAN: f64 = 180.0 / PI;

/// Mean Earth radius in kilometers.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0087714;

/// Equatorial Earth radius in kilometers.
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.137;

/// Kilometers per degree of arc on the mean Earth sphere.
pub const DEG_TO_KM: f64 = PI / 180.0 * EARTH_MEAN_RADIUS_KM;

/// Degrees of arc per kilometer on the mean Earth sphere.
pub const KM_TO_DEG: f64 = 1.0 / DEG_TO_KM;

/// Convert a surface distance on a sphere of `radius` into degrees of arc.
#[inline]
pub fn dist_to_degrees(dist: f64, radius: f64) -> f64 {
    (dist / radius).to_degrees()
}

/// Convert degrees of arc into a surface distance on a sphere of `radius`.
#[inline]
pub fn degrees_to_dist(degrees: f64, radius: f64) -> f64 {
    degrees.to_radians() * radius
}

/// Central angle between two points with the haversine formula.
pub fn dist_haversine_rad(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    let hsin_x = ((lon1 - lon2) * 0.5).sin();
    let hsin_y = ((lat1 - lat2) * 0.5).sin();
    let h = (hsin_y * hsin_y + lat1.cos() * lat2.cos() * hsin_x * hsin_x).min(1.0);
    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Central angle between two points with the spherical law of cosines.
///
/// Less accurate than haversine for very small distances.
pub fn dist_law_of_cosines_rad(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    let cos = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon2 - lon1).cos();
    cos.clamp(-1.0, 1.0).acos()
}

/// The destination reached by travelling `dist` along the great circle leaving
/// `(start_lat, start_lon)` at `bearing` (clockwise from north). Returns `(lat, lon)`; the
/// longitude is not normalized.
pub fn point_on_bearing_rad(start_lat: f64, start_lon: f64, dist: f64, bearing: f64) -> (f64, f64) {
    let (sin_d, cos_d) = dist.sin_cos();
    let (sin_lat, cos_lat) = start_lat.sin_cos();
    let sin_lat2 = (sin_lat * cos_d + cos_lat * sin_d * bearing.cos()).clamp(-1.0, 1.0);
    let lat2 = sin_lat2.asin();
    let lon2 = start_lon + (bearing.sin() * sin_d * cos_lat).atan2(cos_d - sin_lat * sin_lat2);
    (lat2, lon2)
}

/// Half the longitude span of the bounding box of a circle of `dist` degrees centered at `lat`.
///
/// Returns `90` when the circle reaches over a pole.
pub fn calc_box_by_dist_from_pt_delta_lon_deg(lat: f64, dist: f64) -> f64 {
    if dist == 0.0 {
        return 0.0;
    }
    let delta = (dist.to_radians().sin() / lat.to_radians().cos()).asin();
    if delta.is_nan() {
        90.0
    } else {
        delta.to_degrees()
    }
}

/// The bounding box of a spherical circle of `dist` degrees centered at `(lon, lat)`.
///
/// The box is never smaller than the circle: its sides are nudged outward by one ulp to absorb
/// rounding in the trigonometry.
pub fn calc_box_by_dist_from_pt_deg(lat: f64, lon: f64, dist: f64) -> Rectangle {
    if dist == 0.0 {
        return Rectangle::new(lon, lon, lat, lat);
    }
    if dist >= 180.0 {
        return Rectangle::world_geo();
    }

    let max_y = lat + dist;
    let min_y = lat - dist;
    if max_y >= 90.0 || min_y <= -90.0 {
        let (min_x, max_x) = if max_y <= 90.0 && min_y >= -90.0 {
            // Touches a pole without passing over it
            (norm_lon_deg(lon - 90.0), norm_lon_deg(lon + 90.0))
        } else {
            (-180.0, 180.0)
        };
        return Rectangle::geo_canonical(min_x, max_x, min_y.max(-90.0), max_y.min(90.0));
    }

    let delta = calc_box_by_dist_from_pt_delta_lon_deg(lat, dist).next_after(f64::INFINITY);
    let min_y = min_y.next_after(f64::NEG_INFINITY).max(-90.0);
    let max_y = max_y.next_after(f64::INFINITY).min(90.0);
    if delta >= 180.0 {
        return Rectangle::new(-180.0, 180.0, min_y, max_y);
    }
    Rectangle::geo_canonical(
        norm_lon_deg(lon - delta),
        norm_lon_deg(lon + delta),
        min_y,
        max_y,
    )
}

/// The point of the latitude/longitude rectangle `rect` closest to `(lon, lat)` on the sphere,
/// as `(lon, lat)` in degrees.
///
/// When the longitude falls inside the rectangle's range the answer lies on the same meridian.
/// Otherwise it lies on one of the two bounding meridians, at the foot of the perpendicular from
/// the point or at the nearer end of the meridian segment.
pub fn closest_point_on_rect_deg(lon: f64, lat: f64, rect: &Rectangle) -> (f64, f64) {
    if rect.width() >= 360.0 || lon_in_range(lon, rect.min_x(), rect.max_x()) {
        return (lon, lat.clamp(rect.min_y(), rect.max_y()));
    }

    let west = closest_point_on_meridian_deg(lon, lat, rect.min_x(), rect.min_y(), rect.max_y());
    let east = closest_point_on_meridian_deg(lon, lat, rect.max_x(), rect.min_y(), rect.max_y());
    let (lat_r, lon_r) = (lat.to_radians(), lon.to_radians());
    let to_west = dist_haversine_rad(lat_r, lon_r, west.1.to_radians(), west.0.to_radians());
    let to_east = dist_haversine_rad(lat_r, lon_r, east.1.to_radians(), east.0.to_radians());
    if to_west <= to_east {
        west
    } else {
        east
    }
}

/// The point of the meridian segment `meridian` x `[min_lat, max_lat]` closest to `(lon, lat)`.
///
/// The foot of the perpendicular is measured as an angle along the full great circle through
/// `meridian`, in `(-180, 180]`. Beyond `±90` it lies on the opposite meridian, so when it falls
/// outside the segment the nearer endpoint is chosen by arc length around that circle.
fn closest_point_on_meridian_deg(
    lon: f64,
    lat: f64,
    meridian: f64,
    min_lat: f64,
    max_lat: f64,
) -> (f64, f64) {
    let delta_lon = (lon - meridian).to_radians();
    let lat_r = lat.to_radians();
    let foot = lat_r
        .sin()
        .atan2(lat_r.cos() * delta_lon.cos())
        .to_degrees();
    if (min_lat..=max_lat).contains(&foot) {
        return (meridian, foot);
    }
    let to_min = arc_between_deg(foot, min_lat);
    let to_max = arc_between_deg(foot, max_lat);
    if to_min <= to_max {
        (meridian, min_lat)
    } else {
        (meridian, max_lat)
    }
}

/// Angular separation of two positions on a circle, in `[0, 180]`.
fn arc_between_deg(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}
