use std::f64::consts::PI;

use crate::context::normalize::norm_lon_deg;
use crate::context::SpatialContext;
use crate::distance::util::{
    calc_box_by_dist_from_pt_deg, dist_haversine_rad, dist_law_of_cosines_rad,
    point_on_bearing_rad, DEGREES_PER_RADIAN,
};
use crate::distance::DistanceCalculator;
use crate::shape::{Circle, Point, Rectangle};

/// The spherical formula used to compute great-circle distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeodesicFormula {
    /// Numerically stable for small distances.
    #[default]
    Haversine,
    /// Spherical law of cosines. Cheaper, but imprecise below a few meters.
    LawOfCosines,
}

/// Great-circle distance on a sphere, in degrees of arc.
///
/// Coordinates are longitude/latitude in degrees. Areas are reported on a sphere of
/// [`radius`](Self::radius), which defaults to [`DEGREES_PER_RADIAN`] so that they come out in
/// square degrees.
#[derive(Debug, Clone, Copy)]
pub struct GeodesicDistance {
    formula: GeodesicFormula,
    radius: f64,
}

impl Default for GeodesicDistance {
    fn default() -> Self {
        Self {
            formula: GeodesicFormula::Haversine,
            radius: DEGREES_PER_RADIAN,
        }
    }
}

impl GeodesicDistance {
    /// Create a new geodesic calculator using the given formula.
    pub fn new(formula: GeodesicFormula) -> Self {
        Self {
            formula,
            ..Default::default()
        }
    }

    /// Use a custom sphere radius for area computations.
    pub fn with_radius(self, radius: f64) -> Self {
        Self { radius, ..self }
    }

    pub fn formula(&self) -> GeodesicFormula {
        self.formula
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl DistanceCalculator for GeodesicDistance {
    fn distance_xy(&self, from: &Point, to_x: f64, to_y: f64) -> f64 {
        let lat1 = from.y().to_radians();
        let lon1 = from.x().to_radians();
        let lat2 = to_y.to_radians();
        let lon2 = to_x.to_radians();
        let radians = match self.formula {
            GeodesicFormula::Haversine => dist_haversine_rad(lat1, lon1, lat2, lon2),
            GeodesicFormula::LawOfCosines => dist_law_of_cosines_rad(lat1, lon1, lat2, lon2),
        };
        radians.to_degrees()
    }

    fn calc_box_by_dist_from_pt(
        &self,
        from: &Point,
        distance: f64,
        _ctx: &SpatialContext,
    ) -> Rectangle {
        calc_box_by_dist_from_pt_deg(from.y(), from.x(), distance)
    }

    fn point_on_bearing(
        &self,
        from: &Point,
        distance: f64,
        bearing_deg: f64,
        _ctx: &SpatialContext,
    ) -> Point {
        if distance == 0.0 {
            return *from;
        }
        let (lat, lon) = point_on_bearing_rad(
            from.y().to_radians(),
            from.x().to_radians(),
            distance.to_radians(),
            bearing_deg.to_radians(),
        );
        Point::new(norm_lon_deg(lon.to_degrees()), lat.to_degrees())
    }

    fn area_rectangle(&self, rect: &Rectangle) -> f64 {
        let lat1 = rect.min_y().to_radians();
        let lat2 = rect.max_y().to_radians();
        PI / 180.0 * self.radius * self.radius * (lat1.sin() - lat2.sin()).abs() * rect.width()
    }

    fn area_circle(&self, circle: &Circle) -> f64 {
        let angle = circle.radius().to_radians();
        2.0 * PI * self.radius * self.radius * (1.0 - angle.cos())
    }
}
