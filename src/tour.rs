//! Visiting order over a set of points.

use serde::{Deserialize, Serialize};

use crate::haversine::distance;
use crate::point::GeoPoint;

/// An ordered sequence of stops, excluding the origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tour {
    points: Vec<GeoPoint>,
}

impl Tour {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&GeoPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&GeoPoint> {
        self.points.last()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.id.as_str()).collect()
    }

    /// Length of the closed loop through every stop, in meters.
    ///
    /// This is the quantity the 2-opt refiner minimizes.
    pub fn cyclic_length(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| distance(&self.points[i], &self.points[(i + 1) % n]))
            .sum()
    }

    /// Length of the open path origin -> first stop -> ... -> last stop, in meters.
    pub fn path_length_from(&self, origin: &GeoPoint) -> f64 {
        let mut current = origin;
        let mut total = 0.0;
        for point in &self.points {
            total += distance(current, point);
            current = point;
        }
        total
    }

    pub(crate) fn points_mut(&mut self) -> &mut Vec<GeoPoint> {
        &mut self.points
    }
}

impl From<Vec<GeoPoint>> for Tour {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PointKind;

    fn p(id: &str, lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(id, PointKind::Citizen, id, lat, lng)
    }

    #[test]
    fn test_empty_and_single_have_zero_cyclic_length() {
        assert_eq!(Tour::default().cyclic_length(), 0.0);
        assert_eq!(Tour::new(vec![p("a", 1.0, 1.0)]).cyclic_length(), 0.0);
    }

    #[test]
    fn test_two_stop_cycle_is_out_and_back() {
        let tour = Tour::new(vec![p("a", 1.0, 1.0), p("b", 2.0, 1.0)]);
        let one_way = distance(&tour.points()[0], &tour.points()[1]);
        assert!((tour.cyclic_length() - 2.0 * one_way).abs() < 1e-6);
    }

    #[test]
    fn test_path_length_from_origin() {
        let origin = p("o", 1.0, 1.0);
        let tour = Tour::new(vec![p("a", 2.0, 1.0), p("b", 3.0, 1.0)]);
        let expected = distance(&origin, &tour.points()[0]) + distance(&tour.points()[0], &tour.points()[1]);
        assert!((tour.path_length_from(&origin) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_ids_follow_order() {
        let tour = Tour::new(vec![p("b", 2.0, 1.0), p("a", 1.0, 1.0)]);
        assert_eq!(tour.ids(), vec!["b", "a"]);
    }
}
