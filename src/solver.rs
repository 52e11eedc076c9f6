//! Tour construction and local-search refinement.

use serde::Deserialize;
use tracing::debug;

use crate::haversine::distance;
use crate::point::GeoPoint;
use crate::tour::Tour;

/// Tours shorter than this are returned by the refiner untouched.
pub const MIN_REFINE_STOPS: usize = 4;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Hard cap on full 2-opt passes.
    pub max_passes: usize,
    /// A swap must shorten the tour by more than this many meters to be applied.
    pub improvement_tolerance_m: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_passes: 100,
            improvement_tolerance_m: 1.0,
        }
    }
}

/// Outcome of a refinement run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefineStats {
    pub passes: usize,
    pub swaps: usize,
}

/// Builds a visiting order by always moving to the closest unvisited point.
///
/// Ties go to the point that appears first in `points`. O(n^2).
pub fn nearest_neighbor(origin: &GeoPoint, points: &[GeoPoint]) -> Tour {
    let mut unvisited: Vec<&GeoPoint> = points.iter().collect();
    let mut ordered = Vec::with_capacity(points.len());
    let mut current = origin;

    while !unvisited.is_empty() {
        let mut best_index = 0;
        if unvisited.len() > 1 {
            let mut best_distance = f64::INFINITY;
            for (index, candidate) in unvisited.iter().enumerate() {
                let d = distance(current, candidate);
                if d < best_distance {
                    best_distance = d;
                    best_index = index;
                }
            }
        }

        // `remove` keeps the remaining points in input order for tie-breaking.
        let next = unvisited.remove(best_index);
        ordered.push(next.clone());
        current = next;
    }

    Tour::new(ordered)
}

/// Improves `tour` in place with 2-opt segment reversals.
///
/// Each pass scans all `(i, j)` pairs, comparing edges `(i, i+1)` and
/// `(j, (j+1) mod n)` with the edges obtained by reversing `i+1..=j`. Runs
/// until a pass applies no swap or `max_passes` is reached.
pub fn two_opt(tour: &mut Tour, options: &SolveOptions) -> RefineStats {
    let mut stats = RefineStats::default();
    let n = tour.len();
    if n < MIN_REFINE_STOPS {
        return stats;
    }

    let route = tour.points_mut();
    while stats.passes < options.max_passes {
        stats.passes += 1;
        let mut improved = false;

        for i in 0..n - 1 {
            for j in i + 1..n {
                let a = &route[i];
                let b = &route[i + 1];
                let c = &route[j];
                let d = &route[(j + 1) % n];

                let current = distance(a, b) + distance(c, d);
                let candidate = distance(a, c) + distance(b, d);

                if candidate < current - options.improvement_tolerance_m {
                    route[i + 1..=j].reverse();
                    stats.swaps += 1;
                    improved = true;
                }
            }
        }

        if !improved {
            break;
        }
    }

    stats
}

/// Nearest-neighbor construction followed by 2-opt when there are enough stops.
pub fn optimize(origin: &GeoPoint, points: &[GeoPoint], options: &SolveOptions) -> Tour {
    let mut tour = nearest_neighbor(origin, points);
    if tour.len() >= MIN_REFINE_STOPS {
        let before = tour.cyclic_length();
        let stats = two_opt(&mut tour, options);
        debug!(
            passes = stats.passes,
            swaps = stats.swaps,
            before_m = before,
            after_m = tour.cyclic_length(),
            "2-opt refinement finished"
        );
    }
    tour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PointKind;

    fn p(id: &str, lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(id, PointKind::Citizen, id, lat, lng)
    }

    #[test]
    fn test_nearest_neighbor_empty() {
        let tour = nearest_neighbor(&p("o", 1.0, 1.0), &[]);
        assert!(tour.is_empty());
    }

    #[test]
    fn test_nearest_neighbor_single() {
        let tour = nearest_neighbor(&p("o", 1.0, 1.0), &[p("a", 5.0, 5.0)]);
        assert_eq!(tour.ids(), vec!["a"]);
    }

    #[test]
    fn test_nearest_neighbor_on_a_line() {
        let origin = p("o", 0.0, 0.0);
        let points = vec![p("A", 0.0, 1.0), p("B", 0.0, 3.0), p("C", 0.0, 2.0)];
        let tour = nearest_neighbor(&origin, &points);
        assert_eq!(tour.ids(), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_nearest_neighbor_tie_goes_to_first_listed() {
        let origin = p("o", 1.0, 1.0);
        let points = vec![p("east", 1.0, 1.5), p("west", 1.0, 0.5)];
        let tour = nearest_neighbor(&origin, &points);
        assert_eq!(tour.ids(), vec!["east", "west"]);
    }

    #[test]
    fn test_two_opt_skips_short_tours() {
        let mut tour = Tour::new(vec![p("a", 1.0, 1.0), p("b", 2.0, 2.0), p("c", 1.0, 2.0)]);
        let original = tour.clone();
        let stats = two_opt(&mut tour, &SolveOptions::default());
        assert_eq!(tour, original);
        assert_eq!(stats, RefineStats::default());
    }

    #[test]
    fn test_two_opt_uncrosses_square() {
        let mut tour = Tour::new(vec![
            p("P1", 1.0, 1.0),
            p("P2", 1.01, 1.01),
            p("P3", 1.0, 1.01),
            p("P4", 1.01, 1.0),
        ]);
        let before = tour.cyclic_length();
        let stats = two_opt(&mut tour, &SolveOptions::default());
        assert_eq!(tour.ids(), vec!["P1", "P3", "P2", "P4"]);
        assert_eq!(stats.swaps, 1);
        assert_eq!(stats.passes, 2);
        assert!(tour.cyclic_length() < before);
    }

    #[test]
    fn test_two_opt_respects_pass_cap() {
        let mut tour = Tour::new(vec![
            p("P1", 1.0, 1.0),
            p("P2", 1.01, 1.01),
            p("P3", 1.0, 1.01),
            p("P4", 1.01, 1.0),
        ]);
        let options = SolveOptions {
            max_passes: 1,
            ..SolveOptions::default()
        };
        let stats = two_opt(&mut tour, &options);
        assert_eq!(stats.passes, 1);
    }

    #[test]
    fn test_tolerance_blocks_tiny_improvements() {
        let mut tour = Tour::new(vec![
            p("P1", 1.0, 1.0),
            p("P2", 1.00001, 1.00001),
            p("P3", 1.0, 1.00001),
            p("P4", 1.00001, 1.0),
        ]);
        let original = tour.clone();
        let stats = two_opt(&mut tour, &SolveOptions::default());
        assert_eq!(tour, original);
        assert_eq!(stats.swaps, 0);
    }

    #[test]
    fn test_optimize_returns_permutation() {
        let origin = p("o", 1.0, 1.0);
        let points = vec![
            p("a", 1.02, 1.03),
            p("b", 1.05, 1.01),
            p("c", 1.01, 1.04),
            p("d", 1.03, 1.02),
            p("e", 1.04, 1.05),
        ];
        let tour = optimize(&origin, &points, &SolveOptions::default());
        let mut ids = tour.ids();
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }
}
