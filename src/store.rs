//! Finalized routes as handed to storage, and their lifecycle.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;
use crate::itinerary::{Itinerary, hhmm};
use crate::planner::RoutePlan;
use crate::point::PointKind;

/// Route lifecycle. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl RouteStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn can_transition_to(self, next: RouteStatus) -> bool {
        use RouteStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress) | (InProgress, Completed) | (Pending | InProgress, Cancelled)
        )
    }

    pub fn transition(self, next: RouteStatus) -> Result<RouteStatus, LifecycleError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(LifecycleError::InvalidTransition { from: self, to: next })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStopRecord {
    pub kind: PointKind,
    pub reference_id: String,
    pub name: String,
    pub address: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub visited: bool,
    pub visit_note: Option<String>,
    #[serde(default, with = "hhmm::option")]
    pub scheduled_time: Option<NaiveTime>,
    pub estimated_duration_minutes: Option<u32>,
}

/// Route header plus its ordered stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub title: String,
    pub scheduled_date: NaiveDate,
    pub status: RouteStatus,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub stops: Vec<RouteStopRecord>,
}

impl RouteRecord {
    /// Snapshot of a plan, in its final order.
    ///
    /// Scheduled times and durations come from `itinerary` when given; its stops
    /// are matched to the plan's by point id.
    pub fn from_plan(
        title: impl Into<String>,
        scheduled_date: NaiveDate,
        plan: &RoutePlan,
        itinerary: Option<&Itinerary>,
    ) -> Self {
        let stops = plan
            .ordered_points
            .points()
            .iter()
            .map(|point| {
                let scheduled = itinerary.and_then(|itinerary| {
                    itinerary.stops().iter().find(|stop| stop.point.id == point.id)
                });
                RouteStopRecord {
                    kind: point.kind,
                    reference_id: point.id.clone(),
                    name: point.name.clone(),
                    address: point.address.clone(),
                    lat: point.lat,
                    lng: point.lng,
                    visited: false,
                    visit_note: None,
                    scheduled_time: scheduled.map(|stop| stop.start_time),
                    estimated_duration_minutes: scheduled.map(|stop| stop.duration_minutes),
                }
            })
            .collect();

        Self {
            title: title.into(),
            scheduled_date,
            status: RouteStatus::Pending,
            distance_meters: plan.distance_meters,
            duration_seconds: plan.duration_seconds,
            stops,
        }
    }

    pub fn transition(&mut self, next: RouteStatus) -> Result<(), LifecycleError> {
        self.status = self.status.transition(next)?;
        Ok(())
    }

    /// Toggles a stop's visited flag, optionally replacing its note.
    pub fn mark_visited(
        &mut self,
        index: usize,
        visited: bool,
        note: Option<String>,
    ) -> Result<(), LifecycleError> {
        let len = self.stops.len();
        let stop = self
            .stops
            .get_mut(index)
            .ok_or(LifecycleError::StopOutOfRange { index, len })?;
        stop.visited = visited;
        if note.is_some() {
            stop.visit_note = note;
        }
        Ok(())
    }

    pub fn visited_count(&self) -> usize {
        self.stops.iter().filter(|stop| stop.visited).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::RouteStatus::*;

    #[test]
    fn test_allowed_transitions() {
        assert_eq!(Pending.transition(InProgress), Ok(InProgress));
        assert_eq!(InProgress.transition(Completed), Ok(Completed));
        assert_eq!(Pending.transition(Cancelled), Ok(Cancelled));
        assert_eq!(InProgress.transition(Cancelled), Ok(Cancelled));
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for next in [Pending, InProgress, Completed, Cancelled] {
                assert!(terminal.transition(next).is_err());
            }
        }
    }

    #[test]
    fn test_scheduled_time_serializes_hhmm() {
        let stop = RouteStopRecord {
            kind: PointKind::Citizen,
            reference_id: "c-1".to_string(),
            name: "Ana".to_string(),
            address: None,
            lat: -23.5,
            lng: -46.6,
            visited: false,
            visit_note: None,
            scheduled_time: NaiveTime::from_hms_opt(9, 45, 0),
            estimated_duration_minutes: Some(30),
        };
        let json = serde_json::to_string(&stop).unwrap();
        assert!(json.contains("\"scheduled_time\":\"09:45\""));
        let back: RouteStopRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stop);

        let unscheduled = RouteStopRecord { scheduled_time: None, ..stop };
        let json = serde_json::to_string(&unscheduled).unwrap();
        assert!(json.contains("\"scheduled_time\":null"));
        let back: RouteStopRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scheduled_time, None);
    }

    #[test]
    fn test_cannot_skip_in_progress() {
        assert_eq!(
            Pending.transition(Completed),
            Err(LifecycleError::InvalidTransition { from: Pending, to: Completed })
        );
        assert!(InProgress.transition(Pending).is_err());
    }
}
