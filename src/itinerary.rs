//! Per-stop visit times for an ordered set of stops.
//!
//! Each stop starts when the previous one ends plus a fixed travel buffer.
//! Changing the day's start time or the buffer recomputes the whole day,
//! changing one stop's duration recomputes the stops after it, and editing a
//! single stop's time touches only that stop.
//!
//! Whether a whole-day recompute keeps hand-edited times is controlled by
//! `ScheduleConfig::preserve_manual_overrides`. When it is off (the default),
//! manual edits are discarded on the next global change.

use chrono::{Duration, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ScheduleError;
use crate::point::GeoPoint;
use crate::tour::Tour;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub default_duration_minutes: u32,
    pub travel_buffer_minutes: u32,
    /// Keep manually edited stop times across whole-day recomputes.
    pub preserve_manual_overrides: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            default_duration_minutes: 30,
            travel_buffer_minutes: 15,
            preserve_manual_overrides: false,
        }
    }
}

/// A visit with its scheduled start.
///
/// Times are wall-clock `HH:MM` and wrap past midnight, so a late stop can
/// start earlier on the clock than the one before it. See
/// [`Itinerary::wraps_midnight`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledStop {
    pub point: GeoPoint,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    /// Start time was set by hand rather than computed.
    #[serde(default)]
    pub manual: bool,
}

impl ScheduledStop {
    pub fn end_time(&self) -> NaiveTime {
        add_minutes(self.start_time, self.duration_minutes)
    }

    fn crosses_midnight(&self) -> bool {
        self.end_time() < self.start_time
    }
}

/// Parses `HH:MM`. An `HH:MM:SS` value is accepted with its seconds dropped.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, ScheduleError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
        .and_then(|time| time.with_second(0))
        .and_then(|time| time.with_nanosecond(0))
        .ok_or_else(|| ScheduleError::UnparsableTime(value.to_string()))
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

/// Wraps past midnight.
fn add_minutes(time: NaiveTime, minutes: u32) -> NaiveTime {
    time + Duration::minutes(i64::from(minutes))
}

/// One-shot schedule: every stop gets the default duration.
pub fn schedule(tour: &Tour, config: &ScheduleConfig) -> Vec<ScheduledStop> {
    Itinerary::new(tour, config.clone()).into_stops()
}

/// A day's visits with their scheduled times, owned by one planning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    config: ScheduleConfig,
    stops: Vec<ScheduledStop>,
}

impl Itinerary {
    pub fn new(tour: &Tour, mut config: ScheduleConfig) -> Self {
        config.start_time = truncate_to_minute(config.start_time);
        let stops = tour
            .points()
            .iter()
            .map(|point| ScheduledStop {
                point: point.clone(),
                start_time: config.start_time,
                duration_minutes: config.default_duration_minutes,
                manual: false,
            })
            .collect();

        let mut itinerary = Self { config, stops };
        itinerary.recompute_all();
        itinerary
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn stops(&self) -> &[ScheduledStop] {
        &self.stops
    }

    pub fn into_stops(self) -> Vec<ScheduledStop> {
        self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// When the last visit ends.
    pub fn end_time(&self) -> Option<NaiveTime> {
        self.stops.last().map(ScheduledStop::end_time)
    }

    /// True when the computed day runs past midnight.
    ///
    /// Stop times are then no longer ordered on the clock. Hand-edited stops
    /// placed before their predecessor do not count.
    pub fn wraps_midnight(&self) -> bool {
        self.stops.iter().any(ScheduledStop::crosses_midnight)
            || self
                .stops
                .windows(2)
                .any(|pair| !pair[1].manual && pair[1].start_time < pair[0].end_time())
    }

    /// Changes the day's start time and recomputes every stop.
    ///
    /// An unparsable value leaves the itinerary untouched.
    pub fn set_start_time(&mut self, value: &str) -> Result<(), ScheduleError> {
        let start_time = parse_hhmm(value).inspect_err(|err| {
            warn!(error = %err, "keeping previous start time");
        })?;
        self.config.start_time = start_time;
        self.recompute_all();
        Ok(())
    }

    pub fn set_travel_buffer(&mut self, minutes: u32) {
        self.config.travel_buffer_minutes = minutes;
        self.recompute_all();
    }

    pub fn set_preserve_manual_overrides(&mut self, preserve: bool) {
        self.config.preserve_manual_overrides = preserve;
    }

    /// Changes one stop's duration and recomputes the stops after it.
    pub fn set_stop_duration(&mut self, index: usize, minutes: u32) -> Result<(), ScheduleError> {
        let len = self.stops.len();
        let stop = self
            .stops
            .get_mut(index)
            .ok_or(ScheduleError::StopOutOfRange { index, len })?;
        stop.duration_minutes = minutes;
        self.recompute_from(index);
        Ok(())
    }

    /// Sets one stop's start time by hand. Other stops are not touched.
    ///
    /// An unparsable value keeps the stop's previous time.
    pub fn set_stop_time(&mut self, index: usize, value: &str) -> Result<(), ScheduleError> {
        let len = self.stops.len();
        let stop = self
            .stops
            .get_mut(index)
            .ok_or(ScheduleError::StopOutOfRange { index, len })?;
        let start_time = parse_hhmm(value).inspect_err(|err| {
            warn!(stop = index, error = %err, "keeping previous stop time");
        })?;
        stop.start_time = start_time;
        stop.manual = true;
        Ok(())
    }

    /// Adopts a new visiting order, keeping each point's duration.
    ///
    /// Points new to the itinerary get the default duration. Times are recomputed.
    pub fn reorder(&mut self, tour: &Tour) {
        let mut previous = std::mem::take(&mut self.stops);
        self.stops = tour
            .points()
            .iter()
            .map(|point| {
                let existing = previous
                    .iter()
                    .position(|stop| stop.point.id == point.id)
                    .map(|index| previous.swap_remove(index));
                ScheduledStop {
                    point: point.clone(),
                    start_time: self.config.start_time,
                    duration_minutes: existing
                        .as_ref()
                        .map_or(self.config.default_duration_minutes, |stop| stop.duration_minutes),
                    manual: false,
                }
            })
            .collect();
        self.recompute_all();
    }

    fn recompute_all(&mut self) {
        let preserve = self.config.preserve_manual_overrides;
        if !preserve {
            for stop in &mut self.stops {
                stop.manual = false;
            }
        }
        if let Some(first) = self.stops.first_mut() {
            if !first.manual {
                first.start_time = self.config.start_time;
            }
        }
        self.recompute_from(0);
    }

    /// Cascades times to every stop after `index`.
    fn recompute_from(&mut self, index: usize) {
        let preserve = self.config.preserve_manual_overrides;
        let buffer = self.config.travel_buffer_minutes;
        for i in index + 1..self.stops.len() {
            if preserve && self.stops[i].manual {
                continue;
            }
            let previous = &self.stops[i - 1];
            let start_time = add_minutes(previous.end_time(), buffer);
            self.stops[i].start_time = start_time;
            self.stops[i].manual = false;
        }
        debug!(from = index, stops = self.stops.len(), "itinerary recomputed");
    }
}

/// `HH:MM` string representation for serde.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_hhmm(&value).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => serializer.serialize_some(&super::super::format_hhmm(*time)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|value| super::super::parse_hhmm(&value).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
