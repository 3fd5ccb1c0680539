//! A single earthquake record.

use chrono::NaiveDateTime;

/// `catalog_id` carried by events of an observed (historical) catalog.
pub const HISTORICAL_CATALOG_ID: i64 = -1;

/// One earthquake record.
///
/// Historical events carry [`HISTORICAL_CATALOG_ID`]; synthetic events carry
/// the index of the simulation that produced them and an `event_id` that is
/// contiguous within that simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeismicEvent {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Magnitude.
    pub magnitude: f64,
    /// Origin time, microsecond precision.
    pub origin_time: NaiveDateTime,
    /// Hypocentral depth, in the units of the input catalog.
    pub depth: f64,
    /// Synthetic catalog index, or [`HISTORICAL_CATALOG_ID`].
    pub catalog_id: i64,
    /// Event index within its catalog.
    pub event_id: i64,
}

impl SeismicEvent {
    /// Creates an observed event tagged with [`HISTORICAL_CATALOG_ID`].
    pub fn historical(
        longitude: f64,
        latitude: f64,
        magnitude: f64,
        origin_time: NaiveDateTime,
        depth: f64,
        event_id: i64,
    ) -> Self {
        Self {
            longitude,
            latitude,
            magnitude,
            origin_time,
            depth,
            catalog_id: HISTORICAL_CATALOG_ID,
            event_id,
        }
    }

    /// Builds a new event at this event's location (longitude, latitude,
    /// depth) with a fresh magnitude, origin time and labels.
    ///
    /// `self` is left untouched.
    pub fn relocated(
        &self,
        magnitude: f64,
        origin_time: NaiveDateTime,
        catalog_id: i64,
        event_id: i64,
    ) -> Self {
        Self {
            longitude: self.longitude,
            latitude: self.latitude,
            magnitude,
            origin_time,
            depth: self.depth,
            catalog_id,
            event_id,
        }
    }

    /// Returns `true` if the event belongs to an observed catalog.
    pub fn is_historical(&self) -> bool {
        self.catalog_id == HISTORICAL_CATALOG_ID
    }
}
