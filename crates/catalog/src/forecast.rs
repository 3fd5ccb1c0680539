//! Concatenated synthetic catalogs.

use crate::error::CatalogError;
use crate::event::SeismicEvent;

/// The output of one forecast run: every synthetic catalog, concatenated.
///
/// Events of synthetic catalog `k` carry `catalog_id == k`. The number of
/// catalogs is stored explicitly so realisations without any events still
/// count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    events: Vec<SeismicEvent>,
    n_catalogs: usize,
}

impl Forecast {
    /// Creates a forecast of `n_catalogs` synthetic catalogs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CatalogIdOutOfRange`] if any event's
    /// `catalog_id` is outside `0..n_catalogs`.
    pub fn new(events: Vec<SeismicEvent>, n_catalogs: usize) -> Result<Self, CatalogError> {
        if let Some(bad) = events
            .iter()
            .find(|e| e.catalog_id < 0 || e.catalog_id as usize >= n_catalogs)
        {
            return Err(CatalogError::CatalogIdOutOfRange {
                catalog_id: bad.catalog_id,
                n_catalogs,
            });
        }
        Ok(Self { events, n_catalogs })
    }

    /// Creates a forecast whose catalog count is inferred as the largest
    /// `catalog_id` plus one.
    ///
    /// Trailing catalogs with no events cannot be recovered this way; use
    /// [`Forecast::new`] when the simulation count is known.
    pub fn from_events(events: Vec<SeismicEvent>) -> Result<Self, CatalogError> {
        let n_catalogs = events
            .iter()
            .map(|e| e.catalog_id)
            .max()
            .map_or(0, |max| (max + 1).max(0) as usize);
        Self::new(events, n_catalogs)
    }

    /// All events, in simulation order.
    pub fn events(&self) -> &[SeismicEvent] {
        &self.events
    }

    /// Consumes the forecast and returns its events.
    pub fn into_events(self) -> Vec<SeismicEvent> {
        self.events
    }

    /// Number of synthetic catalogs.
    pub fn n_catalogs(&self) -> usize {
        self.n_catalogs
    }

    /// Total number of events over all catalogs.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no catalog contains any event.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events of synthetic catalog `k`.
    pub fn catalog(&self, k: usize) -> impl Iterator<Item = &SeismicEvent> + '_ {
        self.events
            .iter()
            .filter(move |e| e.catalog_id == k as i64)
    }

    /// Number of events in each synthetic catalog, indexed by catalog id.
    pub fn counts_per_catalog(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_catalogs];
        for e in &self.events {
            counts[e.catalog_id as usize] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(catalog_id: i64, event_id: i64) -> SeismicEvent {
        let t = NaiveDate::from_ymd_opt(2022, 10, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        SeismicEvent {
            longitude: 0.0,
            latitude: 0.0,
            magnitude: 4.0,
            origin_time: t,
            depth: 10.0,
            catalog_id,
            event_id,
        }
    }

    #[test]
    fn counts_include_empty_catalogs() {
        let fc = Forecast::new(vec![event(0, 0), event(2, 0), event(2, 1)], 4).unwrap();
        assert_eq!(fc.n_catalogs(), 4);
        assert_eq!(fc.len(), 3);
        assert_eq!(fc.counts_per_catalog(), vec![1, 0, 2, 0]);
        assert_eq!(fc.catalog(2).count(), 2);
        assert_eq!(fc.catalog(1).count(), 0);
    }

    #[test]
    fn rejects_out_of_range_ids() {
        let err = Forecast::new(vec![event(3, 0)], 3).unwrap_err();
        assert_eq!(
            err,
            CatalogError::CatalogIdOutOfRange {
                catalog_id: 3,
                n_catalogs: 3
            }
        );
        assert!(Forecast::new(vec![event(-1, 0)], 3).is_err());
    }

    #[test]
    fn from_events_infers_count() {
        let fc = Forecast::from_events(vec![event(0, 0), event(1, 0), event(1, 1)]).unwrap();
        assert_eq!(fc.n_catalogs(), 2);
        assert!(Forecast::from_events(vec![]).unwrap().is_empty());
    }

    #[test]
    fn from_events_rejects_historical_events() {
        assert!(Forecast::from_events(vec![event(-1, 0)]).is_err());
    }
}
