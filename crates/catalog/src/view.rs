//! Borrowed, filtered slices of a catalog.

use chrono::{NaiveDateTime, TimeDelta};

use crate::event::SeismicEvent;

/// Read-only selection of events borrowed from a [`Catalog`](crate::Catalog).
///
/// Every filter returns a new view referencing the same underlying events;
/// nothing is copied or mutated. All operations are total: an empty view
/// filters to an empty view.
#[derive(Debug, Clone, Default)]
pub struct CatalogView<'a> {
    events: Vec<&'a SeismicEvent>,
}

impl<'a> CatalogView<'a> {
    /// Creates a view over the given events.
    pub fn new(events: impl IntoIterator<Item = &'a SeismicEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    fn filter(&self, keep: impl Fn(&SeismicEvent) -> bool) -> Self {
        Self {
            events: self.events.iter().copied().filter(|e| keep(e)).collect(),
        }
    }

    /// Events that occurred strictly before `t0`.
    pub fn past(&self, t0: NaiveDateTime) -> Self {
        self.filter(|e| e.origin_time < t0)
    }

    /// Events at or after `t0 - lookback`.
    ///
    /// A lookback reaching before the earliest representable date keeps
    /// every event. Intended for a view already restricted by
    /// [`past`](Self::past).
    pub fn within_lookback(&self, t0: NaiveDateTime, lookback: TimeDelta) -> Self {
        match t0.checked_sub_signed(lookback) {
            Some(from) => self.filter(|e| e.origin_time >= from),
            None => self.clone(),
        }
    }

    /// Events with `magnitude >= threshold`.
    pub fn above_magnitude(&self, threshold: f64) -> Self {
        self.filter(|e| e.magnitude >= threshold)
    }

    /// Oldest and newest origin times, found by scanning. `None` if empty.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut it = self.events.iter().map(|e| e.origin_time);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    /// Oldest origin time, or `None` if empty.
    pub fn earliest(&self) -> Option<NaiveDateTime> {
        self.events.iter().map(|e| e.origin_time).min()
    }

    /// Number of events in the view.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns the event at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&'a SeismicEvent> {
        self.events.get(index).copied()
    }

    /// Iterates over the referenced events.
    pub fn iter(&self) -> impl Iterator<Item = &'a SeismicEvent> + '_ {
        self.events.iter().copied()
    }
}
