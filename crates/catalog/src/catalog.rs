//! Owned, immutable historical catalog.

use chrono::NaiveDateTime;

use crate::event::SeismicEvent;
use crate::view::CatalogView;

/// An ordered sequence of observed events.
///
/// Chronological order is not required: every time-span computation scans
/// the events instead of relying on element positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    events: Vec<SeismicEvent>,
}

impl Catalog {
    /// Wraps a vector of events.
    pub fn new(events: Vec<SeismicEvent>) -> Self {
        Self { events }
    }

    /// Returns the events in load order.
    pub fn events(&self) -> &[SeismicEvent] {
        &self.events
    }

    /// Returns the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the catalog holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates over the events in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, SeismicEvent> {
        self.events.iter()
    }

    /// Returns a view over every event.
    pub fn view(&self) -> CatalogView<'_> {
        CatalogView::new(&self.events)
    }

    /// Oldest and newest origin times, or `None` if empty.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.view().time_span()
    }
}

impl FromIterator<SeismicEvent> for Catalog {
    fn from_iter<I: IntoIterator<Item = SeismicEvent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a SeismicEvent;
    type IntoIter = std::slice::Iter<'a, SeismicEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
