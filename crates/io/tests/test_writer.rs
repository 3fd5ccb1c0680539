//! Integration test: forecast files round-trip through CSV.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use syncat_catalog::{Forecast, SeismicEvent};
use syncat_io::{ForecastNaming, IoError, read_forecast, write_forecast};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, 11, 5)
        .unwrap()
        .and_hms_opt(3, 22, 31)
        .unwrap()
}

fn fixture() -> Forecast {
    let source = SeismicEvent::historical(13.1234, 42.8012, 2.3, start(), 8.7, 0);
    let events = vec![
        source.relocated(4.0, start() + TimeDelta::microseconds(1_500_000), 0, 0),
        source.relocated(4.3, start() + TimeDelta::hours(5), 0, 1),
        source.relocated(5.1, start() + TimeDelta::minutes(7), 2, 0),
    ];
    Forecast::new(events, 4).expect("valid labels")
}

#[test]
fn write_forecast_layout() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let folder = dir.path().join("forecasts");

    let path = write_forecast(
        &fixture(),
        &folder,
        start(),
        start() + TimeDelta::days(1),
        ForecastNaming::StartDate,
    )
    .expect("write succeeds");
    assert_eq!(path, folder.join("syncat_2016-11-05.csv"));

    let text = fs::read_to_string(&path).expect("read back");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "lon, lat, M, time_string, depth, catalog_id, event_id"
    );
    assert_eq!(
        lines[1],
        "13.1234,42.8012,4.00,2016-11-05T03:22:32.500000,8.7,0,0"
    );
    assert_eq!(lines.len(), 4);
}

#[test]
fn round_trip_keeps_events_and_catalog_count() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let forecast = fixture();
    let path = write_forecast(
        &forecast,
        dir.path(),
        start(),
        start() + TimeDelta::days(1),
        ForecastNaming::StartAndEndDate,
    )
    .expect("write succeeds");
    assert!(path.ends_with("syncat_2016-11-05_2016-11-06.csv"));

    let back = read_forecast(&path, Some(4)).expect("read succeeds");
    assert_eq!(back, forecast);

    let inferred = read_forecast(&path, None).expect("read succeeds");
    assert_eq!(inferred.n_catalogs(), 3);
    assert_eq!(inferred.counts_per_catalog(), vec![2, 0, 1]);

    let err = read_forecast(&path, Some(2)).unwrap_err();
    assert!(matches!(err, IoError::Catalog(_)), "got {err:?}");
}

#[test]
fn rewriting_a_window_overwrites() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let end = start() + TimeDelta::days(1);
    let first = write_forecast(&fixture(), dir.path(), start(), end, ForecastNaming::StartDate)
        .expect("first write");
    let empty = Forecast::new(Vec::new(), 1).expect("empty forecast");
    let second = write_forecast(&empty, dir.path(), start(), end, ForecastNaming::StartDate)
        .expect("second write");
    assert_eq!(first, second);
    let text = fs::read_to_string(&second).expect("read back");
    assert_eq!(text.lines().count(), 1);
}
