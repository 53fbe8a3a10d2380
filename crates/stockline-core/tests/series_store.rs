// File: crates/stockline-core/tests/series_store.rs
// Purpose: Normalization of raw daily records, flattening, extrema and input rejection.

use stockline_core::series::{date_extent, parse_date, price_extent};
use stockline_core::{flatten, normalize, ChartError, Point, RawRecord, RawSeries, Series};

fn pt(date: &str, price: f64) -> Point {
    Point::new(parse_date(date).unwrap(), price)
}

#[test]
fn normalize_keeps_close_and_sorts_by_date() {
    let raw = RawSeries::new(
        "AAPL",
        vec![
            RawRecord::new("2018-03-27", 173.68, 175.15, 166.92, 168.34, 38_962_839.0),
            RawRecord::new("2018-03-23", 168.39, 169.92, 164.94, 164.94, 40_248_954.0),
            RawRecord::new("2018-03-26", 168.07, 173.10, 166.44, 172.77, 36_272_617.0),
        ],
    );
    let series = normalize(&[raw]).expect("valid input");
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].label, "AAPL");
    assert_eq!(
        series[0].points(),
        &[pt("2018-03-23", 164.94), pt("2018-03-26", 172.77), pt("2018-03-27", 168.34)]
    );
}

#[test]
fn flatten_concatenates_in_series_order() {
    let a = Series::from_points("a", vec![pt("2018-01-01", 1.0), pt("2018-01-02", 2.0)]);
    let b = Series::from_points("b", vec![pt("2017-06-01", 3.0)]);
    let flat = flatten(&[a, b]);
    assert_eq!(flat, vec![pt("2018-01-01", 1.0), pt("2018-01-02", 2.0), pt("2017-06-01", 3.0)]);

    assert_eq!(date_extent(&flat), Some([parse_date("2017-06-01").unwrap(), parse_date("2018-01-02").unwrap()]));
    assert_eq!(price_extent(&flat), Some([1.0, 3.0]));
}

#[test]
fn extrema_span_every_series_not_just_the_last() {
    let raw = vec![
        RawSeries::new("wide", vec![RawRecord::close_only("2016-01-04", 5.0), RawRecord::close_only("2018-12-31", 500.0)]),
        RawSeries::new("narrow", vec![RawRecord::close_only("2017-06-01", 50.0), RawRecord::close_only("2017-06-02", 51.0)]),
    ];
    let flat = flatten(&normalize(&raw).unwrap());
    assert_eq!(price_extent(&flat), Some([5.0, 500.0]));
    assert_eq!(
        date_extent(&flat),
        Some([parse_date("2016-01-04").unwrap(), parse_date("2018-12-31").unwrap()])
    );
}

#[test]
fn rejects_empty_dataset_list() {
    assert_eq!(normalize(&[]), Err(ChartError::NoDatasets));
}

#[test]
fn rejects_series_without_records() {
    let raw = vec![
        RawSeries::new("ok", vec![RawRecord::close_only("2018-01-01", 1.0)]),
        RawSeries::new("empty", Vec::new()),
    ];
    let err = normalize(&raw).unwrap_err();
    assert_eq!(err, ChartError::EmptySeries { label: "empty".into() });
    assert!(err.is_input_error());
}

#[test]
fn rejects_unparseable_date_token() {
    let raw = vec![RawSeries::new("bad", vec![RawRecord::close_only("03/27/2018", 1.0)])];
    assert_eq!(
        normalize(&raw),
        Err(ChartError::InvalidDate { label: "bad".into(), token: "03/27/2018".into() })
    );
}

#[test]
fn rejects_non_finite_close() {
    let raw = vec![RawSeries::new("nan", vec![RawRecord::close_only("2018-01-01", f64::NAN)])];
    let err = normalize(&raw).unwrap_err();
    assert!(matches!(err, ChartError::InvalidPrice { ref label, .. } if label == "nan"));
}
