// File: crates/stockline-core/src/series.rs
// Summary: Series store: raw daily records in, sorted (date, close) point sequences out.
// Notes:
// - Only the date token and the close column are consumed; open/high/low/volume
//   are carried in `RawRecord` so hosts can pass feed rows through untouched.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::scale::extent;

/// Date token format of daily records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One daily feed row: `(date, open, high, low, close, volume)`.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl RawRecord {
    pub fn new(date: impl Into<String>, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self { date: date.into(), open, high, low, close, volume }
    }

    /// Row where only the close is known; other columns repeat it, volume is zero.
    pub fn close_only(date: impl Into<String>, close: f64) -> Self {
        Self::new(date, close, close, close, close, 0.0)
    }
}

/// A labelled dataset as delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct RawSeries {
    pub label: String,
    pub records: Vec<RawRecord>,
}

impl RawSeries {
    pub fn new(label: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self { label: label.into(), records }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub date: NaiveDateTime,
    pub price: f64,
}

impl Point {
    pub fn new(date: NaiveDateTime, price: f64) -> Self { Self { date, price } }
}

/// Points sorted ascending by date (stable: equal dates keep input order).
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    points: Vec<Point>,
}

impl Series {
    /// Build from points in any order; sorts them.
    pub fn from_points(label: impl Into<String>, mut points: Vec<Point>) -> Self {
        points.sort_by(|a, b| a.date.cmp(&b.date));
        Self { label: label.into(), points }
    }

    pub fn points(&self) -> &[Point] { &self.points }

    pub fn len(&self) -> usize { self.points.len() }

    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Lower-bound search: leftmost index whose date is not less than `t`.
    /// Returns `len()` when every date is earlier than `t`.
    pub fn lower_bound(&self, t: NaiveDateTime) -> usize {
        self.points.partition_point(|p| p.date < t)
    }
}

/// Parse a `YYYY-MM-DD` token into a midnight timestamp.
pub fn parse_date(token: &str) -> Option<NaiveDateTime> {
    NaiveDate::parse_from_str(token.trim(), DATE_FORMAT)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Turn raw datasets into sorted series. Fails before producing anything
/// if the list is empty, a series has no records, a date token does not
/// parse, or a close is not finite.
pub fn normalize(raw: &[RawSeries]) -> ChartResult<Vec<Series>> {
    if raw.is_empty() {
        warn!("rejecting chart input: no datasets");
        return Err(ChartError::NoDatasets);
    }
    raw.iter().map(normalize_one).collect()
}

fn normalize_one(raw: &RawSeries) -> ChartResult<Series> {
    if raw.records.is_empty() {
        warn!(label = %raw.label, "rejecting chart input: empty series");
        return Err(ChartError::EmptySeries { label: raw.label.clone() });
    }
    let points = raw
        .records
        .iter()
        .map(|rec| {
            let date = parse_date(&rec.date).ok_or_else(|| ChartError::InvalidDate {
                label: raw.label.clone(),
                token: rec.date.clone(),
            })?;
            if !rec.close.is_finite() {
                return Err(ChartError::InvalidPrice { label: raw.label.clone(), date: rec.date.clone() });
            }
            Ok(Point::new(date, rec.close))
        })
        .collect::<ChartResult<Vec<_>>>()?;
    let series = Series::from_points(raw.label.clone(), points);
    debug!(label = %series.label, points = series.len(), "normalized series");
    Ok(series)
}

/// All points of all series, series by series, in stored order.
pub fn flatten(series: &[Series]) -> Vec<Point> {
    series.iter().flat_map(|s| s.points.iter().copied()).collect()
}

/// `[earliest, latest]` across the given points.
pub fn date_extent(points: &[Point]) -> Option<[NaiveDateTime; 2]> {
    extent(points.iter().map(|p| p.date))
}

/// `[lowest, highest]` price across the given points.
pub fn price_extent(points: &[Point]) -> Option<[f64; 2]> {
    extent(points.iter().map(|p| p.price))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_days_only() {
        assert!(parse_date("2018-03-27").is_some());
        assert!(parse_date(" 2018-03-27 ").is_some());
        assert!(parse_date("2018-13-01").is_none());
        assert!(parse_date("27/03/2018").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn sort_is_stable_for_equal_dates() {
        let d = parse_date("2018-01-02").unwrap();
        let e = parse_date("2018-01-01").unwrap();
        let s = Series::from_points("x", vec![Point::new(d, 1.0), Point::new(e, 2.0), Point::new(d, 3.0)]);
        let prices: Vec<f64> = s.points().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn lower_bound_past_end_is_len() {
        let s = Series::from_points("x", vec![Point::new(parse_date("2018-01-01").unwrap(), 1.0)]);
        assert_eq!(s.lower_bound(parse_date("2019-01-01").unwrap()), 1);
        assert_eq!(s.lower_bound(parse_date("2017-01-01").unwrap()), 0);
    }
}
