// File: crates/stockline-core/src/scale.rs
// Summary: Linear (value) and time scales mapping a data domain onto a pixel range.

use chrono::{DateTime, NaiveDateTime};

use crate::ticks;

/// Bidirectional mapping between a data domain and a pixel range.
pub trait Scale {
    type Value: Copy + PartialOrd;

    /// Domain value to pixel. Values outside the domain extrapolate.
    fn map(&self, value: Self::Value) -> f64;
    /// Pixel to domain value; exact inverse of [`Scale::map`].
    fn invert(&self, px: f64) -> Self::Value;
    fn domain(&self) -> [Self::Value; 2];
    fn range(&self) -> [f64; 2];
    /// Roughly `count` evenly spaced, human-friendly values inside the domain.
    fn ticks(&self, count: usize) -> Vec<Self::Value>;
}

/// Numeric scale, e.g. price onto `[height, 0]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// True when the domain collapses to a single value.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let span = self.domain[1] - self.domain[0];
        span == 0.0 || !span.is_finite()
    }
}

impl Scale for LinearScale {
    type Value = f64;

    #[inline]
    fn map(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if self.is_degenerate() {
            return r0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    #[inline]
    fn invert(&self, px: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let rspan = r1 - r0;
        if self.is_degenerate() || rspan == 0.0 {
            return d0;
        }
        d0 + (px - r0) / rspan * (d1 - d0)
    }

    fn domain(&self) -> [f64; 2] { self.domain }

    fn range(&self) -> [f64; 2] { self.range }

    fn ticks(&self, count: usize) -> Vec<f64> {
        ticks::linear_ticks(self.domain[0], self.domain[1], count)
    }
}

/// Time scale; instants are mapped through their millisecond timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    domain: [NaiveDateTime; 2],
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain: [NaiveDateTime; 2], range: [f64; 2]) -> Self {
        let linear = LinearScale::new([to_millis(domain[0]), to_millis(domain[1])], range);
        Self { domain, linear }
    }

    pub fn is_degenerate(&self) -> bool { self.linear.is_degenerate() }
}

impl Scale for TimeScale {
    type Value = NaiveDateTime;

    #[inline]
    fn map(&self, value: NaiveDateTime) -> f64 {
        self.linear.map(to_millis(value))
    }

    fn invert(&self, px: f64) -> NaiveDateTime {
        from_millis(self.linear.invert(px).round())
    }

    fn domain(&self) -> [NaiveDateTime; 2] { self.domain }

    fn range(&self) -> [f64; 2] { self.linear.range() }

    fn ticks(&self, count: usize) -> Vec<NaiveDateTime> {
        ticks::time_ticks(self.domain[0], self.domain[1], count)
    }
}

/// Milliseconds since the Unix epoch, treating the naive instant as UTC.
#[inline]
pub fn to_millis(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp_millis() as f64
}

/// Inverse of [`to_millis`]; saturates at chrono's representable range.
pub fn from_millis(ms: f64) -> NaiveDateTime {
    let clamped = ms.clamp(i64::MIN as f64, i64::MAX as f64) as i64;
    match DateTime::from_timestamp_millis(clamped) {
        Some(dt) => dt.naive_utc(),
        None if clamped < 0 => NaiveDateTime::MIN,
        None => NaiveDateTime::MAX,
    }
}

/// Minimum and maximum of `values`, or `None` when empty.
pub fn extent<T, I>(values: I) -> Option<[T; 2]>
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = T>,
{
    let mut it = values.into_iter();
    let first = it.next()?;
    let mut lo = first;
    let mut hi = first;
    for v in it {
        if v < lo { lo = v; }
        if v > hi { hi = v; }
    }
    Some([lo, hi])
}
