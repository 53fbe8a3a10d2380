// File: crates/stockline-core/src/ticks.rs
// Summary: Tick generation: 1-2-5 nice steps for numbers, a calendar step ladder for time.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::scale::{from_millis, to_millis};

/// Upper bound on ticks enumerated for one axis. Guards against float
/// blowups when the domain is tiny relative to its magnitude.
const MAX_TICKS: f64 = 1_000.0;

const MINUTE_MS: f64 = 60_000.0;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;
const WEEK_MS: f64 = 7.0 * DAY_MS;
const MONTH_MS: f64 = 30.0 * DAY_MS;
const YEAR_MS: f64 = 365.0 * DAY_MS;

/// Step of the form 10^k × {1, 2, 5} closest (by ratio) to `span / count`.
/// Returns `None` for an empty span, a zero count, or non-finite input.
pub fn nice_step(span: f64, count: usize) -> Option<f64> {
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }
    let raw = span / count as f64;
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    // Thresholds are the geometric midpoints between 1, 2, 5 and 10.
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    Some(factor * power)
}

/// Multiples of the nice step covering `[min, max]`, ascending and inclusive.
/// A non-degenerate domain always yields at least one tick: when the chosen
/// step has no multiple inside the domain, the next finer 1-2-5 step is tried.
pub fn linear_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if lo == hi {
        return vec![lo];
    }
    let Some(mut step) = nice_step(hi - lo, count) else {
        return Vec::new();
    };
    loop {
        match step_multiples(lo, hi, step) {
            Some(out) if !out.is_empty() => return out,
            Some(_) => step = finer_step(step),
            None => return Vec::new(),
        }
    }
}

/// Next smaller step of the form 10^k × {1, 2, 5}.
fn finer_step(step: f64) -> f64 {
    let power = 10f64.powf(step.log10().floor());
    if (step / power).round() == 5.0 { step * 0.4 } else { step * 0.5 }
}

/// Multiples of `step` inside `[lo, hi]`, or `None` past `MAX_TICKS`.
fn step_multiples(lo: f64, hi: f64, step: f64) -> Option<Vec<f64>> {
    // Sub-unit steps divide by the (integral) inverse to keep 0.1 + 0.2 noise out of labels.
    let inverse = (step < 1.0).then(|| (1.0 / step).round());
    let (i0, i1) = match inverse {
        None => ((lo / step).ceil(), (hi / step).floor()),
        Some(inv) => ((lo * inv).ceil(), (hi * inv).floor()),
    };
    let emit = |i: f64| match inverse {
        None => i * step,
        Some(inv) => i / inv,
    };
    if i1 < i0 {
        return Some(Vec::new());
    }
    if i1 - i0 + 1.0 > MAX_TICKS {
        return None;
    }

    let mut out = Vec::with_capacity((i1 - i0 + 1.0) as usize);
    let mut i = i0;
    while i <= i1 {
        let v = emit(i);
        if v >= lo && v <= hi {
            out.push(v);
        }
        i += 1.0;
    }
    Some(out)
}

/// Calendar-aligned tick interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interval {
    Minutes(u32),
    Hours(u32),
    Days(u32),
    Weeks(u32),
    Months(u32),
    Years(u32),
}

impl Interval {
    /// Nominal length, used only to pick the closest interval.
    pub fn approx_ms(self) -> f64 {
        match self {
            Interval::Minutes(k) => k as f64 * MINUTE_MS,
            Interval::Hours(k) => k as f64 * HOUR_MS,
            Interval::Days(k) => k as f64 * DAY_MS,
            Interval::Weeks(k) => k as f64 * WEEK_MS,
            Interval::Months(k) => k as f64 * MONTH_MS,
            Interval::Years(k) => k as f64 * YEAR_MS,
        }
    }

    /// Next shorter interval, or `None` below one minute.
    pub fn finer(self) -> Option<Interval> {
        match self {
            Interval::Years(0 | 1) => Some(Interval::Months(3)),
            Interval::Years(k) => {
                let power = 10u32.pow(k.ilog10());
                Some(Interval::Years(if k / power == 5 { 2 * power } else { k / 2 }))
            }
            other => {
                let i = LADDER.iter().position(|iv| *iv == other)?;
                i.checked_sub(1).map(|j| LADDER[j])
            }
        }
    }
}

const LADDER: [Interval; 14] = [
    Interval::Minutes(1),
    Interval::Minutes(5),
    Interval::Minutes(15),
    Interval::Minutes(30),
    Interval::Hours(1),
    Interval::Hours(3),
    Interval::Hours(6),
    Interval::Hours(12),
    Interval::Days(1),
    Interval::Days(2),
    Interval::Weeks(1),
    Interval::Months(1),
    Interval::Months(3),
    Interval::Years(1),
];

/// Interval closest (by ratio) to `span_ms / count`. `None` means the
/// target is below one minute and plain millisecond ticks should be used.
pub fn choose_interval(span_ms: f64, count: usize) -> Option<Interval> {
    if count == 0 || !span_ms.is_finite() || span_ms <= 0.0 {
        return None;
    }
    let target = span_ms / count as f64;
    if target > YEAR_MS {
        let years = nice_step(span_ms / YEAR_MS, count)?.round().max(1.0);
        return Some(Interval::Years(years as u32));
    }
    match LADDER.iter().position(|iv| iv.approx_ms() > target) {
        Some(0) => None,
        Some(i) => {
            let (prev, next) = (LADDER[i - 1], LADDER[i]);
            if target / prev.approx_ms() < next.approx_ms() / target {
                Some(prev)
            } else {
                Some(next)
            }
        }
        None => Some(Interval::Years(1)),
    }
}

/// Calendar-aligned instants inside `[min, max]`, ascending. Steps down to
/// finer intervals until at least one boundary falls inside the domain.
pub fn time_ticks(min: NaiveDateTime, max: NaiveDateTime, count: usize) -> Vec<NaiveDateTime> {
    if count == 0 {
        return Vec::new();
    }
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if lo == hi {
        return vec![lo];
    }
    let (lo_ms, hi_ms) = (to_millis(lo), to_millis(hi));
    let mut interval = choose_interval(hi_ms - lo_ms, count);
    while let Some(iv) = interval {
        let ticks = calendar_ticks(lo, hi, iv);
        if !ticks.is_empty() {
            return ticks;
        }
        interval = iv.finer();
    }
    linear_ticks(lo_ms, hi_ms, count).into_iter().map(from_millis).collect()
}

fn midnight(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN)
}

/// First calendar day whose midnight is at or after `t`.
fn first_day_at_or_after(t: NaiveDateTime) -> Option<NaiveDate> {
    if t.time() == NaiveTime::MIN { Some(t.date()) } else { t.date().succ_opt() }
}

fn calendar_ticks(lo: NaiveDateTime, hi: NaiveDateTime, interval: Interval) -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    let mut push = |t: NaiveDateTime| {
        if t >= lo && t <= hi && (out.len() as f64) < MAX_TICKS {
            out.push(t);
        }
    };

    match interval {
        Interval::Minutes(_) | Interval::Hours(_) => {
            let step = interval.approx_ms();
            let mut v = (to_millis(lo) / step).ceil() * step;
            let end = to_millis(hi);
            while v <= end {
                push(from_millis(v));
                v += step;
            }
        }
        Interval::Days(k) => {
            let mut day = first_day_at_or_after(lo);
            while let Some(d) = day.filter(|d| midnight(*d) <= hi) {
                if d.day0() % k == 0 {
                    push(midnight(d));
                }
                day = d.succ_opt();
            }
        }
        Interval::Weeks(k) => {
            let mut day = first_day_at_or_after(lo);
            while let Some(d) = day.filter(|d| d.weekday() != Weekday::Sun) {
                day = d.succ_opt();
            }
            while let Some(d) = day.filter(|d| midnight(*d) <= hi) {
                push(midnight(d));
                day = d.checked_add_days(Days::new(7 * k as u64));
            }
        }
        Interval::Months(k) => {
            let mut month = NaiveDate::from_ymd_opt(lo.year(), lo.month(), 1);
            if month.is_some_and(|m| midnight(m) < lo) {
                month = month.and_then(|m| m.checked_add_months(Months::new(1)));
            }
            while let Some(m) = month.filter(|m| midnight(*m) <= hi) {
                if m.month0() % k == 0 {
                    push(midnight(m));
                }
                month = m.checked_add_months(Months::new(1));
            }
        }
        Interval::Years(k) => {
            let k = k.max(1) as i32;
            let mut year = lo.year();
            if NaiveDate::from_ymd_opt(year, 1, 1).is_some_and(|d| midnight(d) < lo) {
                year += 1;
            }
            year += (k - year.rem_euclid(k)) % k;
            while let Some(d) = NaiveDate::from_ymd_opt(year, 1, 1).filter(|d| midnight(*d) <= hi) {
                push(midnight(d));
                year += k;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        midnight(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn nice_step_picks_one_two_five() {
        assert_eq!(nice_step(10.0, 10), Some(1.0));
        assert_eq!(nice_step(100.0, 10), Some(10.0));
        assert_eq!(nice_step(17.0, 10), Some(2.0));
        assert_eq!(nice_step(42.0, 10), Some(5.0));
        assert!((nice_step(0.9, 10).unwrap() - 0.1).abs() < 1e-12);
        assert_eq!(nice_step(0.0, 10), None);
        assert_eq!(nice_step(5.0, 0), None);
    }

    #[test]
    fn linear_ticks_cover_domain_inclusively() {
        assert_eq!(linear_ticks(0.0, 10.0, 10), (0..=10).map(f64::from).collect::<Vec<_>>());
        assert_eq!(linear_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(linear_ticks(93.2, 171.7, 10), vec![100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 170.0]);
    }

    #[test]
    fn linear_ticks_degenerate_and_reversed() {
        assert_eq!(linear_ticks(4.0, 4.0, 10), vec![4.0]);
        assert_eq!(linear_ticks(10.0, 0.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert!(linear_ticks(0.0, 10.0, 0).is_empty());
        assert!(linear_ticks(f64::NAN, 10.0, 5).is_empty());
    }

    #[test]
    fn interval_choice_follows_span() {
        assert_eq!(choose_interval(10.0 * DAY_MS, 10), Some(Interval::Days(1)));
        assert_eq!(choose_interval(70.0 * DAY_MS, 10), Some(Interval::Weeks(1)));
        assert_eq!(choose_interval(365.0 * DAY_MS, 10), Some(Interval::Months(1)));
        assert_eq!(choose_interval(20.0 * YEAR_MS, 10), Some(Interval::Years(2)));
        assert_eq!(choose_interval(1_000.0, 10), None);
    }

    #[test]
    fn finer_steps_walk_down_the_ladder() {
        assert_eq!(finer_step(1.0), 0.5);
        assert_eq!(finer_step(50.0), 20.0);
        assert_eq!(finer_step(20.0), 10.0);
        assert_eq!(Interval::Years(50).finer(), Some(Interval::Years(20)));
        assert_eq!(Interval::Years(10).finer(), Some(Interval::Years(5)));
        assert_eq!(Interval::Years(2).finer(), Some(Interval::Years(1)));
        assert_eq!(Interval::Years(1).finer(), Some(Interval::Months(3)));
        assert_eq!(Interval::Weeks(1).finer(), Some(Interval::Days(2)));
        assert_eq!(Interval::Minutes(1).finer(), None);
    }

    #[test]
    fn one_tick_request_never_comes_back_empty() {
        assert_eq!(linear_ticks(0.1, 0.9, 1), vec![0.5]);
        assert_eq!(linear_ticks(101.0, 199.0, 1), vec![150.0]);
        assert!(!time_ticks(day(2018, 1, 5), day(2018, 3, 25), 1).is_empty());
        assert!(!time_ticks(day(2018, 1, 2), day(2018, 1, 4), 1).is_empty());
    }

    #[test]
    fn month_ticks_land_on_first_of_month() {
        let ticks = time_ticks(day(2017, 1, 15), day(2017, 12, 20), 10);
        assert_eq!(ticks.first(), Some(&day(2017, 2, 1)));
        assert_eq!(ticks.last(), Some(&day(2017, 12, 1)));
        assert_eq!(ticks.len(), 11);
        assert!(ticks.iter().all(|t| t.day() == 1));
    }

    #[test]
    fn week_ticks_are_sundays() {
        let ticks = time_ticks(day(2018, 1, 1), day(2018, 3, 12), 10);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| t.weekday() == Weekday::Sun));
        assert_eq!(ticks[0], day(2018, 1, 7));
    }

    #[test]
    fn year_ticks_are_aligned_to_step() {
        let ticks = time_ticks(day(1991, 6, 1), day(2013, 6, 1), 10);
        assert_eq!(ticks.first(), Some(&day(1992, 1, 1)));
        assert!(ticks.iter().all(|t| t.year() % 2 == 0 && t.ordinal() == 1));
    }

    #[test]
    fn degenerate_time_domain_yields_single_tick() {
        assert_eq!(time_ticks(day(2020, 2, 2), day(2020, 2, 2), 10), vec![day(2020, 2, 2)]);
    }
}
