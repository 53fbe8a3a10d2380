// File: crates/stockline-core/src/render.rs
// Summary: Series renderer: one stroked polyline per series through the current scales.

use chrono::NaiveDateTime;

use crate::draw::{DrawCommand, DrawList, PathVerb, Stroke};
use crate::geometry::Pt;
use crate::palette::{self, Rgba};
use crate::scale::Scale;
use crate::series::Series;

/// Draw every series with the categorical palette.
pub fn draw_series<X, Y>(series: &[Series], x_scale: &X, y_scale: &Y) -> DrawList
where
    X: Scale<Value = NaiveDateTime>,
    Y: Scale<Value = f64>,
{
    draw_series_with(series, x_scale, y_scale, palette::category10)
}

/// Draw every series, coloring series `i` with `color_of(i)`. Points are
/// joined in stored (date) order with straight solid segments.
pub fn draw_series_with<X, Y, F>(series: &[Series], x_scale: &X, y_scale: &Y, color_of: F) -> DrawList
where
    X: Scale<Value = NaiveDateTime>,
    Y: Scale<Value = f64>,
    F: Fn(usize) -> Rgba,
{
    let mut list = DrawList::new();
    for (i, s) in series.iter().enumerate() {
        let verbs: Vec<PathVerb> = s
            .points()
            .iter()
            .enumerate()
            .map(|(k, p)| {
                let at = Pt::new(x_scale.map(p.date) as f32, y_scale.map(p.price) as f32);
                if k == 0 { PathVerb::MoveTo(at) } else { PathVerb::LineTo(at) }
            })
            .collect();
        if verbs.is_empty() {
            continue;
        }
        list.push(DrawCommand::StrokePath {
            verbs,
            stroke: Stroke::solid(color_of(i), palette::SERIES_LINE_WIDTH),
        });
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{LinearScale, TimeScale};
    use crate::series::{parse_date, Point};

    fn scales() -> (TimeScale, LinearScale) {
        let d = [parse_date("2018-01-01").unwrap(), parse_date("2018-01-03").unwrap()];
        (TimeScale::new(d, [0.0, 200.0]), LinearScale::new([0.0, 10.0], [100.0, 0.0]))
    }

    #[test]
    fn no_series_draws_nothing() {
        let (x, y) = scales();
        assert!(draw_series(&[], &x, &y).is_empty());
        assert!(draw_series(&[Series::from_points("e", Vec::new())], &x, &y).is_empty());
    }

    #[test]
    fn polyline_passes_through_scaled_points() {
        let (x, y) = scales();
        let s = Series::from_points(
            "s",
            vec![
                Point::new(parse_date("2018-01-01").unwrap(), 0.0),
                Point::new(parse_date("2018-01-02").unwrap(), 5.0),
                Point::new(parse_date("2018-01-03").unwrap(), 10.0),
            ],
        );
        let list = draw_series(&[s], &x, &y);
        let (verbs, stroke) = list.strokes().next().unwrap();
        assert_eq!(
            verbs,
            &[
                PathVerb::MoveTo(Pt::new(0.0, 100.0)),
                PathVerb::LineTo(Pt::new(100.0, 50.0)),
                PathVerb::LineTo(Pt::new(200.0, 0.0)),
            ]
        );
        assert_eq!(stroke, &Stroke::solid(palette::category10(0), palette::SERIES_LINE_WIDTH));
    }
}
