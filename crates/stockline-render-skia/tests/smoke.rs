// File: crates/stockline-render-skia/tests/smoke.rs
// Purpose: End-to-end raster render: build, hover, encode PNG and inspect a few pixels.

use stockline_core::{Chart, PointerEvent, RawRecord, RawSeries, Scale, HEIGHT, WIDTH};
use stockline_render_skia::SkiaSurface;

fn quotes() -> Vec<RawSeries> {
    let closes = [
        ("2018-01-02", 172.26),
        ("2018-01-03", 172.23),
        ("2018-01-04", 173.03),
        ("2018-01-05", 175.00),
        ("2018-01-08", 174.35),
        ("2018-01-09", 174.33),
    ];
    vec![RawSeries::new(
        "AAPL",
        closes.iter().map(|&(d, c)| RawRecord::close_only(d, c)).collect(),
    )]
}

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).expect("decode png").to_rgba8()
}

#[test]
fn create_and_hover_encode_png() {
    let surface = SkiaSurface::new(WIDTH, HEIGHT).expect("raster surface");
    let mut chart = Chart::new(surface);
    chart.create(&quotes()).expect("valid input");
    // Crosshair centered on a pixel column: plot-local x = 470.5.
    assert!(chart.pointer_moved(PointerEvent::new(500.5, 200.0)).expect("redraw"));

    let bytes = chart.surface_mut().encode_png().expect("encode");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = decode(&bytes);
    assert_eq!((img.width(), img.height()), (WIDTH, HEIGHT));

    // First dash segment of the crosshair covers the two rows under the top margin.
    let px = img.get_pixel(500, 16);
    assert!(px[3] > 200, "crosshair pixel alpha {}", px[3]);
    assert!((px[0] as i32 - 0xbd).abs() <= 3, "crosshair pixel {:?}", px);

    // Top-left corner is outside every drawn element.
    assert_eq!(img.get_pixel(0, 0)[3], 0);
}

#[test]
fn hover_clear_keeps_y_axis_ticks() {
    let mut chart = Chart::new(SkiaSurface::new(WIDTH, HEIGHT).expect("raster surface"));
    chart.create(&quotes()).expect("valid input");
    chart.pointer_moved(PointerEvent::new(400.0, 100.0)).expect("redraw");

    let session = chart.session().expect("session");
    let y_scale = *session.y_scale();
    let tick = y_scale.ticks(10)[0];
    let row = (15.0 + y_scale.map(tick)).floor() as u32;

    let img = decode(&chart.surface_mut().encode_png().expect("encode"));
    let alpha = (row.saturating_sub(1)..=row + 1).map(|y| img.get_pixel(27, y)[3]).max().unwrap_or(0);
    assert!(alpha > 0, "y tick mark at row {row} was erased");
}

#[test]
fn write_png_creates_parent_dirs() {
    let mut chart = Chart::new(SkiaSurface::new(320, 200).expect("raster surface"));
    chart.create(&quotes()).expect("valid input");
    let out = std::path::PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("stockline/smoke/out.png");
    chart.surface_mut().write_png(&out).expect("write png");
    assert!(std::fs::metadata(&out).expect("output exists").len() > 0);
}
