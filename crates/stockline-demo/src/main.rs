// File: crates/stockline-demo/src/main.rs
// Summary: Demo loads daily quote CSVs, draws the chart on a Skia raster and writes a hover sweep to PNGs.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use stockline_core::{Chart, PointerEvent, RawRecord, RawSeries, Surface, HEIGHT, WIDTH};
use stockline_render_skia::SkiaSurface;

/// Pointer positions replayed across the plot.
const SWEEP_FRAMES: usize = 8;

#[derive(Debug, PartialEq)]
struct Args {
    inputs: Vec<PathBuf>,
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();

    let args = parse_args(std::env::args().skip(1))?;
    let datasets = args
        .inputs
        .iter()
        .map(|p| load_quotes_csv(p).with_context(|| format!("failed to load CSV '{}'", p.display())))
        .collect::<Result<Vec<_>>>()?;
    for d in &datasets {
        info!(label = %d.label, records = d.records.len(), "loaded series");
    }

    let surface = SkiaSurface::new(WIDTH, HEIGHT).context("creating raster surface")?;
    let mut chart = Chart::new(surface);
    chart.clear();
    let subscription = chart.create(&datasets).context("building chart")?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output dir '{}'", args.out_dir.display()))?;
    let out = args.out_dir.join("chart.png");
    chart.surface_mut().write_png(&out)?;
    info!(path = %out.display(), "wrote static chart");

    let margins = chart.config().margins;
    let plot_width = (chart.surface().width() - margins.hsum()) as f32;
    let y = margins.top as f32 + 10.0;
    for frame in 0..SWEEP_FRAMES {
        let x = margins.left as f32 + plot_width * (frame as f32 + 0.5) / SWEEP_FRAMES as f32;
        // Two moves per frame; only the later one is drawn.
        chart.queue_pointer_move(PointerEvent::new(x - 3.0, y));
        chart.queue_pointer_move(PointerEvent::new(x, y));
        if !chart.flush_frame()? {
            warn!(frame, x, "pointer move produced no redraw");
            continue;
        }
        let out = args.out_dir.join(format!("hover_{frame:02}.png"));
        chart.surface_mut().write_png(&out)?;
        info!(path = %out.display(), state = ?chart.hover_state(), "wrote hover frame");
    }

    chart.detach(subscription);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init();
}

/// `[CSV ...] [--out DIR]`. Falls back to the bundled sample quotes and `target/out`.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut inputs = Vec::new();
    let mut out_dir = PathBuf::from("target/out");
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        if arg == "--out" {
            let dir = it.next().context("--out needs a directory")?;
            out_dir = PathBuf::from(dir);
        } else {
            inputs.push(PathBuf::from(arg));
        }
    }
    if inputs.is_empty() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        inputs = vec![data.join("AAPL.csv"), data.join("MSFT.csv")];
    }
    Ok(Args { inputs, out_dir })
}

/// Load a `Date,Open,High,Low,Close,Volume` file. The series label is the file stem.
/// Unparseable numbers become NaN so the core rejects bad closes with the offending date.
fn load_quotes_csv(path: &Path) -> Result<RawSeries> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_date = idx(&["date", "timestamp"]).context("no date column")?;
    let i_close = idx(&["close", "adj close", "adj_close"]).context("no close column")?;
    let (i_open, i_high, i_low, i_volume) = (idx(&["open"]), idx(&["high"]), idx(&["low"]), idx(&["volume"]));

    let mut records = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let num = |i: Option<usize>| {
            i.and_then(|ix| rec.get(ix))
                .and_then(|s| s.trim().parse::<f64>().ok())
                .unwrap_or(f64::NAN)
        };
        let date = rec.get(i_date).unwrap_or_default();
        records.push(RawRecord::new(date, num(i_open), num(i_high), num(i_low), num(Some(i_close)), num(i_volume)));
    }

    let label = path.file_stem().and_then(|s| s.to_str()).unwrap_or("series");
    Ok(RawSeries::new(label, records))
}
