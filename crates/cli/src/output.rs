//! Node-set files: `x`, `y` columns as CSV or Parquet, picked by extension.

use anyhow::{bail, Context, Result};
use nodegen::PointSet;
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Csv,
    Parquet,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => Ok(Format::Csv),
        Some("parquet") => Ok(Format::Parquet),
        other => bail!("unsupported output extension {other:?} (use .csv or .parquet)"),
    }
}

pub fn write_points(path: &Path, points: &PointSet) -> Result<()> {
    let format = format_of(path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let mut df = df!("x" => xs, "y" => ys)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match format {
        Format::Csv => CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?,
        Format::Parquet => {
            ParquetWriter::new(&mut file).finish(&mut df)?;
        }
    }
    Ok(())
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    let lf = match format_of(path)? {
        Format::Csv => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?,
        Format::Parquet => LazyFrame::scan_parquet(path, ScanArgsParquet::default())?,
    };
    lf.select([col("x").cast(DataType::Float64), col("y").cast(DataType::Float64)])
        .collect()
        .with_context(|| format!("reading {}", path.display()))
}

/// Shape statistics of a written node set.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub min: [f64; 2],
    pub max: [f64; 2],
    /// Largest distance from the origin.
    pub max_radius: f64,
    /// Smallest pairwise distance (brute force below 20k rows, else omitted).
    pub min_spacing: Option<f64>,
}

pub fn summarize(path: &Path) -> Result<Summary> {
    let df = read_frame(path)?;
    let xs: Vec<f64> = df.column("x")?.f64()?.into_iter().flatten().collect();
    let ys: Vec<f64> = df.column("y")?.f64()?.into_iter().flatten().collect();
    let max_radius = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| x.hypot(*y))
        .fold(0.0, f64::max);
    let min_spacing = (xs.len() >= 2 && xs.len() < 20_000).then(|| {
        let mut best = f64::INFINITY;
        for i in 0..xs.len() {
            for j in (i + 1)..xs.len() {
                best = best.min((xs[i] - xs[j]).hypot(ys[i] - ys[j]));
            }
        }
        best
    });
    tracing::debug!(rows = df.height(), "summarized node set");
    let (xmin, xmax) = extent(&xs);
    let (ymin, ymax) = extent(&ys);
    Ok(Summary {
        rows: df.height(),
        min: [xmin, ymin],
        max: [xmax, ymax],
        max_radius,
        min_spacing,
    })
}

fn extent(v: &[f64]) -> (f64, f64) {
    v.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)))
}
