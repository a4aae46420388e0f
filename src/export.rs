//! CSV export of a loaded availability grid.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::trends::{TrendsSummary, WEEKDAYS};

#[derive(Debug, Serialize)]
struct TrendsCsvRow<'a> {
    weekday: &'a str,
    hour: u8,
    availability: Option<f64>,
    samples: u64,
    restricted: bool,
}

/// Lowercase, dash-separated form of a street name for file names.
pub fn street_slug(street: &str) -> String {
    let mut slug = String::with_capacity(street.len());
    for ch in street.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "street".to_string()
    } else {
        slug
    }
}

pub fn export_file_name(street: &str, at: DateTime<Utc>) -> String {
    format!(
        "parking_trends_{}_{}.csv",
        street_slug(street),
        at.format("%Y%m%d_%H%M%S")
    )
}

/// Write the grid ordered by weekday, then hour. Cells outside the 7x24 grid are skipped.
pub fn write_csv(summary: &TrendsSummary, path: &Path) -> Result<()> {
    let mut cells: Vec<_> = summary.matrix.iter().collect();
    cells.sort_by_key(|c| (c.dow, c.hour));

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for cell in cells {
        let Some(weekday) = WEEKDAYS
            .get(cell.dow as usize)
            .copied()
            .filter(|_| cell.hour < 24)
        else {
            tracing::warn!(
                "Skipping trend cell outside the grid (dow={}, hour={})",
                cell.dow,
                cell.hour
            );
            continue;
        };
        wtr.serialize(TrendsCsvRow {
            weekday,
            hour: cell.hour,
            availability: cell.availability,
            samples: cell.n,
            restricted: cell.restricted,
        })
        .context("Failed to write CSV row")?;
    }
    wtr.flush().context("Failed to flush CSV file")?;
    Ok(())
}

/// Export into `dir` using the standard file name.
pub fn export_to_dir(
    summary: &TrendsSummary,
    street: &str,
    dir: &Path,
    at: DateTime<Utc>,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(street, at));
    write_csv(summary, &path)?;
    tracing::info!("Exported {} trend cells to {}", summary.matrix.len(), path.display());
    Ok(path)
}

/// The user's download directory, or the working directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
