use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use tracing::{info, warn};

use crate::cards::CardRow;
use crate::rents::RentRecord;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn csv_writer(path: &Path) -> Result<csv::Writer<File>> {
    ensure_parent(path)?;
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))
}

/// The header row is written even when there are no cards.
pub fn write_cards_csv(rows: &[CardRow], path: &Path) -> Result<()> {
    if rows.is_empty() {
        warn!("No data scraped; writing empty CSV to {}", path.display());
    }
    let mut wtr = csv_writer(path)?;
    wtr.write_record(CardRow::HEADERS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_cards_xlsx(rows: &[CardRow], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in CardRow::HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.cells().iter().enumerate() {
            if col == 1 {
                sheet.write_number(r, col as u16, row.year as f64)?;
            } else {
                sheet.write_string(r, col as u16, cell)?;
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    info!("Saved Excel with {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_rents_csv(records: &[RentRecord], path: &Path) -> Result<()> {
    let mut wtr = csv_writer(path)?;
    wtr.write_record(["city", "title", "area_sqm", "price_yuan", "price_per_sqm"])?;
    for r in records {
        wtr.write_record([
            r.city.clone(),
            r.title.clone(),
            format!("{:.2}", r.area),
            format!("{}", r.price.trunc() as i64),
            format!("{:.2}", r.price_per_sqm()),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// `(province, average yuan per sqm)` pairs, written in the given order.
pub fn write_provincial_csv(averages: &[(String, f64)], path: &Path) -> Result<()> {
    let mut wtr = csv_writer(path)?;
    wtr.write_record(["province", "avg_rent_yuan_per_sqm"])?;
    for (province, avg) in averages {
        wtr.write_record([province.clone(), format!("{:.2}", avg)])?;
    }
    wtr.flush()?;
    Ok(())
}
