//! CSV export for derivation records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::flow::derivation::Derivation;
use crate::flow::kpi::KpiValue;
use crate::flow::types::Edge;

/// Column header for CSV derivation export.
const HEADER: &str = "index,solar_kw,wind_kw,home_demand_kw,battery_level_pct,\
                      solar_to_home,wind_to_home,grid_to_home,home_to_grid,\
                      home_to_battery,battery_to_home,\
                      grid_dependence_pct,self_sufficiency_pct,\
                      recommended_action";

/// Exports derivation records to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[Derivation], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes derivation records as CSV to any writer.
///
/// One row per record, in input order. Not-applicable KPIs and a missing
/// action label are written as empty cells. Output is deterministic for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[Derivation], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for (i, d) in records.iter().enumerate() {
        let snap = d.snapshot();
        let mut row = vec![
            i.to_string(),
            format!("{:.4}", snap.solar_kw),
            format!("{:.4}", snap.wind_kw),
            format!("{:.4}", snap.home_demand_kw),
            format!("{:.1}", snap.battery_level_pct),
        ];
        row.extend(Edge::ALL.iter().map(|&e| d.edges.is_active(e).to_string()));
        row.push(kpi_cell(d.kpi.grid_dependence));
        row.push(kpi_cell(d.kpi.self_sufficiency));
        row.push(d.recommended_action.clone().unwrap_or_default());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

fn kpi_cell(value: KpiValue) -> String {
    value.value().map(|v| format!("{v:.2}")).unwrap_or_default()
}
