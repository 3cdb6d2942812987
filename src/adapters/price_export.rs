//! Combined daily closes as CSV (`date,<SYM>_Close,...`).

use std::io;

use crate::domain::error::AdvisorError;
use crate::domain::price_panel::PricePanel;

pub fn write_combined_csv<W: io::Write>(panel: &PricePanel, writer: W) -> Result<(), AdvisorError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["date".to_string()];
    header.extend(panel.symbols.iter().map(|s| format!("{}_Close", s)));
    wtr.write_record(&header).map_err(csv_error)?;

    for row in &panel.rows {
        let mut record = vec![row.date.format("%Y-%m-%d").to_string()];
        record.extend(row.closes.iter().map(|c| c.to_string()));
        wtr.write_record(&record).map_err(csv_error)?;
    }

    wtr.flush()?;
    Ok(())
}

fn csv_error(e: csv::Error) -> AdvisorError {
    AdvisorError::Io(io::Error::other(e))
}
