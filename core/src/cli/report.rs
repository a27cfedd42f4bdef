use crate::extraction::date::DATE_OUTPUT_FORMAT;
use crate::table::{MetadataTable, MISSING_VALUE};
use std::fmt;

/// Text report formatter for an extracted metadata table
pub struct TableReport<'a> {
    table: &'a MetadataTable,
}

impl<'a> TableReport<'a> {
    /// Creates a new text report
    pub fn new(table: &'a MetadataTable) -> Self {
        Self { table }
    }
}

impl<'a> fmt::Display for TableReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CMR Metadata")?;
        writeln!(f, "============")?;
        writeln!(f)?;

        for record in self.table {
            writeln!(f, "{}", record.file_path)?;
            writeln!(f, "  Patient ID:  {}", record.patient_id)?;
            writeln!(
                f,
                "  Study Date:  {}",
                record
                    .study_date
                    .map(|d| d.format(DATE_OUTPUT_FORMAT).to_string())
                    .unwrap_or_else(|| MISSING_VALUE.to_string())
            )?;
            writeln!(f, "  Series:      {}", record.series_description)?;
            writeln!(
                f,
                "  Scanner:     {}",
                record.scanner_id.as_deref().unwrap_or(MISSING_VALUE)
            )?;
            writeln!(f)?;
        }

        let summary = self.table.summary();
        writeln!(f, "Summary")?;
        writeln!(f, "-------")?;
        writeln!(f, "Records:         {}", summary.records)?;
        writeln!(
            f,
            "Missing ID:      {}",
            summary.records - summary.with_patient_id
        )?;
        writeln!(
            f,
            "Height:          {} present, {} numeric",
            summary.with_height, summary.numeric_height
        )?;
        writeln!(
            f,
            "Weight:          {} present, {} numeric",
            summary.with_weight, summary.numeric_weight
        )?;

        Ok(())
    }
}
