use crate::domain::model::{Assignment, Delimiter};
use crate::utils::error::{RaffleError, Result};

/// One row per resident: the resident id followed by its slot ids. No header.
pub fn render_assignment(assignment: &Assignment, delimiter: Delimiter) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter.as_byte())
        .from_writer(Vec::new());

    for allocation in assignment.iter() {
        let row = std::iter::once(allocation.resident_id.as_str())
            .chain(allocation.slot_ids.iter().map(String::as_str));
        writer.write_record(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| RaffleError::IoError(e.into_error()))
}
