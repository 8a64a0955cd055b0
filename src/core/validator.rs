use crate::domain::model::{Delimiter, Resident, Slot};
use crate::utils::error::{RaffleError, Result};
use crate::utils::validation::{parse_bool, parse_id, parse_positive_integer};
use std::collections::HashSet;
use std::io::Read;

pub const RESIDENT_FIELDS: [&str; 5] = ["id", "slots", "disabled", "elderly", "defaulting"];
pub const SLOT_FIELDS: [&str; 3] = ["id", "disabled", "elderly"];

/// Rejects a file that is absent or has zero bytes.
pub fn check_input_file(file: &str, contents: Option<Vec<u8>>) -> Result<Vec<u8>> {
    match contents {
        None => Err(RaffleError::MissingInputFile {
            file: file.to_string(),
        }),
        Some(data) if data.is_empty() => Err(RaffleError::EmptyInputFile {
            file: file.to_string(),
        }),
        Some(data) => Ok(data),
    }
}

pub fn parse_residents<R: Read>(
    reader: R,
    delimiter: Delimiter,
    source_name: &str,
) -> Result<Vec<Resident>> {
    parse_rows(reader, delimiter, source_name, &RESIDENT_FIELDS, |fields, line| {
        Ok(Resident {
            id: parse_id(RESIDENT_FIELDS[0], fields[0], line)?,
            slots: parse_positive_integer(RESIDENT_FIELDS[1], fields[1], 1, line)?,
            disabled: parse_bool(RESIDENT_FIELDS[2], fields[2], line)?,
            elderly: parse_bool(RESIDENT_FIELDS[3], fields[3], line)?,
            defaulting: parse_bool(RESIDENT_FIELDS[4], fields[4], line)?,
        })
    })
}

pub fn parse_slots<R: Read>(
    reader: R,
    delimiter: Delimiter,
    source_name: &str,
) -> Result<Vec<Slot>> {
    parse_rows(reader, delimiter, source_name, &SLOT_FIELDS, |fields, line| {
        Ok(Slot {
            id: parse_id(SLOT_FIELDS[0], fields[0], line)?,
            disabled: parse_bool(SLOT_FIELDS[1], fields[1], line)?,
            elderly: parse_bool(SLOT_FIELDS[2], fields[2], line)?,
        })
    })
}

pub fn ensure_capacity(residents: usize, slots: usize) -> Result<()> {
    if slots < residents {
        return Err(RaffleError::InsufficientSlots { slots, residents });
    }
    Ok(())
}

trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Resident {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Slot {
    fn id(&self) -> &str {
        &self.id
    }
}

/// 逐行解析，第一個錯誤即中止
fn parse_rows<R, T, F>(
    reader: R,
    delimiter: Delimiter,
    source_name: &str,
    schema: &[&str],
    mut build: F,
) -> Result<Vec<T>>
where
    R: Read,
    T: Identified,
    F: FnMut(&[&str], usize) -> Result<T>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter.as_byte())
        .from_reader(reader);

    let mut seen = HashSet::new();
    let mut parsed = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = index + 1;

        let mut fields = Vec::with_capacity(schema.len());
        for (position, field) in schema.iter().enumerate() {
            match record.get(position) {
                Some(value) => fields.push(value),
                None => {
                    return Err(RaffleError::MissingField {
                        field: field.to_string(),
                        line,
                    })
                }
            }
        }

        let item = build(&fields, line)?;
        if !seen.insert(item.id().to_string()) {
            return Err(RaffleError::DuplicateId {
                id: item.id().to_string(),
                file: source_name.to_string(),
                line,
            });
        }

        tracing::trace!("Parsed {} line {}: {}", source_name, line, item.id());
        parsed.push(item);
    }

    tracing::debug!("Parsed {} records from {}", parsed.len(), source_name);
    Ok(parsed)
}
