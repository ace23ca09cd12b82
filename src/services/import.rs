//! Bulk equipment import from spreadsheet files
//!
//! Rows are staged in file order without duplicate pre-checks, then inserted
//! in a single transaction: any failure aborts the whole import.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::enums::{EquipmentCondition, EquipmentStatus, EquipmentType},
    repository::{equipment::StagedEquipment, Repository},
};

/// Result of a successful import
#[derive(Debug, Serialize, ToSchema)]
pub struct ImportReport {
    pub detail: String,
    pub imported: u64,
}

#[derive(Clone)]
pub struct ImportService {
    repository: Repository,
}

impl ImportService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Parse an .xlsx/.xls payload and insert all rows atomically
    pub async fn import_equipment(&self, bytes: &[u8]) -> AppResult<ImportReport> {
        let rows = parse_workbook(bytes)?;
        if rows.is_empty() {
            return Err(AppError::Validation(
                "Spreadsheet contains no data rows".to_string(),
            ));
        }

        let imported = self
            .repository
            .equipment
            .insert_batch(&rows)
            .await
            .map_err(|e| {
                tracing::error!("Equipment import aborted: {}", e);
                AppError::Internal("Import failed, no rows were committed".to_string())
            })?;

        Ok(ImportReport {
            detail: "Import réussi".to_string(),
            imported,
        })
    }
}

fn parse_workbook(bytes: &[u8]) -> AppResult<Vec<StagedEquipment>> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| AppError::Validation(format!("Unreadable spreadsheet: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::Validation("Spreadsheet has no worksheet".to_string()))?
        .map_err(|e| AppError::Validation(format!("Unreadable worksheet: {}", e)))?;

    parse_rows(&range)
}

/// Read the header row, then stage one equipment per data row.
/// Missing optional columns default to pc / new / in_stock.
fn parse_rows(range: &Range<Data>) -> AppResult<Vec<StagedEquipment>> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| AppError::Validation("Spreadsheet is empty".to_string()))?;

    let column = |name: &str| -> Option<usize> {
        header
            .iter()
            .position(|cell| cell_to_string(cell).is_some_and(|s| s.eq_ignore_ascii_case(name)))
    };

    let serial_idx = column("serial_number")
        .ok_or_else(|| AppError::Validation("Missing column: serial_number".to_string()))?;
    let model_idx = column("model")
        .ok_or_else(|| AppError::Validation("Missing column: model".to_string()))?;
    let type_idx = column("equipment_type");
    let condition_idx = column("condition");
    let status_idx = column("status");

    let mut staged = Vec::new();
    for (i, row) in rows.enumerate() {
        let line = i + 2;

        let serial_number = row
            .get(serial_idx)
            .and_then(cell_to_string)
            .ok_or_else(|| {
                AppError::Validation(format!("Row {}: missing serial_number", line))
            })?;
        let model = row
            .get(model_idx)
            .and_then(cell_to_string)
            .ok_or_else(|| AppError::Validation(format!("Row {}: missing model", line)))?;

        let equipment_type = match type_idx.and_then(|idx| row.get(idx)).and_then(cell_to_string)
        {
            Some(tag) => tag
                .parse::<EquipmentType>()
                .map_err(|e| AppError::Validation(format!("Row {}: {}", line, e)))?,
            None => EquipmentType::Pc,
        };
        let condition = match condition_idx
            .and_then(|idx| row.get(idx))
            .and_then(cell_to_string)
        {
            Some(tag) => tag
                .parse::<EquipmentCondition>()
                .map_err(|e| AppError::Validation(format!("Row {}: {}", line, e)))?,
            None => EquipmentCondition::New,
        };
        let status = match status_idx
            .and_then(|idx| row.get(idx))
            .and_then(cell_to_string)
        {
            Some(tag) => tag
                .parse::<EquipmentStatus>()
                .map_err(|e| AppError::Validation(format!("Row {}: {}", line, e)))?,
            None => EquipmentStatus::InStock,
        };

        staged.push(StagedEquipment {
            serial_number,
            model,
            equipment_type,
            condition,
            status,
        });
    }

    Ok(staged)
}

/// Normalize a cell to trimmed text; empty cells become None
fn cell_to_string(cell: &Data) -> Option<String> {
    let s = match cell {
        Data::Empty => return None,
        Data::String(s) => s.trim().to_string(),
        // Serial-like numeric cells come back as floats
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(cells: &[&[&str]]) -> Range<Data> {
        let rows = cells.len() as u32;
        let cols = cells.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (rows - 1, cols - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    range.set_value((r as u32, c as u32), Data::String(value.to_string()));
                }
            }
        }
        range
    }

    #[test]
    fn parses_rows_in_file_order() {
        let range = sheet(&[
            &["serial_number", "model", "equipment_type", "condition", "status"],
            &["SN1", "X1", "laptop", "new", "in_stock"],
            &["SN2", "U2419", "monitor", "used", "in_stock"],
        ]);

        let staged = parse_rows(&range).unwrap();
        assert_eq!(staged.len(), 2);
        assert_eq!(staged[0].serial_number, "SN1");
        assert_eq!(staged[0].equipment_type, EquipmentType::Laptop);
        assert_eq!(staged[1].condition, EquipmentCondition::Used);
    }

    #[test]
    fn missing_optional_columns_use_defaults() {
        let range = sheet(&[
            &["serial_number", "model"],
            &["SN3", "OptiPlex"],
        ]);

        let staged = parse_rows(&range).unwrap();
        assert_eq!(staged[0].equipment_type, EquipmentType::Pc);
        assert_eq!(staged[0].condition, EquipmentCondition::New);
        assert_eq!(staged[0].status, EquipmentStatus::InStock);
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let range = sheet(&[
            &["model", "equipment_type"],
            &["X1", "laptop"],
        ]);
        assert!(matches!(parse_rows(&range), Err(AppError::Validation(_))));
    }

    #[test]
    fn invalid_type_tag_is_rejected_with_row_number() {
        let range = sheet(&[
            &["serial_number", "model", "equipment_type"],
            &["SN1", "X1", "toaster"],
        ]);
        let err = parse_rows(&range).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("Row 2")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn numeric_serial_cells_are_normalized() {
        let mut range = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), Data::String("serial_number".to_string()));
        range.set_value((0, 1), Data::String("model".to_string()));
        range.set_value((1, 0), Data::Float(12345.0));
        range.set_value((1, 1), Data::String("X1".to_string()));

        let staged = parse_rows(&range).unwrap();
        assert_eq!(staged[0].serial_number, "12345");
    }
}
