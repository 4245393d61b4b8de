//! CSV inventory loader.
//!
//! Expected CSV columns:
//!   item_id, sku, name, category, quantity, reorder_point
//!
//! Only `item_id`, `sku` and `reorder_point` matter to the advisor; the
//! rest is carried through for display.

use serde::Deserialize;
use std::io::Read;

use crate::error::{LoadError, LoadResult};
use crate::types::ItemCandidate;

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryRecord {
    pub item_id: String,
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default, deserialize_with = "deserialize_reorder_point")]
    pub reorder_point: u32,
}

impl InventoryRecord {
    /// Seed a pipeline candidate with this record's identity fields.
    pub fn to_candidate(&self) -> ItemCandidate {
        ItemCandidate {
            item_id: self.item_id.clone(),
            sku: self.sku.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            current_reorder_point: self.reorder_point,
            quantity: self.quantity,
            ..ItemCandidate::default()
        }
    }
}

/// Load inventory records from a CSV reader.
pub fn load_inventory<R: Read>(reader: R) -> LoadResult<Vec<InventoryRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: InventoryRecord = result.map_err(|source| LoadError::Csv {
            line: line_num + 2,
            source,
        })?;
        records.push(record);
    }

    log::debug!("loaded {} inventory records", records.len());
    Ok(records)
}

/// Load inventory records from a CSV file path.
pub fn load_inventory_file(path: &str) -> LoadResult<Vec<InventoryRecord>> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    load_inventory(file)
}

/// Blank reorder points mean "never set" and count as zero.
fn deserialize_reorder_point<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v <= u32::MAX as f64 => Ok(v.round() as u32),
        _ => Err(serde::de::Error::custom(format!(
            "expected non-negative reorder point, got '{}'",
            trimmed
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
item_id,sku,name,category,quantity,reorder_point
1,HMR-100,Claw Hammer,Tools,40,10
2,SCR-220,Wood Screws 200pk,Fasteners,500,50
3,GLV-010,Work Gloves,Safety,12,
4,DRL-900,Cordless Drill,Power Tools,3,2.0
";

    #[test]
    fn load_sample_csv() {
        let records = load_inventory(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].item_id, "1");
        assert_eq!(records[0].sku, "HMR-100");
        assert_eq!(records[0].reorder_point, 10);
        assert_eq!(records[1].quantity, 500);
    }

    #[test]
    fn blank_reorder_point_is_zero() {
        let records = load_inventory(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records[2].reorder_point, 0);
        assert_eq!(records[3].reorder_point, 2);
    }

    #[test]
    fn negative_reorder_point_is_rejected() {
        let csv_data = "\
item_id,sku,name,category,quantity,reorder_point
1,A,Thing,Misc,1,-4
";
        let err = load_inventory(csv_data.as_bytes()).unwrap_err();
        match err {
            LoadError::Csv { line, .. } => assert_eq!(line, 2),
            other => panic!("expected CSV error, got {other}"),
        }
    }

    #[test]
    fn to_candidate_copies_identity() {
        let records = load_inventory(SAMPLE_CSV.as_bytes()).unwrap();
        let c = records[0].to_candidate();
        assert_eq!(c.item_id, "1");
        assert_eq!(c.name, "Claw Hammer");
        assert_eq!(c.current_reorder_point, 10);
        assert!(c.suggestion.is_none());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_inventory_file("/nonexistent/inventory.csv").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/inventory.csv"));
    }
}
