//! Load offers from CSV or JSON files

use super::{Offer, OfferInput};
use crate::error::LoadError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw CSV row matching the offer editor's columns.
///
/// Numeric cells that do not parse are read as missing, so they are reported
/// per label by `OfferInput::into_offers`.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Label", default)]
    label: Option<String>,
    #[serde(rename = "Cost per Month", default, deserialize_with = "csv::invalid_option")]
    cost_per_month: Option<f64>,
    #[serde(
        rename = "Deductible",
        alias = "Deducible",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    deductible: Option<f64>,
    #[serde(rename = "Excess", default, deserialize_with = "csv::invalid_option")]
    excess: Option<f64>,
}

impl From<CsvRow> for OfferInput {
    fn from(row: CsvRow) -> Self {
        OfferInput {
            label: row.label,
            cost_per_month: row.cost_per_month,
            deductible: row.deductible,
            excess: row.excess,
        }
    }
}

/// Load offers from a file; `.json` files hold an array of rows, anything else is read as CSV
pub fn load_offers<P: AsRef<Path>>(path: P) -> Result<Vec<Offer>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        load_offers_from_json(file)
    } else {
        load_offers_from_reader(file)
    }
}

/// Load offers from CSV data in any reader (e.g., string buffer, request body)
pub fn load_offers_from_reader<R: Read>(reader: R) -> Result<Vec<Offer>, LoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(OfferInput::from(row));
    }

    log::debug!("read {} offer rows from csv", rows.len());
    Ok(OfferInput::into_offers(rows)?)
}

/// Load offers from a JSON array of rows
pub fn load_offers_from_json<R: Read>(reader: R) -> Result<Vec<Offer>, LoadError> {
    let rows: Vec<OfferInput> = serde_json::from_reader(reader)?;
    log::debug!("read {} offer rows from json", rows.len());
    Ok(OfferInput::into_offers(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::offer::{FIELD_COST_PER_MONTH, FIELD_DEDUCTIBLE, FIELD_EXCESS};

    #[test]
    fn test_load_example_file() {
        let offers = load_offers("data/example_offers.csv").expect("Failed to load offers");
        assert_eq!(offers.len(), 4);

        assert_eq!(offers[0], Offer::new("Example 1", 500.0, 300.0, 700.0));
        assert_eq!(offers[1], Offer::new("Example 2", 400.0, 2500.0, 700.0));
    }

    #[test]
    fn test_deducible_alias_and_blank_cells() {
        let data = "\
Label,Cost per Month,Deducible,Excess
Basic,500,300,700
,400,2500,700
";
        let offers = load_offers_from_reader(data.as_bytes()).unwrap();
        assert_eq!(offers[1].label, "Choice N. 2");
        assert_eq!(offers[1].deductible, 2500.0);

        let data = "\
Label,Cost per Month,Deductible,Excess
Basic,500,,700
";
        let err = load_offers_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Validation(ValidationError::MissingRequiredFields(_))
        ));
    }

    #[test]
    fn test_non_numeric_cells_are_reported_as_missing() {
        let data = "\
Label,Cost per Month,Deductible,Excess
Basic,500,abc,700
Saver,n/a,2500,-
Plus,450,1000,700
";
        let err = load_offers_from_reader(data.as_bytes()).unwrap_err();
        match err {
            LoadError::Validation(ValidationError::MissingRequiredFields(missing)) => {
                assert_eq!(missing.len(), 2);
                assert_eq!(missing[0].label, "Basic");
                assert_eq!(missing[0].fields, vec![FIELD_DEDUCTIBLE]);
                assert_eq!(missing[1].label, "Saver");
                assert_eq!(missing[1].fields, vec![FIELD_COST_PER_MONTH, FIELD_EXCESS]);
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_load_json_rows() {
        let data = r#"[
            {"label": "Basic", "cost_per_month": 500, "deductible": 300, "excess": 700},
            {"label": "Saver", "cost_per_month": 400, "deducible": 2500, "excess": 700}
        ]"#;
        let offers = load_offers_from_json(data.as_bytes()).unwrap();
        assert_eq!(offers[1], Offer::new("Saver", 400.0, 2500.0, 700.0));
    }
}
