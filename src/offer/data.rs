//! Offer records and the validation boundary in front of the comparison core

use crate::config::MIN_OFFERS;
use crate::error::{MissingFields, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const FIELD_COST_PER_MONTH: &str = "cost_per_month";
pub const FIELD_DEDUCTIBLE: &str = "deductible";
pub const FIELD_EXCESS: &str = "excess";

/// One insurance plan's pricing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Unique, non-empty name of the offer
    pub label: String,

    /// Monthly premium
    pub cost_per_month: f64,

    /// Expense threshold below which the insured pays everything
    pub deductible: f64,

    /// Coinsurance cap: the most the insured co-pays (at 10%) above the deductible
    pub excess: f64,
}

impl Offer {
    pub fn new(label: impl Into<String>, cost_per_month: f64, deductible: f64, excess: f64) -> Self {
        Self {
            label: label.into(),
            cost_per_month,
            deductible,
            excess,
        }
    }

    /// Premium paid over a year regardless of expenses
    pub fn annual_premium(&self) -> f64 {
        12.0 * self.cost_per_month
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 3] {
        [
            (FIELD_COST_PER_MONTH, self.cost_per_month),
            (FIELD_DEDUCTIBLE, self.deductible),
            (FIELD_EXCESS, self.excess),
        ]
    }
}

/// A raw row from the offer editor or an input file; any field may be blank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferInput {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub cost_per_month: Option<f64>,

    #[serde(default, alias = "deducible")]
    pub deductible: Option<f64>,

    #[serde(default)]
    pub excess: Option<f64>,
}

impl OfferInput {
    /// Convert editor rows into validated offers.
    ///
    /// Blank labels become `Choice N. {row}` (rows are 1-based). Rows with
    /// missing numeric fields are all reported in one error.
    pub fn into_offers(rows: Vec<OfferInput>) -> Result<Vec<Offer>, ValidationError> {
        let mut offers = Vec::with_capacity(rows.len());
        let mut missing = Vec::new();

        for (idx, row) in rows.into_iter().enumerate() {
            let label = match row.label.map(|l| l.trim().to_string()) {
                Some(l) if !l.is_empty() => l,
                _ => format!("Choice N. {}", idx + 1),
            };

            let fields: Vec<&'static str> = [
                (FIELD_COST_PER_MONTH, row.cost_per_month),
                (FIELD_DEDUCTIBLE, row.deductible),
                (FIELD_EXCESS, row.excess),
            ]
            .into_iter()
            .filter(|(_, v)| v.map_or(true, f64::is_nan))
            .map(|(name, _)| name)
            .collect();

            if !fields.is_empty() {
                missing.push(MissingFields { label, fields });
                continue;
            }

            offers.push(Offer::new(
                label,
                row.cost_per_month.unwrap_or_default(),
                row.deductible.unwrap_or_default(),
                row.excess.unwrap_or_default(),
            ));
        }

        if !missing.is_empty() {
            return Err(ValidationError::MissingRequiredFields(missing));
        }

        validate_offers(&offers)?;
        Ok(offers)
    }
}

/// Check labels and numeric fields of a set of offers.
///
/// Labels must be non-empty and unique; every duplicated label is named once,
/// in order of first appearance. NaN counts as a missing field.
pub fn validate_offers(offers: &[Offer]) -> Result<(), ValidationError> {
    if let Some(index) = offers.iter().position(|o| o.label.trim().is_empty()) {
        return Err(ValidationError::EmptyLabel { index });
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut duplicates = Vec::new();
    for offer in offers {
        let count = counts.entry(offer.label.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            duplicates.push(offer.label.clone());
        }
    }
    if !duplicates.is_empty() {
        return Err(ValidationError::DuplicateLabels(duplicates));
    }

    let missing: Vec<MissingFields> = offers
        .iter()
        .filter_map(|offer| {
            let fields: Vec<&'static str> = offer
                .numeric_fields()
                .into_iter()
                .filter(|(_, v)| v.is_nan())
                .map(|(name, _)| name)
                .collect();
            (!fields.is_empty()).then(|| MissingFields {
                label: offer.label.clone(),
                fields,
            })
        })
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingRequiredFields(missing));
    }

    for offer in offers {
        for (field, value) in offer.numeric_fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidValue {
                    label: offer.label.clone(),
                    field,
                    value,
                });
            }
        }
    }

    Ok(())
}

/// Check that the number of offers is within the supported range
pub fn validate_offer_count(count: usize, max: usize) -> Result<(), ValidationError> {
    if count < MIN_OFFERS {
        return Err(ValidationError::TooFewOffers { count, min: MIN_OFFERS });
    }
    if count > max {
        return Err(ValidationError::TooManyOffers { count, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: Option<&str>, cost: Option<f64>, deductible: Option<f64>, excess: Option<f64>) -> OfferInput {
        OfferInput {
            label: label.map(String::from),
            cost_per_month: cost,
            deductible,
            excess,
        }
    }

    #[test]
    fn test_blank_labels_are_numbered_by_row() {
        let offers = OfferInput::into_offers(vec![
            row(Some("Basic"), Some(500.0), Some(300.0), Some(700.0)),
            row(None, Some(400.0), Some(2500.0), Some(700.0)),
            row(Some("   "), Some(350.0), Some(2500.0), Some(700.0)),
        ])
        .unwrap();

        let labels: Vec<_> = offers.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Basic", "Choice N. 2", "Choice N. 3"]);
    }

    #[test]
    fn test_missing_fields_are_collected() {
        let err = OfferInput::into_offers(vec![
            row(Some("Basic"), Some(500.0), None, Some(700.0)),
            row(Some("Plus"), Some(400.0), Some(2500.0), Some(700.0)),
            row(None, None, Some(f64::NAN), None),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ValidationError::MissingRequiredFields(vec![
                MissingFields { label: "Basic".into(), fields: vec![FIELD_DEDUCTIBLE] },
                MissingFields {
                    label: "Choice N. 3".into(),
                    fields: vec![FIELD_COST_PER_MONTH, FIELD_DEDUCTIBLE, FIELD_EXCESS],
                },
            ])
        );
    }

    #[test]
    fn test_duplicates_named_once_in_order() {
        let offers = vec![
            Offer::new("B", 1.0, 1.0, 1.0),
            Offer::new("A", 1.0, 1.0, 1.0),
            Offer::new("B", 1.0, 1.0, 1.0),
            Offer::new("A", 1.0, 1.0, 1.0),
            Offer::new("B", 1.0, 1.0, 1.0),
            Offer::new("C", 1.0, 1.0, 1.0),
        ];
        assert_eq!(
            validate_offers(&offers),
            Err(ValidationError::DuplicateLabels(vec!["B".into(), "A".into()]))
        );
    }

    #[test]
    fn test_rejects_empty_label_and_bad_numbers() {
        let offers = vec![Offer::new("A", 1.0, 1.0, 1.0), Offer::new("", 1.0, 1.0, 1.0)];
        assert_eq!(validate_offers(&offers), Err(ValidationError::EmptyLabel { index: 1 }));

        let offers = vec![Offer::new("A", 1.0, -5.0, 1.0)];
        assert!(matches!(
            validate_offers(&offers),
            Err(ValidationError::InvalidValue { field: FIELD_DEDUCTIBLE, .. })
        ));

        let offers = vec![Offer::new("A", f64::INFINITY, 0.0, 1.0)];
        assert!(matches!(
            validate_offers(&offers),
            Err(ValidationError::InvalidValue { field: FIELD_COST_PER_MONTH, .. })
        ));

        let offers = vec![Offer::new("A", 1.0, 0.0, f64::NAN)];
        assert!(matches!(
            validate_offers(&offers),
            Err(ValidationError::MissingRequiredFields(_))
        ));
    }

    #[test]
    fn test_offer_count_bounds() {
        assert_eq!(
            validate_offer_count(1, 50),
            Err(ValidationError::TooFewOffers { count: 1, min: 2 })
        );
        assert!(validate_offer_count(2, 50).is_ok());
        assert!(validate_offer_count(50, 50).is_ok());
        assert_eq!(
            validate_offer_count(51, 50),
            Err(ValidationError::TooManyOffers { count: 51, max: 50 })
        );
    }
}
