//! Localized text for reports and user-facing validation messages
//!
//! The language is always passed explicitly; there is no process-wide selection.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported report languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
    It,
    De,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Fr, Language::It, Language::De];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::It => "it",
            Language::De => "de",
        }
    }

    fn index(&self) -> usize {
        match self {
            Language::En => 0,
            Language::Fr => 1,
            Language::It => 2,
            Language::De => 3,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown language '{}' (expected one of: en, fr, it, de)", s))
    }
}

/// Keys of every translated string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Title,
    TableExplanation,
    ColumnExpenseRange,
    RangeAny,
    RangeLess,
    RangeBetween,
    RangeOver,
    FirstCheapest,
    SecondCheapest,
    ThirdCheapest,
    BreakEvenPoints,
    NoBreakEvenPoints,
    ExpenseAxis,
    CostsAt,
    ErrorDuplicateLabels,
    ErrorRequiredFields,
}

impl TextKey {
    pub const ALL: [TextKey; 16] = [
        TextKey::Title,
        TextKey::TableExplanation,
        TextKey::ColumnExpenseRange,
        TextKey::RangeAny,
        TextKey::RangeLess,
        TextKey::RangeBetween,
        TextKey::RangeOver,
        TextKey::FirstCheapest,
        TextKey::SecondCheapest,
        TextKey::ThirdCheapest,
        TextKey::BreakEvenPoints,
        TextKey::NoBreakEvenPoints,
        TextKey::ExpenseAxis,
        TextKey::CostsAt,
        TextKey::ErrorDuplicateLabels,
        TextKey::ErrorRequiredFields,
    ];
}

/// [EN, FR, IT, DE]
fn translations(key: TextKey) -> [&'static str; 4] {
    match key {
        TextKey::Title => [
            "Insurance Comparator",
            "Comparateur d'Assurances",
            "Comparatore di Assicurazioni",
            "Versicherungsvergleich",
        ],
        TextKey::TableExplanation => [
            "Cheapest offers for each range of yearly medical expenses.",
            "Offres les moins chères pour chaque intervalle de dépenses médicales annuelles.",
            "Offerte meno care per ciascun intervallo di spese mediche annuali.",
            "Günstigste Angebote für jede Spanne jährlicher medizinischer Ausgaben.",
        ],
        TextKey::ColumnExpenseRange => [
            "If you spend, in CHF per year",
            "Si vous dépensez, en CHF par année",
            "Se lei spende, in CHF per anno",
            "Wenn Sie ausgeben, in CHF pro Jahr",
        ],
        TextKey::RangeAny => [
            "Any amount",
            "Tout montant",
            "Qualunque montante",
            "Beliebiger Betrag",
        ],
        TextKey::RangeLess => [
            "Less than {}",
            "Moins que {}",
            "Meno di {}",
            "Weniger als {}",
        ],
        TextKey::RangeBetween => [
            "Between {} and {}",
            "Entre {} et {}",
            "Tra {} e {}",
            "Zwischen {} und {}",
        ],
        TextKey::RangeOver => [
            "Over {}",
            "Plus que {}",
            "Più di {}",
            "Mehr als {}",
        ],
        TextKey::FirstCheapest => [
            "Cheapest",
            "Moins Chère",
            "Meno Cara",
            "Günstigste",
        ],
        TextKey::SecondCheapest => [
            "2nd Cheapest",
            "2ème Moins Chère",
            "2ª Meno Cara",
            "Zweitgünstigste",
        ],
        TextKey::ThirdCheapest => [
            "3rd Cheapest",
            "3ème Moins Chère",
            "3ª Meno Cara",
            "Drittgünstigste",
        ],
        TextKey::BreakEvenPoints => [
            "Break-even points: {}",
            "Seuils de rentabilité: {}",
            "Punti di pareggio: {}",
            "Gewinnschwellen: {}",
        ],
        TextKey::NoBreakEvenPoints => [
            "Break-even points: none",
            "Seuils de rentabilité: aucun",
            "Punti di pareggio: nessuno",
            "Gewinnschwellen: keine",
        ],
        TextKey::ExpenseAxis => [
            "Expenses compared from 0 to {} CHF per year",
            "Dépenses comparées de 0 à {} CHF par année",
            "Spese confrontate da 0 a {} CHF per anno",
            "Verglichene Ausgaben von 0 bis {} CHF pro Jahr",
        ],
        TextKey::CostsAt => [
            "If you spend {} CHF per year:",
            "Si vous dépensez {} CHF par année:",
            "Se lei spende {} CHF per anno:",
            "Wenn Sie {} CHF pro Jahr ausgeben:",
        ],
        TextKey::ErrorDuplicateLabels => [
            "Some of your options have the same label: {}. Please ensure they are unique before starting the comparison.",
            "Certaines de vos options ont le même nom: {}. Assurez-vous qu'elles soient uniques avant de démarrer la comparaison.",
            "Alcune delle sue opzioni hanno lo stesso nome: {}. Si assicuri che siano unici prima di iniziare il confronto.",
            "Einige Ihrer Optionen haben die gleiche Bezeichnung: {}. Bitte stellen Sie sicher, dass diese eindeutig sind, bevor Sie den Vergleich starten.",
        ],
        TextKey::ErrorRequiredFields => [
            "Please fill out all values in columns 'Cost per month', 'Deductible' and 'Excess (at 10%)'. Incomplete: {}.",
            "Remplissez toutes les valeurs dans les colonnes 'Coût par mois', 'Franchise' et 'Quote-part (à 10%)'. Incomplet: {}.",
            "Riempia tutti i valori nelle colonne 'Costo al mese', 'Franchigia' e 'Aliquota (al 10%)'. Incompleto: {}.",
            "Bitte füllen Sie alle Werte in den Spalten 'Kosten pro Monat', 'Franchise' und 'Selbstbehalt (bei 10%)' aus. Unvollständig: {}.",
        ],
    }
}

/// Raw translated string for `key`
pub fn text(lang: Language, key: TextKey) -> &'static str {
    translations(key)[lang.index()]
}

/// Translated string with each `{}` replaced by the next argument
pub fn text_with(lang: Language, key: TextKey, args: &[&str]) -> String {
    let template = text(lang, key);
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut pieces = template.split("{}").peekable();

    while let Some(piece) = pieces.next() {
        out.push_str(piece);
        if pieces.peek().is_some() {
            out.push_str(args.next().copied().unwrap_or_default());
        }
    }
    out
}

/// Header of the n-th cheapest column (0-based)
pub fn rank_column(lang: Language, position: usize) -> String {
    match position {
        0 => text(lang, TextKey::FirstCheapest).to_string(),
        1 => text(lang, TextKey::SecondCheapest).to_string(),
        2 => text(lang, TextKey::ThirdCheapest).to_string(),
        n => format!("#{}", n + 1),
    }
}

/// Message shown to the user for a validation failure.
///
/// Duplicate labels and missing fields are translated; the remaining kinds
/// fall back to the error's own description.
pub fn validation_message(lang: Language, err: &ValidationError) -> String {
    match err {
        ValidationError::DuplicateLabels(labels) => {
            text_with(lang, TextKey::ErrorDuplicateLabels, &[&labels.join(", ")])
        }
        ValidationError::MissingRequiredFields(missing) => {
            let labels: Vec<&str> = missing.iter().map(|m| m.label.as_str()).collect();
            text_with(lang, TextKey::ErrorRequiredFields, &[&labels.join(", ")])
        }
        other => other.to_string(),
    }
}
