//! Collapsed cheapest-offer table and CSV exports

use crate::comparison::RankedRange;
use crate::curve::CurvePoint;
use crate::locale::{rank_column, text, text_with, Language, TextKey};
use serde::Serialize;
use std::io::Write;

/// One row of the table: an expense range and its cheapest offers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub range: String,
    pub offers: Vec<String>,
}

/// Table with one row per merged range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Amounts are shown in whole currency units
pub fn format_amount(amount: f64) -> String {
    format!("{:.0}", amount)
}

/// Human label for the `index`-th of `count` ranges. The first range is
/// open below and the last one open above.
pub fn range_label(lang: Language, range: &RankedRange, index: usize, count: usize) -> String {
    let start = format_amount(range.start);
    let end = format_amount(range.end);

    if count <= 1 {
        text(lang, TextKey::RangeAny).to_string()
    } else if index == 0 {
        text_with(lang, TextKey::RangeLess, &[&end])
    } else if index + 1 == count {
        text_with(lang, TextKey::RangeOver, &[&start])
    } else {
        text_with(lang, TextKey::RangeBetween, &[&start, &end])
    }
}

impl ComparisonTable {
    /// Build the table for `ranges`, with `top_n` ranking columns
    pub fn from_ranges(ranges: &[RankedRange], lang: Language, top_n: usize) -> Self {
        let columns = ranges
            .iter()
            .map(|r| r.ranking.len())
            .max()
            .unwrap_or(0)
            .min(top_n.max(1));

        let mut headers = vec![text(lang, TextKey::ColumnExpenseRange).to_string()];
        headers.extend((0..columns).map(|i| rank_column(lang, i)));

        let rows = ranges
            .iter()
            .enumerate()
            .map(|(i, range)| TableRow {
                range: range_label(lang, range, i, ranges.len()),
                offers: (0..columns)
                    .map(|c| range.ranking.get(c).cloned().unwrap_or_default())
                    .collect(),
            })
            .collect();

        Self { headers, rows }
    }

    /// Plain-text rendering with aligned columns
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in std::iter::once(&row.range).chain(&row.offers).enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let format_line = |cells: Vec<&String>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        out.push_str(&format_line(self.headers.iter().collect()));
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<&String> = std::iter::once(&row.range).chain(&row.offers).collect();
            out.push_str(&format_line(cells));
            out.push('\n');
        }
        out
    }

    /// Write the table as CSV with the localized headers
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(std::iter::once(&row.range).chain(&row.offers))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Write curve breakpoints as `label,expense,cost` rows for plotting
pub fn write_curves_csv<W: Write>(points: &[CurvePoint], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in points {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: f64, end: f64, ranking: &[&str]) -> RankedRange {
        RankedRange {
            start,
            end,
            ranking: ranking.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn sample_ranges() -> Vec<RankedRange> {
        vec![
            range(0.0, 1633.33, &["B", "A", "C"]),
            range(1633.33, 4200.0, &["A", "B", "C"]),
            range(4200.0, 10925.0, &["A", "C", "B"]),
        ]
    }

    #[test]
    fn test_range_labels() {
        let ranges = sample_ranges();
        let labels: Vec<String> = ranges
            .iter()
            .enumerate()
            .map(|(i, r)| range_label(Language::En, r, i, ranges.len()))
            .collect();
        assert_eq!(labels, vec!["Less than 1633", "Between 1633 and 4200", "Over 4200"]);

        let single = range(0.0, 5000.0, &["A"]);
        assert_eq!(range_label(Language::Fr, &single, 0, 1), "Tout montant");
    }

    #[test]
    fn test_table_columns_follow_top_n() {
        let table = ComparisonTable::from_ranges(&sample_ranges(), Language::En, 2);
        assert_eq!(table.headers, vec!["If you spend, in CHF per year", "Cheapest", "2nd Cheapest"]);
        assert_eq!(table.rows[0].offers, vec!["B", "A"]);

        // Fewer offers than requested columns
        let ranges = vec![range(0.0, 100.0, &["A", "B"])];
        let table = ComparisonTable::from_ranges(&ranges, Language::En, 3);
        assert_eq!(table.headers.len(), 3);
    }

    #[test]
    fn test_render_aligns_columns() {
        let table = ComparisonTable::from_ranges(&sample_ranges(), Language::En, 3);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("If you spend, in CHF per year  Cheapest"));
        assert!(lines[2].starts_with("Less than 1633"));
        let column = lines[0].find("Cheapest").unwrap();
        assert_eq!(&lines[3][column..column + 1], "A");
    }

    #[test]
    fn test_csv_exports() {
        let table = ComparisonTable::from_ranges(&sample_ranges(), Language::De, 1);
        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(
            csv,
            "\"Wenn Sie ausgeben, in CHF pro Jahr\",Günstigste\nWeniger als 1633,B\nZwischen 1633 und 4200,A\nMehr als 4200,A\n"
        );

        let points = vec![CurvePoint::new("A", 0.0, 6000.0), CurvePoint::new("A", 300.0, 6300.0)];
        let mut buffer = Vec::new();
        write_curves_csv(&points, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "label,expense,cost\nA,0.0,6000.0\nA,300.0,6300.0\n"
        );
    }
}
