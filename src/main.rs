//! Insurance Comparator CLI
//!
//! Compares insurance offers loaded from CSV/JSON files and prints, for each
//! range of yearly medical expenses, which offers are cheapest.

use anyhow::{ensure, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use insurance_comparator::{
    locale::{text, text_with, validation_message, TextKey},
    offer::load_offers,
    report::{format_amount, write_curves_csv},
    Comparison, ComparisonConfig, ComparisonRunner, ComparisonTable, Language, Offer, Quote,
};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "insurance_comparator", version, about = "Find the cheapest insurance offer for any yearly medical expenses")]
struct Cli {
    /// Offer files (CSV or .json). Without any, two example offers are compared.
    inputs: Vec<PathBuf>,

    /// Number of cheapest offers reported per range
    #[arg(long)]
    top_n: Option<usize>,

    /// Extra room past the largest finite expense, as a ratio
    #[arg(long)]
    tail_margin: Option<f64>,

    /// Report language (en, fr, it, de)
    #[arg(long, env = "COMPARATOR_LANG", default_value = "en")]
    lang: Language,

    /// Also print every offer's cost at this yearly expense (repeatable)
    #[arg(long = "at", value_name = "EXPENSE")]
    at: Vec<f64>,

    /// Write the ranking table to this CSV file
    #[arg(long, value_name = "PATH")]
    table_csv: Option<PathBuf>,

    /// Write the clamped curve breakpoints to this CSV file
    #[arg(long, value_name = "PATH")]
    curves_csv: Option<PathBuf>,

    /// Print a JSON document instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ExpenseQuotes {
    expense: f64,
    quotes: Vec<Quote>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    source: String,
    language: Language,
    config: &'a ComparisonConfig,
    comparison: &'a Comparison,
    table: ComparisonTable,
    quotes: Vec<ExpenseQuotes>,
}

fn example_offers() -> Vec<Offer> {
    vec![
        Offer::new("Example 1", 500.0, 300.0, 700.0),
        Offer::new("Example 2", 400.0, 2500.0, 700.0),
    ]
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    ensure!(
        cli.inputs.len() <= 1 || (cli.table_csv.is_none() && cli.curves_csv.is_none()),
        "--table-csv and --curves-csv need a single input file"
    );

    let mut config = ComparisonConfig::from_env();
    if let Some(top_n) = cli.top_n {
        config.top_n = top_n;
    }
    if let Some(margin) = cli.tail_margin {
        config.tail_margin = margin;
    }
    let runner = ComparisonRunner::with_config(config);

    let (sources, batches) = if cli.inputs.is_empty() {
        (vec!["built-in example".to_string()], vec![example_offers()])
    } else {
        let mut batches = Vec::with_capacity(cli.inputs.len());
        for path in &cli.inputs {
            let offers = load_offers(path).map_err(|e| match e {
                insurance_comparator::LoadError::Validation(v) => {
                    anyhow::anyhow!(validation_message(cli.lang, &v))
                }
                other => anyhow::Error::new(other),
            })
            .with_context(|| format!("Failed to load offers from {}", path.display()))?;
            batches.push(offers);
        }
        let sources = cli.inputs.iter().map(|p| p.display().to_string()).collect();
        (sources, batches)
    };

    let results = runner.run_batch(&batches);
    log::debug!("{} comparison(s) done in {:?}", results.len(), start.elapsed());

    let mut reports = Vec::new();
    for (source, result) in sources.iter().zip(results) {
        let comparison = result
            .map_err(|e| anyhow::anyhow!(validation_message(cli.lang, &e)))
            .with_context(|| format!("Cannot compare offers from {}", source))?;

        let table = runner.table(&comparison, cli.lang);
        let quotes: Vec<ExpenseQuotes> = cli
            .at
            .iter()
            .map(|&expense| ExpenseQuotes {
                expense,
                quotes: runner.comparator().quote(&comparison.curves, expense),
            })
            .collect();

        if let Some(path) = &cli.table_csv {
            let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
            table.write_csv(file)?;
        }
        if let Some(path) = &cli.curves_csv {
            let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
            write_curves_csv(&comparison.curves, file)?;
        }

        if cli.json {
            reports.push(serde_json::to_value(JsonReport {
                generated_at: Utc::now(),
                source: source.clone(),
                language: cli.lang,
                config: runner.config(),
                comparison: &comparison,
                table,
                quotes,
            })?);
        } else {
            print_text_report(cli.lang, source, &comparison, &table, &quotes);
        }
    }

    if cli.json {
        let output = if reports.len() == 1 {
            serde_json::to_string_pretty(&reports[0])?
        } else {
            serde_json::to_string_pretty(&reports)?
        };
        println!("{}", output);
    }

    Ok(())
}

fn print_text_report(
    lang: Language,
    source: &str,
    comparison: &Comparison,
    table: &ComparisonTable,
    quotes: &[ExpenseQuotes],
) {
    println!("{} ({})", text(lang, TextKey::Title), source);
    println!("{}\n", "=".repeat(60));

    if comparison.intersections.is_empty() {
        println!("{}", text(lang, TextKey::NoBreakEvenPoints));
    } else {
        let points: Vec<String> = comparison.intersections.iter().map(|&x| format_amount(x)).collect();
        println!("{}", text_with(lang, TextKey::BreakEvenPoints, &[&points.join(", ")]));
    }
    let axis_end = format_amount(comparison.right_boundary);
    println!("{}\n", text_with(lang, TextKey::ExpenseAxis, &[&axis_end]));

    println!("{}\n", text(lang, TextKey::TableExplanation));
    print!("{}", table.render());

    for entry in quotes {
        let expense = format_amount(entry.expense);
        println!("\n{}", text_with(lang, TextKey::CostsAt, &[&expense]));
        for quote in &entry.quotes {
            println!("  {:<24} {:>12.2}", quote.label, quote.cost);
        }
    }
    println!();
}
