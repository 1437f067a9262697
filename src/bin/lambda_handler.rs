//! AWS Lambda handler for insurance comparisons
//!
//! Accepts offers as JSON and returns the clamped cost curves, break-even
//! points, ranked ranges and a localized table. Validation failures come back
//! as HTTP 400 with a message in the requested language.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use insurance_comparator::{
    config::{ComparisonConfig, DEFAULT_TAIL_MARGIN, DEFAULT_TOP_N},
    locale::validation_message,
    Comparison, ComparisonRunner, ComparisonTable, Language, OfferInput, Quote,
};
use lambda_http::{http, run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};

/// Input for one comparison
#[derive(Debug, Deserialize)]
pub struct ComparisonRequest {
    /// Offer rows as entered in the editor
    pub offers: Vec<OfferInput>,

    /// Report language (default: en)
    #[serde(default)]
    pub language: Language,

    /// Cheapest offers reported per range (default: 3)
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Room past the largest finite expense (default: 15%)
    #[serde(default = "default_tail_margin")]
    pub tail_margin: f64,

    /// Expenses at which every offer's cost should be quoted
    #[serde(default)]
    pub quote_at: Vec<f64>,
}

fn default_top_n() -> usize { DEFAULT_TOP_N }
fn default_tail_margin() -> f64 { DEFAULT_TAIL_MARGIN }

#[derive(Debug, Serialize)]
pub struct ExpenseQuotes {
    pub expense: f64,
    pub quotes: Vec<Quote>,
}

/// Output of a successful comparison
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub offer_count: usize,
    #[serde(flatten)]
    pub comparison: Comparison,
    pub table: ComparisonTable,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quotes: Vec<ExpenseQuotes>,
    pub execution_time_ms: u64,
}

/// Response builder carrying the CORS headers every reply shares
fn cors_builder(status: u16) -> http::response::Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message }).to_string();
    Ok(cors_builder(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))?)
}

fn json_response(body: &ComparisonResponse) -> Result<Response<Body>, Error> {
    Ok(cors_builder(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors_builder(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ComparisonRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let lang = request.language;
    let offers = match OfferInput::into_offers(request.offers) {
        Ok(offers) => offers,
        Err(e) => return error_response(400, &validation_message(lang, &e)),
    };

    let runner = ComparisonRunner::with_config(ComparisonConfig {
        tail_margin: request.tail_margin,
        top_n: request.top_n,
        ..ComparisonConfig::default()
    });

    let comparison = match runner.run(&offers) {
        Ok(c) => c,
        Err(e) => return error_response(400, &validation_message(lang, &e)),
    };

    let table = runner.table(&comparison, lang);
    let quotes = request
        .quote_at
        .iter()
        .map(|&expense| ExpenseQuotes {
            expense,
            quotes: runner.comparator().quote(&comparison.curves, expense),
        })
        .collect();

    log::info!(
        "compared {} offers into {} ranges",
        offers.len(),
        comparison.ranges.len()
    );

    let response = ComparisonResponse {
        offer_count: offers.len(),
        comparison,
        table,
        quotes,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
