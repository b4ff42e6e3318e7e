//! AWS Lambda handler for overdue interest calculations
//!
//! Accepts a JSON request with the principal, a deadline (or contribution period)
//! and an optional payment date, and returns the rounded interest with its
//! per-year breakdown.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use serde::Serialize;

use pension_interest::collection::CollectionStatus;
use pension_interest::interest::{AccrualWindow, InterestSegment};
use pension_interest::request::RequestInput;
use pension_interest::{CalculatorConfig, ExemptionPolicy, InterestCalculator};

/// Output of one calculation
#[derive(Debug, Serialize)]
pub struct InterestResponse {
    pub principal: u64,
    pub deadline: NaiveDate,
    pub payment_date: NaiveDate,
    pub final_interest: u64,
    pub raw_total: f64,
    pub status: CollectionStatus,
    pub amount_due: u64,
    pub exemption_threshold: u64,
    pub window: Option<AccrualWindow>,
    pub segments: Vec<InterestSegment>,
    pub execution_time_us: u64,
}

/// Shared across invocations; the rate table is loaded once per cold start
struct AppState {
    calculator: InterestCalculator,
    policy: ExemptionPolicy,
}

fn cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body.to_string()))?)
}

fn json_response(body: &InterestResponse) -> Result<Response<Body>, Error> {
    Ok(cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request, state: &AppState) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let input: RequestInput = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let request = match input.to_request(Local::now().date_naive()) {
        Ok(r) => r,
        Err(e) => {
            warn!("Rejected request: {}", e);
            return error_response(400, &e.to_string());
        }
    };

    let policy = input.exemption_policy(state.policy);

    let result = request.evaluate(&state.calculator);
    let response = InterestResponse {
        principal: request.principal,
        deadline: request.deadline_date(),
        payment_date: request.payment_date,
        final_interest: result.final_interest,
        raw_total: result.raw_total(),
        status: policy.assess(&result),
        amount_due: policy.amount_due(&result),
        exemption_threshold: policy.threshold,
        window: result.window,
        segments: result.segments,
        execution_time_us: start.elapsed().as_micros() as u64,
    };

    info!(
        "Principal {} deadline {} paid {}: interest {}",
        response.principal, response.deadline, response.payment_date, response.final_interest
    );

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = CalculatorConfig::from_env();
    let state = Arc::new(AppState {
        calculator: config.calculator()?,
        policy: config.exemption_policy(),
    });

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { handler(event, &state).await }
    }))
    .await
}
