//! Turns an upstream outcome into the local result category.

use common::JobListing;
use serde_json::Value;
use tracing::{error, info};

use crate::error::FailureKind;
use crate::upstream::UpstreamOutcome;

/// Local outcome of one search. `Found` always carries at least one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultOutcome {
    Found(Vec<JobListing>),
    Unauthorized,
    NotFound,
    GatewayTimeout,
    ServerError(u16),
}

pub fn classify(outcome: UpstreamOutcome) -> ResultOutcome {
    let (result, failure) = classify_with_reason(outcome);
    match failure {
        Some(kind) => info!("Search absorbed {}: {:?}", kind, result),
        None => info!("Search succeeded"),
    }
    result
}

/// Same as [`classify`], also reporting which failure kind was absorbed.
pub fn classify_with_reason(outcome: UpstreamOutcome) -> (ResultOutcome, Option<FailureKind>) {
    match outcome {
        UpstreamOutcome::Success { body, status } => match status {
            200..=299 => match extract_jobs(&body) {
                Ok(jobs) if jobs.is_empty() => {
                    (ResultOutcome::NotFound, Some(FailureKind::UpstreamNoMatch))
                }
                Ok(jobs) => (ResultOutcome::Found(jobs), None),
                Err(e) => {
                    error!("JSON parse error: {}", e);
                    (
                        ResultOutcome::ServerError(500),
                        Some(FailureKind::UpstreamMalformedPayload),
                    )
                }
            },
            401 => (
                ResultOutcome::Unauthorized,
                Some(FailureKind::UpstreamAuthFailure),
            ),
            404 => (ResultOutcome::NotFound, Some(FailureKind::UpstreamNoMatch)),
            _ => (
                ResultOutcome::ServerError(500),
                Some(FailureKind::UpstreamUnexpectedStatus),
            ),
        },
        UpstreamOutcome::NetworkError => (
            ResultOutcome::ServerError(500),
            Some(FailureKind::TransportFailure),
        ),
        UpstreamOutcome::Timeout => (
            ResultOutcome::GatewayTimeout,
            Some(FailureKind::TransportTimeout),
        ),
    }
}

/// Reads `SearchResult.SearchResultItems` from a response body. A missing
/// container at any level yields no jobs; only malformed JSON is an error.
pub fn extract_jobs(body: &[u8]) -> Result<Vec<JobListing>, serde_json::Error> {
    let root: Value = serde_json::from_slice(body)?;
    let items = root
        .pointer("/SearchResult/SearchResultItems")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    Ok(items.iter().map(project_listing).collect())
}

fn project_listing(item: &Value) -> JobListing {
    let descriptor = item.get("MatchedObjectDescriptor");
    let field = |name: &str| descriptor.and_then(|d| d.get(name)).and_then(scalar_text);
    JobListing {
        title: field("PositionTitle"),
        url: field("PositionURI"),
        description: field("QualificationSummary"),
    }
}

/// Text for a descriptor value. Strings are taken as-is, null counts as
/// absent, anything else is rendered as its JSON text.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
