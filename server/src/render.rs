//! HTML result pages.

use common::{JobListing, SearchQuery};

use crate::classify::ResultOutcome;

const PAGE_TITLE: &str = "<h1>USA Jobs Demo</h1>";
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized, either the API Key was changed or is not setup.";
const GATEWAY_TIMEOUT_MESSAGE: &str = "API Error, Gateway Timeout";

/// Rendered page plus the status code to send with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub body: String,
    pub status: u16,
}

/// Builds the result page for `outcome`. Pure: same input, same bytes.
pub fn render(query: &SearchQuery, outcome: &ResultOutcome) -> RenderedPage {
    let mut body = String::from(PAGE_TITLE);

    let status = match outcome {
        ResultOutcome::Found(jobs) => {
            let keyword = or_default(&query.keyword, "All Jobs");
            let location = or_default(&query.location_name, "Everywhere");
            body.push_str(&format!(
                "<h2>Search Results: {} in {}</h2>",
                escape_html(keyword),
                escape_html(location)
            ));
            for job in jobs {
                format_job(&mut body, job);
            }
            200
        }
        ResultOutcome::Unauthorized => {
            body.push_str(&format!("<h2>{UNAUTHORIZED_MESSAGE}</h2>"));
            401
        }
        ResultOutcome::NotFound => {
            body.push_str(&format!(
                "<h2>No Results Found for {} in {}</h2>",
                escape_html(&query.keyword),
                escape_html(&query.location_name)
            ));
            404
        }
        ResultOutcome::GatewayTimeout => {
            body.push_str(&format!("<h2>{GATEWAY_TIMEOUT_MESSAGE}</h2>"));
            504
        }
        ResultOutcome::ServerError(code) => {
            body.push_str(&format!("<h2>API Error ({code})</h2>"));
            *code
        }
    };

    RenderedPage { body, status }
}

fn format_job(out: &mut String, job: &JobListing) {
    let field = |value: &Option<String>| escape_html(value.as_deref().unwrap_or_default());
    out.push_str(&format!(
        "<li><a href=\"{}\">{}</a><p>{}</p></li>",
        field(&job.url),
        field(&job.title),
        field(&job.description)
    ));
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

/// Escapes text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
