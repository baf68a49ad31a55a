//! Terminal rendering of the session's result view.

use crate::models::ComplianceStatus;
use crate::session::{FlowStatus, Session};
use std::fmt::Write as _;
use std::time::Instant;

/// Renders the analysis outcome: the pre-filled fields or the inline error.
pub fn render_analysis(session: &Session) -> String {
    if let Some(error) = session.analysis_error() {
        return format!("Error\n{}\n", error);
    }

    let form = &session.form;
    format!(
        "Product Name:\n{}\n\nProduct Details:\n{}\n\nTarget Audience:\n{}\n",
        form.product_name, form.product_details, form.target_audience
    )
}

/// Renders exactly one of: loading indicator, error banner, result with
/// compliance verdict, or the idle placeholder.
pub fn render_result(session: &Session, now: Instant) -> String {
    if session.generation_status() == FlowStatus::InProgress {
        return "Optimizing your ad...\nPlease wait, the AI is working.\n".to_string();
    }

    let mut out = String::new();

    if let Some(error) = session.generation_error() {
        let _ = writeln!(out, "Error\n{}", error);
    }

    match (session.generated_ad(), session.compliance()) {
        (Some(ad), Some(compliance)) => {
            let copied = if session.is_copied(now) {
                " [Copied!]"
            } else {
                ""
            };
            let _ = writeln!(out, "Optimized Result{}", copied);
            let _ = writeln!(out, "\nImage:\n{}", display_image_url(&ad.image_url));
            let _ = writeln!(out, "\nOptimized Title:\n{}", ad.title);
            let _ = writeln!(out, "\nOptimized Description:\n{}", ad.description);
            let _ = writeln!(out, "\nSuggested Category:\n{}", ad.category);

            let heading = match compliance.status {
                ComplianceStatus::Approved => "Compliance Approved",
                ComplianceStatus::ReviewNeeded => "Review Needed",
            };
            let _ = writeln!(out, "\n{}\n{}", heading, compliance.feedback);
        }
        _ if out.is_empty() => {
            out.push_str("Waiting for your product\n");
            out.push_str("Fill in the details and generate your optimized ad.\n");
        }
        _ => {}
    }

    out
}

/// Data URLs are shortened so a full base64 image is not dumped to the terminal.
fn display_image_url(url: &str) -> String {
    const DATA_URL_PREVIEW: usize = 48;
    if !url.starts_with("data:") {
        return url.to_string();
    }
    match url.char_indices().nth(DATA_URL_PREVIEW) {
        Some((cut, _)) => format!("{}... ({} chars)", &url[..cut], url.chars().count()),
        None => url.to_string(),
    }
}
