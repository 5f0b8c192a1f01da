//! Manuscript review tool: upload a manuscript, pick a journal, and get a
//! submission-readiness report in one synchronous round trip.

use std::{borrow::Cow, path::PathBuf};

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use serde::Serialize;
use tokio::fs as tokio_fs;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    evaluator::{self, FormatInfo, Report, render_report},
    extract,
    web::{
        ApiMessage, AppState, FileFieldConfig, PageLayout, escape_html, json_error,
        process_upload_form, render_page,
    },
};

const STORAGE_ROOT: &str = "storage/review";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tools/review", get(review_page))
        .route("/tools/review/evaluate", post(evaluate_manuscript))
}

#[derive(Serialize)]
struct EvaluationResponse {
    journal: Option<String>,
    focus: Option<String>,
    format: FormatInfo,
    keywords: Vec<String>,
    warnings: Vec<String>,
    suggestions: Vec<String>,
    report_text: Option<String>,
    message: Option<String>,
}

impl EvaluationResponse {
    fn completed(report: Report, focus: Option<String>) -> Self {
        let report_text = render_report(&report);
        Self {
            journal: Some(report.journal),
            focus,
            format: report.format,
            keywords: report.keywords,
            warnings: report.warnings,
            suggestions: report.suggestions,
            report_text: Some(report_text),
            message: None,
        }
    }

    fn format_only(format: FormatInfo, message: String) -> Self {
        Self {
            journal: None,
            focus: None,
            format,
            keywords: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
            report_text: None,
            message: Some(message),
        }
    }
}

async fn review_page() -> Html<String> {
    let journal_options = evaluator::builtin_profiles()
        .into_iter()
        .map(|profile| {
            format!(
                r#"                            <option value="{id}">{name}</option>"#,
                id = profile.id,
                name = escape_html(&profile.name),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body_html = format!(
        r#"                <section class="panel">
                    <h2>Submit a manuscript</h2>
                    <form id="review-form">
                        <label for="review-journal">Target journal</label>
                        <select id="review-journal" name="journal">
{journal_options}
                        </select>
                        <label for="review-file" style="margin-top: 1rem;">Manuscript file</label>
                        <input id="review-file" name="file" type="file" accept=".docx,.pdf,.txt">
                        <p class="note">A single DOCX, PDF, or TXT file. Section checks (abstract, keywords) need the DOCX heading styles.</p>
                        <button type="submit">Evaluate manuscript</button>
                    </form>
                    <div id="status-box" class="status-box">Waiting for a manuscript.</div>
                </section>
                <section id="results-section" class="results" style="display:none;">
                    <h2>Evaluation result</h2>
                    <div id="format-summary"></div>
                    <div id="feedback"></div>
                    <h3>Report</h3>
                    <pre id="report-text"></pre>
                </section>
"#,
    );

    let extra_styles = Cow::Borrowed(
        r#"        .results { background: #ffffff; border-radius: 12px; border: 1px solid #e2e8f0; padding: 1.5rem; box-shadow: 0 10px 30px rgba(15, 23, 42, 0.06); }
        .results h3 { margin-bottom: 0.5rem; }
        .results pre { background: #f1f5f9; border-radius: 8px; padding: 1rem; white-space: pre-wrap; font-size: 0.9rem; }
        .results ul { margin: 0.25rem 0 1rem; padding-left: 1.25rem; }
"#,
    );

    let review_script = r#"const form = document.getElementById('review-form');
const fileInput = document.getElementById('review-file');
const journalSelect = document.getElementById('review-journal');
const statusBox = document.getElementById('status-box');
const resultsSection = document.getElementById('results-section');
const formatSummary = document.getElementById('format-summary');
const feedbackBox = document.getElementById('feedback');
const reportText = document.getElementById('report-text');

const resetResults = () => {
    resultsSection.style.display = 'none';
    formatSummary.innerHTML = '';
    feedbackBox.innerHTML = '';
    reportText.textContent = '';
};

const renderList = (title, items) => {
    if (!items || items.length === 0) {
        return '';
    }
    const rows = items.map((item) => `<li>${item}</li>`).join('');
    return `<h3>${title}</h3><ul>${rows}</ul>`;
};

const renderResult = (data) => {
    const pages = data.format.pages_estimate.toFixed(1);
    formatSummary.innerHTML = `
        <p><strong>Estimated word count:</strong> ${data.format.word_count}</p>
        <p><strong>Estimated page count:</strong> ${pages} pages</p>
    `;

    if (data.message) {
        feedbackBox.innerHTML = `<p class="note">${data.message}</p>`;
        reportText.textContent = '';
    } else {
        const focus = data.focus ? `<p><strong>Focus and scope:</strong> ${data.focus}</p>` : '';
        const keywords = data.keywords.length > 0
            ? `<p><strong>Keywords (${data.keywords.length}):</strong> ${data.keywords.join(', ')}</p>`
            : '<p><strong>Keywords:</strong> none found</p>';
        feedbackBox.innerHTML = focus + keywords +
            renderList('Warnings', data.warnings) +
            renderList('Suggestions', data.suggestions);
        reportText.textContent = data.report_text || '';
    }
    resultsSection.style.display = 'block';
};

form.addEventListener('submit', async (event) => {
    event.preventDefault();
    if (!fileInput.files || fileInput.files.length === 0) {
        statusBox.textContent = 'Choose a manuscript file first.';
        return;
    }
    resetResults();
    statusBox.textContent = 'Evaluating manuscript...';
    const formData = new FormData();
    formData.append('journal', journalSelect.value);
    formData.append('file', fileInput.files[0]);

    try {
        const res = await fetch('/tools/review/evaluate', { method: 'POST', body: formData });
        if (!res.ok) {
            const errorBody = await res.json().catch(() => ({ message: 'Evaluation failed.' }));
            statusBox.textContent = errorBody.message || 'Evaluation failed.';
            return;
        }
        const data = await res.json();
        statusBox.textContent = data.journal
            ? `Evaluated against ${data.journal}.`
            : 'Evaluation finished.';
        renderResult(data);
    } catch (err) {
        statusBox.textContent = 'Evaluation failed: ' + err.message;
    }
});
"#;

    let html = render_page(PageLayout {
        meta_title: "Manuscript Review | Manuscript Review Assistant",
        page_heading: "Manuscript Review",
        note_html: Cow::Borrowed(
            "Upload your manuscript, select the target journal, and receive feedback on length, abstract, and keywords.",
        ),
        body_html: Cow::Owned(body_html),
        extra_style_blocks: vec![extra_styles],
        body_scripts: vec![Cow::Owned(format!("<script>\n{}\n</script>", review_script))],
    });

    Html(html)
}

async fn evaluate_manuscript(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationResponse>, (StatusCode, Json<ApiMessage>)> {
    ensure_storage_root().await.map_err(internal_error)?;

    let request_dir = PathBuf::from(STORAGE_ROOT).join(Uuid::new_v4().to_string());
    let file_config = FileFieldConfig::new("file", &["docx", "pdf", "txt"], "source_");

    let upload = match process_upload_form(multipart, &request_dir, &file_config).await {
        Ok(outcome) => outcome,
        Err(err) => {
            let _ = tokio_fs::remove_dir_all(&request_dir).await;
            return Err(json_error(StatusCode::BAD_REQUEST, err.message()));
        }
    };

    let journal = upload
        .text_value("journal")
        .unwrap_or_default()
        .trim()
        .to_string();

    info!(
        file = %upload.file.original_name,
        size = upload.file.file_size,
        journal = %journal,
        "manuscript received"
    );

    // Nothing persists across requests; drop the upload as soon as the text
    // is out of it.
    let document = extract::read_document(&upload.file.stored_path);
    let _ = tokio_fs::remove_dir_all(&request_dir).await;

    if journal.is_empty() {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "Select a target journal.",
        ));
    }

    let document = document.map_err(|err| {
        error!(?err, "failed to read uploaded manuscript");
        json_error(
            StatusCode::BAD_REQUEST,
            "The manuscript could not be read. Check that the file is a valid DOCX, PDF, or TXT document.",
        )
    })?;

    if document.text.trim().is_empty() {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "No text could be extracted from the manuscript.",
        ));
    }

    let format = evaluator::estimate_format(&document.text);
    let sections = evaluator::extract_sections(&document.paragraphs);
    info!(
        words = format.word_count,
        sections = sections.len(),
        "manuscript analyzed"
    );

    let response = match evaluator::evaluate(&format, Some(&sections), &journal) {
        Ok(report) => {
            let focus = evaluator::builtin_profile(&journal).map(|profile| profile.focus);
            EvaluationResponse::completed(report, focus)
        }
        Err(unknown) => match state.guidelines().fetch(&journal).await {
            Some(remote) => {
                let profile = remote.into_profile(&journal);
                let focus = profile.focus.clone();
                let report = evaluator::evaluate_with_profile(&format, Some(&sections), &profile);
                EvaluationResponse::completed(report, Some(focus))
            }
            None => {
                info!(
                    journal = unknown.name(),
                    "journal not in the built-in table and no remote record found"
                );
                EvaluationResponse::format_only(
                    format,
                    format!("{} Length estimates are shown below.", unknown),
                )
            }
        },
    };

    Ok(Json(response))
}

async fn ensure_storage_root() -> Result<()> {
    tokio_fs::create_dir_all(STORAGE_ROOT)
        .await
        .with_context(|| format!("failed to ensure storage root at {}", STORAGE_ROOT))
}

fn internal_error(err: anyhow::Error) -> (StatusCode, Json<ApiMessage>) {
    error!(?err, "internal error in review module");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_response_carries_report_fields() {
        let info = evaluator::estimate_format("a short manuscript");
        let report = evaluator::evaluate(&info, None, "amj").unwrap();

        let response = EvaluationResponse::completed(report, Some("focus".to_string()));
        assert_eq!(
            response.journal.as_deref(),
            Some("Academy of Management Journal (AMJ)")
        );
        assert!(response.report_text.unwrap().starts_with("Evaluation for"));
        assert!(response.message.is_none());
    }

    #[test]
    fn format_only_response_has_no_report() {
        let info = evaluator::estimate_format("a short manuscript");
        let response = EvaluationResponse::format_only(info, "unknown journal".to_string());
        assert!(response.journal.is_none());
        assert!(response.report_text.is_none());
        assert_eq!(response.message.as_deref(), Some("unknown journal"));
    }
}
