//! Guidelines Q&A tool: a transcript kept by the browser, one completion
//! call per question.

use std::borrow::Cow;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    chat::{self, ChatTurn},
    web::{ApiMessage, AppState, PageLayout, json_error, render_page},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tools/chat", get(chat_page))
        .route("/tools/chat/ask", post(ask))
}

#[derive(Deserialize)]
struct AskRequest {
    #[serde(default)]
    history: Vec<ChatTurn>,
    question: String,
}

#[derive(Serialize)]
struct AskResponse {
    reply: String,
    history: Vec<ChatTurn>,
}

async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<ApiMessage>)> {
    let question = request.question.trim().to_string();
    if question.is_empty() {
        return Err(json_error(StatusCode::BAD_REQUEST, "Enter a question first."));
    }

    let settings = state.chat_settings().clone();
    let llm = state.llm_client();
    let (reply, history) = chat::answer_question(
        &llm,
        &settings.model,
        &settings.system_prompt,
        request.history,
        &question,
    )
    .await;

    Ok(Json(AskResponse { reply, history }))
}

async fn chat_page() -> Html<String> {
    let body_html = r#"                <section class="panel">
                    <h2>Ask about submission guidelines</h2>
                    <div id="transcript" class="transcript"></div>
                    <form id="chat-form">
                        <label for="chat-question">Your question</label>
                        <input id="chat-question" type="text" autocomplete="off"
                               placeholder="e.g. How long may an abstract be for AMJ?">
                        <button type="submit" style="margin-top: 1rem;">Ask</button>
                    </form>
                    <div id="status-box" class="status-box">Ask a question to get started.</div>
                </section>
"#;

    let extra_styles = Cow::Borrowed(
        r#"        .transcript { display: flex; flex-direction: column; gap: 0.75rem; margin-bottom: 1.25rem; }
        .turn { padding: 0.75rem 1rem; border-radius: 10px; max-width: 85%; line-height: 1.5; white-space: pre-wrap; }
        .turn.user { background: #e0f2fe; align-self: flex-end; }
        .turn.assistant { background: #f1f5f9; align-self: flex-start; }
"#,
    );

    let chat_script = r#"const form = document.getElementById('chat-form');
const questionInput = document.getElementById('chat-question');
const transcript = document.getElementById('transcript');
const statusBox = document.getElementById('status-box');

let history = [];

const renderTranscript = () => {
    transcript.innerHTML = '';
    history.forEach((turn) => {
        const bubble = document.createElement('div');
        bubble.className = `turn ${turn.role}`;
        bubble.textContent = turn.text;
        transcript.appendChild(bubble);
    });
    transcript.scrollTop = transcript.scrollHeight;
};

form.addEventListener('submit', async (event) => {
    event.preventDefault();
    const question = questionInput.value.trim();
    if (!question) {
        statusBox.textContent = 'Enter a question first.';
        return;
    }
    statusBox.textContent = 'Waiting for the assistant...';
    questionInput.value = '';

    try {
        const res = await fetch('/tools/chat/ask', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ history, question }),
        });
        if (!res.ok) {
            const errorBody = await res.json().catch(() => ({ message: 'The question could not be sent.' }));
            statusBox.textContent = errorBody.message || 'The question could not be sent.';
            return;
        }
        const data = await res.json();
        history = data.history;
        renderTranscript();
        statusBox.textContent = 'Ready for the next question.';
    } catch (err) {
        statusBox.textContent = 'The question could not be sent: ' + err.message;
    }
});
"#;

    let html = render_page(PageLayout {
        meta_title: "Guidelines Q&A | Manuscript Review Assistant",
        page_heading: "Guidelines Q&A",
        note_html: Cow::Borrowed(
            "Ask free-text questions about abstracts, length limits, formatting, and journal fit. The transcript stays in your browser.",
        ),
        body_html: Cow::Borrowed(body_html),
        extra_style_blocks: vec![extra_styles],
        body_scripts: vec![Cow::Owned(format!("<script>\n{}\n</script>", chat_script))],
    });

    Html(html)
}
