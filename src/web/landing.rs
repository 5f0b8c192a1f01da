use axum::response::Html;

use crate::web::render_footer;

pub async fn landing_page() -> Html<String> {
    Html(render_main_page())
}

fn render_main_page() -> String {
    let footer = render_footer();

    let tools = [
        (
            "Manuscript Review",
            "Upload a DOCX, PDF, or TXT manuscript, pick a target journal, and get a submission-readiness report.",
            "/tools/review",
        ),
        (
            "Guidelines Q&amp;A",
            "Ask free-text questions about submission guidelines and journal fit.",
            "/tools/chat",
        ),
    ];

    let cards = tools
        .iter()
        .map(|(title, description, href)| {
            format!(
                r#"            <a class="tool-card" href="{href}">
                <h2>{title}</h2>
                <p>{description}</p>
            </a>"#,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Manuscript Review Assistant</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="robots" content="noindex,nofollow">
    <style>
        :root {{ color-scheme: light; }}
        body {{ font-family: "Helvetica Neue", Arial, sans-serif; margin: 0; background: #f8fafc; color: #0f172a; }}
        header {{ background: #ffffff; padding: 2.5rem 1.5rem; border-bottom: 1px solid #e2e8f0; text-align: center; }}
        header p {{ color: #475569; max-width: 640px; margin: 0.75rem auto 0; line-height: 1.6; }}
        main {{ padding: 2rem 1.5rem; max-width: 960px; margin: 0 auto; box-sizing: border-box; }}
        .tool-grid {{ display: grid; gap: 1.25rem; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); }}
        .tool-card {{ display: block; background: #ffffff; border: 1px solid #e2e8f0; border-radius: 12px; padding: 1.5rem; text-decoration: none; color: inherit; box-shadow: 0 12px 30px rgba(15, 23, 42, 0.06); transition: transform 0.15s ease, box-shadow 0.15s ease; }}
        .tool-card:hover {{ transform: translateY(-2px); box-shadow: 0 18px 40px rgba(15, 23, 42, 0.1); }}
        .tool-card h2 {{ margin: 0 0 0.5rem; font-size: 1.15rem; color: #1d4ed8; }}
        .tool-card p {{ margin: 0; color: #475569; font-size: 0.95rem; line-height: 1.55; }}
        .app-footer {{ margin-top: 3rem; text-align: center; font-size: 0.85rem; color: #94a3b8; }}
    </style>
</head>
<body>
    <header>
        <h1>Manuscript Review Assistant</h1>
        <p>Check whether your manuscript meets the submission guidelines of top management journals, or ask the assistant directly.</p>
    </header>
    <main>
        <div class="tool-grid">
{cards}
        </div>
        {footer}
    </main>
</body>
</html>"#,
    )
}
