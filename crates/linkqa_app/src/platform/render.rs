//! Turns a finished submission into a document for the terminal or a file.
//!
//! The answer is already table-repaired by the core; here it only gets a
//! front matter and a sources section, and for HTML is fed through
//! `pulldown-cmark` with the tables extension. Raw HTML in the answer is
//! rendered as text.

use linkqa_core::{AppViewModel, Mode, Notice, SubmissionErrorKind};
use pulldown_cmark::{html, Event, Options, Parser};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Html,
}

/// One answered request, as handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerDocument<'a> {
    pub mode: Mode,
    pub query: Option<&'a str>,
    pub answer: &'a str,
    pub sources: &'a [String],
    pub answered_utc: &'a str,
}

pub fn render(format: OutputFormat, doc: &AnswerDocument<'_>) -> String {
    match format {
        OutputFormat::Markdown => render_markdown(doc),
        OutputFormat::Html => render_html(doc),
    }
}

fn render_markdown(doc: &AnswerDocument<'_>) -> String {
    let mut out = String::from("---\n");
    out.push_str(&format!("mode: {}\n", doc.mode));
    if let Some(query) = doc.query {
        out.push_str(&format!("query: {}\n", quote_scalar(query)));
    }
    out.push_str(&format!("answered_utc: {}\n", doc.answered_utc));
    out.push_str(&format!("source_count: {}\n", doc.sources.len()));
    out.push_str("---\n\n");
    out.push_str(&markdown_body(doc));
    out
}

fn render_html(doc: &AnswerDocument<'_>) -> String {
    let body = markdown_body(doc);
    let parser = Parser::new_ext(&body, Options::ENABLE_TABLES).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn markdown_body(doc: &AnswerDocument<'_>) -> String {
    let mut body = String::new();
    body.push_str(doc.answer.trim_end());
    body.push('\n');
    if !doc.sources.is_empty() {
        body.push_str("\n## Sources\n\n");
        for source in doc.sources {
            body.push_str(&format!("- {}\n", source_item(source)));
        }
    }
    body
}

/// Double-quoted front matter value; JSON string escaping is valid YAML.
fn quote_scalar(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// A link when the source parses as an absolute URL, escaped text otherwise.
fn source_item(source: &str) -> String {
    match Url::parse(source) {
        Ok(url) => format!("[{}](<{}>)", escape_markdown(source), url.as_str()),
        Err(_) => escape_markdown(source),
    }
}

fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let plain = matches!(ch, '.' | ',' | ':' | '/' | '-' | '?' | '=' | '%');
        if ch.is_ascii_punctuation() && !plain {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Plain-text view of the form for the interactive prompt.
pub fn render_form(view: &AppViewModel) -> String {
    let mut out = String::new();
    out.push_str(&format!("Mode: {}\n", view.mode));
    if view.mode.carries_query() {
        let query = if view.query.is_empty() {
            "(blank: default question)"
        } else {
            view.query.as_str()
        };
        out.push_str(&format!("Query: {query}\n"));
    }
    out.push_str("Sources:\n");
    if view.sources.is_empty() {
        out.push_str("  (none)\n");
    }
    for (position, entry) in view.sources.iter().enumerate() {
        let link = if entry.link.is_empty() {
            "(empty)"
        } else {
            entry.link.as_str()
        };
        out.push_str(&format!("  {}. {}\n", position + 1, link));
    }
    for error in &view.validation_errors {
        out.push_str(&format!("! {error}\n"));
    }
    if view.pending {
        out.push_str("Processing... please wait\n");
    }
    out
}

pub fn describe_failure(view: &AppViewModel) -> Option<String> {
    let error = view.error.as_ref()?;
    let hint = match error.kind {
        SubmissionErrorKind::Network => "is the processing service running?",
        SubmissionErrorKind::Server { .. } => "the service rejected the request",
        SubmissionErrorKind::MalformedResponse => "the service sent an unexpected reply",
    };
    Some(format!("Submission failed: {error} ({hint}); your input was kept."))
}

pub fn describe_notice(notice: Notice) -> String {
    match notice {
        Notice::SubmitRejectedWhilePending { in_flight } => {
            format!("Request {in_flight} is still being processed; submit again once it finishes.")
        }
        Notice::RemoveRefused { id } => {
            format!("Source {id} is the last one and cannot be removed.")
        }
    }
}
