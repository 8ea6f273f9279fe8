use std::sync::Once;

use linkqa_core::{
    update, AppState, Effect, FormSettings, MinEntries, Mode, Msg, Notice, OutboundRequest,
    SubmissionError, SubmissionErrorKind, SubmissionState, ValidationError,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(linkqa_logging::initialize_for_tests);
}

/// Fills the form: the first URL goes into the initial entry, the rest are added.
fn fill_form(mut state: AppState, urls: &[&str], mode: Mode, query: &str) -> AppState {
    for (index, url) in urls.iter().enumerate() {
        if index >= state.sources().len() {
            state = update(state, Msg::SourceAdded).0;
        }
        let id = state.sources().id_at(index).expect("entry exists");
        state = update(
            state,
            Msg::SourceEdited {
                id,
                link: url.to_string(),
            },
        )
        .0;
    }
    let (state, _) = update(state, Msg::ModeSelected(mode));
    let (state, _) = update(state, Msg::QueryChanged(query.to_string()));
    state
}

fn submit(state: AppState) -> (AppState, OutboundRequest) {
    let (state, effects) = update(state, Msg::SubmitClicked);
    match effects.as_slice() {
        [Effect::SendRequest(request)] => {
            let request = request.clone();
            (state, request)
        }
        other => panic!("expected a single SendRequest, got {other:?}"),
    }
}

#[test]
fn submit_in_query_mode_snapshots_payload() {
    init_logging();
    let state = fill_form(
        AppState::new(),
        &["https://a.example.com", "https://b.example.com"],
        Mode::Query,
        "What changed?",
    );

    let (mut state, request) = submit(state);

    assert_eq!(request.mode, Mode::Query);
    assert_eq!(
        request.payload.urls,
        vec!["https://a.example.com", "https://b.example.com"]
    );
    assert_eq!(request.payload.query.as_deref(), Some("What changed?"));
    assert!(state.view().pending);
    assert!(state.consume_dirty());
}

#[test]
fn blank_query_submits_default_text() {
    init_logging();
    let state = fill_form(AppState::new(), &["https://a.example.com"], Mode::Query, "");
    let (_state, request) = submit(state);
    assert_eq!(request.payload.query.as_deref(), Some("Explain the content"));
}

#[test]
fn summary_submission_has_no_query() {
    init_logging();
    let state = fill_form(
        AppState::new(),
        &["https://a.example.com"],
        Mode::Summary,
        "left over from query mode",
    );
    let (_state, request) = submit(state);
    assert_eq!(request.mode, Mode::Summary);
    assert_eq!(request.payload.query, None);
}

#[test]
fn submit_while_pending_changes_nothing() {
    init_logging();
    let state = fill_form(AppState::new(), &["https://a.example.com"], Mode::Query, "q");
    let (state, request) = submit(state);
    let before = state.clone();

    let (after, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(after, before);
    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::SubmitRejectedWhilePending {
            in_flight: request.request_id
        })]
    );
}

#[test]
fn edits_during_pending_do_not_touch_in_flight_request() {
    init_logging();
    let state = fill_form(AppState::new(), &["https://a.example.com"], Mode::Query, "q");
    let (state, request) = submit(state);

    let id = state.sources().id_at(0).unwrap();
    let (state, _) = update(
        state,
        Msg::SourceEdited {
            id,
            link: "https://changed.example.com".to_string(),
        },
    );
    let (state, _) = update(state, Msg::ModeSelected(Mode::Summary));

    match state.submission() {
        SubmissionState::Pending { request: in_flight } => assert_eq!(in_flight, &request),
        other => panic!("expected pending, got {other:?}"),
    }
}

#[test]
fn failed_submission_keeps_input() {
    init_logging();
    let state = fill_form(
        AppState::new(),
        &["https://a.example.com", "https://b.example.com"],
        Mode::Query,
        "Who?",
    );
    let sources_before = state.sources().clone();
    let (state, request) = submit(state);

    let error = SubmissionError::new(SubmissionErrorKind::Network, "connection refused");
    let (mut state, effects) = update(
        state,
        Msg::SubmissionFailed {
            request_id: request.request_id,
            error: error.clone(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.sources(), &sources_before);
    assert_eq!(state.query(), "Who?");
    assert_eq!(state.submission(), &SubmissionState::Failed { error: error.clone() });
    let view = state.view();
    assert!(!view.pending);
    assert_eq!(view.error, Some(error));
    assert_eq!(view.answer, None);
    assert!(state.consume_dirty());
}

#[test]
fn failed_submission_can_be_retried() {
    init_logging();
    let state = fill_form(AppState::new(), &["https://a.example.com"], Mode::Query, "q");
    let (state, first) = submit(state);
    let (state, _) = update(
        state,
        Msg::SubmissionFailed {
            request_id: first.request_id,
            error: SubmissionError::new(SubmissionErrorKind::Server { status: 500 }, "boom"),
        },
    );

    let (state, second) = submit(state);
    assert_ne!(second.request_id, first.request_id);
    assert_eq!(second.payload, first.payload);
    assert!(state.view().pending);
    assert_eq!(state.view().error, None);
}

#[test]
fn successful_submission_resets_form() {
    init_logging();
    let state = fill_form(
        AppState::new(),
        &["https://a.example.com", "https://b.example.com"],
        Mode::Summary,
        "kept for later",
    );
    let old_ids: Vec<_> = state.sources().ids().collect();
    let (state, request) = submit(state);

    let (state, effects) = update(
        state,
        Msg::SubmissionSucceeded {
            request_id: request.request_id,
            answer: "| A | B |\n| 1 | 2 |".to_string(),
            sources: vec!["https://a.example.com".to_string()],
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.sources().links(), vec![String::new()]);
    assert!(old_ids.iter().all(|id| !state.sources().contains(*id)));
    assert_eq!(state.query(), "");
    assert_eq!(state.mode(), Mode::Summary);

    let view = state.view();
    assert!(!view.pending);
    assert_eq!(view.answer.as_deref(), Some("A | B\n1 | 2"));
    assert_eq!(view.answer_sources, vec!["https://a.example.com"]);
}

#[test]
fn new_submission_clears_previous_answer() {
    init_logging();
    let state = fill_form(AppState::new(), &["https://a.example.com"], Mode::Summary, "");
    let (state, request) = submit(state);
    let (state, _) = update(
        state,
        Msg::SubmissionSucceeded {
            request_id: request.request_id,
            answer: "first".to_string(),
            sources: Vec::new(),
        },
    );
    assert_eq!(state.view().answer.as_deref(), Some("first"));

    let state = fill_form(state, &["https://b.example.com"], Mode::Summary, "");
    let (state, _) = submit(state);
    let view = state.view();
    assert!(view.pending);
    assert_eq!(view.answer, None);
    assert!(view.answer_sources.is_empty());
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let state = fill_form(AppState::new(), &["https://a.example.com"], Mode::Query, "q");
    let (state, request) = submit(state);
    let before = state.clone();

    let (state, _) = update(
        state,
        Msg::SubmissionSucceeded {
            request_id: request.request_id + 7,
            answer: "late".to_string(),
            sources: Vec::new(),
        },
    );
    assert_eq!(state, before);
}

#[test]
fn blank_link_blocks_submission() {
    init_logging();
    let state = fill_form(AppState::new(), &["https://a.example.com", "  "], Mode::Query, "q");
    let blank = state.sources().id_at(1).unwrap();

    let (mut state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert_eq!(state.submission(), &SubmissionState::Idle);
    assert_eq!(
        state.validation_errors(),
        &[ValidationError::EmptyLink { id: blank }]
    );
    assert!(state.consume_dirty());

    let (state, _) = update(
        state,
        Msg::SourceEdited {
            id: blank,
            link: "https://b.example.com".to_string(),
        },
    );
    assert!(state.validation_errors().is_empty());
    let (_state, request) = submit(state);
    assert_eq!(request.payload.urls.len(), 2);
}

#[test]
fn removing_last_entry_is_refused_by_default() {
    init_logging();
    let state = AppState::new();
    let only = state.sources().id_at(0).unwrap();
    let before = state.clone();

    let (state, effects) = update(state, Msg::SourceRemoved { id: only });

    assert_eq!(state, before);
    assert_eq!(effects, vec![Effect::Notify(Notice::RemoveRefused { id: only })]);
}

#[test]
fn empty_list_is_a_validation_error_with_zero_minimum() {
    init_logging();
    let settings = FormSettings {
        min_entries: MinEntries::Zero,
        ..FormSettings::default()
    };
    let state = AppState::with_settings(settings);
    assert!(state.sources().is_empty());

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state.validation_errors(), &[ValidationError::NoSources]);
}

#[test]
fn mode_switch_preserves_sources_and_query() {
    init_logging();
    let state = fill_form(AppState::new(), &["https://a.example.com"], Mode::Query, "keep me");
    let sources = state.sources().clone();

    let (state, _) = update(state, Msg::ModeSelected(Mode::Summary));
    assert_eq!(state.query(), "keep me");
    assert_eq!(state.sources(), &sources);

    let (state, _) = update(state, Msg::ModeSelected(Mode::Query));
    assert_eq!(state.query(), "keep me");
    assert_eq!(state.mode(), Mode::Query);
}

#[test]
fn selecting_current_mode_is_not_a_change() {
    init_logging();
    let mut state = AppState::new();
    assert!(!state.consume_dirty());
    let (mut state, _) = update(state, Msg::ModeSelected(Mode::Query));
    assert!(!state.consume_dirty());
}
