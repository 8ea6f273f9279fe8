use crate::{
    validate, AppState, Effect, Msg, Notice, RemoveOutcome, SubmissionAnswer, SubmitError,
    ValidationError,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SourceAdded => {
            state.sources_mut().append();
            state.mark_dirty();
            Vec::new()
        }
        Msg::SourceRemoved { id } => match state.sources_mut().remove(id) {
            RemoveOutcome::Removed => {
                state.retain_validation_errors(|error| {
                    *error != ValidationError::EmptyLink { id }
                });
                state.mark_dirty();
                Vec::new()
            }
            RemoveOutcome::AtMinimum => vec![Effect::Notify(Notice::RemoveRefused { id })],
            RemoveOutcome::NotFound => Vec::new(),
        },
        Msg::SourceEdited { id, link } => {
            let filled = !link.trim().is_empty();
            if state.sources_mut().update(id, link) {
                if filled {
                    state.retain_validation_errors(|error| {
                        *error != ValidationError::EmptyLink { id }
                    });
                }
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            if state.set_mode(mode) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::QueryChanged(query) => {
            if state.set_query(query) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Nothing changes while a request is pending, not even validation.
            if let Some(request) = state.in_flight() {
                let in_flight = request.request_id;
                return (
                    state,
                    vec![Effect::Notify(Notice::SubmitRejectedWhilePending { in_flight })],
                );
            }

            let errors = validate(&state);
            if !errors.is_empty() {
                state.set_validation_errors(errors);
                state.mark_dirty();
                return (state, Vec::new());
            }
            state.set_validation_errors(Vec::new());

            match state.start_submission() {
                Ok(request) => {
                    state.mark_dirty();
                    vec![Effect::SendRequest(request)]
                }
                Err(SubmitError::AlreadyPending { in_flight }) => {
                    vec![Effect::Notify(Notice::SubmitRejectedWhilePending { in_flight })]
                }
            }
        }
        Msg::SubmissionSucceeded {
            request_id,
            answer,
            sources,
        } => {
            let outcome = Ok(SubmissionAnswer { answer, sources });
            if state.submission_mut().resolve(request_id, outcome) {
                state.reset_form();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmissionFailed { request_id, error } => {
            if state.submission_mut().resolve(request_id, Err(error)) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
