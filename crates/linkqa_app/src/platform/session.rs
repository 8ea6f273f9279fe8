use std::time::Duration;

use linkqa_core::{
    update, AppState, Effect, Msg, Notice, OutboundRequest, RequestId, SubmissionState,
};
use linkqa_logging::linkqa_warn;

use super::effects::EffectRunner;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One form session: the core state plus the runner that executes its effects.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    last_request: Option<OutboundRequest>,
}

impl Session {
    pub fn new(state: AppState, runner: EffectRunner) -> Self {
        Self {
            state,
            runner,
            last_request: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// True once per change to the form; the caller redraws on true.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    /// The most recent request handed to the engine.
    pub fn last_request(&self) -> Option<&OutboundRequest> {
        self.last_request.as_ref()
    }

    /// Applies `msg` and runs the resulting effects. Returns refusals for display.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Notice> {
        let mut queue = vec![msg];
        let mut notices = Vec::new();

        while let Some(msg) = queue.pop() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            for effect in effects {
                match effect {
                    Effect::SendRequest(request) => {
                        if let Some(follow_up) = self.runner.send(&request) {
                            queue.push(follow_up);
                        }
                        self.last_request = Some(request);
                    }
                    Effect::Notify(notice) => {
                        linkqa_warn!("Refused: {:?}", notice);
                        notices.push(notice);
                    }
                }
            }
        }
        notices
    }

    /// Blocks until the pending request, if any, has succeeded or failed.
    pub fn wait_for_completion(&mut self) {
        while let Some(request_id) = self.in_flight_id() {
            if let Some(msg) = self.runner.next_msg(request_id, POLL_INTERVAL) {
                self.dispatch(msg);
            }
        }
    }

    fn in_flight_id(&self) -> Option<RequestId> {
        match self.state.submission() {
            SubmissionState::Pending { request } => Some(request.request_id),
            _ => None,
        }
    }
}
