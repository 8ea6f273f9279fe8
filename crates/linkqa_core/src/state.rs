use crate::view_model::AppViewModel;
use crate::{
    build_payload, normalize_tables, MinEntries, Mode, OutboundRequest, SourceList,
    SubmissionController, SubmissionState, SubmitError, ValidationError, DEFAULT_QUERY,
};

/// Form behaviour that comes from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    pub min_entries: MinEntries,
    pub default_query: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            min_entries: MinEntries::default(),
            default_query: DEFAULT_QUERY.to_string(),
        }
    }
}

/// Everything one form session owns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: FormSettings,
    sources: SourceList,
    mode: Mode,
    query: String,
    submission: SubmissionController,
    validation_errors: Vec<ValidationError>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: FormSettings) -> Self {
        Self {
            sources: SourceList::new(settings.min_entries),
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn sources(&self) -> &SourceList {
        &self.sources
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn submission(&self) -> &SubmissionState {
        self.submission.state()
    }

    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.validation_errors
    }

    pub fn view(&self) -> AppViewModel {
        let (answer, answer_sources, error) = match self.submission.state() {
            SubmissionState::Succeeded { answer, sources } => {
                (Some(normalize_tables(answer)), sources.clone(), None)
            }
            SubmissionState::Failed { error } => (None, Vec::new(), Some(error.clone())),
            SubmissionState::Idle | SubmissionState::Pending { .. } => (None, Vec::new(), None),
        };
        AppViewModel {
            mode: self.mode,
            query: self.query.clone(),
            sources: self.sources.entries(),
            validation_errors: self.validation_errors.clone(),
            pending: self.submission.state().is_pending(),
            answer,
            answer_sources,
            error,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn sources_mut(&mut self) -> &mut SourceList {
        &mut self.sources
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        true
    }

    pub(crate) fn set_query(&mut self, query: String) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query;
        true
    }

    pub(crate) fn set_validation_errors(&mut self, errors: Vec<ValidationError>) {
        self.validation_errors = errors;
    }

    pub(crate) fn retain_validation_errors(&mut self, keep: impl Fn(&ValidationError) -> bool) {
        self.validation_errors.retain(|error| keep(error));
    }

    pub(crate) fn in_flight(&self) -> Option<&OutboundRequest> {
        self.submission.in_flight()
    }

    /// Snapshots the form into a request and moves the controller to pending.
    pub(crate) fn start_submission(&mut self) -> Result<OutboundRequest, SubmitError> {
        let payload = build_payload(
            &self.sources,
            self.mode,
            &self.query,
            &self.settings.default_query,
        );
        self.submission.submit(self.mode, payload)
    }

    pub(crate) fn submission_mut(&mut self) -> &mut SubmissionController {
        &mut self.submission
    }

    /// Clears entered data after a successful submission. The mode is kept.
    pub(crate) fn reset_form(&mut self) {
        self.sources.reset();
        self.query.clear();
        self.validation_errors.clear();
    }
}
