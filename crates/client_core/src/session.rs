//! Submission lifecycle: form snapshot in, one request out, one terminal state published.

use std::sync::Arc;

use shared::{domain::FormField, form::FormState};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
    service::{PredictError, PredictionService},
    ui_state::UiState,
};

pub const CANCELLED_MESSAGE: &str = "Prediction request was cancelled";
pub const GENERIC_FAILURE_MESSAGE: &str = "Prediction request failed";

/// Publishes `Loading` on creation and guarantees a terminal state on every exit path.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<UiState>,
    finished: bool,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a watch::Sender<UiState>) -> Self {
        state.send_replace(UiState::Loading);
        Self {
            state,
            finished: false,
        }
    }

    fn finish(mut self, terminal: UiState) {
        self.finished = true;
        self.state.send_replace(terminal);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("prediction submission ended before completing");
            self.state
                .send_replace(UiState::Error(CANCELLED_MESSAGE.to_string()));
        }
    }
}

fn failure_message(err: &PredictError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}

/// Owns the display state and the service it is driven by.
///
/// Clones share both, so a submission can run on a spawned task while the
/// presentation layer keeps reading the state.
pub struct PredictionSession<S> {
    service: Arc<S>,
    state: Arc<watch::Sender<UiState>>,
}

impl<S> Clone for PredictionSession<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: PredictionService> PredictionSession<S> {
    pub fn new(service: S) -> Self {
        let (state, _) = watch::channel(UiState::Idle);
        Self {
            service: Arc::new(service),
            state: Arc::new(state),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Runs one submission of `form` to completion.
    ///
    /// Never fails: every outcome lands in the published state as `Result` or
    /// `Error`. Concurrent calls are not serialized; the last to finish wins.
    pub async fn submit(&self, form: &FormState) {
        let guard = LoadingGuard::begin(&self.state);
        let request = form.to_request();
        info!(
            gender = %request.gender,
            smoking_history = %request.smoking_history,
            "submitting prediction request"
        );

        let terminal = match self.service.predict(&request).await {
            Ok(label) => {
                info!(%label, "prediction received");
                UiState::Result(label)
            }
            Err(err) => {
                error!(error = %err, "prediction request failed");
                UiState::Error(failure_message(&err))
            }
        };
        guard.finish(terminal);
    }
}

/// The form's current values together with the session that submits them.
pub struct FormController<S> {
    form: FormState,
    session: PredictionSession<S>,
}

impl<S: PredictionService> FormController<S> {
    pub fn new(service: S) -> Self {
        Self::with_session(PredictionSession::new(service))
    }

    pub fn with_session(session: PredictionSession<S>) -> Self {
        Self {
            form: FormState::default(),
            session,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Per-field setters live on [`FormState`].
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.update(field, value);
    }

    pub async fn submit(&self) {
        self.session.submit(&self.form).await;
    }

    pub fn session(&self) -> &PredictionSession<S> {
        &self.session
    }

    pub fn state(&self) -> UiState {
        self.session.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.session.subscribe()
    }
}
