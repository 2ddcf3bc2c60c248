use super::*;
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex as StdMutex},
};

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use shared::{domain::FormField, form::FormState, protocol::PredictionRequest};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

use crate::service::SERVER_ERROR_MESSAGE;
use crate::session::{CANCELLED_MESSAGE, GENERIC_FAILURE_MESSAGE};

fn sample_form() -> FormState {
    let mut form = FormState::default();
    form.set_gender("Male");
    form.set_age("45");
    form.set_hypertension("0");
    form.set_heart_disease("0");
    form.set_smoking_history("never");
    form.set_bmi("22.5");
    form.set_hba1c_level("5.4");
    form.set_blood_glucose_level("90");
    form
}

struct CapturedRequest {
    content_type: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct PredictServerState {
    status: StatusCode,
    body: &'static str,
    tx: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
}

async fn handle_predict(
    State(state): State<PredictServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    let captured = CapturedRequest {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(captured);
    }
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

async fn spawn_predict_server(
    status: StatusCode,
    body: &'static str,
) -> anyhow::Result<(String, oneshot::Receiver<CapturedRequest>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();
    let state = PredictServerState {
        status,
        body,
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/api/predict", post(handle_predict))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), rx))
}

async fn submit_against(status: StatusCode, body: &'static str) -> UiState {
    let (server_url, _captured) = spawn_predict_server(status, body)
        .await
        .expect("spawn server");
    let session = PredictionSession::new(HttpPredictionService::new(server_url));
    session.submit(&sample_form()).await;
    session.state()
}

#[tokio::test]
async fn successful_prediction_becomes_result() {
    let (server_url, captured_rx) =
        spawn_predict_server(StatusCode::OK, r#"{"result":"Not Diabetic"}"#)
            .await
            .expect("spawn server");
    let session = PredictionSession::new(HttpPredictionService::new(server_url));
    assert_eq!(session.state(), UiState::Idle);

    session.submit(&sample_form()).await;

    assert_eq!(session.state(), UiState::Result("Not Diabetic".to_string()));
    let captured = captured_rx.await.expect("captured request");
    assert_eq!(captured.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        captured.body,
        json!({
            "gender": "Male",
            "age": 45,
            "hypertension": 0,
            "heart_disease": 0,
            "smoking_history": "never",
            "bmi": 22.5,
            "HbA1c_level": 5.4,
            "blood_glucose_level": 90,
        })
    );
}

#[tokio::test]
async fn server_error_message_becomes_error_state() {
    let state = submit_against(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":"model unavailable"}"#,
    )
    .await;
    assert_eq!(state, UiState::Error("model unavailable".to_string()));
}

#[tokio::test]
async fn server_error_without_message_uses_generic_text() {
    let state = submit_against(StatusCode::BAD_REQUEST, r#"{"detail":"nope"}"#).await;
    assert_eq!(state, UiState::Error("Server error".to_string()));

    let state = submit_against(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":""}"#).await;
    assert_eq!(state, UiState::Error("Server error".to_string()));

    let state = submit_against(StatusCode::SERVICE_UNAVAILABLE, r#"["unavailable"]"#).await;
    assert_eq!(state, UiState::Error("Server error".to_string()));
}

#[tokio::test]
async fn non_json_error_body_reports_the_parse_failure() {
    let state = submit_against(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").await;
    let message = state.error_message().expect("error state");
    assert!(
        message.contains("expected value at line 1 column 1"),
        "unexpected message: {message}"
    );
    assert_ne!(message, SERVER_ERROR_MESSAGE);
}

#[tokio::test]
async fn diabetic_result_selects_diabetic_presentation() {
    let state = submit_against(StatusCode::OK, r#"{"result":"Diabetic"}"#).await;
    assert_eq!(state, UiState::Result("Diabetic".to_string()));

    let label = state.result_label().expect("result label");
    assert_eq!(ResultView::for_label(label).variant, ResultVariant::Diabetic);
}

#[tokio::test]
async fn undecodable_success_body_becomes_error_state() {
    let state = submit_against(StatusCode::OK, "not json").await;
    let message = state.error_message().expect("error state");
    assert!(!message.is_empty());

    let state = submit_against(StatusCode::OK, r#"{"label":"Diabetic"}"#).await;
    let message = state.error_message().expect("error state");
    assert!(message.contains("missing field `result`"), "{message}");
}

#[tokio::test]
async fn unreachable_service_becomes_error_state() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);

    let session = PredictionSession::new(HttpPredictionService::new(format!("http://{addr}")));
    session.submit(&sample_form()).await;

    let state = session.state();
    let message = state.error_message().expect("error state");
    assert!(
        message.contains("error sending request"),
        "unexpected message: {message}"
    );
    assert_ne!(message, GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn invalid_base_url_becomes_error_state() {
    let session = PredictionSession::new(HttpPredictionService::new("::not-a-url::"));
    session.submit(&sample_form()).await;

    let state = session.state();
    let message = state.error_message().expect("error state");
    assert!(message.contains("invalid prediction service url"), "{message}");
}

/// Returns queued outcomes in order and records every request it receives.
struct ScriptedService {
    outcomes: StdMutex<VecDeque<Result<String, PredictError>>>,
    requests: StdMutex<Vec<PredictionRequest>>,
}

impl ScriptedService {
    fn new(outcomes: impl IntoIterator<Item = Result<String, PredictError>>) -> Self {
        Self {
            outcomes: StdMutex::new(outcomes.into_iter().collect()),
            requests: StdMutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl PredictionService for ScriptedService {
    async fn predict(&self, request: &PredictionRequest) -> Result<String, PredictError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.outcomes
            .lock()
            .expect("outcomes lock")
            .pop_front()
            .expect("scripted outcome")
    }
}

/// Holds each request open until the test releases it.
struct GatedService {
    gate: Mutex<Option<oneshot::Receiver<Result<String, PredictError>>>>,
}

impl GatedService {
    fn new() -> (Self, oneshot::Sender<Result<String, PredictError>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                gate: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

#[async_trait]
impl PredictionService for GatedService {
    async fn predict(&self, _request: &PredictionRequest) -> Result<String, PredictError> {
        let gate = self.gate.lock().await.take().expect("single submission");
        match gate.await {
            Ok(outcome) => outcome,
            Err(_) => std::future::pending().await,
        }
    }
}

async fn assert_loading_until_released(outcome: Result<String, PredictError>) -> UiState {
    let (service, release) = GatedService::new();
    let session = PredictionSession::new(service);
    let mut state_rx = session.subscribe();

    let task = tokio::spawn({
        let session = session.clone();
        async move { session.submit(&sample_form()).await }
    });

    state_rx
        .wait_for(UiState::is_loading)
        .await
        .expect("loading published");
    assert!(session.is_loading());
    assert_eq!(session.state().submit_label(), "Predicting...");

    release.send(outcome).expect("release submission");
    task.await.expect("submission task");

    let terminal = session.state();
    assert!(!terminal.is_loading());
    terminal
}

#[tokio::test]
async fn loading_spans_successful_request() {
    let terminal = assert_loading_until_released(Ok("Not Diabetic".to_string())).await;
    assert_eq!(terminal, UiState::Result("Not Diabetic".to_string()));
}

#[tokio::test]
async fn loading_spans_failed_request() {
    let terminal = assert_loading_until_released(Err(PredictError::Server {
        status: 503,
        message: "model unavailable".to_string(),
    }))
    .await;
    assert_eq!(terminal, UiState::Error("model unavailable".to_string()));
}

#[tokio::test]
async fn cancelled_submission_does_not_stay_loading() {
    let (service, _release) = GatedService::new();
    let session = PredictionSession::new(service);
    let mut state_rx = session.subscribe();

    let task = tokio::spawn({
        let session = session.clone();
        async move { session.submit(&sample_form()).await }
    });
    state_rx
        .wait_for(UiState::is_loading)
        .await
        .expect("loading published");

    task.abort();
    assert!(task.await.expect_err("aborted").is_cancelled());
    assert_eq!(session.state(), UiState::Error(CANCELLED_MESSAGE.to_string()));
}

#[tokio::test]
async fn every_submission_ends_in_result_or_error() {
    let forms = {
        let mut diabetic = sample_form();
        diabetic.set_hypertension("1");
        diabetic.set_heart_disease("1");
        diabetic.set_smoking_history("current");
        diabetic.set_bmi("38.2");
        diabetic.set_hba1c_level("9.1");
        diabetic.set_blood_glucose_level("280");

        let mut boundary = sample_form();
        boundary.set_gender("Other");
        boundary.set_age("0");
        boundary.set_smoking_history("No Info");
        boundary.set_bmi("60");
        boundary.set_hba1c_level("3");
        boundary.set_blood_glucose_level("400");

        vec![sample_form(), diabetic, boundary]
    };

    for form in forms {
        let session = PredictionSession::new(ScriptedService::new([
            Ok("Diabetic".to_string()),
            Err(PredictError::Server {
                status: 500,
                message: "Server error".to_string(),
            }),
        ]));

        session.submit(&form).await;
        assert!(matches!(session.state(), UiState::Result(_)));

        session.submit(&form).await;
        assert!(matches!(session.state(), UiState::Error(_)));
    }
}

#[tokio::test]
async fn error_and_result_states_accept_new_submissions() {
    let session = PredictionSession::new(ScriptedService::new([
        Err(PredictError::Server {
            status: 500,
            message: "model unavailable".to_string(),
        }),
        Ok("Not Diabetic".to_string()),
        Ok("Diabetic".to_string()),
    ]));

    session.submit(&sample_form()).await;
    assert_eq!(session.state(), UiState::Error("model unavailable".to_string()));

    session.submit(&sample_form()).await;
    assert_eq!(session.state(), UiState::Result("Not Diabetic".to_string()));

    session.submit(&sample_form()).await;
    assert_eq!(session.state(), UiState::Result("Diabetic".to_string()));
    assert_eq!(session.service().requests().len(), 3);
}

#[tokio::test]
async fn controller_submits_its_current_fields() {
    let mut controller = FormController::new(ScriptedService::new([Ok("Not Diabetic".to_string())]));
    for field in FormField::ALL {
        controller.update_field(field, sample_form().get(field));
    }
    controller.update_field(FormField::Hypertension, "1");
    controller.update_field(FormField::Age, "61");

    controller.submit().await;

    assert_eq!(controller.state(), UiState::Result("Not Diabetic".to_string()));
    let requests = controller.session().service().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].hypertension, 1);
    assert_eq!(requests[0].age.value(), 61.0);
    assert_eq!(controller.form().age, "61");
}

#[tokio::test]
async fn controller_sends_out_of_range_values_unchanged() {
    let mut controller = FormController::new(ScriptedService::new([Ok("Diabetic".to_string())]));
    controller.form_mut().set_bmi("999");
    controller.form_mut().set_heart_disease("maybe");

    controller.submit().await;

    let requests = controller.session().service().requests();
    assert_eq!(requests[0].bmi.value(), 999.0);
    assert_eq!(requests[0].heart_disease, 0);
    assert_eq!(controller.subscribe().borrow().clone(), controller.state());
}
