//! HTTP contract tests: the real `ServiceClient` against a local stub of the
//! prediction / recommendation service.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use parking_lot::Mutex;

use pulmo_dashboard::{
    encode, InferenceOrchestrator, PredictionError, RawFormInput, RecommendationStatus,
    ServiceClient, ServiceConfig, ServiceError, WorkflowState,
};

const PREDICTION_BODY: &str = r#"{
    "name": "Alice",
    "prediction": 1,
    "probability": 0.82,
    "risk_level": "high",
    "shap_values": {"SMOKING": 0.31, "OXYGEN_SATURATION": -0.12, "CHEST_TIGHTNESS": 0.44},
    "recommendations": ["Avoid smoking or exposure to pollutants"]
}"#;

const RECOMMENDATIONS_BODY: &str = r#"{"recommendations": [
    "Schedule a comprehensive medical checkup ASAP.",
    "Consider quitting smoking to improve lung health."
]}"#;

type Reply = (u16, String);

#[derive(Default)]
struct Inner {
    predict_reply: Option<Reply>,
    predict_delay_ms: u64,
    latest_reply: Option<Reply>,
    recommend_reply: Option<Reply>,
    predict_bodies: Vec<String>,
    recommend_bodies: Vec<String>,
}

#[derive(Clone, Default)]
struct Stub {
    inner: Arc<Mutex<Inner>>,
}

impl Stub {
    fn predict_replies(self, status: u16, body: &str) -> Self {
        self.inner.lock().predict_reply = Some((status, body.to_string()));
        self
    }

    fn predict_delay(self, millis: u64) -> Self {
        self.inner.lock().predict_delay_ms = millis;
        self
    }

    fn latest_replies(self, status: u16, body: &str) -> Self {
        self.inner.lock().latest_reply = Some((status, body.to_string()));
        self
    }

    fn recommend_replies(self, status: u16, body: &str) -> Self {
        self.inner.lock().recommend_reply = Some((status, body.to_string()));
        self
    }

    fn predict_bodies(&self) -> Vec<String> {
        self.inner.lock().predict_bodies.clone()
    }

    fn recommend_bodies(&self) -> Vec<String> {
        self.inner.lock().recommend_bodies.clone()
    }

    /// Serve on an ephemeral loopback port, return the base URL
    async fn serve(&self) -> String {
        let app = Router::new()
            .route("/predict", post(predict))
            .route("/latest-prediction", get(latest_prediction))
            .route("/recommendations", post(recommendations))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

fn respond(reply: Option<Reply>) -> (StatusCode, String) {
    match reply {
        Some((status, body)) => (StatusCode::from_u16(status).unwrap(), body),
        None => (StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": "unscripted"}"#.to_string()),
    }
}

async fn predict(State(stub): State<Stub>, body: String) -> (StatusCode, String) {
    let (delay, reply) = {
        let mut inner = stub.inner.lock();
        inner.predict_bodies.push(body);
        (inner.predict_delay_ms, inner.predict_reply.clone())
    };
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    respond(reply)
}

async fn latest_prediction(State(stub): State<Stub>) -> (StatusCode, String) {
    let reply = stub.inner.lock().latest_reply.clone();
    respond(reply)
}

async fn recommendations(State(stub): State<Stub>, body: String) -> (StatusCode, String) {
    let reply = {
        let mut inner = stub.inner.lock();
        inner.recommend_bodies.push(body);
        inner.recommend_reply.clone()
    };
    respond(reply)
}

fn client(base_url: String, timeout_secs: u64) -> ServiceClient {
    ServiceClient::new(ServiceConfig { base_url, timeout_secs }).unwrap()
}

fn alice_form() -> RawFormInput {
    RawFormInput::new()
        .with("AGE", "45")
        .with("GENDER", "1")
        .with("SMOKING", true)
        .with("ENERGY_LEVEL", "70")
        .with("OXYGEN_SATURATION", "96.5")
        .with("STRESS_IMMUNE", "2")
        .with("Name", "Alice")
}

#[tokio::test]
async fn predict_sends_flat_vector_in_wire_order() {
    let stub = Stub::default().predict_replies(200, PREDICTION_BODY);
    let client = client(stub.serve().await, 5);

    let prediction = client.predict(&encode(&alice_form()).unwrap()).await.unwrap();

    let sent = stub.predict_bodies();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0],
        concat!(
            r#"{"AGE":45,"GENDER":1,"SMOKING":1,"FINGER_DISCOLORATION":0,"MENTAL_STRESS":0,"#,
            r#""EXPOSURE_TO_POLLUTION":0,"LONG_TERM_ILLNESS":0,"ENERGY_LEVEL":70,"IMMUNE_WEAKNESS":0,"#,
            r#""BREATHING_ISSUE":0,"ALCOHOL_CONSUMPTION":0,"THROAT_DISCOMFORT":0,"OXYGEN_SATURATION":96.5,"#,
            r#""CHEST_TIGHTNESS":0,"FAMILY_HISTORY":0,"SMOKING_FAMILY_HISTORY":0,"STRESS_IMMUNE":2,"Name":"Alice"}"#
        )
    );

    let features: Vec<&str> = prediction.shap_values.iter().map(|e| e.feature.as_str()).collect();
    assert_eq!(features, vec!["SMOKING", "OXYGEN_SATURATION", "CHEST_TIGHTNESS"]);
    assert_eq!(prediction.name, "Alice");
}

#[tokio::test]
async fn full_workflow_against_stub() {
    let stub = Stub::default()
        .predict_replies(200, PREDICTION_BODY)
        .recommend_replies(200, RECOMMENDATIONS_BODY);
    let orchestrator = InferenceOrchestrator::new(client(stub.serve().await, 5));

    let run = orchestrator.submit(&alice_form()).await.unwrap();

    assert!(matches!(run.state, WorkflowState::Complete { .. }));
    assert_eq!(
        run.state.recommendations(),
        [
            "Schedule a comprehensive medical checkup ASAP.".to_string(),
            "Consider quitting smoking to improve lung health.".to_string(),
        ]
    );

    // Second call carries the first call's attribution (in arrival order) and risk level
    assert_eq!(
        stub.recommend_bodies(),
        vec![
            r#"{"shap_values":{"SMOKING":0.31,"OXYGEN_SATURATION":-0.12,"CHEST_TIGHTNESS":0.44},"risk_level":"high"}"#
                .to_string()
        ]
    );

    let views = orchestrator.derived_views().unwrap();
    let cumulative: Vec<f64> = views.cumulative.iter().map(|row| row.cumulative).collect();
    for (got, want) in cumulative.iter().zip([0.31, 0.19, 0.63]) {
        assert!((got - want).abs() < 1e-9);
    }
    assert_eq!(views.summary.probability_percent, "82.0%");
}

#[tokio::test]
async fn recommendation_outage_is_partial_success() {
    let stub = Stub::default()
        .predict_replies(200, PREDICTION_BODY)
        .recommend_replies(503, r#"{"error": "rule engine unavailable"}"#);
    let orchestrator = InferenceOrchestrator::new(client(stub.serve().await, 5));

    let run = orchestrator.submit(&alice_form()).await.unwrap();

    assert!(matches!(run.state, WorkflowState::PartialSuccess { .. }));
    assert_eq!(run.state.prediction().unwrap().probability, 0.82);
    assert_eq!(run.state.recommendation_status(), RecommendationStatus::Unavailable);
    assert_eq!(
        run.state.recommendation_error().unwrap().0,
        ServiceError::Status { status: 503, message: "rule engine unavailable".to_string() }
    );
}

#[tokio::test]
async fn malformed_prediction_never_reaches_recommendations() {
    let stub = Stub::default()
        .predict_replies(200, r#"{"prediction": 3, "probability": 0.5, "risk_level": "low", "shap_values": {}}"#)
        .recommend_replies(200, RECOMMENDATIONS_BODY);
    let orchestrator = InferenceOrchestrator::new(client(stub.serve().await, 5));

    let run = orchestrator.submit(&alice_form()).await.unwrap();

    match run.state.prediction_error() {
        Some(PredictionError::Service(ServiceError::Malformed(message))) => {
            assert!(message.contains("prediction must be 0 or 1"), "{}", message);
        }
        other => panic!("expected malformed prediction, got {:?}", other),
    }
    assert!(stub.recommend_bodies().is_empty());
}

#[tokio::test]
async fn prediction_timeout_fails_workflow() {
    let stub = Stub::default()
        .predict_replies(200, PREDICTION_BODY)
        .predict_delay(3_000)
        .recommend_replies(200, RECOMMENDATIONS_BODY);
    let orchestrator = InferenceOrchestrator::new(client(stub.serve().await, 1));

    let run = orchestrator.submit(&alice_form()).await.unwrap();

    assert_eq!(
        run.state,
        WorkflowState::Failed(PredictionError::Service(ServiceError::Timeout))
    );
    assert!(stub.recommend_bodies().is_empty());
}

#[tokio::test]
async fn latest_prediction_not_found() {
    let stub = Stub::default().latest_replies(404, r#"{"error": "No prediction data available yet"}"#);
    let base_url = stub.serve().await;

    let err = client(base_url.clone(), 5).latest_prediction().await.unwrap_err();
    assert_eq!(
        err,
        ServiceError::Status { status: 404, message: "No prediction data available yet".to_string() }
    );

    let orchestrator = InferenceOrchestrator::new(client(base_url, 5));
    let run = orchestrator.load_latest().await;
    assert_eq!(run.state, WorkflowState::Failed(PredictionError::NoPriorPrediction));
    assert!(stub.recommend_bodies().is_empty());
}

#[tokio::test]
async fn latest_prediction_resumes_dashboard() {
    let stub = Stub::default()
        .latest_replies(200, PREDICTION_BODY)
        .recommend_replies(200, RECOMMENDATIONS_BODY);
    let orchestrator = InferenceOrchestrator::new(client(stub.serve().await, 5));

    let run = orchestrator.load_latest().await;

    assert!(matches!(run.state, WorkflowState::Complete { .. }));
    assert!(stub.predict_bodies().is_empty());
    assert_eq!(stub.recommend_bodies().len(), 1);
}

#[tokio::test]
async fn non_json_error_body_is_kept_verbatim() {
    let stub = Stub::default().predict_replies(502, "Bad Gateway");
    let client = client(stub.serve().await, 5);

    let err = client.predict(&encode(&alice_form()).unwrap()).await.unwrap_err();
    assert_eq!(err, ServiceError::Status { status: 502, message: "Bad Gateway".to_string() });
}
