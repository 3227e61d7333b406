use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use core_types::{InstrumentConfig, InstrumentToken, Mode, Notifier, Symbol};
use database::JsonOrderStore;
use engine::Engine;
use execution::{ModeGate, OrderDispatcher, SimulatedExecutor};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;
use web_server::{AppState, create_router};

#[derive(Default)]
struct Messages(Mutex<Vec<String>>);

#[async_trait]
impl Notifier for Messages {
    async fn notify(&self, text: &str) {
        self.0.lock().await.push(text.to_string());
    }
}

struct Harness {
    state: AppState,
    messages: Arc<Messages>,
    orders_path: PathBuf,
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.orders_path);
    }
}

fn harness() -> Harness {
    let orders_path = std::env::temp_dir().join(format!("history-{}.json", uuid::Uuid::new_v4()));
    let store = Arc::new(JsonOrderStore::new(&orders_path));
    let messages = Arc::new(Messages::default());

    let dispatcher = OrderDispatcher::new(
        Arc::new(SimulatedExecutor::new()),
        Arc::new(SimulatedExecutor::new()),
        store.clone(),
        messages.clone(),
    );
    let engine = Engine::new(
        vec![InstrumentConfig {
            token: InstrumentToken(738561),
            symbol: Symbol::from("NIFTY50"),
            short_period: 1,
            long_period: 2,
            quantity: 1,
            stop_loss_percent: dec!(0.5),
            target_percent: dec!(5),
        }],
        ModeGate::default(),
        dispatcher,
    )
    .unwrap();

    Harness {
        state: AppState {
            engine: Arc::new(engine),
            store,
            notifier: messages.clone(),
        },
        messages,
        orders_path,
    }
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = create_router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_answers_ok() {
    let h = harness();
    let response = create_router(h.state.clone()).oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn mode_defaults_to_paper() {
    let h = harness();
    let (status, body) = send(&h.state, get("/mode")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "mode": "paper" }));
}

#[tokio::test]
async fn switching_mode_is_acknowledged_and_announced() {
    let h = harness();

    let (status, body) = send(&h.state, post_json("/mode", r#"{"mode":"live"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "mode": "live" }));
    assert_eq!(h.state.engine.mode(), Mode::Live);

    // The notification is sent from a background task.
    for _ in 0..100 {
        if !h.messages.0.lock().await.is_empty() {
            break;
        }
        tokio::task::yield_now().await;
    }
    assert_eq!(
        h.messages.0.lock().await.as_slice(),
        ["⚡ Mode switched to: LIVE MODE"]
    );
}

#[tokio::test]
async fn invalid_mode_is_rejected_without_change() {
    let h = harness();

    for body in [r#"{"mode":"turbo"}"#, r#"{"mode":"LIVE"}"#, "{}", "not json"] {
        let (status, response) = send(&h.state, post_json("/mode", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(response, json!({ "success": false }));
    }
    assert_eq!(h.state.engine.mode(), Mode::Paper);
}

#[tokio::test]
async fn status_reflects_the_engine() {
    let h = harness();
    let nifty = Symbol::from("NIFTY50");
    h.state.engine.on_tick(&nifty, dec!(99)).await;
    for handle in h.state.engine.on_tick(&nifty, dec!(100)).await {
        handle.await.unwrap();
    }

    let (status, body) = send(&h.state, get("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "paper");
    assert_eq!(body["lastPrices"]["NIFTY50"], 100.0);
    assert_eq!(body["openPositions"]["NIFTY50"]["entryPrice"], 100.0);
    assert_eq!(body["trendingStocks"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn history_lists_recorded_orders() {
    let h = harness();

    let (status, body) = send(&h.state, get("/history")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "orders": [] }));

    let nifty = Symbol::from("NIFTY50");
    h.state.engine.on_tick(&nifty, dec!(99)).await;
    for handle in h.state.engine.on_tick(&nifty, dec!(100)).await {
        handle.await.unwrap();
    }

    let (_, body) = send(&h.state, get("/history")).await;
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["type"], "BUY");
    assert_eq!(orders[0]["symbol"], "NIFTY50");
    assert_eq!(orders[0]["mode"], "paper");
}

#[tokio::test]
async fn unreadable_history_is_a_server_error() {
    let h = harness();
    std::fs::write(&h.orders_path, "[{ broken").unwrap();

    let (status, body) = send(&h.state, get("/history")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Error fetching history" }));
}
