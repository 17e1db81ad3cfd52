use super::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::Result;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use shared::{
    domain::{CustomerField, ItemField},
    error::FALLBACK_FAILURE_REASON,
};
use tokio::{
    net::TcpListener,
    sync::{Mutex, Notify},
};

/// Canned replies handed out in order, one per request.
#[derive(Clone)]
struct OrderServerState {
    replies: Arc<Mutex<Vec<(StatusCode, String)>>>,
    received: Arc<Mutex<Vec<Value>>>,
    hits: Arc<AtomicUsize>,
    release: Option<Arc<Notify>>,
}

async fn handle_create_order(
    State(state): State<OrderServerState>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.received.lock().await.push(payload);
    if let Some(release) = &state.release {
        release.notified().await;
    }
    let (status, body) = {
        let mut replies = state.replies.lock().await;
        if replies.is_empty() {
            (StatusCode::INTERNAL_SERVER_ERROR, String::new())
        } else {
            replies.remove(0)
        }
    };
    (status, [("content-type", "application/json")], body)
}

async fn spawn_order_server(
    replies: Vec<(StatusCode, Value)>,
    release: Option<Arc<Notify>>,
) -> Result<(Url, OrderServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = OrderServerState {
        replies: Arc::new(Mutex::new(
            replies
                .into_iter()
                .map(|(status, body)| (status, body.to_string()))
                .collect(),
        )),
        received: Arc::new(Mutex::new(Vec::new())),
        hits: Arc::new(AtomicUsize::new(0)),
        release,
    };
    let app = Router::new()
        .route("/api/orders", post(handle_create_order))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((Url::parse(&format!("http://{addr}/api/orders"))?, state))
}

fn filled_form() -> OrderForm {
    let mut form = OrderForm::new();
    form.set_customer_field(CustomerField::Name, "Ada Lovelace");
    form.set_customer_field(CustomerField::Email, "ada@example.com");
    form.set_item_field(0, ItemField::Id, "item_1");
    form.set_item_field(0, ItemField::Quantity, "2");
    form
}

#[tokio::test]
async fn posts_order_body_with_service_field_names() {
    let (endpoint, state) = spawn_order_server(
        vec![(
            StatusCode::CREATED,
            json!({ "orderId": "O1", "status": "created", "total": 42 }),
        )],
        None,
    )
    .await
    .expect("spawn server");
    let client = HttpOrderClient::new(endpoint);

    let mut form = filled_form();
    form.add_item();
    form.set_item_field(1, ItemField::Id, "item_3");
    submit_order(&mut form, &client).await.expect("submit");

    let received = state.received.lock().await;
    assert_eq!(
        *received,
        vec![json!({
            "customer": { "name": "Ada Lovelace", "email": "ada@example.com" },
            "items": [
                { "id": "item_1", "quantity": 2 },
                { "id": "item_3", "quantity": 1 },
            ],
        })]
    );
}

#[tokio::test]
async fn successful_response_becomes_confirmation() {
    let (endpoint, _state) = spawn_order_server(
        vec![(
            StatusCode::OK,
            json!({ "orderId": "O1", "status": "created", "total": 42 }),
        )],
        None,
    )
    .await
    .expect("spawn server");
    let client = HttpOrderClient::new(endpoint);

    let mut form = filled_form();
    submit_order(&mut form, &client).await.expect("submit");

    let panel = form.outcome_panel().expect("panel");
    assert_eq!(panel.tone, PanelTone::Success);
    assert_eq!(panel.lines, ["Order ID: O1", "Status: created", "Total: 42"]);
}

#[tokio::test]
async fn rejection_reason_is_shown_verbatim() {
    let (endpoint, _state) = spawn_order_server(
        vec![(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "reason": "insufficient stock" }),
        )],
        None,
    )
    .await
    .expect("spawn server");
    let client = HttpOrderClient::new(endpoint);

    let request = filled_form().validate().expect("valid form");
    let err = client.create_order(&request).await.expect_err("rejected");
    match &err {
        SubmitError::Rejected { status, reason } => {
            assert_eq!(*status, 422);
            assert_eq!(reason.as_deref(), Some("insufficient stock"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.display_reason(), "insufficient stock");
}

#[tokio::test]
async fn rejection_without_reason_uses_fallback_message() {
    let (endpoint, _state) = spawn_order_server(
        vec![(StatusCode::BAD_REQUEST, json!({ "error": "bad" }))],
        None,
    )
    .await
    .expect("spawn server");
    let client = HttpOrderClient::new(endpoint);

    let mut form = filled_form();
    submit_order(&mut form, &client).await.expect("submit");
    assert_eq!(
        form.outcome(),
        &SubmissionOutcome::Failed {
            reason: FALLBACK_FAILURE_REASON.to_string(),
        }
    );
}

#[tokio::test]
async fn unreadable_success_body_is_a_malformed_response() {
    let (endpoint, _state) = spawn_order_server(
        vec![(StatusCode::OK, json!({ "status": "created" }))],
        None,
    )
    .await
    .expect("spawn server");
    let client = HttpOrderClient::new(endpoint);

    let request = filled_form().validate().expect("valid form");
    let err = client.create_order(&request).await.expect_err("malformed");
    assert!(matches!(err, SubmitError::MalformedResponse(_)));
    assert_eq!(err.display_reason(), FALLBACK_FAILURE_REASON);
}

#[tokio::test]
async fn unreachable_service_collapses_to_fallback_message() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpOrderClient::new(
        Url::parse(&format!("http://{addr}/api/orders")).expect("endpoint"),
    );
    let mut form = filled_form();
    submit_order(&mut form, &client).await.expect("submit");
    assert_eq!(
        form.outcome_panel().expect("panel").lines,
        [FALLBACK_FAILURE_REASON]
    );
}

#[tokio::test]
async fn invalid_form_never_reaches_the_service() {
    let (endpoint, state) = spawn_order_server(Vec::new(), None)
        .await
        .expect("spawn server");
    let client = HttpOrderClient::new(endpoint);

    let mut form = filled_form();
    form.set_item_field(0, ItemField::Quantity, "");
    let err = submit_order(&mut form, &client).await.expect_err("invalid");
    assert!(matches!(err, FormError::InvalidQuantity { index: 0, .. }));
    assert_eq!(state.hits.load(Ordering::SeqCst), 0);
    assert_eq!(form.outcome(), &SubmissionOutcome::Idle);
}

#[tokio::test]
async fn submit_while_pending_issues_no_second_request() {
    let release = Arc::new(Notify::new());
    let (endpoint, state) = spawn_order_server(
        vec![(StatusCode::OK, json!({ "orderId": "O1", "status": "created" }))],
        Some(release.clone()),
    )
    .await
    .expect("spawn server");
    let client = Arc::new(HttpOrderClient::new(endpoint));

    let mut form = filled_form();
    let request = form.begin_submission().expect("begin");
    let in_flight = {
        let client = client.clone();
        tokio::spawn(async move { client.create_order(&request).await })
    };

    while state.hits.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(form.begin_submission(), Err(FormError::SubmissionInFlight));

    release.notify_one();
    let result = in_flight.await.expect("join");
    assert!(form.complete_submission(result));
    assert_eq!(state.hits.load(Ordering::SeqCst), 1);
    assert!(matches!(form.outcome(), SubmissionOutcome::Succeeded(_)));
}

#[tokio::test]
async fn three_line_order_succeeds_then_failure_overwrites_it() {
    let (endpoint, state) = spawn_order_server(
        vec![
            (
                StatusCode::OK,
                json!({ "orderId": "O7", "status": "created", "total": 42 }),
            ),
            (StatusCode::SERVICE_UNAVAILABLE, json!({})),
        ],
        None,
    )
    .await
    .expect("spawn server");
    let client = HttpOrderClient::new(endpoint);

    let mut form = OrderForm::new();
    form.add_item();
    form.add_item();
    assert_eq!(form.items().len(), 3);
    form.set_customer_field(CustomerField::Name, "Ada Lovelace");
    form.set_customer_field(CustomerField::Email, "ada@example.com");
    for index in 0..3 {
        form.set_item_field(index, ItemField::Id, format!("item_{}", index + 1));
        form.set_item_field(index, ItemField::Quantity, (index + 1).to_string());
    }

    submit_order(&mut form, &client).await.expect("first submit");
    assert_eq!(
        form.outcome(),
        &SubmissionOutcome::Succeeded(OrderConfirmation {
            order_id: "O7".to_string(),
            status: "created".to_string(),
            total: Some(42.0),
            reason: None,
        })
    );
    assert!(!form.is_pending());

    submit_order(&mut form, &client).await.expect("second submit");
    assert_eq!(
        form.outcome(),
        &SubmissionOutcome::Failed {
            reason: FALLBACK_FAILURE_REASON.to_string(),
        }
    );
    assert_eq!(state.hits.load(Ordering::SeqCst), 2);
}
