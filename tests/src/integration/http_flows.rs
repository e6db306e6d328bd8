//! # HTTP Flows
//!
//! The router with signed session tokens, driven through `tower::ServiceExt`.

#[cfg(test)]
mod tests {
    use crate::fixtures::{item, user, Node};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use dc_05_api_gateway::{build_router, AppState, GatewayConfig, HmacSessionResolver};
    use serde_json::{json, Value};
    use shared_types::security::sign_session_token;
    use shared_types::{current_timestamp, ItemStatus};
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &[u8] = b"integration-secret";

    fn app(node: &Node) -> Router {
        let state = AppState::new(node.interaction_api(), node.report_api(), node.points_api());
        let resolver = HmacSessionResolver::new(SECRET.to_vec());
        build_router(&GatewayConfig::default(), state, Arc::new(resolver))
    }

    fn token_for(raw: &str) -> String {
        sign_session_token(SECRET, &user(raw), current_timestamp() + 3600)
    }

    async fn call(app: &Router, method: Method, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_award_over_http_with_signed_session() {
        let node = Node::new();
        node.list(item("chair", "alice", ItemStatus::Given)).await;
        let app = app(&node);
        let alice = token_for("alice");

        let (status, body) = call(&app, Method::POST, "/points/award", &alice, json!({"itemId": "chair"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["awarded"], json!(true));

        let (status, body) = call(&app, Method::POST, "/points/award", &alice, json!({"itemId": "chair"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["awarded"], json!(false));

        let (_, body) = call(&app, Method::GET, "/points/balance", &alice, Value::Null).await;
        assert_eq!(body["points"], json!(10));
        assert_eq!(node.store.award_count(), 1);
    }

    #[tokio::test]
    async fn test_expired_and_forged_sessions_are_anonymous() {
        let node = Node::new();
        let app = app(&node);

        let expired = sign_session_token(SECRET, &user("alice"), current_timestamp() - 1);
        let (status, body) = call(&app, Method::POST, "/interactions/like", &expired, json!({"itemId": "i"})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"success": false, "error": "Unauthorized"}));

        let forged = sign_session_token(b"not-the-secret", &user("alice"), current_timestamp() + 60);
        let (status, _) = call(&app, Method::POST, "/interactions/like", &forged, json!({"itemId": "i"})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        assert_eq!(node.store.edge_count(), 0);
    }

    #[tokio::test]
    async fn test_session_identity_is_the_actor() {
        let node = Node::new();
        let app = app(&node);

        // The body cannot pick the actor; only the session does.
        let (status, _) = call(
            &app,
            Method::POST,
            "/interactions/follow",
            &token_for("alice"),
            json!({"userId": "bob", "actorId": "mallory"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = call(&app, Method::GET, "/interactions/follow?userId=bob", &token_for("alice"), Value::Null).await;
        assert_eq!(body["following"], json!(true));
        let (_, body) = call(&app, Method::GET, "/interactions/follow?userId=bob", &token_for("mallory"), Value::Null).await;
        assert_eq!(body["following"], json!(false));
        assert_eq!(body["followers"], json!(1));
    }

    #[tokio::test]
    async fn test_both_report_modes_share_one_row() {
        let node = Node::new();
        let app = app(&node);
        let alice = token_for("alice");

        let (status, _) = call(
            &app,
            Method::POST,
            "/reports/item",
            &alice,
            json!({"itemId": "item-7", "reason": "Broken on arrival"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // The generic form sees the same (reporter, item) key and stays quiet.
        let (status, body) = call(
            &app,
            Method::POST,
            "/reports",
            &alice,
            json!({"reportedItemId": "item-7", "reason": "Duplicate or spam listing"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
        assert_eq!(node.store.report_count(), 1);
    }
}
