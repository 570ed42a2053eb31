//! Account lifecycle over HTTP: signup gating, login, logout and admin checks

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{bearer, setup, token_for, ADMIN_EMAIL, ADMIN_ID, ADMIN_PASSWORD};
use serde_json::{json, Value};

fn signup_body(admin_id: Option<&str>, email: &str) -> Value {
    let mut body = json!({
        "name": "Jane Doe",
        "email": email,
        "password": "jane-password-1",
    });
    if let Some(id) = admin_id {
        body["id"] = json!(id);
    }
    body
}

#[actix_web::test]
async fn test_signup_requires_admin_identifier() {
    let state = setup().await;
    let app = init_app!(state);

    for admin_id in [None, Some("not-the-admin")] {
        let req = test::TestRequest::post()
            .uri("/users/signup")
            .set_json(signup_body(admin_id, "jane@example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 401);
        assert_eq!(body["type"], "authentication_error");
    }

    // Only the bootstrap admin exists
    assert_eq!(state.accounts.len().await, 1);
}

#[actix_web::test]
async fn test_signup_login_logout_round() {
    let state = setup().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/users/signup")
        .set_json(signup_body(Some(ADMIN_ID), "A@X.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let account: Value = test::read_body_json(resp).await;
    assert_eq!(account["email"], "a@x.com");
    assert_eq!(account["is_admin"], false);
    assert!(account.get("password").is_none());
    assert!(account.get("password_hash").is_none());

    // Same email, different case
    let req = test::TestRequest::post()
        .uri("/users/signup")
        .set_json(signup_body(Some(ADMIN_ID), "a@x.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({"email": "a@x.com", "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({"email": "a@x.com", "password": "jane-password-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let login: Value = test::read_body_json(resp).await;
    assert_eq!(login["token_type"], "Bearer");
    assert_eq!(login["expires_in"], 3600);
    let token = login["token"].as_str().expect("token").to_string();

    let req = test::TestRequest::post()
        .uri("/users/logout")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // The revoked token is dead
    let req = test::TestRequest::post()
        .uri("/users/logout")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_signup_rejects_invalid_payload() {
    let state = setup().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/users/signup")
        .set_json(json!({
            "id": ADMIN_ID,
            "name": "Jane",
            "email": "jane@example.com",
            "password": "short",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_admin_routes_check_role() {
    let state = setup().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/users/signup")
        .set_json(signup_body(Some(ADMIN_ID), "member@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let member = token_for(&state, "member@example.com", "jane-password-1").await;
    let admin = token_for(&state, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let uri = format!("/admin/videos/{}", uuid::Uuid::new_v4());

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&member))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "authorization_error");

    // Admin gets through to the handler, which finds nothing
    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer("not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_malformed_json_gets_error_envelope() {
    let state = setup().await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/users/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload(r#"{"email": 42"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "validation_error");
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "Malformed JSON body");

    // Wrong content type on signup
    let req = test::TestRequest::post()
        .uri("/users/signup")
        .insert_header(("Content-Type", "text/plain"))
        .set_payload("name=jane")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "validation_error");
    assert_eq!(body["message"], "Expected an application/json body");
}

#[actix_web::test]
async fn test_health_check() {
    let state = setup().await;
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}
