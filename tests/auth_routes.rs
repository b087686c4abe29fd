//! Integration tests for signup and login.

use axum::http::{header, StatusCode};
use serde_json::json;

mod common;

use common::TestApp;

#[tokio::test]
async fn signup_creates_account_and_session() {
    // ---
    let app = TestApp::new();

    let response = app
        .post_json(
            "/signup",
            json!({ "username": "Thorin", "password": "arkenstone" }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);

    let body = response.json();
    assert_eq!(body["username"], "Thorin");
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("signup should set a cookie");
    assert!(set_cookie.starts_with("ssid="));
    assert!(set_cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    // ---
    let app = TestApp::new();
    app.signup("Fili", "first").await;

    let response = app
        .post_json(
            "/signup",
            json!({ "username": "Fili", "password": "second" }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json(), json!({ "err": "Username already taken" }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_signups_for_one_name_admit_exactly_one() {
    // ---
    let app = TestApp::new();

    let attempts: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let response = app
                    .post_json(
                        "/signup",
                        json!({ "username": "Kili", "password": format!("pw-{i}") }),
                        None,
                    )
                    .await;
                (response.status, response.json())
            })
        })
        .collect();

    let mut created = 0;
    for attempt in attempts {
        let (status, body) = attempt.await.expect("signup task panicked");
        match status {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => {
                assert_eq!(body, json!({ "err": "Username already taken" }));
            }
            other => panic!("unexpected status {other}: {body}"),
        }
    }

    assert_eq!(created, 1);
}

#[tokio::test]
async fn signup_requires_both_fields() {
    // ---
    let app = TestApp::new();

    let response = app
        .post_json("/signup", json!({ "username": "Kili" }), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["err"].is_string());
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn login_with_valid_credentials_sets_session() {
    // ---
    let app = TestApp::new();
    app.signup("Balin", "moria").await;

    let response = app
        .post_json(
            "/login",
            json!({ "username": "Balin", "password": "moria" }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["username"], "Balin");

    let cookie = response.session_cookie().expect("login should set ssid");
    let index = app.get_with_cookie("/index", &cookie).await;
    assert_eq!(index.status, StatusCode::OK);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    // ---
    let app = TestApp::new();
    app.signup("Dwalin", "axe").await;

    let response = app
        .post_json(
            "/login",
            json!({ "username": "Dwalin", "password": "hammer" }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json(),
        json!({ "err": "Invalid username or password" })
    );
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn login_with_unknown_user_is_unauthorized() {
    // ---
    let app = TestApp::new();

    let response = app
        .post_json(
            "/login",
            json!({ "username": "Smaug", "password": "gold" }),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["err"], "Invalid username or password");
}

#[tokio::test]
async fn form_encoded_credentials_are_accepted() {
    // ---
    let app = TestApp::new();

    let response = app.post_form("/signup", "username=Ori&password=quill").await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.post_form("/login", "username=Ori&password=quill").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.session_cookie().is_some());
}

#[tokio::test]
async fn malformed_json_is_a_json_error() {
    // ---
    let app = TestApp::new();

    let mut request = common::request(
        axum::http::Method::POST,
        "/login",
        None,
        axum::body::Body::from("{ invalid json }"),
    );
    request.headers_mut().insert(
        header::CONTENT_TYPE,
        "application/json".parse().unwrap(),
    );

    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["err"].is_string());
}
