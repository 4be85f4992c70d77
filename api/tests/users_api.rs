mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::TestApp;
use inventory_api::config::{ApiConfig, InitialAdmin};
use inventory_api::entity::sea_orm_active_enums::Role;
use inventory_api::services::user_service;

#[tokio::test]
async fn bootstrapped_admin_can_log_in_and_out() {
    let config = ApiConfig {
        initial_admin: Some(InitialAdmin {
            username: "root".to_string(),
            password: "change-me-now".to_string(),
        }),
        ..ApiConfig::default()
    };
    let app = TestApp::with_config(config).await;

    let admin = user_service::bootstrap_admin(&app.state)
        .await
        .unwrap()
        .expect("admin created on empty table");
    assert_eq!(admin.role, Role::Admin);
    // A second run finds the account and does nothing
    assert!(user_service::bootstrap_admin(&app.state).await.unwrap().is_none());

    let rejected = app
        .request(
            Method::POST,
            "/login",
            None,
            Some(json!({"username": "root", "password": "wrong-password"})),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(rejected.json()["errors"].get("non_field_errors").is_some());

    let response = app
        .request(
            Method::POST,
            "/login",
            None,
            Some(json!({"username": "root", "password": "change-me-now"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text());
    let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("session_id="));
    assert!(cookie.contains("HttpOnly"));

    let body = response.json();
    assert_eq!(body["redirect_to"], "/dashboard/admin");
    assert_eq!(body["is_admin"], true);
    let session = body["session_id"].as_str().unwrap().to_string();

    let me = app.get("/me", &session).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json()["user"]["username"], "root");
    assert!(me.json()["user"].get("password_hash").is_none());

    let logout = app.request(Method::POST, "/logout", Some(&session), None).await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);

    let after = app.get("/me", &session).await;
    assert_eq!(after.status, StatusCode::SEE_OTHER);
    assert_eq!(after.location(), Some("/login"));
}

#[tokio::test]
async fn admin_creates_and_updates_users() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;

    let response = app
        .post(
            "/users",
            &admin,
            json!({
                "username": "bodega2",
                "email": "bodega2@example.com",
                "role": "logistics",
                "password": "s3cure-pass",
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
    let user = response.json();
    assert_eq!(user["role"], "logistics");
    assert_eq!(user["is_active"], true);

    let duplicate = app
        .post(
            "/users",
            &admin,
            json!({"username": "bodega2", "role": "read_only", "password": "s3cure-pass"}),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(duplicate.json()["errors"].get("username").is_some());

    let id = user["id"].as_i64().unwrap();
    let updated = app
        .put(
            &format!("/users/{}", id),
            &admin,
            json!({"username": "bodega2", "role": "assigner"}),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.text());
    assert_eq!(updated.json()["role"], "assigner");
}

#[tokio::test]
async fn short_passwords_are_rejected() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;

    let response = app
        .post(
            "/users",
            &admin,
            json!({"username": "nuevo", "role": "read_only", "password": "short"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json()["errors"].get("password").is_some());
}

#[tokio::test]
async fn disabling_a_user_ends_their_sessions() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;
    let viewer = app.login_as("consulta", Role::ReadOnly).await;
    let viewer_id = app.get("/me", &viewer).await.json()["user"]["id"].clone();

    let response = app
        .request(
            Method::POST,
            &format!("/users/{}/toggle-active", viewer_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["is_active"], false);

    let after = app.get("/assets", &viewer).await;
    assert_eq!(after.status, StatusCode::SEE_OTHER);
    assert_eq!(after.location(), Some("/login"));
}

#[tokio::test]
async fn admin_cannot_delete_or_disable_themselves() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;
    let own_id = app.get("/me", &admin).await.json()["user"]["id"].clone();

    let response = app.delete(&format!("/users/{}", own_id), &admin).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json()["errors"].get("non_field_errors").is_some());

    let response = app
        .request(
            Method::POST,
            &format!("/users/{}/toggle-active", own_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn user_administration_is_admin_only() {
    let app = TestApp::new().await;
    let assigner = app.login_as("asignador", Role::Assigner).await;

    let response = app.get("/users", &assigner).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn admin_deletes_another_user() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;
    let viewer = app.login_as("consulta", Role::ReadOnly).await;
    let viewer_id = app.get("/me", &viewer).await.json()["user"]["id"].clone();

    let response = app.delete(&format!("/users/{}", viewer_id), &admin).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let users = app.get("/users", &admin).await.json();
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn non_admin_cannot_delete_users() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    let assigner = app.login_as("asignador", Role::Assigner).await;
    let admin_id = app.get("/me", &admin).await.json()["user"]["id"].clone();
    let assigner_id = app.get("/me", &assigner).await.json()["user"]["id"].clone();

    let attempts = [
        (&logistics, &admin_id),
        (&assigner, &admin_id),
        (&logistics, &assigner_id),
    ];
    for (session, target) in attempts {
        let response = app.delete(&format!("/users/{}", target), session).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location(), Some("/"));
    }

    let users = app.get("/users", &admin).await.json();
    assert_eq!(users.as_array().unwrap().len(), 3);
    assert_eq!(app.get("/me", &assigner).await.status, StatusCode::OK);
}
