mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::TestApp;
use inventory_api::config::ApiConfig;
use inventory_api::entity::sea_orm_active_enums::Role;
use inventory_api::models::asset::DEFAULT_ZONE;
use inventory_api::models::PaginationParams;
use inventory_api::services::export_service::EXPORT_COLUMNS;

#[tokio::test]
async fn unauthenticated_requests_redirect_to_login() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/assets", None, None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn unknown_session_redirects_to_login() {
    let app = TestApp::new().await;

    let response = app.get("/assets", "not-a-session").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn create_with_holder_is_assigned_and_logs_ingress() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;

    let mut body = app.asset_payload("SN-100");
    body["document"] = json!("1065123");
    body["holder_name"] = json!("Ana Perez");
    body["status"] = json!("confirmed");
    let asset = app.create_asset(&logistics, body).await;

    assert_eq!(asset["status"], "assigned");
    assert_eq!(asset["zone"], "Valledupar");
    assert_eq!(asset["observation"], "VERIFICADO");

    let id = asset["id"].as_i64().unwrap();
    let history = app.get(&format!("/assets/{}/history", id), &logistics).await;
    assert_eq!(history.status, StatusCode::OK);
    let history = history.json();
    assert_eq!(history["history"].as_array().unwrap().len(), 0);
    let movements = history["movements"].as_array().unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0]["kind"], "ingress");
    assert_eq!(movements[0]["zone_to"], "Valledupar");
    assert_eq!(movements[0]["status_after"], "assigned");
    assert_eq!(movements[0]["username"], "bodega");
}

#[tokio::test]
async fn invalid_asset_reports_errors_per_field() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;

    let response = app.post("/assets", &logistics, json!({})).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = &response.json()["errors"];
    for field in ["name", "serial_number", "imei1", "imei2", "category_id", "brand_id"] {
        assert!(errors.get(field).is_some(), "missing error for {}", field);
    }

    let mut mismatched = app.asset_payload("SN-101");
    mismatched["category_id"] = json!(app.seed.sims.id);
    let response = app.post("/assets", &logistics, mismatched).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json()["errors"].get("brand_id").is_some());

    let mut unknown_zone = app.asset_payload("SN-102");
    unknown_zone["zone"] = json!("Atlantis");
    let response = app.post("/assets", &logistics, unknown_zone).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json()["errors"].get("zone").is_some());
}

#[tokio::test]
async fn update_records_one_history_row_per_changed_field() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    let asset = app.create_asset(&logistics, app.asset_payload("SN-200")).await;
    let id = asset["id"].as_i64().unwrap();

    let mut body = app.asset_payload("SN-200");
    body["responsible"] = json!("Field team");
    body["zone"] = json!("Bosconia");
    let response = app.put(&format!("/assets/{}", id), &logistics, body).await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text());
    assert_eq!(response.json()["zone"], "Bosconia");

    let history = app
        .get(&format!("/assets/{}/history", id), &logistics)
        .await
        .json();
    let rows = history["history"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    let responsible = rows
        .iter()
        .find(|row| row["field"] == "responsible")
        .expect("responsible change");
    assert_eq!(responsible["old_value"], "Warehouse");
    assert_eq!(responsible["new_value"], "Field team");
    assert!(rows.iter().any(|row| row["field"] == "zone"));
}

#[tokio::test]
async fn update_without_changes_writes_no_history() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    let asset = app.create_asset(&logistics, app.asset_payload("SN-201")).await;
    let id = asset["id"].as_i64().unwrap();

    let response = app
        .put(&format!("/assets/{}", id), &logistics, app.asset_payload("SN-201"))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let history = app
        .get(&format!("/assets/{}/history", id), &logistics)
        .await
        .json();
    assert!(history["history"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn assigner_may_only_change_holder_fields() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    let assigner = app.login_as("asignador", Role::Assigner).await;
    let asset = app.create_asset(&logistics, app.asset_payload("SN-300")).await;
    let id = asset["id"].as_i64().unwrap();

    let mut renamed = app.asset_payload("SN-300");
    renamed["name"] = json!("Renamed terminal");
    let response = app.put(&format!("/assets/{}", id), &assigner, renamed).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json()["errors"].get("name").is_some());

    let mut handed_over = app.asset_payload("SN-300");
    handed_over["document"] = json!("1065123");
    handed_over["holder_name"] = json!("Ana Perez");
    let response = app.put(&format!("/assets/{}", id), &assigner, handed_over).await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text());
    assert_eq!(response.json()["status"], "assigned");
}

#[tokio::test]
async fn read_only_user_cannot_create_assets() {
    let app = TestApp::new().await;
    let viewer = app.login_as("consulta", Role::ReadOnly).await;

    let response = app.post("/assets", &viewer, app.asset_payload("SN-400")).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn denied_delete_leaves_a_notice_on_the_home_page() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    let asset = app.create_asset(&logistics, app.asset_payload("SN-500")).await;
    let id = asset["id"].as_i64().unwrap();

    let response = app.delete(&format!("/assets/{}", id), &logistics).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));

    let home = app.get("/", &logistics).await.json();
    assert_eq!(
        home["messages"],
        json!(["You do not have permission to delete assets."])
    );
    assert_eq!(home["assets"].as_array().unwrap().len(), 1);

    // The notice is shown once
    let home = app.get("/", &logistics).await.json();
    assert!(home["messages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delete_drops_history_but_keeps_deletion_event() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;
    let asset = app.create_asset(&admin, app.asset_payload("SN-600")).await;
    let id = asset["id"].as_i64().unwrap();

    let mut body = app.asset_payload("SN-600");
    body["carrier"] = json!("Claro");
    app.put(&format!("/assets/{}", id), &admin, body).await;

    let response = app.delete(&format!("/assets/{}", id), &admin).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.get(&format!("/assets/{}", id), &admin).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let remaining = app
        .state
        .repositories
        .history
        .find_by_asset(id as i32)
        .await
        .unwrap();
    assert!(remaining.is_empty());

    let deletions = app.get("/traceability?kind=deletion", &admin).await.json();
    let deletions = deletions.as_array().unwrap();
    assert_eq!(deletions.len(), 1);
    assert!(deletions[0]["asset_id"].is_null());
    assert_eq!(deletions[0]["zone_from"], "Valledupar");
    assert_eq!(deletions[0]["status_before"], "confirmed");
    assert_eq!(
        deletions[0]["asset_label"],
        format!("Asset {} - POS terminal", id)
    );
}

#[tokio::test]
async fn transfer_moves_asset_to_destination_zone() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    let asset = app.create_asset(&logistics, app.asset_payload("SN-700")).await;
    let id = asset["id"].as_i64().unwrap();

    let response = app
        .post(
            &format!("/assets/{}/movements", id),
            &logistics,
            json!({"kind": "transfer", "zone_to": "Bosconia", "description": "Route 4"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
    let event = response.json();
    assert_eq!(event["zone_from"], "Valledupar");
    assert_eq!(event["zone_to"], "Bosconia");

    let asset = app.get(&format!("/assets/{}", id), &logistics).await.json();
    assert_eq!(asset["zone"], "Bosconia");

    let response = app
        .post(
            &format!("/assets/{}/movements", id),
            &logistics,
            json!({"kind": "transfer"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_filters_by_search_and_zone() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    app.create_asset(&logistics, app.asset_payload("SN-800")).await;
    let mut other = app.asset_payload("SN-801");
    other["zone"] = json!("Bosconia");
    app.create_asset(&logistics, other).await;

    let found = app.get("/assets?search=SN-801", &logistics).await.json();
    assert_eq!(found["assets"].as_array().unwrap().len(), 1);
    assert_eq!(found["pagination"]["total"], 1);

    let in_zone = app.get("/assets?zone=Valledupar", &logistics).await.json();
    assert_eq!(in_zone["assets"][0]["serial_number"], "SN-800");
}

#[tokio::test]
async fn csv_export_has_header_and_one_row_per_asset() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    let viewer = app.login_as("consulta", Role::ReadOnly).await;
    app.create_asset(&logistics, app.asset_payload("SN-900")).await;
    app.create_asset(&logistics, app.asset_payload("SN-901")).await;

    let response = app.get("/exports/assets.csv", &viewer).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=asset_inventory.csv"
    );

    let text = response.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], EXPORT_COLUMNS.join(","));
    assert!(lines[1].contains("Terminals"));
    assert!(lines[1].contains("SUNMI"));
}

#[tokio::test]
async fn filtered_csv_export_matches_the_filtered_list() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    let viewer = app.login_as("consulta", Role::ReadOnly).await;
    app.create_asset(&logistics, app.asset_payload("SN-910")).await;
    for serial in ["SN-911", "SN-912"] {
        let mut body = app.asset_payload(serial);
        body["zone"] = json!("Bosconia");
        app.create_asset(&logistics, body).await;
    }

    for query in ["zone=Bosconia", "zone=Valledupar", "zone=Bosconia&search=SN-912"] {
        let list = app.get(&format!("/assets?{}", query), &viewer).await.json();
        let total = list["pagination"]["total"].as_u64().unwrap() as usize;

        let response = app.get(&format!("/exports/assets.csv?{}", query), &viewer).await;
        assert_eq!(response.status, StatusCode::OK);
        let text = response.text();
        let rows: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(rows.len(), total, "{}", query);
    }

    let text = app
        .get("/exports/assets.csv?zone=Bosconia", &viewer)
        .await
        .text();
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().skip(1).all(|row| row.contains("Bosconia")));
}

#[tokio::test]
async fn xlsx_export_is_a_workbook() {
    let app = TestApp::new().await;
    let viewer = app.login_as("consulta", Role::ReadOnly).await;

    let response = app.get("/exports/assets.xlsx", &viewer).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    // xlsx files are zip archives
    assert!(response.body.starts_with(b"PK"));
}

#[tokio::test]
async fn dashboards_follow_roles() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    let mut body = app.asset_payload("SN-950");
    body["document"] = json!("1065123");
    body["holder_name"] = json!("Ana Perez");
    app.create_asset(&logistics, body).await;
    app.create_asset(&logistics, app.asset_payload("SN-951")).await;

    let dashboard = app.get("/dashboard/admin", &admin).await.json();
    assert_eq!(dashboard["total"], 2);
    assert_eq!(dashboard["assigned"], 1);
    assert_eq!(dashboard["confirmed"], 1);

    let response = app.get("/dashboard/admin", &logistics).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let response = app.get("/dashboard", &logistics).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/dashboard/logistics"));

    let report = app.get("/reports/by-zone?zone=Atlantis", &logistics).await;
    assert_eq!(report.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn huge_page_numbers_return_an_empty_page() {
    let app = TestApp::new().await;
    let viewer = app.login_as("consulta", Role::ReadOnly).await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    app.create_asset(&logistics, app.asset_payload("SN-950")).await;

    let response = app
        .get("/assets?page=18446744073709551615&limit=500", &viewer)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert!(body["assets"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["page"], PaginationParams::MAX_PAGE);
}

#[tokio::test]
async fn denied_role_is_redirected_before_the_body_is_read() {
    let app = TestApp::new().await;
    let viewer = app.login_as("consulta", Role::ReadOnly).await;

    let mut body = app.asset_payload("SN-960");
    body["status"] = json!("pending");
    let response = app.post("/assets", &viewer, body).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));

    let home = app.get("/", &viewer).await.json();
    assert_eq!(
        home["messages"],
        json!(["You do not have permission to create assets."])
    );

    let response = app
        .request(Method::POST, "/assets", Some(&viewer), None)
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn undecodable_fields_are_reported_per_field() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;

    let mut body = app.asset_payload("SN-970");
    body["status"] = json!("pending");
    body["category_id"] = json!("terminals");
    let response = app.post("/assets", &logistics, body).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = &response.json()["errors"];
    assert!(errors.get("status").is_some());
    assert!(errors.get("category_id").is_some());
    assert!(errors.get("serial_number").is_none());

    let asset = app.create_asset(&logistics, app.asset_payload("SN-971")).await;
    let response = app
        .post(
            &format!("/assets/{}/movements", asset["id"]),
            &logistics,
            json!({"kind": "teleport"}),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json()["errors"].get("kind").is_some());
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let config = ApiConfig {
        max_body_bytes: 64,
        ..ApiConfig::default()
    };
    let app = TestApp::with_config(config).await;
    let logistics = app.login_as("bodega", Role::Logistics).await;

    let response = app.post("/assets", &logistics, app.asset_payload("SN-980")).await;

    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    let list = app.get("/assets", &logistics).await.json();
    assert_eq!(list["pagination"]["total"], 0);
}

#[tokio::test]
async fn fresh_database_has_the_default_zone() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;

    let zones = app.get("/zones", &admin).await.json();
    assert!(zones
        .as_array()
        .unwrap()
        .iter()
        .any(|z| z["name"] == DEFAULT_ZONE));

    let mut body = app.asset_payload("SN-990");
    body.as_object_mut().unwrap().remove("zone");
    let asset = app.create_asset(&admin, body).await;
    assert_eq!(asset["zone"], DEFAULT_ZONE);
}
