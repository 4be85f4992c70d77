mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;
use inventory_api::entity::sea_orm_active_enums::Role;

#[tokio::test]
async fn admin_manages_zones() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;

    let response = app
        .post("/zones", &admin, json!({"name": " La Paz ", "description": "South"}))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let zone = response.json();
    assert_eq!(zone["name"], "La Paz");

    let duplicate = app.post("/zones", &admin, json!({"name": "La Paz"})).await;
    assert_eq!(duplicate.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(duplicate.json()["errors"].get("name").is_some());

    let id = zone["id"].as_i64().unwrap();
    let renamed = app
        .put(&format!("/zones/{}", id), &admin, json!({"name": "Pueblo Bello"}))
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.json()["name"], "Pueblo Bello");

    let zones = app.get("/zones", &admin).await.json();
    let names: Vec<&str> = zones
        .as_array()
        .unwrap()
        .iter()
        .map(|z| z["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bosconia", "Pueblo Bello", "Valledupar"]);

    let deleted = app.delete(&format!("/zones/{}", id), &admin).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let missing = app.get(&format!("/zones/{}", id), &admin).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reference_data_is_admin_only() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;

    let response = app.post("/categories", &logistics, json!({"name": "Printers"})).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));

    let home = app.get("/", &logistics).await.json();
    assert_eq!(home["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn brands_can_be_listed_per_category_by_any_user() {
    let app = TestApp::new().await;
    let viewer = app.login_as("consulta", Role::ReadOnly).await;

    let uri = format!("/brands?category_id={}", app.seed.sims.id);
    let brands = app.get(&uri, &viewer).await.json();
    let brands = brands.as_array().unwrap();
    assert_eq!(brands.len(), 1);
    assert_eq!(brands[0]["name"], "Claro");

    let all = app.get("/brands", &viewer).await.json();
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn brand_names_are_unique_within_a_category() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;

    let same_category = app
        .post(
            "/brands",
            &admin,
            json!({"name": "SUNMI", "category_id": app.seed.terminals.id}),
        )
        .await;
    assert_eq!(same_category.status, StatusCode::UNPROCESSABLE_ENTITY);

    let other_category = app
        .post(
            "/brands",
            &admin,
            json!({"name": "SUNMI", "category_id": app.seed.sims.id}),
        )
        .await;
    assert_eq!(other_category.status, StatusCode::CREATED);

    let unknown_category = app
        .post("/brands", &admin, json!({"name": "Zebra", "category_id": 9999}))
        .await;
    assert_eq!(unknown_category.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(unknown_category.json()["errors"].get("category_id").is_some());
}

#[tokio::test]
async fn deleting_a_category_clears_brands_and_assets() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;
    let asset = app.create_asset(&admin, app.asset_payload("SN-10")).await;
    let asset_id = asset["id"].as_i64().unwrap();

    let response = app
        .delete(&format!("/categories/{}", app.seed.terminals.id), &admin)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let asset = app.get(&format!("/assets/{}", asset_id), &admin).await.json();
    assert!(asset["category_id"].is_null());
    assert_eq!(asset["brand_id"], app.seed.sunmi.id);

    let brands = app.get("/brands", &admin).await.json();
    let sunmi = brands
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["id"] == app.seed.sunmi.id)
        .expect("brand survives its category");
    assert!(sunmi["category_id"].is_null());
}

#[tokio::test]
async fn deleting_a_brand_clears_it_from_assets() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;
    let asset = app.create_asset(&admin, app.asset_payload("SN-11")).await;
    let asset_id = asset["id"].as_i64().unwrap();

    let response = app
        .delete(&format!("/brands/{}", app.seed.sunmi.id), &admin)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let asset = app.get(&format!("/assets/{}", asset_id), &admin).await.json();
    assert!(asset["brand_id"].is_null());
    assert_eq!(asset["category_id"], app.seed.terminals.id);
}

#[tokio::test]
async fn form_options_list_references_and_choices() {
    let app = TestApp::new().await;
    let logistics = app.login_as("bodega", Role::Logistics).await;

    let response = app.get("/assets/form-options", &logistics).await;
    assert_eq!(response.status, StatusCode::OK);
    let options = response.json();
    assert_eq!(options["zones"].as_array().unwrap().len(), 2);
    assert_eq!(options["categories"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn non_admin_deletes_leave_reference_data_in_place() {
    let app = TestApp::new().await;
    let admin = app.login_as("admin", Role::Admin).await;
    let logistics = app.login_as("bodega", Role::Logistics).await;
    let assigner = app.login_as("asignador", Role::Assigner).await;

    let targets = [
        format!("/zones/{}", app.seed.bosconia.id),
        format!("/categories/{}", app.seed.sims.id),
        format!("/brands/{}", app.seed.claro.id),
    ];
    for session in [&logistics, &assigner] {
        for uri in &targets {
            let response = app.delete(uri, session).await;
            assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", uri);
            assert_eq!(response.location(), Some("/"), "{}", uri);
        }
    }

    let zone = app.get(&format!("/zones/{}", app.seed.bosconia.id), &admin).await;
    assert_eq!(zone.status, StatusCode::OK);
    let category = app
        .get(&format!("/categories/{}", app.seed.sims.id), &admin)
        .await;
    assert_eq!(category.status, StatusCode::OK);
    let brands = app.get("/brands", &admin).await.json();
    assert!(brands
        .as_array()
        .unwrap()
        .iter()
        .any(|b| b["id"] == app.seed.claro.id));

    let home = app.get("/", &logistics).await.json();
    assert_eq!(
        home["messages"],
        json!(["You do not have permission to manage brands."])
    );
}
