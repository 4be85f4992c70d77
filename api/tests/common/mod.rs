// Shared harness for the HTTP integration tests
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use sea_orm::{ActiveValue::Set, ConnectOptions, Database};
use serde_json::{json, Value};
use tower::ServiceExt;

use inventory_api::config::ApiConfig;
use inventory_api::db::DbPool;
use inventory_api::entity::sea_orm_active_enums::Role;
use inventory_api::entity::{brands, categories, users, zones};
use inventory_api::models::asset::DEFAULT_ZONE;
use inventory_api::{create_router, AppContext, AppState};
use inventory_database::migration::{Migrator, MigratorTrait};

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Reference rows every test starts with
pub struct Seed {
    pub terminals: categories::Model,
    pub sims: categories::Model,
    pub sunmi: brands::Model,
    pub claro: brands::Model,
    pub valledupar: zones::Model,
    pub bosconia: zones::Model,
}

pub struct TestApp {
    pub state: AppState,
    router: Router,
    pub seed: Seed,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(ApiConfig::default()).await
    }

    pub async fn with_config(config: ApiConfig) -> Self {
        // A single connection keeps every query on the same in-memory database
        let options = ConnectOptions::new("sqlite::memory:")
            .max_connections(1)
            .sqlx_logging(false)
            .to_owned();
        let conn = Database::connect(options)
            .await
            .expect("connect to in-memory sqlite");
        Migrator::up(&conn, None).await.expect("apply migrations");

        let state = AppContext::new(DbPool::from_connection(conn).repositories(), config);
        let seed = seed(&state).await;
        let router = create_router(state.clone());

        Self {
            state,
            router,
            seed,
        }
    }

    /// Creates an active account with an open session and returns the session id
    pub async fn login_as(&self, username: &str, role: Role) -> String {
        let repos = &self.state.repositories;
        let user = repos
            .user
            .insert(users::ActiveModel {
                username: Set(username.to_string()),
                first_name: Set(String::new()),
                last_name: Set(String::new()),
                email: Set(String::new()),
                role: Set(role),
                password_hash: Set("!".to_string()),
                is_active: Set(true),
                created_at: Set(Utc::now()),
                last_login_at: Set(None),
                ..Default::default()
            })
            .await
            .expect("insert user");

        let session_id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        repos
            .session
            .create(session_id.clone(), user.id, now, now + Duration::hours(1))
            .await
            .expect("create session");
        session_id
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        session: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(session) = session {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", session));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("build request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, session: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(session), None).await
    }

    pub async fn post(&self, uri: &str, session: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(session), Some(body))
            .await
    }

    pub async fn put(&self, uri: &str, session: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(session), Some(body))
            .await
    }

    pub async fn delete(&self, uri: &str, session: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(session), None).await
    }

    /// A complete, valid asset body without holder data
    pub fn asset_payload(&self, serial: &str) -> Value {
        json!({
            "name": "POS terminal",
            "serial_number": serial,
            "imei1": format!("35{}1", serial),
            "imei2": format!("35{}2", serial),
            "category_id": self.seed.terminals.id,
            "brand_id": self.seed.sunmi.id,
            "responsible": "Warehouse",
            "identification": "1065",
        })
    }

    /// Creates an asset through the API as `session` and returns its JSON
    pub async fn create_asset(&self, session: &str, body: Value) -> Value {
        let response = self.post("/assets", session, body).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.json()
    }
}

async fn seed(state: &AppState) -> Seed {
    let repos = &state.repositories;
    let now = Utc::now();

    let zone = |name: &str| zones::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    let category = |name: &str| categories::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        created_at: Set(now),
        ..Default::default()
    };
    let brand = |name: &str, category_id: i32| brands::ActiveModel {
        name: Set(name.to_string()),
        category_id: Set(Some(category_id)),
        created_at: Set(now),
        ..Default::default()
    };

    // The default zone comes from the migrations
    let valledupar = repos
        .zone
        .find_all()
        .await
        .expect("zones")
        .into_iter()
        .find(|z| z.name == DEFAULT_ZONE)
        .expect("default zone seeded by migrations");
    let bosconia = repos.zone.insert(zone("Bosconia")).await.expect("zone");
    let terminals = repos.category.insert(category("Terminals")).await.expect("category");
    let sims = repos.category.insert(category("SIM cards")).await.expect("category");
    let sunmi = repos.brand.insert(brand("SUNMI", terminals.id)).await.expect("brand");
    let claro = repos.brand.insert(brand("Claro", sims.id)).await.expect("brand");

    Seed {
        terminals,
        sims,
        sunmi,
        claro,
        valledupar,
        bosconia,
    }
}
