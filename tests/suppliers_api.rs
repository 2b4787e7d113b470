use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use fornecedores_api::{
    config::{AppConfig, AppState},
    db::{InMemorySupplierRepository, SupplierRepository},
    models::supplier::SupplierPayload,
    routes,
};

struct TestApp {
    router: Router,
    repo: Arc<InMemorySupplierRepository>,
    state: AppState,
    entity: Uuid,
    token: String,
}

fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some("test-secret".to_string()),
        _ => None,
    })
    .expect("config")
}

fn build_app() -> TestApp {
    let repo = Arc::new(InMemorySupplierRepository::new());
    let state = AppState::with_repository(test_config(), repo.clone());
    let entity = Uuid::new_v4();
    let token = state
        .auth_service
        .create_token(Uuid::new_v4(), entity, Duration::hours(1))
        .expect("token");

    TestApp {
        router: routes::build_router(state.clone()),
        repo,
        state,
        entity,
        token,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));

        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn seed(&self, entity: Uuid, name: Option<&str>, transient: bool) -> Uuid {
        let fields = SupplierPayload {
            name: name.map(str::to_string),
            ..Default::default()
        };
        self.repo.insert(entity, &fields, transient).await.unwrap().id
    }

    async fn stored_transient(&self, id: &str) -> bool {
        let id = Uuid::parse_str(id).unwrap();
        self.repo
            .find_by_id(self.entity, id)
            .await
            .unwrap()
            .expect("supplier stored")
            .transient
    }
}

fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("id").to_string()
}

#[tokio::test]
async fn bare_creation_alias_creates_transient_supplier() {
    let app = build_app();

    let (status, body) = app.send(Method::POST, "/fornecedores/novo", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(app.stored_transient(&id_of(&body)).await);
}

#[tokio::test]
async fn post_without_body_is_bare_creation() {
    let app = build_app();

    let (status, body) = app.send(Method::POST, "/fornecedores/", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(app.stored_transient(&id_of(&body)).await);

    let (status, body) = app.send(Method::POST, "/fornecedores/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(app.stored_transient(&id_of(&body)).await);
}

#[tokio::test]
async fn post_with_payload_creates_confirmed_supplier() {
    let app = build_app();
    let address = Uuid::new_v4().to_string();

    let (status, body) = app
        .send(
            Method::POST,
            "/fornecedores/",
            Some(json!({
                "name": "Fornecedor de teste (post)",
                "mobile_phone": "92832466",
                "address": address,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.as_object().unwrap().len(), 7);
    assert_eq!(body["name"], "Fornecedor de teste (post)");
    assert_eq!(body["mobile_phone"], "92832466");
    assert_eq!(body["address"], address);
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
    assert!(!app.stored_transient(&id_of(&body)).await);

    let stored = app
        .repo
        .find_by_id(app.entity, Uuid::parse_str(&id_of(&body)).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.entity_owner, app.entity);
}

#[tokio::test]
async fn put_confirms_transient_supplier() {
    let app = build_app();
    let (_, created) = app.send(Method::POST, "/fornecedores/novo", None).await;
    let id = id_of(&created);
    assert!(app.stored_transient(&id).await);

    let address = Uuid::new_v4().to_string();
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/fornecedores/{id}/"),
            Some(json!({
                "name": "Cliente de teste (put)",
                "mobile_phone": "92832466",
                "address": address,
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_object().unwrap().len(), 7);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["name"], "Cliente de teste (put)");
    assert_eq!(body["mobile_phone"], "92832466");
    assert_eq!(body["address"], address);
    assert_eq!(body["email"], Value::Null);
    assert!(!app.stored_transient(&id).await);

    let stored = app
        .repo
        .find_by_id(app.entity, Uuid::parse_str(&id).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.entity_owner, app.entity);
}

#[tokio::test]
async fn patch_updates_address_and_keeps_transient() {
    let app = build_app();
    let id = app.seed(app.entity, Some("Fornecedor"), true).await.to_string();
    let address = Uuid::new_v4().to_string();

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/fornecedores/{id}/"),
            Some(json!({ "address": address })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], address);
    assert_eq!(body["name"], "Fornecedor");
    assert!(app.stored_transient(&id).await);

    let (_, fetched) = app.send(Method::GET, &format!("/fornecedores/{id}/"), None).await;
    assert_eq!(fetched["address"], address);
}

#[tokio::test]
async fn patch_never_turns_confirmed_supplier_transient() {
    let app = build_app();
    let id = app.seed(app.entity, Some("Confirmado"), false).await.to_string();

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/fornecedores/{id}/"),
            Some(json!({ "name": null, "mobile_phone": "92832466" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], Value::Null);
    assert_eq!(body["mobile_phone"], "92832466");
    assert!(!app.stored_transient(&id).await);
}

#[tokio::test]
async fn retrieve_returns_transient_and_confirmed_alike() {
    let app = build_app();
    for transient in [true, false] {
        let id = app.seed(app.entity, Some("Fornecedor"), transient).await;
        let (status, body) = app.send(Method::GET, &format!("/fornecedores/{id}/"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id.to_string());
    }
}

#[tokio::test]
async fn list_counts_only_own_suppliers() {
    let app = build_app();
    app.seed(app.entity, Some("Meu"), false).await;
    app.seed(Uuid::new_v4(), Some("Alheio"), false).await;

    let (status, body) = app.send(Method::GET, "/fornecedores/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["next"], Value::Null);
    assert_eq!(body["previous"], Value::Null);
}

#[tokio::test]
async fn list_filters_by_uuid_list() {
    let app = build_app();
    let f1 = app.seed(app.entity, Some("F1"), false).await;
    let f2 = app.seed(app.entity, Some("F2"), false).await;
    app.seed(app.entity, None, true).await;
    for _ in 0..3 {
        app.seed(Uuid::new_v4(), Some("Outra entidade"), false).await;
    }

    let (status, body) = app
        .send(Method::GET, &format!("/fornecedores/?uuids={f1},{f2}"), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    let mut ids: Vec<String> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(id_of)
        .collect();
    ids.sort();
    let mut expected = vec![f1.to_string(), f2.to_string()];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn uuid_list_ignores_ids_from_other_entities() {
    let app = build_app();
    let mine = app.seed(app.entity, Some("Meu"), false).await;
    let theirs = app.seed(Uuid::new_v4(), Some("Alheio"), false).await;

    let (_, body) = app
        .send(Method::GET, &format!("/fornecedores/?uuids={mine},{theirs}"), None)
        .await;

    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["id"], mine.to_string());
}

#[tokio::test]
async fn malformed_uuid_list_is_rejected() {
    let app = build_app();

    let (status, body) = app
        .send(Method::GET, "/fornecedores/?uuids=nao-e-uuid", None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["uuids"].is_array());
}

#[tokio::test]
async fn list_filters_by_name_query() {
    let app = build_app();
    let cliente = app.seed(app.entity, Some("Cliente (123)"), false).await;
    app.seed(app.entity, None, true).await;
    for _ in 0..3 {
        app.seed(Uuid::new_v4(), Some("Cliente (123)"), false).await;
    }

    let (status, body) = app.send(Method::GET, "/fornecedores/?query=123", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["id"], cliente.to_string());
    assert_eq!(body["results"][0]["name"], "Cliente (123)");
}

#[tokio::test]
async fn list_paginates_with_configured_page_size() {
    let app = build_app();
    for i in 0..6 {
        app.seed(app.entity, Some(&format!("Fornecedor {i}")), false).await;
    }

    let (_, first) = app.send(Method::GET, "/fornecedores/", None).await;
    assert_eq!(first["count"], 6);
    assert_eq!(first["results"].as_array().unwrap().len(), 5);
    assert_eq!(first["next"], 2);

    let (status, second) = app.send(Method::GET, "/fornecedores/?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["results"].as_array().unwrap().len(), 1);
    assert_eq!(second["previous"], 1);
    assert_eq!(second["next"], Value::Null);

    let (status, _) = app.send(Method::GET, "/fornecedores/?page=3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn huge_page_number_is_an_invalid_page() {
    let app = build_app();
    app.seed(app.entity, Some("Fornecedor"), false).await;

    for page in ["18446744073709551615", "3689348814741910325", "4000000000000000000"] {
        let (status, body) = app
            .send(Method::GET, &format!("/fornecedores/?page={page}"), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "page={page}");
        assert_eq!(body["error"], "Página inválida.");
    }
}

#[tokio::test]
async fn other_entity_supplier_is_not_found() {
    let app = build_app();
    let theirs = app.seed(Uuid::new_v4(), Some("Alheio"), true).await;
    let uri = format!("/fornecedores/{theirs}/");

    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(Method::PUT, &uri, Some(json!({ "name": "Invasor" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_in_path_is_not_found() {
    let app = build_app();
    let (status, body) = app.send(Method::GET, "/fornecedores/123/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Fornecedor não encontrado.");
}

#[tokio::test]
async fn invalid_email_is_a_validation_error() {
    let app = build_app();

    let (status, body) = app
        .send(
            Method::POST,
            "/fornecedores/",
            Some(json!({ "email": "sem-arroba" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn malformed_address_is_a_bad_request() {
    let app = build_app();

    let (status, _) = app
        .send(
            Method::POST,
            "/fornecedores/",
            Some(json!({ "address": "rua sem uuid" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_supplier() {
    let app = build_app();
    let id = app.seed(app.entity, Some("Descartável"), false).await;
    let uri = format!("/fornecedores/{id}/");

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let app = build_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/fornecedores/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tokens_from_another_secret_are_unauthorized() {
    let app = build_app();
    let other = AppState::with_repository(
        AppConfig::from_lookup(|key| (key == "JWT_SECRET").then(|| "outro".to_string())).unwrap(),
        app.repo.clone(),
    );
    let forged = other
        .auth_service
        .create_token(Uuid::new_v4(), app.entity, Duration::hours(1))
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/fornecedores/")
                .header(header::AUTHORIZATION, format!("Bearer {forged}"))
                .header(header::ACCEPT_LANGUAGE, "en-US")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Invalid or missing authentication token.");
}

#[tokio::test]
async fn health_is_public() {
    let app = build_app();
    assert_eq!(app.state.config.page_size, 5);

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
