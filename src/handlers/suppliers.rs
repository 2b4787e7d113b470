// src/handlers/suppliers.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{
        error::{ApiError, AppError},
        extract::OptionalJson,
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
    models::supplier::{
        SupplierListQuery, SupplierPage, SupplierPatchPayload, SupplierPayload, SupplierResponse,
    },
};

// Id malformado na URL é tratado como "não encontrado", igual a um id de outra entidade.
fn parse_supplier_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::SupplierNotFound)
}

// POST /fornecedores/
#[utoipa::path(
    post,
    path = "/fornecedores/",
    tag = "Fornecedores",
    request_body(content = SupplierPayload, description = "Sem corpo (ou sem campos) cria um fornecedor transiente"),
    responses(
        (status = 201, description = "Fornecedor criado", body = SupplierResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    body: Result<OptionalJson<SupplierPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let OptionalJson(payload) =
        body.map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    tracing::debug!(user_id = %user.0.id, "Criando fornecedor");

    let supplier = app_state
        .supplier_service
        .create(tenant.0, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(SupplierResponse::from(supplier))))
}

// POST /fornecedores/novo
#[utoipa::path(
    post,
    path = "/fornecedores/novo",
    tag = "Fornecedores",
    responses(
        (status = 201, description = "Fornecedor transiente criado", body = SupplierResponse),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_bare_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    tracing::debug!(user_id = %user.0.id, "Criando fornecedor transiente");

    let supplier = app_state
        .supplier_service
        .create_bare(tenant.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(SupplierResponse::from(supplier))))
}

// GET /fornecedores/
#[utoipa::path(
    get,
    path = "/fornecedores/",
    tag = "Fornecedores",
    params(SupplierListQuery),
    responses(
        (status = 200, description = "Página de fornecedores", body = SupplierPage),
        (status = 400, description = "Lista de UUIDs inválida"),
        (status = 404, description = "Página inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<SupplierListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .supplier_service
        .list(tenant.0, &query)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /fornecedores/{id}/
#[utoipa::path(
    get,
    path = "/fornecedores/{id}/",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor", body = SupplierResponse),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let id = parse_supplier_id(&id).map_err(to_api)?;
    let supplier = app_state
        .supplier_service
        .get(tenant.0, id)
        .await
        .map_err(to_api)?;

    Ok((StatusCode::OK, Json(SupplierResponse::from(supplier))))
}

// PUT /fornecedores/{id}/
#[utoipa::path(
    put,
    path = "/fornecedores/{id}/",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    request_body = SupplierPayload,
    responses(
        (status = 200, description = "Fornecedor substituído e confirmado", body = SupplierResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn replace_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<String>,
    body: Result<OptionalJson<SupplierPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let id = parse_supplier_id(&id).map_err(to_api)?;
    let OptionalJson(payload) = body.map_err(to_api)?;

    let supplier = app_state
        .supplier_service
        .replace(tenant.0, id, payload)
        .await
        .map_err(to_api)?;

    Ok((StatusCode::OK, Json(SupplierResponse::from(supplier))))
}

// PATCH /fornecedores/{id}/
#[utoipa::path(
    patch,
    path = "/fornecedores/{id}/",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    request_body = SupplierPatchPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = SupplierResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn patch_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<String>,
    body: Result<OptionalJson<SupplierPatchPayload>, AppError>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let id = parse_supplier_id(&id).map_err(to_api)?;
    let OptionalJson(patch) = body.map_err(to_api)?;

    let supplier = app_state
        .supplier_service
        .patch(tenant.0, id, patch)
        .await
        .map_err(to_api)?;

    Ok((StatusCode::OK, Json(SupplierResponse::from(supplier))))
}

// DELETE /fornecedores/{id}/
#[utoipa::path(
    delete,
    path = "/fornecedores/{id}/",
    tag = "Fornecedores",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 204, description = "Fornecedor removido"),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let id = parse_supplier_id(&id).map_err(to_api)?;
    app_state
        .supplier_service
        .delete(tenant.0, id)
        .await
        .map_err(to_api)?;

    Ok(StatusCode::NO_CONTENT)
}
