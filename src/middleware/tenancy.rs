// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::CurrentUser};

// A entidade (tenant) do chamador. Todas as leituras e escritas ficam
// confinadas a ela. Vem do token, nunca de um cabeçalho do cliente.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub Uuid);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .map(|user| TenantContext(user.entity_id))
            .ok_or(AppError::InvalidToken)
    }
}
