// src/models/supplier.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::{error::AppError, serde_utils::double_option};

// ---
// 1. Supplier (O "Fornecedor")
// ---
// Contraparte pertencente a uma entidade (tenant).
// `transient` marca o registro criado pelo sistema e ainda não confirmado com dados reais.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Supplier {
    pub id: Uuid,
    pub entity_owner: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_phone: Option<String>,
    pub address: Option<Uuid>,
    pub transient: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. A representação pública (exatamente 7 campos)
// ---
// `entity_owner` e `transient` nunca saem na resposta.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[schema(example = "Fornecedor de teste")]
    pub name: Option<String>,
    #[schema(example = "contato@fornecedor.com")]
    pub email: Option<String>,
    #[schema(example = "92832466")]
    pub mobile_phone: Option<String>,
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub address: Option<String>,
}

impl From<Supplier> for SupplierResponse {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier.id,
            created_at: supplier.created_at,
            updated_at: supplier.updated_at,
            name: supplier.name,
            email: supplier.email,
            mobile_phone: supplier.mobile_phone,
            address: supplier.address.map(|a| a.to_string()),
        }
    }
}

// ---
// 3. Payloads (Os "Formulários" da API)
// ---

/// Campos graváveis de um fornecedor. Usado na criação e na substituição completa (PUT).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct SupplierPayload {
    #[validate(length(max = 255, message = "too_long"))]
    #[schema(example = "Fornecedor de teste (post)")]
    pub name: Option<String>,

    #[validate(email(message = "invalid_email"), length(max = 254, message = "too_long"))]
    #[schema(example = "contato@fornecedor.com")]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "too_long"))]
    #[schema(example = "92832466")]
    pub mobile_phone: Option<String>,

    #[schema(value_type = Option<String>, format = Uuid, example = "550e8400-e29b-41d4-a716-446655440000")]
    pub address: Option<Uuid>,
}

impl SupplierPayload {
    /// Nenhum campo informado (ou todos nulos): criação "crua", que gera um registro transiente.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.mobile_phone.is_none()
            && self.address.is_none()
    }
}

impl From<&Supplier> for SupplierPayload {
    fn from(supplier: &Supplier) -> Self {
        Self {
            name: supplier.name.clone(),
            email: supplier.email.clone(),
            mobile_phone: supplier.mobile_phone.clone(),
            address: supplier.address,
        }
    }
}

/// Atualização parcial (PATCH): campo ausente = mantém, `null` = limpa.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SupplierPatchPayload {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub mobile_phone: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = Uuid)]
    pub address: Option<Option<Uuid>>,
}

impl SupplierPatchPayload {
    /// Aplica as alterações sobre o estado atual e devolve o conjunto completo de campos.
    pub fn merge_into(self, current: &Supplier) -> SupplierPayload {
        let base = SupplierPayload::from(current);
        SupplierPayload {
            name: self.name.unwrap_or(base.name),
            email: self.email.unwrap_or(base.email),
            mobile_phone: self.mobile_phone.unwrap_or(base.mobile_phone),
            address: self.address.unwrap_or(base.address),
        }
    }
}

// ---
// 4. Listagem (filtros e paginação)
// ---

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupplierListQuery {
    /// Lista de UUIDs separados por vírgula.
    pub uuids: Option<String>,
    /// Trecho do nome do fornecedor.
    pub query: Option<String>,
    /// Página (começa em 1).
    pub page: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierFilter {
    pub ids: Option<Vec<Uuid>>,
    pub name_contains: Option<String>,
    pub case_sensitive: bool,
}

impl SupplierFilter {
    pub fn from_query(query: &SupplierListQuery, case_sensitive: bool) -> Result<Self, AppError> {
        let ids = match query.uuids.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_uuid_list(raw)?),
            _ => None,
        };

        let name_contains = query
            .query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        Ok(Self {
            ids,
            name_contains,
            case_sensitive,
        })
    }

    /// O critério de nome aplicado em memória (o Postgres usa LIKE/ILIKE).
    pub fn matches(&self, supplier: &Supplier) -> bool {
        if let Some(ids) = &self.ids {
            if !ids.contains(&supplier.id) {
                return false;
            }
        }

        match (&self.name_contains, &supplier.name) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(term), Some(name)) if self.case_sensitive => name.contains(term.as_str()),
            (Some(term), Some(name)) => name.to_lowercase().contains(&term.to_lowercase()),
        }
    }
}

fn parse_uuid_list(raw: &str) -> Result<Vec<Uuid>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Uuid::parse_str(s).map_err(|_| AppError::InvalidQueryParam {
                param: "uuids",
                value: s.to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u64,
    pub size: u64,
}

impl PageRequest {
    /// Página ausente = 1. Zero, texto não numérico ou um deslocamento que não cabe
    /// num OFFSET do Postgres (i64) = página inválida.
    pub fn parse(raw: Option<&str>, size: u64) -> Result<Self, AppError> {
        let number = match raw.map(str::trim) {
            None | Some("") => 1,
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or(AppError::InvalidPage)?,
        };

        (number - 1)
            .checked_mul(size)
            .filter(|offset| *offset <= i64::MAX as u64)
            .ok_or(AppError::InvalidPage)?;

        Ok(Self { number, size })
    }

    pub fn offset(&self) -> u64 {
        (self.number - 1).saturating_mul(self.size)
    }
}

/// Página de resultados, no formato `{count, next, previous, results}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupplierPage {
    pub count: u64,
    pub next: Option<u64>,
    pub previous: Option<u64>,
    pub results: Vec<SupplierResponse>,
}

impl SupplierPage {
    pub fn new(page: PageRequest, count: u64, suppliers: Vec<Supplier>) -> Self {
        let next = (page.number.saturating_mul(page.size) < count).then_some(page.number + 1);
        let previous = (page.number > 1).then(|| page.number - 1);
        Self {
            count,
            next,
            previous,
            results: suppliers.into_iter().map(SupplierResponse::from).collect(),
        }
    }
}
