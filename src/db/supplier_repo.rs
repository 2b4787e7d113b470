// src/db/supplier_repo.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::supplier::{PageRequest, Supplier, SupplierFilter, SupplierPayload},
};

/// Acesso ao armazenamento de fornecedores.
///
/// Toda operação recebe a entidade dona (`entity_owner`): um fornecedor de outra
/// entidade simplesmente não existe para quem chama.
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn insert(
        &self,
        entity_owner: Uuid,
        fields: &SupplierPayload,
        transient: bool,
    ) -> Result<Supplier, AppError>;

    async fn find_by_id(&self, entity_owner: Uuid, id: Uuid) -> Result<Option<Supplier>, AppError>;

    /// Devolve a página pedida e o total de registros que casam com o filtro.
    async fn list(
        &self,
        entity_owner: Uuid,
        filter: &SupplierFilter,
        page: PageRequest,
    ) -> Result<(Vec<Supplier>, u64), AppError>;

    /// Sobrescreve os campos graváveis. Com `confirm = true` o registro deixa de ser
    /// transiente; com `false` a flag fica como está (nunca volta a `true`).
    async fn update(
        &self,
        entity_owner: Uuid,
        id: Uuid,
        fields: &SupplierPayload,
        confirm: bool,
    ) -> Result<Option<Supplier>, AppError>;

    async fn delete(&self, entity_owner: Uuid, id: Uuid) -> Result<bool, AppError>;
}

const SUPPLIER_COLUMNS: &str = "id, entity_owner, name, email, mobile_phone, address, \
                                transient, created_at, updated_at";

// O repositório Postgres, responsável por todas as interações com a tabela 'suppliers'
#[derive(Clone)]
pub struct PgSupplierRepository {
    pool: PgPool,
}

impl PgSupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Escapa os curingas do LIKE para que o termo seja buscado literalmente.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn push_filters<'a>(
    qb: &mut QueryBuilder<'a, Postgres>,
    entity_owner: Uuid,
    filter: &SupplierFilter,
) {
    qb.push(" WHERE entity_owner = ").push_bind(entity_owner);

    if let Some(ids) = &filter.ids {
        qb.push(" AND id = ANY(").push_bind(ids.clone()).push(")");
    }

    if let Some(term) = &filter.name_contains {
        let op = if filter.case_sensitive { " LIKE " } else { " ILIKE " };
        qb.push(" AND name")
            .push(op)
            .push_bind(format!("%{}%", escape_like(term)))
            .push(" ESCAPE '\\'");
    }
}

#[async_trait]
impl SupplierRepository for PgSupplierRepository {
    async fn insert(
        &self,
        entity_owner: Uuid,
        fields: &SupplierPayload,
        transient: bool,
    ) -> Result<Supplier, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            INSERT INTO suppliers (id, entity_owner, name, email, mobile_phone, address, transient)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SUPPLIER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(entity_owner)
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.mobile_phone)
        .bind(fields.address)
        .bind(transient)
        .fetch_one(&self.pool)
        .await?;

        Ok(supplier)
    }

    async fn find_by_id(&self, entity_owner: Uuid, id: Uuid) -> Result<Option<Supplier>, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = $1 AND entity_owner = $2"
        ))
        .bind(id)
        .bind(entity_owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    async fn list(
        &self,
        entity_owner: Uuid,
        filter: &SupplierFilter,
        page: PageRequest,
    ) -> Result<(Vec<Supplier>, u64), AppError> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM suppliers");
        push_filters(&mut count_qb, entity_owner, filter);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers"));
        push_filters(&mut qb, entity_owner, filter);
        qb.push(" ORDER BY created_at ASC, id ASC LIMIT ")
            .push_bind(page.size as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let suppliers = qb.build_query_as::<Supplier>().fetch_all(&self.pool).await?;

        Ok((suppliers, total.max(0) as u64))
    }

    async fn update(
        &self,
        entity_owner: Uuid,
        id: Uuid,
        fields: &SupplierPayload,
        confirm: bool,
    ) -> Result<Option<Supplier>, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            UPDATE suppliers
            SET name = $3,
                email = $4,
                mobile_phone = $5,
                address = $6,
                transient = transient AND NOT $7,
                updated_at = $8
            WHERE id = $1 AND entity_owner = $2
            RETURNING {SUPPLIER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(entity_owner)
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.mobile_phone)
        .bind(fields.address)
        .bind(confirm)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    async fn delete(&self, entity_owner: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1 AND entity_owner = $2")
            .bind(id)
            .bind(entity_owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
