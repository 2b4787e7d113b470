// src/services/supplier_service.rs

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::SupplierRepository,
    models::supplier::{
        PageRequest, Supplier, SupplierFilter, SupplierListQuery, SupplierPage,
        SupplierPatchPayload, SupplierPayload,
    },
};

#[derive(Clone)]
pub struct SupplierService {
    repo: Arc<dyn SupplierRepository>,
    page_size: u64,
    query_case_sensitive: bool,
}

impl SupplierService {
    pub fn new(repo: Arc<dyn SupplierRepository>, page_size: u64, query_case_sensitive: bool) -> Self {
        Self {
            repo,
            page_size,
            query_case_sensitive,
        }
    }

    // =========================================================================
    //  1. CRIAÇÃO
    // =========================================================================

    /// Criação "crua": só a entidade dona, registro transiente.
    pub async fn create_bare(&self, entity_id: Uuid) -> Result<Supplier, AppError> {
        let supplier = self
            .repo
            .insert(entity_id, &SupplierPayload::default(), true)
            .await?;

        tracing::info!(supplier_id = %supplier.id, entity_id = %entity_id, "Fornecedor transiente criado");
        Ok(supplier)
    }

    /// Criação com dados: qualquer campo informado confirma o fornecedor.
    /// Sem campos, cai na mesma regra da criação crua.
    pub async fn create(
        &self,
        entity_id: Uuid,
        payload: Option<SupplierPayload>,
    ) -> Result<Supplier, AppError> {
        let payload = payload.unwrap_or_default();
        payload.validate()?;

        let transient = payload.is_empty();
        let supplier = self.repo.insert(entity_id, &payload, transient).await?;

        tracing::info!(
            supplier_id = %supplier.id,
            entity_id = %entity_id,
            transient,
            "Fornecedor criado"
        );
        Ok(supplier)
    }

    // =========================================================================
    //  2. CONSULTA
    // =========================================================================

    pub async fn get(&self, entity_id: Uuid, id: Uuid) -> Result<Supplier, AppError> {
        self.repo
            .find_by_id(entity_id, id)
            .await?
            .ok_or(AppError::SupplierNotFound)
    }

    pub async fn list(
        &self,
        entity_id: Uuid,
        query: &SupplierListQuery,
    ) -> Result<SupplierPage, AppError> {
        let filter = SupplierFilter::from_query(query, self.query_case_sensitive)?;
        let page = PageRequest::parse(query.page.as_deref(), self.page_size)?;

        let (suppliers, count) = self.repo.list(entity_id, &filter, page).await?;

        // A primeira página sempre existe, mesmo vazia.
        if page.number > 1 && page.offset() >= count {
            return Err(AppError::InvalidPage);
        }

        Ok(SupplierPage::new(page, count, suppliers))
    }

    // =========================================================================
    //  3. ATUALIZAÇÃO
    // =========================================================================

    /// PUT: substitui todos os campos graváveis e confirma o fornecedor.
    pub async fn replace(
        &self,
        entity_id: Uuid,
        id: Uuid,
        payload: Option<SupplierPayload>,
    ) -> Result<Supplier, AppError> {
        let payload = payload.unwrap_or_default();
        payload.validate()?;

        let supplier = self
            .repo
            .update(entity_id, id, &payload, true)
            .await?
            .ok_or(AppError::SupplierNotFound)?;

        tracing::info!(supplier_id = %supplier.id, "Fornecedor substituído e confirmado");
        Ok(supplier)
    }

    /// PATCH: altera só o que veio; `transient` fica como está.
    pub async fn patch(
        &self,
        entity_id: Uuid,
        id: Uuid,
        patch: Option<SupplierPatchPayload>,
    ) -> Result<Supplier, AppError> {
        let current = self.get(entity_id, id).await?;

        let merged = patch.unwrap_or_default().merge_into(&current);
        merged.validate()?;

        let supplier = self
            .repo
            .update(entity_id, id, &merged, false)
            .await?
            .ok_or(AppError::SupplierNotFound)?;

        tracing::info!(supplier_id = %supplier.id, "Fornecedor atualizado parcialmente");
        Ok(supplier)
    }

    // =========================================================================
    //  4. REMOÇÃO
    // =========================================================================

    pub async fn delete(&self, entity_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(entity_id, id).await? {
            return Err(AppError::SupplierNotFound);
        }

        tracing::info!(supplier_id = %id, "Fornecedor removido");
        Ok(())
    }
}
