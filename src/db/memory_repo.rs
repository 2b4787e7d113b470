// src/db/memory_repo.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::supplier_repo::SupplierRepository,
    models::supplier::{PageRequest, Supplier, SupplierFilter, SupplierPayload},
};

/// Repositório em memória: usado quando não há `DATABASE_URL` e nos testes.
#[derive(Default)]
pub struct InMemorySupplierRepository {
    suppliers: RwLock<HashMap<Uuid, Supplier>>,
}

impl InMemorySupplierRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SupplierRepository for InMemorySupplierRepository {
    async fn insert(
        &self,
        entity_owner: Uuid,
        fields: &SupplierPayload,
        transient: bool,
    ) -> Result<Supplier, AppError> {
        let now = Utc::now();
        let supplier = Supplier {
            id: Uuid::new_v4(),
            entity_owner,
            name: fields.name.clone(),
            email: fields.email.clone(),
            mobile_phone: fields.mobile_phone.clone(),
            address: fields.address,
            transient,
            created_at: now,
            updated_at: now,
        };

        self.suppliers
            .write()
            .await
            .insert(supplier.id, supplier.clone());

        Ok(supplier)
    }

    async fn find_by_id(&self, entity_owner: Uuid, id: Uuid) -> Result<Option<Supplier>, AppError> {
        Ok(self
            .suppliers
            .read()
            .await
            .get(&id)
            .filter(|s| s.entity_owner == entity_owner)
            .cloned())
    }

    async fn list(
        &self,
        entity_owner: Uuid,
        filter: &SupplierFilter,
        page: PageRequest,
    ) -> Result<(Vec<Supplier>, u64), AppError> {
        let guard = self.suppliers.read().await;

        let mut matching: Vec<&Supplier> = guard
            .values()
            .filter(|s| s.entity_owner == entity_owner && filter.matches(s))
            .collect();
        matching.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        let total = matching.len() as u64;
        let results = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .cloned()
            .collect();

        Ok((results, total))
    }

    async fn update(
        &self,
        entity_owner: Uuid,
        id: Uuid,
        fields: &SupplierPayload,
        confirm: bool,
    ) -> Result<Option<Supplier>, AppError> {
        let mut guard = self.suppliers.write().await;

        let Some(supplier) = guard.get_mut(&id).filter(|s| s.entity_owner == entity_owner) else {
            return Ok(None);
        };

        supplier.name = fields.name.clone();
        supplier.email = fields.email.clone();
        supplier.mobile_phone = fields.mobile_phone.clone();
        supplier.address = fields.address;
        supplier.transient = supplier.transient && !confirm;
        supplier.updated_at = Utc::now();

        Ok(Some(supplier.clone()))
    }

    async fn delete(&self, entity_owner: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut guard = self.suppliers.write().await;

        let owned = guard
            .get(&id)
            .is_some_and(|s| s.entity_owner == entity_owner);
        if owned {
            guard.remove(&id);
        }

        Ok(owned)
    }
}
