// src/db/revenue_repo.rs

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::Db,
    models::revenue::{Revenue, RevenueChangeRequest},
};

#[derive(Clone)]
pub struct RevenueRepository {
    db: Db,
    // Serializa o read-modify-write de `resolve` por (receita, filial);
    // sem isso duas decisões simultâneas perdem atualização de `achieved`
    // ou derrubam entrada do histórico.
    branch_locks: Arc<Mutex<HashMap<(Uuid, Uuid), Arc<Mutex<()>>>>>,
}

impl RevenueRepository {
    pub fn new(db: Db) -> Self {
        Self {
            db,
            branch_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn lock_branch(&self, revenue_id: Uuid, branch_id: Uuid) -> OwnedMutexGuard<()> {
        let entry = {
            let mut locks = self.branch_locks.lock().await;
            locks
                .entry((revenue_id, branch_id))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        entry.lock_owned().await
    }

    // --- Receitas ---

    pub async fn create(&self, revenue: Revenue) -> Revenue {
        self.db.revenues.save(revenue.id, revenue.clone()).await;
        revenue
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Revenue, AppError> {
        self.db
            .revenues
            .find_by_id(id)
            .await
            .ok_or(AppError::RevenueNotFound)
    }

    pub async fn list(&self) -> Vec<Revenue> {
        let mut revenues = self.db.revenues.all().await;
        revenues.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        revenues
    }

    pub async fn save(&self, revenue: &Revenue) {
        self.db.revenues.save(revenue.id, revenue.clone()).await;
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.db.revenues.delete(id).await {
            Ok(())
        } else {
            Err(AppError::RevenueNotFound)
        }
    }

    // --- Solicitações de progresso ---

    pub async fn create_request(&self, request: RevenueChangeRequest) -> RevenueChangeRequest {
        self.db
            .progress_requests
            .save(request.id, request.clone())
            .await;
        request
    }

    pub async fn list_requests(&self) -> Vec<RevenueChangeRequest> {
        let mut requests = self.db.progress_requests.all().await;
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        requests
    }

    pub async fn delete_request(&self, id: Uuid) -> bool {
        self.db.progress_requests.delete(id).await
    }
}
