// src/db/org_repo.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::Db,
    models::kpi::Kpi,
    models::org::{Branch, Department, User},
};

// Consultas aos cadastros organizacionais (usuários, filiais,
// departamentos e KPIs). O CRUD de filial/departamento mora em outro
// serviço; o de KPI é nosso.
#[derive(Clone)]
pub struct OrgRepository {
    db: Db,
}

impl OrgRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    // --- Usuários ---

    pub async fn find_user(&self, id: Uuid) -> Option<User> {
        self.db.users.find_by_id(id).await
    }

    pub async fn users_by_id(&self) -> HashMap<Uuid, User> {
        self.db
            .users
            .all()
            .await
            .into_iter()
            .map(|u| (u.id, u))
            .collect()
    }

    pub async fn recent_active_users(&self, limit: usize) -> Vec<User> {
        let mut users = self.db.users.find(|u| u.is_active).await;
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        users.truncate(limit);
        users
    }

    // --- Filiais e departamentos ---

    pub async fn find_branch(&self, id: Uuid) -> Option<Branch> {
        self.db.branches.find_by_id(id).await
    }

    pub async fn list_departments(&self) -> Vec<Department> {
        let mut departments = self.db.departments.all().await;
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        departments
    }

    // --- KPIs ---

    pub async fn find_kpi(&self, id: Uuid) -> Result<Kpi, AppError> {
        self.db
            .kpis
            .find_by_id(id)
            .await
            .ok_or(AppError::KpiNotFound)
    }

    pub async fn kpis_by_id(&self) -> HashMap<Uuid, Kpi> {
        self.db
            .kpis
            .all()
            .await
            .into_iter()
            .map(|k| (k.id, k))
            .collect()
    }

    pub async fn list_kpis_for_branch(&self, branch_id: Uuid) -> Vec<Kpi> {
        let mut kpis = self.db.kpis.find(|k| k.branch == branch_id).await;
        kpis.sort_by(|a, b| a.name.cmp(&b.name));
        kpis
    }

    // (nome, filial) é único entre os KPIs.
    pub async fn kpi_name_taken(&self, name: &str, branch_id: Uuid, except: Option<Uuid>) -> bool {
        !self
            .db
            .kpis
            .find(|k| k.name == name && k.branch == branch_id && Some(k.id) != except)
            .await
            .is_empty()
    }

    pub async fn save_kpi(&self, kpi: &Kpi) {
        self.db.kpis.save(kpi.id, kpi.clone()).await;
    }

    pub async fn delete_kpi(&self, id: Uuid) -> Result<(), AppError> {
        if self.db.kpis.delete(id).await {
            Ok(())
        } else {
            Err(AppError::KpiNotFound)
        }
    }
}
