// src/services/kpi_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrgRepository,
    models::kpi::{CreateKpiPayload, Kpi, UpdateKpiPayload},
};

#[derive(Clone)]
pub struct KpiService {
    org: OrgRepository,
}

impl KpiService {
    pub fn new(org: OrgRepository) -> Self {
        Self { org }
    }

    pub async fn create(&self, payload: CreateKpiPayload) -> Result<Kpi, AppError> {
        if payload.weight_value < Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "O peso do KPI não pode ser negativo.".to_owned(),
            ));
        }
        self.org
            .find_branch(payload.branch_id)
            .await
            .ok_or(AppError::BranchNotFound)?;
        if self
            .org
            .kpi_name_taken(&payload.name, payload.branch_id, None)
            .await
        {
            return Err(AppError::KpiAlreadyExists);
        }

        let now = Utc::now();
        let kpi = Kpi {
            id: Uuid::new_v4(),
            name: payload.name,
            kind: payload.kind,
            branch: payload.branch_id,
            weight_value: payload.weight_value,
            created_at: now,
            updated_at: now,
        };
        self.org.save_kpi(&kpi).await;
        tracing::info!(kpi_id = %kpi.id, branch_id = %kpi.branch, "KPI criado");
        Ok(kpi)
    }

    pub async fn list_for_branch(&self, branch_id: Uuid) -> Vec<Kpi> {
        self.org.list_kpis_for_branch(branch_id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Kpi, AppError> {
        self.org.find_kpi(id).await
    }

    pub async fn update(&self, id: Uuid, payload: UpdateKpiPayload) -> Result<Kpi, AppError> {
        let mut kpi = self.org.find_kpi(id).await?;

        if let Some(name) = payload.name {
            // A unicidade (nome, filial) vale também na renomeação.
            if name != kpi.name && self.org.kpi_name_taken(&name, kpi.branch, Some(id)).await {
                return Err(AppError::KpiAlreadyExists);
            }
            kpi.name = name;
        }
        if let Some(kind) = payload.kind {
            kpi.kind = kind;
        }
        if let Some(weight) = payload.weight_value {
            if weight < Decimal::ZERO {
                return Err(AppError::InvalidInput(
                    "O peso do KPI não pode ser negativo.".to_owned(),
                ));
            }
            kpi.weight_value = weight;
        }

        kpi.updated_at = Utc::now();
        self.org.save_kpi(&kpi).await;
        Ok(kpi)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.org.delete_kpi(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::db::store::Db;
    use crate::models::kpi::KpiKind;
    use crate::models::org::Branch;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn service(db: &Db) -> KpiService {
        KpiService::new(OrgRepository::new(db.clone()))
    }

    async fn seed_branch(db: &Db) -> Uuid {
        let id = Uuid::new_v4();
        db.branches
            .save(
                id,
                Branch {
                    id,
                    name: "Filial Centro".into(),
                    description: None,
                    revenue_target: Decimal::ZERO,
                    revenue_achieved: Decimal::ZERO,
                    created_at: Utc::now(),
                },
            )
            .await;
        id
    }

    fn payload(branch_id: Uuid, name: &str) -> CreateKpiPayload {
        CreateKpiPayload {
            name: name.to_owned(),
            kind: KpiKind::Metric,
            branch_id,
            weight_value: dec("0.10"),
        }
    }

    #[tokio::test]
    async fn create_requires_existing_branch() {
        let db = Db::new();
        let err = service(&db)
            .create(payload(Uuid::new_v4(), "Vendas"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BranchNotFound));
    }

    #[tokio::test]
    async fn name_is_unique_per_branch() {
        let db = Db::new();
        let svc = service(&db);
        let branch = seed_branch(&db).await;
        let other = seed_branch(&db).await;

        svc.create(payload(branch, "Vendas")).await.unwrap();

        let err = svc.create(payload(branch, "Vendas")).await.unwrap_err();
        assert!(matches!(err, AppError::KpiAlreadyExists));

        // Mesmo nome em outra filial é permitido.
        svc.create(payload(other, "Vendas")).await.unwrap();
    }

    #[tokio::test]
    async fn negative_weight_is_rejected() {
        let db = Db::new();
        let svc = service(&db);
        let branch = seed_branch(&db).await;

        let mut p = payload(branch, "Vendas");
        p.weight_value = dec("-0.10");
        assert!(matches!(
            svc.create(p).await.unwrap_err(),
            AppError::InvalidInput(_)
        ));

        let kpi = svc.create(payload(branch, "Vendas")).await.unwrap();
        let err = svc
            .update(
                kpi.id,
                UpdateKpiPayload {
                    name: None,
                    kind: None,
                    weight_value: Some(dec("-1")),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn rename_respects_uniqueness_but_allows_same_name() {
        let db = Db::new();
        let svc = service(&db);
        let branch = seed_branch(&db).await;

        let vendas = svc.create(payload(branch, "Vendas")).await.unwrap();
        svc.create(payload(branch, "Cobertura")).await.unwrap();

        let err = svc
            .update(
                vendas.id,
                UpdateKpiPayload {
                    name: Some("Cobertura".into()),
                    kind: None,
                    weight_value: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::KpiAlreadyExists));

        // Reenviar o próprio nome não conflita.
        let same = svc
            .update(
                vendas.id,
                UpdateKpiPayload {
                    name: Some("Vendas".into()),
                    kind: Some(KpiKind::Percentage),
                    weight_value: Some(dec("0.25")),
                },
            )
            .await
            .unwrap();
        assert_eq!(same.name, "Vendas");
        assert_eq!(same.kind, KpiKind::Percentage);
        assert_eq!(same.weight_value, dec("0.25"));
    }

    #[tokio::test]
    async fn list_is_scoped_and_sorted_by_name() {
        let db = Db::new();
        let svc = service(&db);
        let branch = seed_branch(&db).await;
        let other = seed_branch(&db).await;

        svc.create(payload(branch, "Vendas")).await.unwrap();
        svc.create(payload(branch, "Cobertura")).await.unwrap();
        svc.create(payload(other, "Alheio")).await.unwrap();

        let kpis = svc.list_for_branch(branch).await;
        let names: Vec<&str> = kpis.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["Cobertura", "Vendas"]);
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let db = Db::new();
        let svc = service(&db);
        let branch = seed_branch(&db).await;
        let kpi = svc.create(payload(branch, "Vendas")).await.unwrap();

        svc.delete(kpi.id).await.unwrap();
        assert!(matches!(
            svc.get(kpi.id).await.unwrap_err(),
            AppError::KpiNotFound
        ));
        assert!(matches!(
            svc.delete(kpi.id).await.unwrap_err(),
            AppError::KpiNotFound
        ));
    }
}
