// src/services/revenue_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrgRepository, RevenueRepository},
    models::revenue::{
        AchievedHistoryEntry, CreateRevenuePayload, DecisionStatus, ProposeProgressPayload,
        ResolveProgressPayload, Revenue, RevenueChangeRequest, TargetBranch,
    },
};

// Desfecho de uma decisão sobre solicitação de progresso. Nos dois casos a
// solicitação deixa de existir; só o aceite devolve a receita alterada.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Applied(Revenue),
    Rejected,
}

#[derive(Clone)]
pub struct RevenueService {
    revenues: RevenueRepository,
    org: OrgRepository,
}

impl RevenueService {
    pub fn new(revenues: RevenueRepository, org: OrgRepository) -> Self {
        Self { revenues, org }
    }

    // --- Campanhas ---

    pub async fn create(&self, payload: CreateRevenuePayload) -> Result<Revenue, AppError> {
        if payload.total_target <= Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "totalTarget deve ser maior que zero.".to_owned(),
            ));
        }
        if payload.target_branches.is_empty() {
            return Err(AppError::InvalidInput(
                "Informe ao menos uma filial com meta.".to_owned(),
            ));
        }

        let mut seen: Vec<Uuid> = Vec::with_capacity(payload.target_branches.len());
        for tb in &payload.target_branches {
            if tb.target < Decimal::ZERO {
                return Err(AppError::InvalidInput(
                    "Meta por filial não pode ser negativa.".to_owned(),
                ));
            }
            if seen.contains(&tb.id) {
                return Err(AppError::InvalidInput(
                    "Filial repetida na lista de metas.".to_owned(),
                ));
            }
            seen.push(tb.id);
        }

        let now = Utc::now();
        let revenue = Revenue {
            id: Uuid::new_v4(),
            revenue_name: payload.revenue_name,
            start_date: payload.start_date,
            end_date: payload.end_date,
            total_target: payload.total_target,
            target_branches: payload
                .target_branches
                .into_iter()
                .map(|tb| TargetBranch {
                    branch_id: tb.id,
                    target: tb.target,
                    achieved: Decimal::ZERO,
                    achieved_history: Vec::new(),
                })
                .collect(),
            created_at: now,
            updated_at: now,
        };

        tracing::info!(revenue_id = %revenue.id, "campanha de receita criada");
        Ok(self.revenues.create(revenue).await)
    }

    pub async fn list(&self) -> Vec<Revenue> {
        self.revenues.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Revenue, AppError> {
        self.revenues.find_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.revenues.delete(id).await
    }

    // --- Solicitações de progresso ---

    // Registra a proposta de atualização de `achieved` para decisão
    // posterior; nada na receita muda aqui.
    pub async fn propose(
        &self,
        payload: ProposeProgressPayload,
    ) -> Result<RevenueChangeRequest, AppError> {
        if payload.achieved < Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "O valor atingido não pode ser negativo.".to_owned(),
            ));
        }

        let revenue = self.revenues.find_by_id(payload.revenue_id).await?;
        let user = self
            .org
            .find_user(payload.user_id)
            .await
            .ok_or(AppError::UserNotFound)?;

        let request = RevenueChangeRequest {
            id: Uuid::new_v4(),
            name: user.name,
            target_name: revenue.revenue_name,
            user_id: payload.user_id,
            revenue_id: payload.revenue_id,
            branch_id: payload.branch_id,
            achieved: payload.achieved,
            created_at: Utc::now(),
        };
        Ok(self.revenues.create_request(request).await)
    }

    pub async fn list_requests(&self) -> Vec<RevenueChangeRequest> {
        self.revenues.list_requests().await
    }

    // Decide uma solicitação. O par (receita, filial) fica travado durante
    // todo o read-modify-write; a solicitação só é apagada depois que a
    // receita aceita foi persistida.
    pub async fn resolve(&self, payload: ResolveProgressPayload) -> Result<Resolution, AppError> {
        let decision = DecisionStatus::parse(&payload.status)?;

        if payload.target.is_some_and(|t| t < Decimal::ZERO)
            || payload.achieved.is_some_and(|a| a < Decimal::ZERO)
        {
            return Err(AppError::InvalidInput(
                "Meta e valor atingido não podem ser negativos.".to_owned(),
            ));
        }

        let _guard = self
            .revenues
            .lock_branch(payload.revenue_id, payload.branch_id)
            .await;

        let mut revenue = self.revenues.find_by_id(payload.revenue_id).await?;
        let slot = revenue
            .target_branches
            .iter_mut()
            .find(|tb| tb.branch_id == payload.branch_id)
            .ok_or(AppError::BranchNotInRevenue)?;

        match decision {
            DecisionStatus::Accepted => {
                if let Some(target) = payload.target {
                    slot.target = target;
                }
                // O histórico só cresce quando um novo valor atingido foi
                // informado; aceite apenas de meta não gera entrada.
                if let Some(achieved) = payload.achieved {
                    slot.achieved = achieved;
                    slot.achieved_history.push(AchievedHistoryEntry {
                        value: achieved,
                        date: Utc::now(),
                    });
                }
                revenue.updated_at = Utc::now();

                self.revenues.save(&revenue).await;
                self.revenues.delete_request(payload.request_id).await;
                tracing::info!(
                    revenue_id = %payload.revenue_id,
                    branch_id = %payload.branch_id,
                    "progresso de receita aceito"
                );
                Ok(Resolution::Applied(revenue))
            }
            DecisionStatus::Rejected => {
                self.revenues.delete_request(payload.request_id).await;
                Ok(Resolution::Rejected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::db::store::Db;
    use crate::models::org::User;
    use crate::models::revenue::TargetBranchPayload;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn service(db: &Db) -> RevenueService {
        RevenueService::new(
            RevenueRepository::new(db.clone()),
            OrgRepository::new(db.clone()),
        )
    }

    async fn seed_user(db: &Db, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        db.users
            .save(
                id,
                User {
                    id,
                    name: name.to_owned(),
                    title: "Gerente".into(),
                    department: "Comercial".into(),
                    branch: Uuid::new_v4(),
                    is_admin: true,
                    is_active: true,
                    created_at: Utc::now(),
                },
            )
            .await;
        id
    }

    fn create_payload(branches: Vec<TargetBranchPayload>) -> CreateRevenuePayload {
        CreateRevenuePayload {
            revenue_name: "Meta Anual 2026".into(),
            start_date: Utc::now(),
            end_date: Utc::now() + Duration::days(365),
            total_target: dec("100000"),
            target_branches: branches,
        }
    }

    async fn seed_revenue(svc: &RevenueService, branch_id: Uuid) -> Revenue {
        svc.create(create_payload(vec![TargetBranchPayload {
            id: branch_id,
            target: dec("40000"),
        }]))
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn create_starts_branches_with_zero_progress() {
        let db = Db::new();
        let branch = Uuid::new_v4();
        let revenue = seed_revenue(&service(&db), branch).await;

        assert_eq!(revenue.target_branches.len(), 1);
        let tb = &revenue.target_branches[0];
        assert_eq!(tb.branch_id, branch);
        assert_eq!(tb.target, dec("40000"));
        assert_eq!(tb.achieved, Decimal::ZERO);
        assert!(tb.achieved_history.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_bad_input() {
        let db = Db::new();
        let svc = service(&db);

        let mut p = create_payload(vec![]);
        p.total_target = Decimal::ZERO;
        assert!(matches!(
            svc.create(p).await.unwrap_err(),
            AppError::InvalidInput(_)
        ));

        assert!(matches!(
            svc.create(create_payload(vec![])).await.unwrap_err(),
            AppError::InvalidInput(_)
        ));

        let branch = Uuid::new_v4();
        let duplicated = create_payload(vec![
            TargetBranchPayload {
                id: branch,
                target: dec("10"),
            },
            TargetBranchPayload {
                id: branch,
                target: dec("20"),
            },
        ]);
        assert!(matches!(
            svc.create(duplicated).await.unwrap_err(),
            AppError::InvalidInput(_)
        ));
    }

    #[tokio::test]
    async fn propose_captures_display_names() {
        let db = Db::new();
        let svc = service(&db);
        let branch = Uuid::new_v4();
        let revenue = seed_revenue(&svc, branch).await;
        let user = seed_user(&db, "Ana").await;

        let request = svc
            .propose(ProposeProgressPayload {
                revenue_id: revenue.id,
                branch_id: branch,
                user_id: user,
                achieved: dec("500"),
            })
            .await
            .unwrap();

        assert_eq!(request.name, "Ana");
        assert_eq!(request.target_name, "Meta Anual 2026");
        assert_eq!(request.achieved, dec("500"));
        assert_eq!(svc.list_requests().await.len(), 1);
    }

    #[tokio::test]
    async fn propose_validates_inputs() {
        let db = Db::new();
        let svc = service(&db);
        let branch = Uuid::new_v4();
        let revenue = seed_revenue(&svc, branch).await;
        let user = seed_user(&db, "Ana").await;

        let negative = svc
            .propose(ProposeProgressPayload {
                revenue_id: revenue.id,
                branch_id: branch,
                user_id: user,
                achieved: dec("-1"),
            })
            .await
            .unwrap_err();
        assert!(matches!(negative, AppError::InvalidInput(_)));

        let missing_revenue = svc
            .propose(ProposeProgressPayload {
                revenue_id: Uuid::new_v4(),
                branch_id: branch,
                user_id: user,
                achieved: dec("1"),
            })
            .await
            .unwrap_err();
        assert!(matches!(missing_revenue, AppError::RevenueNotFound));

        let missing_user = svc
            .propose(ProposeProgressPayload {
                revenue_id: revenue.id,
                branch_id: branch,
                user_id: Uuid::new_v4(),
                achieved: dec("1"),
            })
            .await
            .unwrap_err();
        assert!(matches!(missing_user, AppError::UserNotFound));
    }

    async fn pending_request(
        db: &Db,
        svc: &RevenueService,
        revenue: &Revenue,
        branch: Uuid,
        achieved: &str,
    ) -> RevenueChangeRequest {
        let user = seed_user(db, "Ana").await;
        svc.propose(ProposeProgressPayload {
            revenue_id: revenue.id,
            branch_id: branch,
            user_id: user,
            achieved: dec(achieved),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn accept_applies_progress_and_records_history() {
        let db = Db::new();
        let svc = service(&db);
        let branch = Uuid::new_v4();
        let revenue = seed_revenue(&svc, branch).await;
        let request = pending_request(&db, &svc, &revenue, branch, "500").await;

        let outcome = svc
            .resolve(ResolveProgressPayload {
                request_id: request.id,
                revenue_id: revenue.id,
                branch_id: branch,
                status: "accepted".into(),
                target: None,
                achieved: Some(dec("500")),
            })
            .await
            .unwrap();

        let updated = match outcome {
            Resolution::Applied(r) => r,
            Resolution::Rejected => panic!("esperava aceite"),
        };
        let tb = &updated.target_branches[0];
        assert_eq!(tb.achieved, dec("500"));
        assert_eq!(tb.target, dec("40000"));
        assert_eq!(tb.achieved_history.len(), 1);
        assert_eq!(tb.achieved_history[0].value, dec("500"));
        assert!(svc.list_requests().await.is_empty());

        // A versão persistida bate com a retornada.
        let stored = svc.get(revenue.id).await.unwrap();
        assert_eq!(stored.target_branches[0].achieved, dec("500"));
    }

    #[tokio::test]
    async fn target_only_accept_leaves_history_untouched() {
        let db = Db::new();
        let svc = service(&db);
        let branch = Uuid::new_v4();
        let revenue = seed_revenue(&svc, branch).await;
        let request = pending_request(&db, &svc, &revenue, branch, "500").await;

        let outcome = svc
            .resolve(ResolveProgressPayload {
                request_id: request.id,
                revenue_id: revenue.id,
                branch_id: branch,
                status: "accepted".into(),
                target: Some(dec("50000")),
                achieved: None,
            })
            .await
            .unwrap();

        let updated = match outcome {
            Resolution::Applied(r) => r,
            Resolution::Rejected => panic!("esperava aceite"),
        };
        let tb = &updated.target_branches[0];
        assert_eq!(tb.target, dec("50000"));
        assert_eq!(tb.achieved, Decimal::ZERO);
        assert!(tb.achieved_history.is_empty());
        assert!(svc.list_requests().await.is_empty());
    }

    #[tokio::test]
    async fn reject_only_discards_the_request() {
        let db = Db::new();
        let svc = service(&db);
        let branch = Uuid::new_v4();
        let revenue = seed_revenue(&svc, branch).await;
        let request = pending_request(&db, &svc, &revenue, branch, "500").await;

        let outcome = svc
            .resolve(ResolveProgressPayload {
                request_id: request.id,
                revenue_id: revenue.id,
                branch_id: branch,
                status: "rejected".into(),
                target: Some(dec("99999")),
                achieved: Some(dec("99999")),
            })
            .await
            .unwrap();
        assert_eq!(outcome, Resolution::Rejected);
        assert!(svc.list_requests().await.is_empty());

        let stored = svc.get(revenue.id).await.unwrap();
        let tb = &stored.target_branches[0];
        assert_eq!(tb.target, dec("40000"));
        assert_eq!(tb.achieved, Decimal::ZERO);
        assert!(tb.achieved_history.is_empty());
    }

    #[tokio::test]
    async fn resolve_rejects_unknown_status_and_bad_targets() {
        let db = Db::new();
        let svc = service(&db);
        let branch = Uuid::new_v4();
        let revenue = seed_revenue(&svc, branch).await;
        let request = pending_request(&db, &svc, &revenue, branch, "500").await;

        let err = svc
            .resolve(ResolveProgressPayload {
                request_id: request.id,
                revenue_id: revenue.id,
                branch_id: branch,
                status: "maybe".into(),
                target: None,
                achieved: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(_)));

        let err = svc
            .resolve(ResolveProgressPayload {
                request_id: request.id,
                revenue_id: revenue.id,
                branch_id: branch,
                status: "accepted".into(),
                target: Some(dec("-1")),
                achieved: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        // A solicitação sobrevive aos dois erros.
        assert_eq!(svc.list_requests().await.len(), 1);
    }

    #[tokio::test]
    async fn resolve_requires_branch_in_revenue() {
        let db = Db::new();
        let svc = service(&db);
        let branch = Uuid::new_v4();
        let revenue = seed_revenue(&svc, branch).await;
        let request = pending_request(&db, &svc, &revenue, branch, "500").await;

        let err = svc
            .resolve(ResolveProgressPayload {
                request_id: request.id,
                revenue_id: revenue.id,
                branch_id: Uuid::new_v4(),
                status: "accepted".into(),
                target: None,
                achieved: Some(dec("500")),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BranchNotInRevenue));
    }

    #[tokio::test]
    async fn concurrent_accepts_keep_every_history_entry() {
        let db = Db::new();
        let svc = service(&db);
        let branch = Uuid::new_v4();
        let revenue = seed_revenue(&svc, branch).await;
        let first = pending_request(&db, &svc, &revenue, branch, "100").await;
        let second = pending_request(&db, &svc, &revenue, branch, "200").await;

        let a = svc.clone();
        let b = svc.clone();
        let (ra, rb) = tokio::join!(
            a.resolve(ResolveProgressPayload {
                request_id: first.id,
                revenue_id: revenue.id,
                branch_id: branch,
                status: "accepted".into(),
                target: None,
                achieved: Some(dec("100")),
            }),
            b.resolve(ResolveProgressPayload {
                request_id: second.id,
                revenue_id: revenue.id,
                branch_id: branch,
                status: "accepted".into(),
                target: None,
                achieved: Some(dec("200")),
            }),
        );
        ra.unwrap();
        rb.unwrap();

        let stored = svc.get(revenue.id).await.unwrap();
        assert_eq!(stored.target_branches[0].achieved_history.len(), 2);
        assert!(svc.list_requests().await.is_empty());
    }
}
