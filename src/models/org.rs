// src/models/org.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Cadastros organizacionais. O CRUD deles pertence a outro serviço; aqui
// só consumimos os registros para resolver nomes, departamentos e filiais.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: Uuid,
    #[schema(example = "Filial Centro")]
    pub name: String,
    pub description: Option<String>,
    pub revenue_target: Decimal,
    pub revenue_achieved: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: Uuid,
    #[schema(example = "Comercial")]
    pub name: String,
    pub description: Option<String>,
    pub branch: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[schema(example = "Analista de Vendas")]
    pub title: String,
    pub department: String,
    pub branch: Uuid,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
