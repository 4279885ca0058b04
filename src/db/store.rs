// src/db/store.rs

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::kpi::Kpi;
use crate::models::org::{Branch, Department, User};
use crate::models::revenue::{Revenue, RevenueChangeRequest};
use crate::models::task::Task;

// Contrato genérico de armazenamento consumido pelos repositórios:
// busca por id, busca por filtro, criação, gravação e remoção. A
// persistência real é colaborador externo; aqui um mapa protegido por
// RwLock cumpre o mesmo contrato para o motor e para os testes.
#[derive(Clone)]
pub struct Collection<T> {
    inner: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone> Collection<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<T> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn find<F>(&self, filter: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.inner
            .read()
            .await
            .values()
            .filter(|doc| filter(doc))
            .cloned()
            .collect()
    }

    pub async fn all(&self) -> Vec<T> {
        self.inner.read().await.values().cloned().collect()
    }

    // Criação e gravação têm a mesma mecânica de upsert; os repositórios
    // decidem qual semântica expõem.
    pub async fn save(&self, id: Uuid, doc: T) {
        self.inner.write().await.insert(id, doc);
    }

    pub async fn delete(&self, id: Uuid) -> bool {
        self.inner.write().await.remove(&id).is_some()
    }

    pub async fn update_each<F>(&self, mut apply: F)
    where
        F: FnMut(&mut T),
    {
        for doc in self.inner.write().await.values_mut() {
            apply(doc);
        }
    }

    pub async fn retain<F>(&self, keep: F)
    where
        F: Fn(&T) -> bool,
    {
        self.inner.write().await.retain(|_, doc| keep(doc));
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Agrupa as coleções que o motor consome.
#[derive(Clone)]
pub struct Db {
    pub tasks: Collection<Task>,
    pub users: Collection<User>,
    pub branches: Collection<Branch>,
    pub departments: Collection<Department>,
    pub kpis: Collection<Kpi>,
    pub revenues: Collection<Revenue>,
    pub progress_requests: Collection<RevenueChangeRequest>,
}

impl Db {
    pub fn new() -> Self {
        Self {
            tasks: Collection::new(),
            users: Collection::new(),
            branches: Collection::new(),
            departments: Collection::new(),
            kpis: Collection::new(),
            revenues: Collection::new(),
            progress_requests: Collection::new(),
        }
    }
}

impl Default for Db {
    fn default() -> Self {
        Self::new()
    }
}
