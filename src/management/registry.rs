use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::types::{RegisterServiceRequest, ServiceDescriptor};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Missing required fields: id, name, url")]
    MissingFields,
}

/// Outcome of a registration: the stored descriptor and whether it was new.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub service: ServiceDescriptor,
    pub created: bool,
}

/// In-memory directory of service descriptors keyed by id.
///
/// Cloning is cheap and every clone sees the same entries. Concurrent
/// registrations of the same id are last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct ServiceDirectory {
    services: Arc<RwLock<HashMap<String, ServiceDescriptor>>>,
}

impl ServiceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(
        &self,
        request: RegisterServiceRequest,
    ) -> Result<Registration, RegistryError> {
        self.register_at(request, Utc::now()).await
    }

    /// Inserts or updates a descriptor, stamping it with `now`.
    ///
    /// An existing id keeps its `created_at`; `updated_at` is always `now`.
    pub async fn register_at(
        &self,
        request: RegisterServiceRequest,
        now: DateTime<Utc>,
    ) -> Result<Registration, RegistryError> {
        let (Some(id), Some(name), Some(url)) = (
            non_blank(request.id),
            non_blank(request.name),
            non_blank(request.url),
        ) else {
            return Err(RegistryError::MissingFields);
        };

        let now = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut services = self.services.write().await;
        let existing = services.get(&id).map(|s| s.created_at.clone());
        let created = existing.is_none();

        let service = ServiceDescriptor {
            id: id.clone(),
            name,
            description: request.description.unwrap_or_default(),
            url,
            created_at: existing.unwrap_or_else(|| now.clone()),
            updated_at: now,
        };
        services.insert(id, service.clone());

        Ok(Registration { service, created })
    }

    /// All descriptors, sorted by name (case-insensitive).
    pub async fn list(&self) -> Vec<ServiceDescriptor> {
        let services = self.services.read().await;
        let mut all: Vec<ServiceDescriptor> = services.values().cloned().collect();
        sort_by_name(&mut all);
        all
    }

    /// Descriptors whose id, name, description or url contain `query`,
    /// ignoring case. A blank query matches everything.
    pub async fn search(&self, query: &str) -> Vec<ServiceDescriptor> {
        let needle = query.trim().to_lowercase();
        let mut results = self.list().await;

        if !needle.is_empty() {
            results.retain(|svc| {
                format!("{} {} {} {}", svc.id, svc.name, svc.description, svc.url)
                    .to_lowercase()
                    .contains(&needle)
            });
        }

        results
    }

    pub async fn get(&self, id: &str) -> Option<ServiceDescriptor> {
        self.services.read().await.get(id).cloned()
    }

    /// Removes a descriptor, returning it if it existed.
    pub async fn remove(&self, id: &str) -> Option<ServiceDescriptor> {
        self.services.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.services.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.services.read().await.is_empty()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn sort_by_name(services: &mut [ServiceDescriptor]) {
    services.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}
