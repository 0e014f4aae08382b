use reqwest::Client;
use tabled::Table;

use crate::{
    config, error, info,
    types::{ServiceDescriptor, ServiceTableRow},
};

/// Prints the registry's services as a table.
///
/// Uses `REGISTRY_URL` when set, otherwise the local registry address.
pub async fn services(search: Option<String>) {
    let base = config::registry_url()
        .unwrap_or_else(|| format!("http://{}", config::registry_addr()));

    let services = match fetch_services(&base, search.as_deref().unwrap_or("")).await {
        Ok(s) => s,
        Err(e) => error!("Cannot reach service registry at {}. Err: {}", base, e),
    };

    if services.is_empty() {
        info!("No services registered");
        return;
    }

    let rows: Vec<ServiceTableRow> = services.into_iter().map(ServiceTableRow::from).collect();
    println!("{}", Table::new(rows));
}

async fn fetch_services(base: &str, query: &str) -> Result<Vec<ServiceDescriptor>, reqwest::Error> {
    Client::new()
        .get(format!("{}/services/search", base))
        .query(&[("q", query)])
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<ServiceDescriptor>>()
        .await
}

impl From<ServiceDescriptor> for ServiceTableRow {
    fn from(service: ServiceDescriptor) -> Self {
        ServiceTableRow {
            id: service.id,
            name: service.name,
            url: service.url,
            updated: service.updated_at,
        }
    }
}
