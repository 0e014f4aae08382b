use axum::{
    Extension, Json,
    extract::{Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    api::ApiError,
    info,
    management::ServiceDirectory,
    types::{RegisterServiceRequest, ServiceDescriptor},
    warning,
};

#[derive(Clone)]
pub struct RegistryState {
    pub directory: ServiceDirectory,
    pub instance: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegistrySearchParams {
    pub q: Option<String>,
}

/// `GET /`
pub async fn status(Extension(state): Extension<RegistryState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "instance": state.instance,
        "serviceCount": state.directory.len().await,
    }))
}

/// `POST /services/register`
///
/// Answers 201 for a new id and 200 when an existing descriptor is updated.
/// A missing or malformed body is treated as an empty object, so it fails
/// field validation with 400 like any incomplete registration.
pub async fn register(
    Extension(state): Extension<RegistryState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = match payload {
        Ok(Json(body)) => request_from_json(&body),
        Err(rejection) => {
            warning!("Rejected registration body: {}", rejection.body_text());
            RegisterServiceRequest::default()
        }
    };

    let registration = state.directory.register(request).await?;
    let service = registration.service;

    let code = if registration.created {
        info!("Registered service {} ({})", service.id, service.url);
        StatusCode::CREATED
    } else {
        info!("Updated service {} ({})", service.id, service.url);
        StatusCode::OK
    };

    Ok((code, Json(service)).into_response())
}

/// Reads the descriptor fields from a JSON body.
///
/// Numbers and booleans are stored as their JSON text (`7` becomes `"7"`);
/// null, arrays and objects count as missing.
fn request_from_json(body: &Value) -> RegisterServiceRequest {
    let field = |key: &str| match body.get(key)? {
        Value::String(s) => Some(s.clone()),
        v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
        _ => None,
    };

    RegisterServiceRequest {
        id: field("id"),
        name: field("name"),
        description: field("description"),
        url: field("url"),
    }
}

/// `GET /services`
pub async fn list(Extension(state): Extension<RegistryState>) -> Json<Vec<ServiceDescriptor>> {
    Json(state.directory.list().await)
}

/// `GET /services/search?q=`
pub async fn search(
    Query(params): Query<RegistrySearchParams>,
    Extension(state): Extension<RegistryState>,
) -> Json<Vec<ServiceDescriptor>> {
    let query = params.q.unwrap_or_default();
    Json(state.directory.search(&query).await)
}

/// `DELETE /services/{id}`
pub async fn remove(
    Path(id): Path<String>,
    Extension(state): Extension<RegistryState>,
) -> Result<StatusCode, ApiError> {
    match state.directory.remove(&id).await {
        Some(_) => {
            info!("Removed service {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::not_found("Service not found")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_json_stringifies_scalars() {
        let request = request_from_json(&json!({
            "id": 7,
            "name": "metrics",
            "description": null,
            "url": "http://localhost:9000",
        }));

        assert_eq!(request.id.as_deref(), Some("7"));
        assert_eq!(request.name.as_deref(), Some("metrics"));
        assert_eq!(request.description, None);
        assert_eq!(request.url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_request_from_json_ignores_non_objects() {
        let request = request_from_json(&json!(["id", "name", "url"]));
        assert!(request.id.is_none() && request.name.is_none() && request.url.is_none());

        let request = request_from_json(&json!({ "id": { "nested": true }, "name": "n" }));
        assert_eq!(request.id, None);
    }
}
