// handlers/person.rs - Person CRUD handlers shared by /v1 and /v2

use axum::extract::{rejection::PathRejection, Path, State};

use crate::database::PersonPayload;
use crate::error::ApiError;
use crate::extractors::JsonBody;
use crate::middleware::{ApiResponse, ApiResult, Envelope};
use crate::state::AppState;

/// GET /{version} - list all persons
pub async fn list(State(state): State<AppState>) -> ApiResult {
    let persons = state.store.list().await?;

    Ok(ApiResponse::success(
        Envelope::message("Get All Person Data Success").with_data(persons),
    ))
}

/// POST /{version}/insert - create a person and return the stored row
pub async fn insert(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<PersonPayload>,
) -> ApiResult {
    let person = state.store.insert(payload).await?;
    tracing::info!("Inserted person {}", person.id);

    Ok(ApiResponse::success(
        Envelope::message("Insert Success").with_data(vec![person]),
    ))
}

/// PUT /{version}/update/:id - replace name, sex and country of a person
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<JsonBody<PersonPayload>, ApiError>,
) -> ApiResult {
    let Path(id) = id?;
    let JsonBody(payload) = body?;

    let person = state.store.update(payload, id).await?;

    Ok(ApiResponse::success(
        Envelope::message("Update Success").with_data(vec![person]),
    ))
}

/// DELETE /{version}/delete/:id - remove a person; absent ids succeed
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult {
    let Path(id) = id?;

    state.store.delete(id).await?;

    Ok(ApiResponse::success(Envelope::message("Delete Success")))
}
