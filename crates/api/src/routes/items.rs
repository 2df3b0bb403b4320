//! Item route handlers: list, create, update, delete.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use curio_core::ItemId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{Item, ItemPatch};
use crate::services::items::{ItemPage, ItemService, ListParams};
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================

/// Listing query parameters.
///
/// `page` and `limit` are received as raw strings: anything that fails to
/// parse as a positive integer silently falls back to its default inside
/// the service, instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

/// Creation body; the service requires all four fields non-empty.
#[derive(Debug, Deserialize)]
pub struct CreateItemBody {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Update body; any subset of the four fields.
#[derive(Debug, Deserialize)]
pub struct UpdateItemBody {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle `GET /items`.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<ItemPage>> {
    let page = ItemService::new(state.store()).list(
        &identity,
        ListParams {
            page: query.page,
            limit: query.limit,
            search: query.search,
        },
    );

    Ok(Json(page))
}

/// Handle `POST /items`.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Json(body): Json<CreateItemBody>,
) -> Result<impl IntoResponse> {
    let item = ItemService::new(state.store()).create(
        &identity,
        ItemPatch {
            title: body.title,
            subtitle: body.subtitle,
            description: body.description,
            category: body.category,
        },
    )?;

    tracing::debug!(id = %item.id, owner = %item.owner_email, "item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handle `PUT /items/{id}`: partial merge of the supplied fields.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Path(id): Path<i64>,
    Json(body): Json<UpdateItemBody>,
) -> Result<Json<Item>> {
    let item = ItemService::new(state.store()).update(
        &identity,
        ItemId::new(id),
        ItemPatch {
            title: body.title,
            subtitle: body.subtitle,
            description: body.description,
            category: body.category,
        },
    )?;

    Ok(Json(item))
}

/// Handle `DELETE /items/{id}`: empty 204 on success.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    ItemService::new(state.store()).delete(&identity, ItemId::new(id))?;

    Ok(StatusCode::NO_CONTENT)
}
