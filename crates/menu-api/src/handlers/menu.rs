// ============================================================================
// Menu API - Menu Handlers
// File: crates/menu-api/src/handlers/menu.rs
// ============================================================================
//! Menu tree HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use menu_core::domain::MenuTree;
use validator::Validate;

use crate::dto::{parse_menu_id, CreateMenuRequest, DepthQuery, UpdateMenuRequest};
use crate::error::ApiError;
use crate::state::AppState;

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Create handler - POST /api/menus
pub async fn create_menu(
    State(state): State<AppState>,
    payload: Result<Json<CreateMenuRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuTree>), ApiError> {
    let request = json_body(payload)?;
    request.validate()?;

    let created = state.menu_service.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List handler - GET /api/menus
pub async fn list_menus(
    State(state): State<AppState>,
    Query(query): Query<DepthQuery>,
) -> Result<Json<Vec<MenuTree>>, ApiError> {
    let menus = state.menu_service.list_all(query.levels()?).await?;
    Ok(Json(menus))
}

/// Hierarchy handler - GET /api/menus/hierarchy
pub async fn get_hierarchy(
    State(state): State<AppState>,
    Query(query): Query<DepthQuery>,
) -> Result<Json<Vec<MenuTree>>, ApiError> {
    let roots = state.menu_service.get_hierarchy(query.levels()?).await?;
    Ok(Json(roots))
}

/// Detail handler - GET /api/menus/{id}
///
/// `?depth=N` switches to the bounded-depth projection.
pub async fn get_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DepthQuery>,
) -> Result<Json<MenuTree>, ApiError> {
    let id = parse_menu_id(&id)?;

    let menu = match query.levels()? {
        Some(depth) => state.menu_service.get_with_depth(id, Some(depth)).await?,
        None => state.menu_service.get_by_id(id).await?,
    };
    Ok(Json(menu))
}

/// Update handler - PATCH /api/menus/{id}
pub async fn update_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMenuRequest>, JsonRejection>,
) -> Result<Json<MenuTree>, ApiError> {
    let id = parse_menu_id(&id)?;
    let request = json_body(payload)?;
    request.validate()?;

    let updated = state.menu_service.update(id, request.into()).await?;
    Ok(Json(updated))
}

/// Delete handler - DELETE /api/menus/{id}
pub async fn delete_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MenuTree>, ApiError> {
    let id = parse_menu_id(&id)?;

    let deleted = state.menu_service.delete(id).await?;
    Ok(Json(deleted))
}
