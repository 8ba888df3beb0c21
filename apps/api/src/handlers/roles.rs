use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use rolegate_core::{AppError, UserIdentity};
use rolegate_domain::{GroupId, ResourceKey, UserId};
use serde::Deserialize;

use crate::dto::{GroupGrantRequest, SubjectResponse, UserGrantRequest};
use crate::error::ApiResult;
use crate::state::AppState;


#[derive(Debug, Deserialize)]
pub struct ListGrantsQuery {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub resource: Option<String>,
}

pub async fn list_grants_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<ListGrantsQuery>,
) -> ApiResult<Json<Vec<SubjectResponse>>> {
    let resource = parse_resource(query.resource.as_deref())?;
    let subjects = state
        .role_grant_service
        .list_subjects(&user, query.role.as_str(), resource.as_ref())
        .await?
        .into_iter()
        .map(SubjectResponse::from)
        .collect();

    Ok(Json(subjects))
}

pub async fn grant_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<UserGrantRequest>,
) -> ApiResult<StatusCode> {
    let user_ids = parse_user_ids(&payload.user_ids)?;
    let resource = parse_resource(payload.resource.as_deref())?;
    state
        .role_grant_service
        .grant_users(&user, &user_ids, payload.role.as_str(), resource.as_ref())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn revoke_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<UserGrantRequest>,
) -> ApiResult<StatusCode> {
    let user_ids = parse_user_ids(&payload.user_ids)?;
    let resource = parse_resource(payload.resource.as_deref())?;
    state
        .role_grant_service
        .revoke_users(&user, &user_ids, payload.role.as_str(), resource.as_ref())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn grant_groups_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<GroupGrantRequest>,
) -> ApiResult<StatusCode> {
    let group_ids = parse_group_ids(&payload.group_ids)?;
    let resource = parse_resource(payload.resource.as_deref())?;
    state
        .role_grant_service
        .grant_groups(&user, &group_ids, payload.role.as_str(), resource.as_ref())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn revoke_groups_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<GroupGrantRequest>,
) -> ApiResult<StatusCode> {
    let group_ids = parse_group_ids(&payload.group_ids)?;
    let resource = parse_resource(payload.resource.as_deref())?;
    state
        .role_grant_service
        .revoke_groups(&user, &group_ids, payload.role.as_str(), resource.as_ref())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// A missing or blank resource addresses the global scope.
fn parse_resource(value: Option<&str>) -> Result<Option<ResourceKey>, AppError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ResourceKey::new)
        .transpose()
}

fn parse_user_ids(values: &[String]) -> Result<Vec<UserId>, AppError> {
    values.iter().map(|value| UserId::new(value.as_str())).collect()
}

fn parse_group_ids(values: &[String]) -> Result<Vec<GroupId>, AppError> {
    values.iter().map(|value| GroupId::new(value.as_str())).collect()
}
