use axum::Json;
use axum::extract::{Extension, Query, State};
use rolegate_application::ResourceFilter;
use rolegate_core::UserIdentity;
use serde::Deserialize;

use crate::dto::{
    ApplyReportResponse, ApplyTemplateRequest, PreviewResponse, ResourceGrantsPageResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[cfg(test)]
mod tests;

/// Resource filter read from the query string; `qualifiers` is a comma-separated list.
#[derive(Debug, Default, Deserialize)]
pub struct ResourceFilterQuery {
    #[serde(default)]
    pub qualifiers: Option<String>,
    #[serde(default)]
    pub names: Option<String>,
    #[serde(default)]
    pub keys: Option<String>,
}

impl ResourceFilterQuery {
    fn filter(self) -> ResourceFilter {
        ResourceFilter {
            qualifiers: self
                .qualifiers
                .map(|value| value.split(',').map(ToOwned::to_owned).collect())
                .unwrap_or_default(),
            names: self.names,
            keys: self.keys,
        }
    }
}

pub async fn preview_application_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<ResourceFilterQuery>,
) -> ApiResult<Json<PreviewResponse>> {
    let preview = state
        .template_application_service
        .preview_application(&user, &query.filter())
        .await?;

    Ok(Json(PreviewResponse::from(preview)))
}

pub async fn list_resource_grants_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<ResourceFilterQuery>,
) -> ApiResult<Json<ResourceGrantsPageResponse>> {
    let page = state
        .template_application_service
        .list_resource_grants(&user, &query.filter())
        .await?;

    Ok(Json(ResourceGrantsPageResponse::from(page)))
}

pub async fn apply_template_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<ApplyTemplateRequest>,
) -> ApiResult<Json<ApplyReportResponse>> {
    let report = state
        .template_application_service
        .apply_template(&user, payload.template_key.as_str(), &payload.filter())
        .await?;

    Ok(Json(ApplyReportResponse::from(report)))
}
