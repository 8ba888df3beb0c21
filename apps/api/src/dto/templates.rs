use rolegate_application::{
    ApplyFailure, ApplyReport, PermissionTemplateSummary, PreviewResult, ResourceFilter,
};
use rolegate_domain::ResourceDescriptor;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload applying a template to the resources matching a filter.
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "apply-template-request.ts")]
pub struct ApplyTemplateRequest {
    pub template_key: String,
    #[serde(default)]
    pub qualifiers: Vec<String>,
    #[serde(default)]
    pub names: Option<String>,
    #[serde(default)]
    pub keys: Option<String>,
}

impl ApplyTemplateRequest {
    pub fn filter(&self) -> ResourceFilter {
        ResourceFilter {
            qualifiers: self.qualifiers.clone(),
            names: self.names.clone(),
            keys: self.keys.clone(),
        }
    }
}

/// API representation of a candidate resource.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "resource-response.ts")]
pub struct ResourceResponse {
    pub key: String,
    pub name: String,
    pub qualifier: String,
}

impl From<ResourceDescriptor> for ResourceResponse {
    fn from(value: ResourceDescriptor) -> Self {
        Self {
            key: value.key.as_str().to_owned(),
            name: value.name,
            qualifier: value.qualifier,
        }
    }
}

/// API representation of a selectable template.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "template-summary-response.ts")]
pub struct TemplateSummaryResponse {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<PermissionTemplateSummary> for TemplateSummaryResponse {
    fn from(value: PermissionTemplateSummary) -> Self {
        Self {
            key: value.key,
            name: value.name,
            description: value.description,
        }
    }
}

/// API representation of an application preview.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "preview-response.ts")]
pub struct PreviewResponse {
    pub resources: Vec<ResourceResponse>,
    pub templates: Vec<TemplateSummaryResponse>,
    pub qualifiers: Vec<String>,
    #[ts(type = "number")]
    pub total_count: u64,
    pub is_empty: bool,
    pub exceeds_bulk_limit: bool,
    pub single_resource_name: Option<String>,
}

impl From<PreviewResult> for PreviewResponse {
    fn from(value: PreviewResult) -> Self {
        Self {
            resources: value.resources.into_iter().map(ResourceResponse::from).collect(),
            templates: value
                .templates
                .into_iter()
                .map(TemplateSummaryResponse::from)
                .collect(),
            qualifiers: value.qualifiers,
            total_count: value.total_count,
            is_empty: value.is_empty,
            exceeds_bulk_limit: value.exceeds_bulk_limit,
            single_resource_name: value.single_resource_name,
        }
    }
}

/// API representation of one resource the template could not be applied to.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "apply-failure-response.ts")]
pub struct ApplyFailureResponse {
    pub resource_key: String,
    pub kind: String,
    pub message: String,
}

impl From<ApplyFailure> for ApplyFailureResponse {
    fn from(value: ApplyFailure) -> Self {
        Self {
            resource_key: value.resource_key.as_str().to_owned(),
            kind: value.kind.as_str().to_owned(),
            message: value.message,
        }
    }
}

/// API representation of a finished template application.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "apply-report-response.ts")]
pub struct ApplyReportResponse {
    pub application_id: String,
    pub template_key: String,
    #[ts(type = "number")]
    pub total_count: u64,
    pub processed_count: usize,
    pub success_count: usize,
    pub failures: Vec<ApplyFailureResponse>,
    pub applied_at: String,
}

impl From<ApplyReport> for ApplyReportResponse {
    fn from(value: ApplyReport) -> Self {
        Self {
            application_id: value.application_id.to_string(),
            processed_count: value.processed_count(),
            template_key: value.template_key,
            total_count: value.total_count,
            success_count: value.success_count,
            failures: value
                .failures
                .into_iter()
                .map(ApplyFailureResponse::from)
                .collect(),
            applied_at: value.applied_at.to_rfc3339(),
        }
    }
}
