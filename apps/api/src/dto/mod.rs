mod common;
mod roles;
mod templates;

pub use common::HealthResponse;
pub use roles::{
    GroupGrantRequest, ResourceGrantsPageResponse, ResourceGrantsResponse, RoleHoldersResponse,
    SubjectResponse, UserGrantRequest,
};
pub use templates::{
    ApplyFailureResponse, ApplyReportResponse, ApplyTemplateRequest, PreviewResponse,
    ResourceResponse, TemplateSummaryResponse,
};

#[cfg(test)]
mod tests {
    use super::{
        ApplyFailureResponse, ApplyReportResponse, ApplyTemplateRequest, GroupGrantRequest,
        HealthResponse, PreviewResponse, ResourceGrantsPageResponse, ResourceGrantsResponse,
        ResourceResponse, RoleHoldersResponse, SubjectResponse, TemplateSummaryResponse,
        UserGrantRequest,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        UserGrantRequest::export(&config)?;
        GroupGrantRequest::export(&config)?;
        SubjectResponse::export(&config)?;
        RoleHoldersResponse::export(&config)?;
        ResourceGrantsResponse::export(&config)?;
        ResourceGrantsPageResponse::export(&config)?;
        ApplyTemplateRequest::export(&config)?;
        ResourceResponse::export(&config)?;
        TemplateSummaryResponse::export(&config)?;
        PreviewResponse::export(&config)?;
        ApplyFailureResponse::export(&config)?;
        ApplyReportResponse::export(&config)?;
        ErrorResponse::export(&config)?;
        HealthResponse::export(&config)?;

        Ok(())
    }
}
