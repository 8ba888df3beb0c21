use chrono::Utc;
use rolegate_domain::{AuditAction, RoleScope};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{ApplyFailure, ApplyReport, AuditEvent, SCOPE_PAGE_SIZE};

use super::*;

impl TemplateApplicationService {
    /// Applies a template to every resource currently matching the filter.
    ///
    /// Candidates are resolved again rather than taken from a preview. Only
    /// the fetched page is processed, in query order. A resource whose grants
    /// fail is recorded in the report and the next one is processed.
    pub async fn apply_template(
        &self,
        actor: &UserIdentity,
        template_key: &str,
        filter: &ResourceFilter,
    ) -> AppResult<ApplyReport> {
        self.authorization_service.require_admin(actor).await?;

        let template_key = template_key.trim();
        if template_key.is_empty() {
            return Err(AppError::Validation("template key is required".to_owned()));
        }

        let template = self
            .template_repository
            .find_by_key(template_key)
            .await?
            .ok_or_else(|| AppError::TemplateNotFound(template_key.to_owned()))?;

        let catalog = self.role_grant_service.role_catalog();
        for entry in template.entries() {
            catalog.require(entry.role(), RoleScope::Resource)?;
        }

        let candidates = self.resolve_candidates(filter, SCOPE_PAGE_SIZE).await?;
        let batches = template.grant_batches();
        let application_id = Uuid::new_v4();

        let mut success_count = 0_usize;
        let mut failures = Vec::new();
        for resource in &candidates.resources {
            match self
                .role_grant_service
                .grant_batches_on_resource(&batches, &resource.key)
                .await
            {
                Ok(_) => success_count += 1,
                Err(error) => {
                    warn!(
                        %application_id,
                        template_key,
                        resource_key = resource.key.as_str(),
                        error = %error,
                        "failed to apply permission template to resource"
                    );
                    failures.push(ApplyFailure {
                        resource_key: resource.key.clone(),
                        kind: error.kind(),
                        message: error.to_string(),
                    });
                }
            }
        }

        let report = ApplyReport {
            application_id,
            template_key: template.key().to_owned(),
            total_count: candidates.total_count,
            success_count,
            failures,
            applied_at: Utc::now(),
        };

        info!(
            %application_id,
            actor = actor.user_id(),
            template_key = report.template_key.as_str(),
            total_count = report.total_count,
            success_count = report.success_count,
            failure_count = report.failures.len(),
            "permission template applied"
        );

        if let Err(error) = self.append_audit_event(actor, &report).await {
            warn!(
                %application_id,
                error = %error,
                "failed to record permission template application"
            );
        }

        Ok(report)
    }

    async fn append_audit_event(&self, actor: &UserIdentity, report: &ApplyReport) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                actor: actor.user_id().to_owned(),
                action: AuditAction::TemplateApplied,
                resource_type: "permission_template".to_owned(),
                resource_id: report.template_key.clone(),
                detail: Some(format!(
                    "applied to {} of {} resources, {} failed",
                    report.success_count,
                    report.processed_count(),
                    report.failures.len()
                )),
            })
            .await
    }
}
