use axum::Json;
use axum::body::to_bytes;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rolegate_application::RoleStore;
use rolegate_domain::{PermissionTemplate, RoleGrant, RoleName, TemplateEntry};

use super::{
    ResourceFilterQuery, apply_template_handler, list_resource_grants_handler,
    preview_application_handler,
};
use crate::dto::ApplyTemplateRequest;
use crate::handlers::test_support::{admin, project, resource, subject, test_app};

fn default_template() -> PermissionTemplate {
    let role = RoleName::new("codeviewer").unwrap_or_else(|error| panic!("{error}"));
    PermissionTemplate::new(
        "default",
        "Default template",
        None,
        vec![TemplateEntry::new(role, [subject("7")])],
    )
    .unwrap_or_else(|error| panic!("invalid template fixture: {error}"))
}

fn apply_request(template_key: &str) -> ApplyTemplateRequest {
    ApplyTemplateRequest {
        template_key: template_key.to_owned(),
        qualifiers: Vec::new(),
        names: None,
        keys: None,
    }
}

#[tokio::test]
async fn preview_reports_single_resource_and_bulk_flag() {
    let app = test_app(
        vec![default_template()],
        vec![
            project("org.acme:billing", "Billing"),
            project("org.acme:ledger", "Ledger"),
        ],
    )
    .await;

    let single = preview_application_handler(
        State(app.state.clone()),
        Extension(admin()),
        Query(ResourceFilterQuery {
            names: Some("bill".to_owned()),
            ..ResourceFilterQuery::default()
        }),
    )
    .await;
    let all = preview_application_handler(
        State(app.state.clone()),
        Extension(admin()),
        Query(ResourceFilterQuery::default()),
    )
    .await;

    let Ok(Json(single)) = single else {
        panic!("preview failed");
    };
    assert_eq!(single.single_resource_name.as_deref(), Some("Billing"));
    assert!(!single.exceeds_bulk_limit);
    assert_eq!(single.templates.len(), 1);

    assert!(matches!(all, Ok(Json(ref preview))
        if preview.total_count == 2 && preview.exceeds_bulk_limit));
}

#[tokio::test]
async fn preview_with_other_qualifier_is_empty() {
    let app = test_app(Vec::new(), vec![project("org.acme:billing", "Billing")]).await;

    let preview = preview_application_handler(
        State(app.state.clone()),
        Extension(admin()),
        Query(ResourceFilterQuery {
            qualifiers: Some("VW,APP".to_owned()),
            ..ResourceFilterQuery::default()
        }),
    )
    .await;

    assert!(matches!(preview, Ok(Json(ref preview))
        if preview.is_empty && preview.qualifiers == vec!["VW".to_owned(), "APP".to_owned()]));
}

#[tokio::test]
async fn apply_grants_template_roles_and_reports_counts() {
    let app = test_app(
        vec![default_template()],
        vec![
            project("org.acme:billing", "Billing"),
            project("org.acme:ledger", "Ledger"),
        ],
    )
    .await;

    let report = apply_template_handler(
        State(app.state.clone()),
        Extension(admin()),
        Json(apply_request("default")),
    )
    .await;

    assert!(matches!(report, Ok(Json(ref report))
        if report.success_count == 2 && report.processed_count == 2 && report.failures.is_empty()));
    let role = RoleName::new("codeviewer").unwrap_or_else(|error| panic!("{error}"));
    let granted = app
        .role_store
        .has_role(&subject("7"), &role, Some(&resource("org.acme:ledger")))
        .await;
    assert!(matches!(granted, Ok(true)));
}

#[tokio::test]
async fn unknown_template_is_not_found_with_kind() {
    let app = test_app(Vec::new(), vec![project("org.acme:billing", "Billing")]).await;

    let response = apply_template_handler(
        State(app.state.clone()),
        Extension(admin()),
        Json(apply_request("missing")),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = to_bytes(response.into_body(), usize::MAX).await;
    let Ok(body) = body else {
        panic!("failed to read response body");
    };
    let payload: serde_json::Value =
        serde_json::from_slice(&body).unwrap_or_else(|error| panic!("invalid json: {error}"));
    assert_eq!(payload["kind"], "template_not_found");
    assert_eq!(app.role_store.len().await, 1);
}

#[tokio::test]
async fn resource_listing_shows_current_holders_by_name() {
    let app = test_app(
        Vec::new(),
        vec![
            project("org.acme:ledger", "Ledger"),
            project("org.acme:billing", "billing"),
        ],
    )
    .await;
    let codeviewer = RoleName::new("codeviewer").unwrap_or_else(|error| panic!("{error}"));
    let grant = RoleGrant::new(subject("7"), codeviewer, Some(resource("org.acme:ledger")));
    assert!(app.role_store.grant(&grant).await.is_ok());

    let page = list_resource_grants_handler(
        State(app.state.clone()),
        Extension(admin()),
        Query(ResourceFilterQuery::default()),
    )
    .await;

    let Ok(Json(page)) = page else {
        panic!("listing failed");
    };
    assert_eq!(page.total_count, 2);
    assert_eq!(page.resources[0].resource.name, "billing");
    let ledger = &page.resources[1];
    let holders = ledger
        .roles
        .iter()
        .find(|holders| holders.role == "codeviewer")
        .map(|holders| holders.subjects.as_slice());
    assert!(matches!(holders, Some([only]) if only.kind == "user" && only.id == "7"));
}
