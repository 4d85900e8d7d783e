use std::time::Duration;

use deckhand_adapters::HttpCatalogAuthority;
use deckhand_core::{
    application::{ApplicationError, CatalogService, ports::CatalogAuthority},
    domain::{DeploymentStatus, RequestId, TemplateId},
    error::DeckhandError,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

fn authority(server: &MockServer) -> HttpCatalogAuthority {
    HttpCatalogAuthority::new(&server.uri(), Duration::from_secs(2)).unwrap()
}

fn application(err: DeckhandError) -> ApplicationError {
    err.as_application().cloned().expect("application error")
}

fn gpu_catalog() -> serde_json::Value {
    json!([
        { "id": 1, "name": "GPU Job - Training", "description": "Submit a training job on GPU cluster." }
    ])
}

async fn mount_catalog(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn lists_templates() {
    let server = MockServer::start().await;
    mount_catalog(
        &server,
        json!([
            { "id": 1, "name": "GPU Job - Training", "description": "Submit a training job on GPU cluster." },
            { "id": 2, "name": "Backup Workflow", "description": "Trigger cluster backup." }
        ]),
    )
    .await;

    let records = authority(&server).fetch_templates().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, Some(1));
    assert_eq!(records[1].name.as_deref(), Some("Backup Workflow"));
}

#[tokio::test]
async fn server_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = authority(&server).fetch_templates().await.unwrap_err();

    assert!(err.is_retryable());
    assert!(matches!(application(err), ApplicationError::Unavailable { .. }));
}

#[tokio::test]
async fn slow_backend_times_out_as_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gpu_catalog())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let authority =
        HttpCatalogAuthority::new(&server.uri(), Duration::from_millis(100)).unwrap();
    let err = authority.fetch_templates().await.unwrap_err();

    assert!(matches!(application(err), ApplicationError::Unavailable { .. }));
}

#[tokio::test]
async fn refused_connection_is_unavailable() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let authority = HttpCatalogAuthority::new(
        &format!("http://127.0.0.1:{port}"),
        Duration::from_secs(2),
    )
    .unwrap();

    let err = authority.fetch_templates().await.unwrap_err();

    assert!(err.is_retryable());
}

#[tokio::test]
async fn non_json_listing_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = authority(&server).fetch_templates().await.unwrap_err();

    assert!(!err.is_retryable());
    assert!(matches!(application(err), ApplicationError::MalformedData { .. }));
}

#[tokio::test]
async fn listing_without_name_fails_validation_in_service() {
    let server = MockServer::start().await;
    mount_catalog(&server, json!([{ "id": 1, "description": "nameless" }])).await;

    let service = CatalogService::new(Box::new(authority(&server)));
    let err = service.list_templates().await.unwrap_err();

    assert!(matches!(application(err), ApplicationError::MalformedData { .. }));
    assert!(service.snapshot().is_none());
}

#[tokio::test]
async fn submits_template_id_as_camel_case() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/deployments"))
        .and(body_json(json!({ "templateId": 1 })))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_json(json!({ "requestId": "req-42", "status": "Pending" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let receipt = authority(&server)
        .submit_deployment(TemplateId::new(1).unwrap())
        .await
        .unwrap();

    assert_eq!(receipt.request_id.as_deref(), Some("req-42"));
    assert_eq!(receipt.status.as_deref(), Some("Pending"));
}

#[tokio::test]
async fn retired_template_on_submit_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/deployments"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such template"))
        .mount(&server)
        .await;

    let err = authority(&server)
        .submit_deployment(TemplateId::new(3).unwrap())
        .await
        .unwrap_err();

    assert_eq!(application(err), ApplicationError::UnknownTemplate { id: 3 });
}

#[tokio::test]
async fn forbidden_submit_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/deployments"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let err = authority(&server)
        .submit_deployment(TemplateId::new(1).unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        application(err),
        ApplicationError::Rejected {
            status: 403,
            message: "quota exceeded".into()
        }
    );
}

#[tokio::test]
async fn polls_status_with_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deployments/req-7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "Failed", "error": "GPU quota exhausted" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let report = authority(&server)
        .deployment_status(&RequestId::new("req-7").unwrap())
        .await
        .unwrap();

    assert_eq!(report.status.as_deref(), Some("Failed"));
    assert_eq!(report.error.as_deref(), Some("GPU quota exhausted"));
}

#[tokio::test]
async fn unknown_request_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deployments/req-gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = authority(&server)
        .deployment_status(&RequestId::new("req-gone").unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        application(err),
        ApplicationError::NotFound {
            request_id: "req-gone".into()
        }
    );
}

#[tokio::test]
async fn request_id_is_percent_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deployments/team%2Fjob%201"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Pending" })))
        .expect(1)
        .mount(&server)
        .await;

    let report = authority(&server)
        .deployment_status(&RequestId::new("team/job 1").unwrap())
        .await
        .unwrap();

    assert_eq!(report.status.as_deref(), Some("Pending"));
}

#[tokio::test]
async fn dotted_request_id_stays_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/deployments/..."))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = authority(&server)
        .deployment_status(&RequestId::new("...").unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        application(err),
        ApplicationError::NotFound {
            request_id: "...".into()
        }
    );
}

#[tokio::test]
async fn dot_segment_request_id_in_receipt_is_malformed() {
    let server = MockServer::start().await;
    mount_catalog(&server, gpu_catalog()).await;
    Mock::given(method("POST"))
        .and(path("/deployments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "requestId": "..", "status": "Pending" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = CatalogService::new(Box::new(authority(&server)));
    service.list_templates().await.unwrap();

    let err = service.deploy(TemplateId::new(1).unwrap()).await.unwrap_err();
    assert!(matches!(
        application(err),
        ApplicationError::MalformedData { .. }
    ));
}

#[tokio::test]
async fn gpu_scenario_over_http() {
    let server = MockServer::start().await;
    mount_catalog(&server, gpu_catalog()).await;
    Mock::given(method("POST"))
        .and(path("/deployments"))
        .and(body_json(json!({ "templateId": 1 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "requestId": "req-1", "status": "Pending" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/deployments/req-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Succeeded" })))
        .mount(&server)
        .await;

    let service = CatalogService::new(Box::new(authority(&server)));
    let templates = service.list_templates().await.unwrap();
    assert_eq!(templates[0].name, "GPU Job - Training");

    let mut request = service.deploy(TemplateId::new(1).unwrap()).await.unwrap();
    assert_eq!(request.status(), DeploymentStatus::Pending);

    // 99 is rejected locally; the POST mock above expects exactly one call.
    let err = service.deploy(TemplateId::new(99).unwrap()).await.unwrap_err();
    assert_eq!(application(err), ApplicationError::UnknownTemplate { id: 99 });

    service.refresh(&mut request).await.unwrap();
    assert_eq!(request.status(), DeploymentStatus::Succeeded);
}
