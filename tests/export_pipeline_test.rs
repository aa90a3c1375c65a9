//! Integration tests for the export pipeline against a mock server

use mockito::Matcher;
use std::io::{Cursor, Write};
use supersync::config::{
    secret_string, ApplicationConfig, Environment, ImportConfig, LoggingConfig, RetryConfig,
    SupersetConfig, SupersyncConfig, WorkspaceConfig,
};
use supersync::core::export::{ExportCoordinator, ExportErrorType};
use tempfile::tempdir;
use tokio::sync::watch;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn test_config(base_url: &str, repo_root: &std::path::Path) -> SupersyncConfig {
    SupersyncConfig {
        application: ApplicationConfig::default(),
        environment: Environment::default(),
        superset: SupersetConfig {
            base_url: base_url.to_string(),
            auth_provider: "db".to_string(),
            username: "admin".to_string(),
            password: secret_string("admin".to_string()),
            tls_verify: true,
            timeout_seconds: 5,
            page_size: 10,
            // single attempt keeps failure tests fast
            retry: RetryConfig {
                max_retries: 1,
                initial_delay_ms: 1,
                max_delay_ms: 1,
                backoff_multiplier: 1.0,
            },
        },
        workspace: WorkspaceConfig {
            repo_root: repo_root.to_string_lossy().into_owned(),
            resources: vec!["dashboards".to_string()],
            ..WorkspaceConfig::default()
        },
        import: ImportConfig::default(),
        logging: LoggingConfig::default(),
    }
}

fn server_bundle(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

async fn mock_login(server: &mut mockito::Server) -> mockito::Mock {
    server
        .mock("POST", "/api/v1/security/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "test-token"}"#)
        .create_async()
        .await
}

async fn mock_single_dashboard(server: &mut mockito::Server) -> mockito::Mock {
    server
        .mock("GET", "/api/v1/dashboard/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"count": 1, "result": [{"id": 9, "dashboard_title": "Sales"}]}"#)
        .create_async()
        .await
}

#[tokio::test]
async fn test_export_unpacks_bundle_into_object_dir() {
    let mut server = mockito::Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let _list = mock_single_dashboard(&mut server).await;

    let bytes = server_bundle(&[
        ("dashboard_export_20240101/metadata.yaml", "version: 1.0.0\n"),
        (
            "dashboard_export_20240101/dashboards/sales.yaml",
            "dashboard_title: Sales\n",
        ),
    ]);
    let export_mock = server
        .mock("GET", "/api/v1/dashboard/export/")
        .match_query(Matcher::UrlEncoded("q".into(), "!(9)".into()))
        .with_status(200)
        .with_header("content-type", "application/zip")
        .with_body(bytes)
        .create_async()
        .await;

    let repo = tempdir().unwrap();
    let config = test_config(&server.url(), repo.path());
    let (_tx, rx) = watch::channel(false);

    let coordinator = ExportCoordinator::new(config.clone(), rx).await.unwrap();
    let summary = coordinator.execute_export().await.unwrap();

    assert!(summary.is_successful());
    assert_eq!(summary.exported, 1);
    assert_eq!(summary.failed, 0);

    let object_dir = config.exports_dir_for(supersync::domain::ResourceKind::Dashboard)
        .join("dashboard_9");
    assert!(object_dir.join("metadata.yaml").exists());
    assert!(object_dir.join("dashboards/sales.yaml").exists());
    export_mock.assert_async().await;
}

#[tokio::test]
async fn test_export_records_unreadable_bundle_as_unpack_failure() {
    let mut server = mockito::Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let _list = mock_single_dashboard(&mut server).await;

    let _export = server
        .mock("GET", "/api/v1/dashboard/export/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/zip")
        .with_body("this is not a zip")
        .create_async()
        .await;

    let repo = tempdir().unwrap();
    let config = test_config(&server.url(), repo.path());
    let (_tx, rx) = watch::channel(false);

    let coordinator = ExportCoordinator::new(config, rx).await.unwrap();
    let summary = coordinator.execute_export().await.unwrap();

    assert!(!summary.is_successful());
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].error_type, ExportErrorType::Unpack);
}

#[tokio::test]
async fn test_export_records_server_failure_as_download_failure() {
    let mut server = mockito::Server::new_async().await;
    let _login = mock_login(&mut server).await;
    let _list = mock_single_dashboard(&mut server).await;

    let _export = server
        .mock("GET", "/api/v1/dashboard/export/")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let repo = tempdir().unwrap();
    let config = test_config(&server.url(), repo.path());
    let (_tx, rx) = watch::channel(false);

    let coordinator = ExportCoordinator::new(config, rx).await.unwrap();
    let summary = coordinator.execute_export().await.unwrap();

    assert!(!summary.is_successful());
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.errors[0].error_type, ExportErrorType::Download);
}
