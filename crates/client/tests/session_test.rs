//! Integration tests for the session store

use std::net::TcpListener;
use std::sync::Arc;

use mockall::mock;
use roster_client::storage::{TOKEN_KEY, USER_KEY};
use roster_client::{
    ConsoleError, FileStorage, MemoryStorage, Session, SessionStorage, StorageError,
};
use roster_core::Role;
use roster_http::PublicRosterClient;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mock! {
    pub Storage {}

    impl SessionStorage for Storage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
        fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
        fn remove(&self, key: &str) -> Result<(), StorageError>;
    }
}

fn admin_payload() -> serde_json::Value {
    json!({
        "_id": "665f1c2ab9e4d1",
        "nombre": "Admin Sistema",
        "email": "admin@example.com",
        "rol": "admin",
        "estado": "activo",
        "permisos": ["crear_usuario", "gestionar_permisos"],
        "createdAt": "2022-01-01T08:30:00.000Z",
        "departamento": "TI"
    })
}

async fn mount_login(server: &MockServer, password: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "admin@example.com", "contraseña": password })))
        .respond_with(response)
        .mount(server)
        .await;
}

fn session_over(server: &MockServer, storage: Arc<dyn SessionStorage>) -> Session {
    Session::new(PublicRosterClient::new(server.uri()).unwrap(), storage)
}

#[tokio::test]
async fn test_login_persists_token_and_user() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "correct",
        ResponseTemplate::new(200).set_body_json(json!({ "usuario": admin_payload(), "token": "tok-1" })),
    )
    .await;

    let storage = Arc::new(MemoryStorage::new());
    let session = session_over(&server, storage.clone());
    assert!(!session.is_authenticated());

    let grant = session.login("admin@example.com", "correct").await.unwrap();
    assert_eq!(grant.token, "tok-1");

    assert!(session.is_authenticated());
    assert_eq!(session.token().as_deref(), Some("tok-1"));
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));

    let user = session.current_user().unwrap();
    assert_eq!(user.id, "665f1c2ab9e4d1");
    assert_eq!(user.name, "Admin Sistema");
    assert_eq!(user.email, "admin@example.com");
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user, grant.user);
}

#[tokio::test]
async fn test_invalid_login_leaves_previous_session() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "correct",
        ResponseTemplate::new(200).set_body_json(json!({ "usuario": admin_payload(), "token": "tok-1" })),
    )
    .await;
    mount_login(
        &server,
        "wrong",
        ResponseTemplate::new(401).set_body_json(json!({ "error": "Credenciales inválidas" })),
    )
    .await;

    let session = session_over(&server, Arc::new(MemoryStorage::new()));
    session.login("admin@example.com", "correct").await.unwrap();

    let err = session.login("admin@example.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ConsoleError::Auth { ref message } if message == "Credenciales inválidas"));

    assert_eq!(session.token().as_deref(), Some("tok-1"));
    assert_eq!(session.current_user().unwrap().email, "admin@example.com");
}

#[tokio::test]
async fn test_login_error_without_body_uses_fallback() {
    let server = MockServer::start().await;
    mount_login(&server, "pw", ResponseTemplate::new(503)).await;

    let session = session_over(&server, Arc::new(MemoryStorage::new()));
    let err = session.login("admin@example.com", "pw").await.unwrap_err();

    assert!(matches!(err, ConsoleError::Auth { ref message } if message == "failed to sign in"));
    assert!(!session.is_authenticated());
}

/// Base URL of a port with nothing listening on it
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn test_login_unreachable_server_is_auth_error() {
    let session = Session::new(
        PublicRosterClient::new(closed_port_url()).unwrap(),
        Arc::new(MemoryStorage::new()),
    );
    let err = session.login("admin@example.com", "pw").await.unwrap_err();

    assert!(matches!(
        err,
        ConsoleError::Auth { ref message } if message.starts_with("failed to sign in: ")
    ));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_without_token_is_malformed() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "pw",
        ResponseTemplate::new(200).set_body_json(json!({ "usuario": admin_payload() })),
    )
    .await;

    let session = session_over(&server, Arc::new(MemoryStorage::new()));
    let err = session.login("admin@example.com", "pw").await.unwrap_err();

    assert!(matches!(err, ConsoleError::MalformedResponse { .. }));
    assert!(!session.is_authenticated());
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn test_logout_clears_everything_and_is_idempotent() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "correct",
        ResponseTemplate::new(200).set_body_json(json!({ "usuario": admin_payload(), "token": "tok-1" })),
    )
    .await;

    let session = session_over(&server, Arc::new(MemoryStorage::new()));

    session.logout().unwrap();
    assert!(!session.is_authenticated());
    assert!(session.current_user().is_none());

    session.login("admin@example.com", "correct").await.unwrap();
    session.logout().unwrap();
    session.logout().unwrap();

    assert!(!session.is_authenticated());
    assert!(session.current_user().is_none());
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_malformed_snapshot_reads_as_absent() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set_all(&[(TOKEN_KEY, "tok-1"), (USER_KEY, "{\"id\": 42")])
        .unwrap();

    let session = session_over(&server, storage);
    assert!(session.is_authenticated());
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn test_session_survives_restart_with_file_storage() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "correct",
        ResponseTemplate::new(200).set_body_json(json!({ "usuario": admin_payload(), "token": "tok-1" })),
    )
    .await;
    let dir = tempfile::tempdir().unwrap();

    let first = session_over(&server, Arc::new(FileStorage::new(dir.path())));
    first.login("admin@example.com", "correct").await.unwrap();

    let second = session_over(&server, Arc::new(FileStorage::new(dir.path())));
    assert_eq!(second.token().as_deref(), Some("tok-1"));
    assert_eq!(second.current_user().unwrap().department.as_deref(), Some("TI"));

    second.logout().unwrap();
    assert!(!first.is_authenticated());
}

#[tokio::test]
async fn test_storage_failure_on_login_leaves_no_partial_session() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "correct",
        ResponseTemplate::new(200).set_body_json(json!({ "usuario": admin_payload(), "token": "tok-1" })),
    )
    .await;

    let mut storage = MockStorage::new();
    storage.expect_get().times(2).returning(|_| Ok(None));
    storage
        .expect_set()
        .returning(|_, _| Err(StorageError::Backend("disk full".into())));
    storage
        .expect_remove()
        .withf(|key| key == TOKEN_KEY || key == USER_KEY)
        .times(2)
        .returning(|_| Ok(()));

    let session = session_over(&server, Arc::new(storage));
    let err = session.login("admin@example.com", "correct").await.unwrap_err();
    assert!(matches!(err, ConsoleError::Storage(_)));
}

#[tokio::test]
async fn test_storage_failure_on_login_restores_previous_session() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "correct",
        ResponseTemplate::new(200).set_body_json(json!({ "usuario": admin_payload(), "token": "tok-new" })),
    )
    .await;

    let mut storage = MockStorage::new();
    storage
        .expect_get()
        .returning(|key| Ok(Some(format!("old-{key}"))));
    // The new token lands, then the user write fails
    storage
        .expect_set()
        .withf(|key, value| key == TOKEN_KEY && value == "tok-new")
        .times(1)
        .returning(|_, _| Ok(()));
    storage
        .expect_set()
        .withf(|key, value| key == USER_KEY && !value.starts_with("old-"))
        .times(1)
        .returning(|_, _| Err(StorageError::Backend("disk full".into())));
    storage
        .expect_set()
        .withf(|key, value| *value == format!("old-{key}"))
        .times(2)
        .returning(|_, _| Ok(()));
    storage.expect_remove().times(0);

    let session = session_over(&server, Arc::new(storage));
    let err = session.login("admin@example.com", "correct").await.unwrap_err();
    assert!(matches!(err, ConsoleError::Storage(_)));
}

#[tokio::test]
async fn test_rejected_login_keeps_saved_session_on_disk() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "correct",
        ResponseTemplate::new(200).set_body_json(json!({ "usuario": admin_payload(), "token": "tok-1" })),
    )
    .await;
    mount_login(&server, "wrong", ResponseTemplate::new(401)).await;
    let dir = tempfile::tempdir().unwrap();

    let session = session_over(&server, Arc::new(FileStorage::new(dir.path())));
    session.login("admin@example.com", "correct").await.unwrap();
    session.login("admin@example.com", "wrong").await.unwrap_err();

    let reopened = FileStorage::new(dir.path());
    assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
    assert!(reopened.get(USER_KEY).unwrap().is_some());
}
