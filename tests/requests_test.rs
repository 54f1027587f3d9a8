//! Request workflow: creation and monotonic status changes.
mod common;

use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use common::request_row;
use freelink_backend::db::requests::{
    RequestWorkflowError, cancel_request, decide_request, insert_request,
};
use freelink_backend::models::requests::{self, CreateRequest, Status};

fn affected(rows: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: rows,
    }
}

#[test]
fn test_only_pending_can_move() {
    assert!(Status::Pending.can_transition_to(Status::Accepted));
    assert!(Status::Pending.can_transition_to(Status::Rejected));
    assert!(!Status::Pending.can_transition_to(Status::Pending));
    assert!(!Status::Accepted.can_transition_to(Status::Rejected));
    assert!(!Status::Rejected.can_transition_to(Status::Accepted));
    assert!(!Status::Accepted.can_transition_to(Status::Pending));
}

#[test]
fn test_status_wire_format() {
    assert_eq!(serde_json::to_string(&Status::Accepted).unwrap(), "\"accepted\"");
    let parsed: Status = serde_json::from_str("\"rejected\"").unwrap();
    assert_eq!(parsed, Status::Rejected);
    assert!(serde_json::from_str::<Status>("\"cancelled\"").is_err());
}

#[test]
fn test_create_request_validation() {
    let valid = CreateRequest {
        freelancer_id: Uuid::new_v4(),
        name: "Cara".to_string(),
        email: "cara@example.com".to_string(),
        project_name: "Shop redesign".to_string(),
        description: "Refresh the storefront".to_string(),
    };
    assert!(valid.validate().is_ok());

    let mut missing = valid.clone();
    missing.project_name = "  ".to_string();
    assert_eq!(missing.validate().unwrap_err(), "Project name is required");

    let mut bad_email = valid;
    bad_email.email = "cara".to_string();
    assert!(bad_email.validate().is_err());
}

#[tokio::test]
async fn test_new_request_starts_pending() {
    let client = Uuid::new_v4();
    let freelancer = Uuid::new_v4();
    let row = request_row(client, freelancer, Status::Pending);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .into_connection();

    let input = CreateRequest {
        freelancer_id: freelancer,
        name: row.name.clone(),
        email: row.email.clone(),
        project_name: row.project_name.clone(),
        description: row.description.clone(),
    };
    let created = insert_request(&db, client, input).await.unwrap();
    assert_eq!(created.status, Status::Pending);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("pending"), "{log}");
}

#[tokio::test]
async fn test_accepting_a_pending_request() {
    // Row as read back after the conditional update.
    let row = request_row(Uuid::new_v4(), Uuid::new_v4(), Status::Accepted);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([affected(1)])
        .append_query_results([vec![row.clone()]])
        .into_connection();

    let updated = decide_request(&db, row.id, Status::Accepted).await.unwrap();
    assert_eq!(updated.status, Status::Accepted);
}

#[tokio::test]
async fn test_decided_request_never_changes_again() {
    let row = request_row(Uuid::new_v4(), Uuid::new_v4(), Status::Accepted);

    // The conditional update matches nothing because the row is no longer pending.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([affected(0)])
        .append_query_results([vec![row.clone()]])
        .into_connection();

    let err = decide_request(&db, row.id, Status::Rejected).await.unwrap_err();
    assert!(matches!(err, RequestWorkflowError::AlreadyDecided(Status::Accepted)));
    assert_eq!(
        err.to_string(),
        "Request is already accepted. Only pending requests can change."
    );
}

#[tokio::test]
async fn test_moving_back_to_pending_is_refused_before_any_write() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = decide_request(&db, Uuid::new_v4(), Status::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, RequestWorkflowError::InvalidTransition));
    assert!(db.into_transaction_log().is_empty());
}

#[tokio::test]
async fn test_deciding_an_unknown_request() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([affected(0)])
        .append_query_results([Vec::<requests::Model>::new()])
        .into_connection();

    let id = Uuid::new_v4();
    let err = decide_request(&db, id, Status::Accepted).await.unwrap_err();
    assert!(matches!(err, RequestWorkflowError::NotFound(missing) if missing == id));
}

#[tokio::test]
async fn test_cancelling_a_pending_request() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([affected(1)])
        .into_connection();

    cancel_request(&db, Uuid::new_v4()).await.unwrap();
    assert_eq!(db.into_transaction_log().len(), 1);
}

#[tokio::test]
async fn test_cancelling_a_decided_request_is_refused() {
    let row = request_row(Uuid::new_v4(), Uuid::new_v4(), Status::Rejected);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([affected(0)])
        .append_query_results([vec![row.clone()]])
        .into_connection();

    let err = cancel_request(&db, row.id).await.unwrap_err();
    assert!(matches!(err, RequestWorkflowError::AlreadyDecided(Status::Rejected)));
}

#[tokio::test]
async fn test_cancelling_a_missing_request() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([affected(0)])
        .append_query_results([Vec::<requests::Model>::new()])
        .into_connection();

    let err = cancel_request(&db, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, RequestWorkflowError::NotFound(_)));
}
