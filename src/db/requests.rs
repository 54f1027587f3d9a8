use sea_orm::*;
use uuid::Uuid;

use crate::models::requests::{self, CreateRequest, Status};

#[derive(Debug, thiserror::Error)]
pub enum RequestWorkflowError {
    #[error("Request {0} not found")]
    NotFound(Uuid),
    #[error("Request is already {}. Only pending requests can change.", .0.as_str())]
    AlreadyDecided(Status),
    #[error("A request can only be accepted or rejected")]
    InvalidTransition,
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

/// Insert a new request from `client_id` (always starts Pending).
///
/// Repeated requests for the same pair are allowed.
pub async fn insert_request(
    db: &DatabaseConnection,
    client_id: Uuid,
    input: CreateRequest,
) -> Result<requests::Model, DbErr> {
    let new_request = requests::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        freelancer_id: Set(input.freelancer_id),
        name: Set(input.name),
        email: Set(input.email),
        project_name: Set(input.project_name),
        description: Set(input.description),
        status: Set(Status::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    new_request.insert(db).await
}

/// Fetch a single request by ID.
pub async fn get_request_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<requests::Model>, DbErr> {
    requests::Entity::find_by_id(id).one(db).await
}

/// Requests addressed to a freelancer, newest first.
pub async fn get_requests_for_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<requests::Model>, DbErr> {
    requests::Entity::find()
        .filter(requests::Column::FreelancerId.eq(freelancer_id))
        .order_by_desc(requests::Column::CreatedAt)
        .all(db)
        .await
}

/// Requests sent by a client, newest first.
pub async fn get_requests_for_client(
    db: &DatabaseConnection,
    client_id: Uuid,
) -> Result<Vec<requests::Model>, DbErr> {
    requests::Entity::find()
        .filter(requests::Column::ClientId.eq(client_id))
        .order_by_desc(requests::Column::CreatedAt)
        .all(db)
        .await
}

/// Move a pending request to accepted or rejected.
///
/// The write is conditional on the row still being pending, so a decided
/// request never changes again even under concurrent calls.
pub async fn decide_request(
    db: &DatabaseConnection,
    id: Uuid,
    next: Status,
) -> Result<requests::Model, RequestWorkflowError> {
    if !Status::Pending.can_transition_to(next) {
        return Err(RequestWorkflowError::InvalidTransition);
    }

    let result = requests::Entity::update_many()
        .set(requests::ActiveModel {
            status: Set(next),
            ..Default::default()
        })
        .filter(requests::Column::Id.eq(id))
        .filter(requests::Column::Status.eq(Status::Pending))
        .exec(db)
        .await?;

    let current = get_request_by_id(db, id)
        .await?
        .ok_or(RequestWorkflowError::NotFound(id))?;

    if result.rows_affected == 0 {
        return Err(RequestWorkflowError::AlreadyDecided(current.status));
    }
    Ok(current)
}

/// Delete a request, but only while it is still pending.
pub async fn cancel_request(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<(), RequestWorkflowError> {
    let result = requests::Entity::delete_many()
        .filter(requests::Column::Id.eq(id))
        .filter(requests::Column::Status.eq(Status::Pending))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        return Ok(());
    }

    match get_request_by_id(db, id).await? {
        Some(existing) => Err(RequestWorkflowError::AlreadyDecided(existing.status)),
        None => Err(RequestWorkflowError::NotFound(id)),
    }
}
