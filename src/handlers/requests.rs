use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, DbErr};
use std::collections::HashMap;
use uuid::Uuid;

use crate::auth::authorization::{RequestParty, request_for_party, require_role};
use crate::auth::middleware::Session;
use crate::auth::routing::Role;
use crate::db::profiles as profile_db;
use crate::db::requests::{self as request_db, RequestWorkflowError};
use crate::models::profiles;
use crate::models::requests::{
    self, CreateRequest, IncomingRequest, OutgoingRequest, UpdateRequestStatus,
};

fn workflow_error_response(e: RequestWorkflowError) -> HttpResponse {
    let mut status = match &e {
        RequestWorkflowError::NotFound(_) => HttpResponse::NotFound(),
        RequestWorkflowError::AlreadyDecided(_) => HttpResponse::Conflict(),
        RequestWorkflowError::InvalidTransition => HttpResponse::UnprocessableEntity(),
        RequestWorkflowError::Db(_) => HttpResponse::InternalServerError(),
    };
    status.json(serde_json::json!({
        "error": e.to_string(),
    }))
}

/// Profiles of the other party on each request, keyed by ID. A failed
/// lookup leaves the names blank rather than hiding the requests.
async fn counterparts(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = Uuid>,
) -> HashMap<Uuid, profiles::Model> {
    profile_db::get_profiles_by_ids(db, ids)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to fetch request counterparts: {e}");
            HashMap::new()
        })
}

fn or_empty(rows: Result<Vec<requests::Model>, DbErr>, user_id: Uuid) -> Vec<requests::Model> {
    rows.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch requests for {user_id}: {e}");
        Vec::new()
    })
}

/// POST /api/requests: a client asks a freelancer to take on a project.
pub async fn create_request(
    session: Session,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateRequest>,
) -> impl Responder {
    let input = body.into_inner();
    if let Err(message) = input.validate() {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": message,
        }));
    }

    let client = match require_role(db.get_ref(), &session, Role::Client).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    match profile_db::get_profile_by_id(db.get_ref(), input.freelancer_id).await {
        Ok(Some(target)) if target.role() == Ok(Role::Freelancer) => {}
        Ok(_) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Freelancer {} not found", input.freelancer_id),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match request_db::insert_request(db.get_ref(), client.id, input).await {
        Ok(request) => {
            tracing::info!(
                "Request {} sent from {} to {}",
                request.id,
                request.client_id,
                request.freelancer_id
            );
            HttpResponse::Created().json(request)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to send request: {e}"),
        })),
    }
}

/// GET /api/requests/incoming: requests addressed to the calling freelancer.
pub async fn get_incoming(session: Session, db: web::Data<DatabaseConnection>) -> impl Responder {
    let freelancer = match require_role(db.get_ref(), &session, Role::Freelancer).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    let rows = or_empty(
        request_db::get_requests_for_freelancer(db.get_ref(), freelancer.id).await,
        freelancer.id,
    );
    let clients = counterparts(db.get_ref(), rows.iter().map(|r| r.client_id)).await;

    let incoming: Vec<IncomingRequest> = rows
        .into_iter()
        .map(|request| {
            let client = clients.get(&request.client_id);
            IncomingRequest {
                client_name: client.map(|c| c.full_name()).unwrap_or_default(),
                client_email: client
                    .and_then(|c| c.email.clone())
                    .unwrap_or_else(|| request.email.clone()),
                can_respond: request.status.is_pending(),
                request,
            }
        })
        .collect();

    HttpResponse::Ok().json(incoming)
}

/// GET /api/requests/outgoing: requests the calling client has sent.
pub async fn get_outgoing(session: Session, db: web::Data<DatabaseConnection>) -> impl Responder {
    let client = match require_role(db.get_ref(), &session, Role::Client).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    let rows = or_empty(
        request_db::get_requests_for_client(db.get_ref(), client.id).await,
        client.id,
    );
    let freelancers = counterparts(db.get_ref(), rows.iter().map(|r| r.freelancer_id)).await;

    let outgoing: Vec<OutgoingRequest> = rows
        .into_iter()
        .map(|request| OutgoingRequest {
            freelancer_name: freelancers
                .get(&request.freelancer_id)
                .map(|f| f.full_name())
                .unwrap_or_default(),
            can_cancel: request.status.is_pending(),
            request,
        })
        .collect();

    HttpResponse::Ok().json(outgoing)
}

/// PUT /api/requests/{id}/status: the addressed freelancer accepts or rejects.
pub async fn update_status(
    session: Session,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateRequestStatus>,
) -> impl Responder {
    let id = path.into_inner();
    let next = body.into_inner().status;

    if let Err(resp) =
        request_for_party(db.get_ref(), id, session.user_id, RequestParty::Freelancer).await
    {
        return resp;
    }

    match request_db::decide_request(db.get_ref(), id, next).await {
        Ok(request) => {
            tracing::info!("Request {id} {}", request.status.as_str());
            HttpResponse::Ok().json(request)
        }
        Err(e) => workflow_error_response(e),
    }
}

/// DELETE /api/requests/{id}: the requesting client withdraws a pending request.
pub async fn cancel_request(
    session: Session,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    if let Err(resp) =
        request_for_party(db.get_ref(), id, session.user_id, RequestParty::Client).await
    {
        return resp;
    }

    match request_db::cancel_request(db.get_ref(), id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Request cancelled",
        })),
        Err(e) => workflow_error_response(e),
    }
}
