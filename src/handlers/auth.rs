use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::flow::{AuthFlow, AuthFlowError, SignupForm};
use crate::auth::middleware::Session;
use crate::auth::routing::Role;
use crate::db::profiles as profile_db;
use crate::models::profiles::ProfileResponse;
use crate::supabase::RemoteError;
use crate::supabase::auth::AuthProvider;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub redirect: String,
    pub role: Role,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub profile: ProfileResponse,
}

fn flow_error_response(e: AuthFlowError) -> HttpResponse {
    let mut status = match &e {
        AuthFlowError::Credentials(_) => HttpResponse::Unauthorized(),
        AuthFlowError::Unavailable(_) => HttpResponse::BadGateway(),
        AuthFlowError::Provisioning(_) => HttpResponse::InternalServerError(),
        AuthFlowError::RoleLookup(_) | AuthFlowError::Role(_) => {
            HttpResponse::UnprocessableEntity()
        }
        AuthFlowError::InvalidSignup(_) => HttpResponse::UnprocessableEntity(),
        AuthFlowError::SignupRejected(_) => HttpResponse::BadRequest(),
    };
    status.json(serde_json::json!({
        "error": e.to_string(),
    }))
}

/// POST /api/auth/login: sign in, make sure a profile exists, and return
/// the dashboard to redirect to.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    auth: web::Data<Arc<dyn AuthProvider>>,
    body: web::Json<LoginRequest>,
) -> impl Responder {
    let flow = AuthFlow::new(db.get_ref(), auth.get_ref().as_ref());

    match flow.login(body.email.trim(), &body.password).await {
        Ok(outcome) => HttpResponse::Ok().json(LoginResponse {
            redirect: outcome.redirect,
            role: outcome.role,
            access_token: outcome.session.access_token,
            refresh_token: outcome.session.refresh_token,
            expires_in: outcome.session.expires_in,
            profile: ProfileResponse::from(outcome.profile),
        }),
        Err(e) => flow_error_response(e),
    }
}

/// POST /api/auth/signup/{role}: register a client or freelancer.
pub async fn signup(
    db: web::Data<DatabaseConnection>,
    auth: web::Data<Arc<dyn AuthProvider>>,
    path: web::Path<String>,
    body: web::Json<SignupForm>,
) -> impl Responder {
    let role = match Role::parse(&path.into_inner()) {
        Ok(role) => role,
        Err(_) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "Sign up as either a client or a freelancer",
            }));
        }
    };

    let flow = AuthFlow::new(db.get_ref(), auth.get_ref().as_ref());
    match flow.signup(role, body.into_inner()).await {
        Ok(user) => HttpResponse::Created().json(serde_json::json!({
            "id": user.id,
            "email": user.email,
            "role": role,
            "message": "Account created! Please check your email to confirm.",
        })),
        Err(e) => flow_error_response(e),
    }
}

/// POST /api/auth/logout: end the caller's session at the auth service.
pub async fn logout(
    session: Session,
    db: web::Data<DatabaseConnection>,
    auth: web::Data<Arc<dyn AuthProvider>>,
) -> impl Responder {
    let flow = AuthFlow::new(db.get_ref(), auth.get_ref().as_ref());
    match flow.logout(&session.access_token).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Signed out",
        })),
        Err(e) => flow_error_response(e),
    }
}

/// A refusal from the auth service passes its 4xx on as 401; anything else
/// means the service could not be reached.
fn remote_error_response(e: &RemoteError) -> HttpResponse {
    let mut status = match e.status() {
        Some(400..=499) => HttpResponse::Unauthorized(),
        _ => HttpResponse::BadGateway(),
    };
    status.json(serde_json::json!({
        "error": e.to_string(),
    }))
}

/// GET /api/auth/me: the caller's own profile, resolved through the auth
/// service so a revoked session is refused.
pub async fn me(
    session: Session,
    db: web::Data<DatabaseConnection>,
    auth: web::Data<Arc<dyn AuthProvider>>,
) -> impl Responder {
    let user = match auth.get_user(&session.access_token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("Session lookup for {} failed: {e}", session.user_id);
            return remote_error_response(&e);
        }
    };

    match profile_db::get_profile_by_id(db.get_ref(), user.id).await {
        Ok(Some(profile)) => {
            let mut profile = ProfileResponse::from(profile);
            if profile.email.is_empty() {
                profile.email = user.email.unwrap_or_default();
            }
            HttpResponse::Ok().json(profile)
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Profile not found. Sign in again to finish setting up your account.",
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
