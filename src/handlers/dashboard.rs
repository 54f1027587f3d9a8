use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::authorization::ensure_self;
use crate::auth::middleware::Session;
use crate::auth::routing::{NavItem, Role};
use crate::config::AppConfig;
use crate::db::profiles as profile_db;
use crate::handlers::portfolio::portfolio_or_empty;
use crate::models::portfolio::PortfolioResponse;
use crate::models::profiles::{
    self, FreelancerCard, ProfileResponse, PublicProfile, navigation_for,
};
use crate::models::{RevealQuery, reveal};

#[derive(Debug, Serialize)]
pub struct FreelancerDashboard {
    pub profile: ProfileResponse,
    pub portfolio: Vec<PortfolioResponse>,
    pub navigation: Vec<NavItem>,
}

#[derive(Debug, Serialize)]
pub struct ClientDashboard {
    pub profile: ProfileResponse,
    pub freelancers: Vec<FreelancerCard>,
    pub total_matches: usize,
    pub has_more: bool,
    pub next_visible: usize,
    pub navigation: Vec<NavItem>,
}

#[derive(Debug, Serialize)]
pub struct PublicFreelancerProfile {
    pub profile: PublicProfile,
    pub portfolio: Vec<PortfolioResponse>,
}

/// Load the dashboard owner's profile and check it has the expected role.
async fn dashboard_owner(
    db: &DatabaseConnection,
    id: Uuid,
    role: Role,
) -> Result<profiles::Model, HttpResponse> {
    match profile_db::get_profile_by_id(db, id).await {
        Ok(Some(profile)) if profile.role() == Ok(role) => Ok(profile),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": format!("This is not a {role} account"),
        }))),
        Ok(None) => Err(HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Profile {id} not found"),
        }))),
        Err(e) => Err(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }))),
    }
}

async fn freelancers_or_empty(db: &DatabaseConnection) -> Vec<profiles::Model> {
    profile_db::get_freelancers(db).await.unwrap_or_else(|e| {
        tracing::error!("Failed to fetch freelancers: {e}");
        Vec::new()
    })
}

/// GET /api/dashboard/freelancer/{id}: profile, portfolio and sidebar.
pub async fn freelancer_dashboard(
    session: Session,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    if let Err(resp) = ensure_self(&session, id, "view the dashboard of") {
        return resp;
    }

    let profile = match dashboard_owner(db.get_ref(), id, Role::Freelancer).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    let portfolio = portfolio_or_empty(db.get_ref(), id).await;
    let navigation = navigation_for(&profile);

    HttpResponse::Ok().json(FreelancerDashboard {
        profile: ProfileResponse::from(profile),
        portfolio,
        navigation,
    })
}

/// GET /api/dashboard/client/{id}?search=&visible=: the client's profile and
/// the freelancers matching the search, one page at a time.
pub async fn client_dashboard(
    session: Session,
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
    path: web::Path<Uuid>,
    query: web::Query<RevealQuery>,
) -> impl Responder {
    let id = path.into_inner();
    if let Err(resp) = ensure_self(&session, id, "view the dashboard of") {
        return resp;
    }

    let profile = match dashboard_owner(db.get_ref(), id, Role::Client).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    let page_size = config.page_size;
    let search = query.search();
    let matches: Vec<FreelancerCard> = freelancers_or_empty(db.get_ref())
        .await
        .iter()
        .filter(|f| f.matches_search(search))
        .map(FreelancerCard::from)
        .collect();
    let shown = reveal(matches, query.visible(page_size), page_size);
    let navigation = navigation_for(&profile);

    HttpResponse::Ok().json(ClientDashboard {
        profile: ProfileResponse::from(profile),
        freelancers: shown.items,
        total_matches: shown.total_matches,
        has_more: shown.has_more,
        next_visible: shown.next_visible,
        navigation,
    })
}

/// GET /api/freelancers: every freelancer as a listing card.
pub async fn list_freelancers(db: web::Data<DatabaseConnection>) -> impl Responder {
    let cards: Vec<FreelancerCard> = freelancers_or_empty(db.get_ref())
        .await
        .iter()
        .map(FreelancerCard::from)
        .collect();
    HttpResponse::Ok().json(cards)
}

/// GET /api/freelancers/{id}: a freelancer's public profile and portfolio.
pub async fn freelancer_profile(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let profile = match dashboard_owner(db.get_ref(), id, Role::Freelancer).await {
        Ok(profile) => profile,
        Err(resp) => return resp,
    };

    let portfolio = portfolio_or_empty(db.get_ref(), id).await;
    HttpResponse::Ok().json(PublicFreelancerProfile {
        profile: PublicProfile::from(profile),
        portfolio,
    })
}
