use sea_orm::*;
use uuid::Uuid;

use crate::models::portfolio::{self, NewPortfolioEntry};

/// Insert a new portfolio entry.
pub async fn insert_portfolio(
    db: &DatabaseConnection,
    input: NewPortfolioEntry,
) -> Result<portfolio::Model, DbErr> {
    let new_entry = portfolio::ActiveModel {
        id: Set(Uuid::new_v4()),
        freelancer_id: Set(input.freelancer_id),
        project_name: Set(input.project_name),
        project_description: Set(input.project_description),
        project_url: Set(input.project_url),
        screenshot_url: Set(input.screenshot_url),
        created_at: Set(chrono::Utc::now()),
    };

    new_entry.insert(db).await
}

/// Fetch a single portfolio entry by ID.
pub async fn get_portfolio_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<portfolio::Model>, DbErr> {
    portfolio::Entity::find_by_id(id).one(db).await
}

/// Fetch a freelancer's portfolio, newest first.
pub async fn get_portfolios_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<portfolio::Model>, DbErr> {
    portfolio::Entity::find()
        .filter(portfolio::Column::FreelancerId.eq(freelancer_id))
        .order_by_desc(portfolio::Column::CreatedAt)
        .all(db)
        .await
}

/// Delete a portfolio entry by ID.
pub async fn delete_portfolio(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    portfolio::Entity::delete_by_id(id).exec(db).await
}
