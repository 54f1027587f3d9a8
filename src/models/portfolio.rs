use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shown in place of a missing screenshot.
pub const PLACEHOLDER_SCREENSHOT: &str = "https://via.placeholder.com/300x180?text=No+Image";

/// SeaORM entity for the `freelancer_portfolios` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "freelancer_portfolios")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub freelancer_id: Uuid,
    pub project_name: String,
    #[sea_orm(column_type = "Text")]
    pub project_description: String,
    pub project_url: String,
    pub screenshot_url: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::FreelancerId",
        to = "super::profiles::Column::Id"
    )]
    Freelancer,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/portfolios`. The owner comes from the session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePortfolio {
    pub project_name: String,
    pub project_url: String,
    pub project_description: String,
}

impl CreatePortfolio {
    pub fn validate(&self) -> Result<(), String> {
        if self.project_name.trim().is_empty() {
            return Err("Project name is required".to_string());
        }
        if self.project_description.trim().is_empty() {
            return Err("Project description is required".to_string());
        }
        let url = self.project_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err("Project URL must start with http:// or https://".to_string());
        }
        Ok(())
    }
}

/// A fully resolved entry ready for insertion.
#[derive(Debug, Clone)]
pub struct NewPortfolioEntry {
    pub freelancer_id: Uuid,
    pub project_name: String,
    pub project_url: String,
    pub project_description: String,
    pub screenshot_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioResponse {
    pub id: Uuid,
    pub freelancer_id: Uuid,
    pub project_name: String,
    pub project_description: String,
    pub project_url: String,
    pub screenshot_url: Option<String>,
    pub image: String,
    pub created_at: DateTimeUtc,
}

impl From<Model> for PortfolioResponse {
    fn from(m: Model) -> Self {
        let image = m
            .screenshot_url
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_SCREENSHOT.to_string());
        Self {
            id: m.id,
            freelancer_id: m.freelancer_id,
            project_name: m.project_name,
            project_description: m.project_description,
            project_url: m.project_url,
            screenshot_url: m.screenshot_url,
            image,
            created_at: m.created_at,
        }
    }
}
