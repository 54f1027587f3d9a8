use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Request status stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl Status {
    /// Pending is the only state that may change; decided requests are final.
    pub fn can_transition_to(self, next: Status) -> bool {
        self == Status::Pending && next != Status::Pending
    }

    pub fn is_pending(self) -> bool {
        self == Status::Pending
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Accepted => "accepted",
            Status::Rejected => "rejected",
        }
    }
}

/// SeaORM entity for the `freelancer_requests` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "freelancer_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub freelancer_id: Uuid,
    pub name: String,
    pub email: String,
    pub project_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: Status,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ClientId",
        to = "super::profiles::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::FreelancerId",
        to = "super::profiles::Column::Id"
    )]
    Freelancer,
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/requests`. The client comes from the session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequest {
    pub freelancer_id: Uuid,
    pub name: String,
    pub email: String,
    pub project_name: String,
    pub description: String,
}

impl CreateRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if !self.email.contains('@') {
            return Err("A valid email is required".to_string());
        }
        if self.project_name.trim().is_empty() {
            return Err("Project name is required".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequestStatus {
    pub status: Status,
}

/// Row in the freelancer's activity view.
#[derive(Debug, Clone, Serialize)]
pub struct IncomingRequest {
    #[serde(flatten)]
    pub request: Model,
    pub client_name: String,
    pub client_email: String,
    pub can_respond: bool,
}

/// Row in the client's activity view.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingRequest {
    #[serde(flatten)]
    pub request: Model,
    pub freelancer_name: String,
    pub can_cancel: bool,
}
