use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::auth::routing::{NavItem, Role, RoleError};
use crate::supabase::auth::{AuthUser, SignupMetadata};

/// Shown by clients when a profile has no uploaded picture.
pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/120";

/// SeaORM entity for the `users` table (one profile per auth identity).
///
/// `role` is kept as raw text so that an unset or corrupt value can be told
/// apart from a valid one when it is read back; see [`Model::role`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub job: Option<String>,
    pub country: String,
    pub mobile: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub rate: Option<f64>,
    pub profile_image: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::portfolio::Entity")]
    Portfolios,
}

impl Related<super::portfolio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Portfolios.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Validate the stored role string.
    pub fn role(&self) -> Result<Role, RoleError> {
        Role::parse(&self.role)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Case-insensitive substring match on "<first> <last>" or job title.
    /// An empty query matches everything.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let full_name = format!("{} {}", self.first_name, self.last_name).to_lowercase();
        let job = self.job.as_deref().unwrap_or_default().to_lowercase();
        full_name.contains(&query) || job.contains(&query)
    }
}

// ── DTOs ──

/// Editable profile fields. Role, ID and picture are not editable here and
/// naming them is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub rate: Option<f64>,
}

impl UpdateProfile {
    pub fn validate(&self) -> Result<(), String> {
        let blank = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
        ]
        .into_iter()
        .find(|(_, v)| v.as_deref().is_some_and(|s| s.trim().is_empty()));
        if let Some((field, _)) = blank {
            return Err(format!("{field} cannot be empty"));
        }
        if self.email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err("email is not a valid address".to_string());
        }
        if let Some(rate) = self.rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err("Rate must be zero or more".to_string());
            }
        }
        Ok(())
    }
}

/// Profile as returned by the API. Unset optional text is normalised to `""`
/// and the role is reported only if it is valid.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<Role>,
    pub job: Option<String>,
    pub country: String,
    pub mobile: String,
    pub description: String,
    pub rate: Option<f64>,
    pub profile_image: Option<String>,
    pub image: String,
    pub created_at: DateTimeUtc,
}

impl From<Model> for ProfileResponse {
    fn from(m: Model) -> Self {
        let role = m.role().ok();
        let image = m
            .profile_image
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string());
        Self {
            id: m.id,
            email: m.email.unwrap_or_default(),
            first_name: m.first_name,
            last_name: m.last_name,
            role,
            job: m.job,
            country: m.country,
            mobile: m.mobile,
            description: m.description.unwrap_or_default(),
            rate: m.rate.filter(|r| r.is_finite()),
            profile_image: m.profile_image,
            image,
            created_at: m.created_at,
        }
    }
}

/// What anyone may see of a freelancer. Contact details stay private.
#[derive(Debug, Clone, Serialize)]
pub struct PublicProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub job: Option<String>,
    pub description: String,
    pub rate: Option<f64>,
    pub profile_image: Option<String>,
    pub image: String,
}

impl From<Model> for PublicProfile {
    fn from(m: Model) -> Self {
        let image = m
            .profile_image
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string());
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            job: m.job,
            description: m.description.unwrap_or_default(),
            rate: m.rate.filter(|r| r.is_finite()),
            profile_image: m.profile_image,
            image,
        }
    }
}

/// Compact card used in freelancer listings.
#[derive(Debug, Clone, Serialize)]
pub struct FreelancerCard {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub job: Option<String>,
    pub rate: f64,
    pub image: String,
    pub profile_path: String,
}

impl From<&Model> for FreelancerCard {
    fn from(m: &Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name.clone(),
            last_name: m.last_name.clone(),
            job: m.job.clone(),
            rate: m.rate.filter(|r| r.is_finite()).unwrap_or(0.0),
            image: m
                .profile_image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string()),
            profile_path: format!("/freelancer/{}/profile", m.id),
        }
    }
}

/// Sidebar entries for the profile's role, empty if the role is invalid.
pub fn navigation_for(profile: &Model) -> Vec<NavItem> {
    profile
        .role()
        .map(|role| role.navigation(profile.id))
        .unwrap_or_default()
}

/// Input to profile provisioning: an auth identity plus whatever it was
/// signed up with.
#[derive(Debug, Clone)]
pub struct ProvisionProfile {
    pub id: Uuid,
    pub email: Option<String>,
    pub metadata: SignupMetadata,
}

impl From<&AuthUser> for ProvisionProfile {
    fn from(user: &AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            metadata: user.user_metadata.clone(),
        }
    }
}
