use sea_orm::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::routing::Role;
use crate::models::profiles::{self, ProvisionProfile, UpdateProfile};

#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
    #[error("failed to create profile {id}: {source}")]
    Insert {
        id: Uuid,
        #[source]
        source: DbErr,
    },
}

/// Make sure a profile row exists for a freshly signed-in identity.
///
/// An existing row is returned untouched. A missing row, or a failed read,
/// leads to one insert built from the sign-up metadata. The read and the
/// insert are separate statements, so two simultaneous first logins can both
/// try to insert; the primary key decides which one wins.
pub async fn provision_profile(
    db: &DatabaseConnection,
    input: ProvisionProfile,
) -> Result<profiles::Model, ProvisioningError> {
    match profiles::Entity::find_by_id(input.id).one(db).await {
        Ok(Some(existing)) => return Ok(existing),
        Ok(None) => debug!("No profile for {}, creating one", input.id),
        Err(e) => warn!("Profile lookup for {} failed, creating one: {e}", input.id),
    }

    let id = input.id;
    let meta = input.metadata;
    let new_profile = profiles::ActiveModel {
        id: Set(id),
        email: Set(input.email),
        first_name: Set(meta.first_name.unwrap_or_default()),
        last_name: Set(meta.last_name.unwrap_or_default()),
        role: Set(meta.role.unwrap_or_default()),
        job: Set(meta.job),
        country: Set(meta.country.unwrap_or_default()),
        mobile: Set(meta.mobile.unwrap_or_default()),
        description: Set(None),
        rate: Set(None),
        profile_image: Set(None),
        created_at: Set(chrono::Utc::now()),
    };

    new_profile
        .insert(db)
        .await
        .map_err(|source| ProvisioningError::Insert { id, source })
}

/// Fetch a single profile by ID.
pub async fn get_profile_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find_by_id(id).one(db).await
}

/// Read only the stored role string for a profile.
pub async fn get_profile_role(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<String>, DbErr> {
    Ok(get_profile_by_id(db, id).await?.map(|p| p.role))
}

/// Fetch the profiles for a set of IDs, keyed by ID. Unknown IDs are skipped.
pub async fn get_profiles_by_ids(
    db: &DatabaseConnection,
    ids: impl IntoIterator<Item = Uuid>,
) -> Result<HashMap<Uuid, profiles::Model>, DbErr> {
    let ids: HashSet<Uuid> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let found = profiles::Entity::find()
        .filter(profiles::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(found.into_iter().map(|p| (p.id, p)).collect())
}

/// Fetch every profile with the freelancer role.
pub async fn get_freelancers(db: &DatabaseConnection) -> Result<Vec<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::Role.eq(Role::Freelancer.as_str()))
        .order_by_asc(profiles::Column::FirstName)
        .all(db)
        .await
}

/// Apply the editable profile fields.
pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProfile,
) -> Result<profiles::Model, DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;

    let mut active: profiles::ActiveModel = profile.into();

    if let Some(first_name) = input.first_name {
        active.first_name = Set(first_name.trim().to_string());
    }
    if let Some(last_name) = input.last_name {
        active.last_name = Set(last_name.trim().to_string());
    }
    if let Some(email) = input.email {
        active.email = Set(Some(email.trim().to_string()));
    }
    if let Some(country) = input.country {
        active.country = Set(country.trim().to_string());
    }
    if let Some(description) = input.description {
        active.description = Set(Some(description));
    }
    if let Some(rate) = input.rate {
        active.rate = Set(Some(rate));
    }

    active.update(db).await
}

/// Point a profile at a newly uploaded picture.
pub async fn set_profile_image(
    db: &DatabaseConnection,
    id: Uuid,
    image_url: String,
) -> Result<profiles::Model, DbErr> {
    let profile = profiles::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Profile not found".to_string()))?;

    let mut active: profiles::ActiveModel = profile.into();
    active.profile_image = Set(Some(image_url));

    active.update(db).await
}
