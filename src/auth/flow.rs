//! Login and sign-up journeys.
//!
//! A login walks `Idle → Authenticating → Provisioning → Routing` and ends
//! either `Redirected` to the role's dashboard or `Failed` with a message the
//! form can show inline. Nothing is retried; the user simply submits again.

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::routing::{Role, RoleError, route_for};
use crate::db::profiles::{self as profile_db, ProvisioningError};
use crate::models::profiles::{self, ProvisionProfile};
use crate::supabase::RemoteError;
use crate::supabase::auth::{AuthProvider, AuthSession, AuthUser, SignupMetadata};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Idle,
    Authenticating,
    Provisioning,
    Routing,
    Redirected(String),
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    /// The auth service refused the e-mail/password pair; its message is kept as is.
    #[error("{0}")]
    Credentials(String),
    #[error("Authentication service unavailable: {0}")]
    Unavailable(RemoteError),
    #[error("We couldn't finish setting up your account. Please contact support.")]
    Provisioning(#[source] ProvisioningError),
    #[error("Could not read your account role: {0}")]
    RoleLookup(String),
    #[error("Your account has no usable role: {0}")]
    Role(#[from] RoleError),
    #[error("{0}")]
    InvalidSignup(String),
    #[error("{0}")]
    SignupRejected(String),
}

impl AuthFlowError {
    /// The state the flow was in when it failed.
    pub fn failed_at(&self) -> AuthState {
        match self {
            AuthFlowError::Credentials(_) | AuthFlowError::Unavailable(_) => {
                AuthState::Authenticating
            }
            AuthFlowError::Provisioning(_) => AuthState::Provisioning,
            AuthFlowError::RoleLookup(_) | AuthFlowError::Role(_) => AuthState::Routing,
            AuthFlowError::InvalidSignup(_) | AuthFlowError::SignupRejected(_) => AuthState::Idle,
        }
    }
}

/// A finished login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: AuthSession,
    pub profile: profiles::Model,
    pub role: Role,
    pub redirect: String,
}

/// Fields of both sign-up forms. Which ones are required depends on the role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub country: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
}

const COMMON_FIELDS: &[&str] = &["first_name", "last_name", "email", "password", "country"];
const FREELANCER_FIELDS: &[&str] = &["job", "mobile"];

impl SignupForm {
    fn field(&self, name: &str) -> &str {
        match name {
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "email" => &self.email,
            "password" => &self.password,
            "country" => &self.country,
            "mobile" => self.mobile.as_deref().unwrap_or_default(),
            "job" => self.job.as_deref().unwrap_or_default(),
            _ => "",
        }
    }

    /// Fields a sign-up for `role` must fill in.
    pub fn required_fields(role: Role) -> Vec<&'static str> {
        let mut fields = COMMON_FIELDS.to_vec();
        if role == Role::Freelancer {
            fields.extend_from_slice(FREELANCER_FIELDS);
        }
        fields
    }

    pub fn validate(&self, role: Role) -> Result<(), String> {
        if let Some(missing) = Self::required_fields(role)
            .into_iter()
            .find(|f| self.field(f).trim().is_empty())
        {
            return Err(format!("{missing} is required"));
        }
        if !self.email.contains('@') {
            return Err("email is not a valid address".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!("password must be at least {MIN_PASSWORD_LEN} characters"));
        }
        Ok(())
    }

    /// What gets stored with the identity. The password never goes here.
    pub fn metadata(&self, role: Role) -> SignupMetadata {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        SignupMetadata {
            first_name: Some(self.first_name.trim().to_string()),
            last_name: Some(self.last_name.trim().to_string()),
            country: Some(self.country.trim().to_string()),
            mobile: non_empty(&self.mobile),
            role: Some(role.as_str().to_string()),
            job: non_empty(&self.job),
        }
    }
}

pub struct AuthFlow<'a> {
    db: &'a DatabaseConnection,
    auth: &'a dyn AuthProvider,
}

impl<'a> AuthFlow<'a> {
    pub fn new(db: &'a DatabaseConnection, auth: &'a dyn AuthProvider) -> Self {
        Self { db, auth }
    }

    fn enter(&self, state: AuthState) {
        debug!(?state, "auth flow transition");
    }

    /// Run a full login. See the module docs for the states involved.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, AuthFlowError> {
        self.enter(AuthState::Idle);
        let result = self.run_login(email, password).await;
        match &result {
            Ok(outcome) => self.enter(AuthState::Redirected(outcome.redirect.clone())),
            Err(e) => {
                warn!("Login for {email} failed while {:?}: {e}", e.failed_at());
                self.enter(AuthState::Failed);
            }
        }
        result
    }

    async fn run_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, AuthFlowError> {
        self.enter(AuthState::Authenticating);
        let session = self
            .auth
            .sign_in_with_password(email, password)
            .await
            .map_err(|e| match e {
                RemoteError::Rejected { message, .. } => AuthFlowError::Credentials(message),
                other => AuthFlowError::Unavailable(other),
            })?;

        self.enter(AuthState::Provisioning);
        let input = ProvisionProfile::from(&session.user);
        let profile = profile_db::provision_profile(self.db, input)
            .await
            .map_err(AuthFlowError::Provisioning)?;

        // Read the role again rather than trusting the row we just wrote.
        self.enter(AuthState::Routing);
        let raw_role = profile_db::get_profile_role(self.db, session.user.id)
            .await
            .map_err(|e| AuthFlowError::RoleLookup(e.to_string()))?
            .ok_or_else(|| AuthFlowError::RoleLookup("profile not found".to_string()))?;

        let route = route_for(&raw_role, session.user.id)?;
        let (role, redirect) = (route.role, route.path);
        info!("User {} signed in as {role}", session.user.id);

        Ok(LoginOutcome {
            session,
            profile,
            role,
            redirect,
        })
    }

    /// Register a new identity. The profile row itself is created on first login.
    pub async fn signup(&self, role: Role, form: SignupForm) -> Result<AuthUser, AuthFlowError> {
        form.validate(role).map_err(AuthFlowError::InvalidSignup)?;

        let user = self
            .auth
            .sign_up(form.email.trim(), &form.password, form.metadata(role))
            .await
            .map_err(|e| match e {
                RemoteError::Rejected { message, .. } => AuthFlowError::SignupRejected(message),
                other => AuthFlowError::Unavailable(other),
            })?;

        info!("Registered {role} account {}", user.id);
        Ok(user)
    }

    pub async fn logout(&self, access_token: &str) -> Result<(), AuthFlowError> {
        self.auth
            .sign_out(access_token)
            .await
            .map_err(AuthFlowError::Unavailable)
    }
}
