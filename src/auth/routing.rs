use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Who a profile belongs to. Stored in the `users.role` column as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Freelancer,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleError {
    #[error("profile role has not been set")]
    NotSet,
    #[error("profile has an unrecognised role {0:?}")]
    Unknown(String),
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: String,
}

impl Role {
    pub fn parse(raw: &str) -> Result<Self, RoleError> {
        match raw {
            "client" => Ok(Role::Client),
            "freelancer" => Ok(Role::Freelancer),
            "" => Err(RoleError::NotSet),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Freelancer => "freelancer",
        }
    }

    fn dashboard_prefix(self) -> &'static str {
        match self {
            Role::Client => "/client-dashboard",
            Role::Freelancer => "/freelancer-dashboard",
        }
    }

    pub fn dashboard_path(self, id: Uuid) -> String {
        format!("{}/{id}", self.dashboard_prefix())
    }

    /// Sidebar entries for this role. Freelancers additionally get the portfolio page.
    pub fn navigation(self, id: Uuid) -> Vec<NavItem> {
        let base = self.dashboard_path(id);
        let mut items = vec![
            NavItem {
                label: "Dashboard",
                path: base.clone(),
            },
            NavItem {
                label: "Details",
                path: format!("{base}/details"),
            },
        ];
        if self == Role::Freelancer {
            items.push(NavItem {
                label: "Portfolio",
                path: format!("{base}/portfolio"),
            });
        }
        items.push(NavItem {
            label: "Activity",
            path: format!("{base}/activity"),
        });
        items
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a user lands after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub role: Role,
    pub path: String,
}

/// Map a stored role string to the dashboard the user lands on after login.
pub fn route_for(raw_role: &str, id: Uuid) -> Result<Route, RoleError> {
    let role = Role::parse(raw_role)?;
    Ok(Route {
        role,
        path: role.dashboard_path(id),
    })
}
