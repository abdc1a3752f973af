use serde::{Deserialize, Serialize};

/// The account the identity provider vouched for.
///
/// Only the fields Bookit uses are read from the provider's user object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifiedIdentity {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

/// Coarse role derived from the account email.
///
/// Every authenticated identity may use every admin route; the role is
/// exposed to handlers but nothing checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Role {
    Admin,
    User,
}

/// Attached to request extensions by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserContext {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl UserContext {
    pub fn from_identity(identity: VerifiedIdentity, admin_email: Option<&str>) -> Self {
        let is_admin = admin_email
            .is_some_and(|admin| !identity.email.is_empty() && admin.eq_ignore_ascii_case(&identity.email));

        Self {
            user_id: identity.id,
            email: identity.email,
            role: if is_admin { Role::Admin } else { Role::User },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Cheap shape check before anything is sent upstream
    pub fn is_well_formed(&self) -> bool {
        let email = self.email.trim();
        !self.password.is_empty()
            && email
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardResponse {
    pub message: String,
    pub email: String,
}
