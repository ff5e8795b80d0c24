use std::{fmt, str::FromStr, sync::Arc};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{config::AppConfig, dto::auth::Claims, error::AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Customer,
    Designer,
    StaffDesigner,
    Admin,
    Inventory,
    Financial,
    Delivery,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Customer,
        Role::Designer,
        Role::StaffDesigner,
        Role::Admin,
        Role::Inventory,
        Role::Financial,
        Role::Delivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Designer => "designer",
            Role::StaffDesigner => "staff-designer",
            Role::Admin => "admin",
            Role::Inventory => "inventory",
            Role::Financial => "financial",
            Role::Delivery => "delivery",
        }
    }

    /// Roles that work on the back office rather than shop.
    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Customer | Role::Designer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid role '{s}'")))
    }
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }
}

/// Passes when the caller holds one of `roles`; admins always pass.
pub fn ensure_role(user: &AuthUser, roles: &[Role]) -> Result<(), AppError> {
    if user.role == Role::Admin || roles.contains(&user.role) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[Role::Admin])
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppConfig>: FromRef<S>,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::Unauthorized("Invalid Authorization scheme".into()));
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let config = Arc::<AppConfig>::from_ref(state);
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;
        let role = decoded
            .claims
            .role
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid role in token".into()))?;

        Ok(AuthUser { user_id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn admin_passes_every_check() {
        assert!(ensure_role(&user(Role::Admin), &[Role::Financial]).is_ok());
        assert!(ensure_role(&user(Role::Financial), &[Role::Financial]).is_ok());
        assert!(matches!(
            ensure_role(&user(Role::Customer), &[Role::Financial, Role::Inventory]),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            assert_eq!(
                serde_json::to_string(&role).unwrap(),
                format!("\"{}\"", role.as_str())
            );
        }
        assert!("superuser".parse::<Role>().is_err());
    }
}
