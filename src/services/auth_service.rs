use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest},
    entity::{Users, users},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, Role},
    models::user::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 6;
const TOKEN_TTL_HOURS: i64 = 24;

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub fn issue_token(secret: &str, user_id: Uuid, role: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub(crate) struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
}

/// Validates and inserts a user of any role; callers decide which roles they allow.
pub(crate) async fn insert_user(state: &AppState, new_user: NewUser) -> AppResult<users::Model> {
    let name = new_user.name.trim().to_string();
    let email = new_user.email.trim().to_lowercase();
    if name.is_empty() {
        return Err(AppError::bad_request("Name is required"));
    }
    if !email.contains('@') {
        return Err(AppError::bad_request("A valid email is required"));
    }
    if new_user.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(
            "Password must be at least 6 characters",
        ));
    }

    let exists = Users::find()
        .filter(users::Column::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;
    if exists.is_some() {
        return Err(AppError::bad_request("Email is already taken"));
    }

    let user = users::ActiveModel {
        name: Set(name),
        email: Set(email),
        password_hash: Set(hash_password(&new_user.password)?),
        phone: Set(new_user.phone),
        address: Set(new_user.address),
        role: Set(new_user.role.as_str().to_string()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(user)
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let role = match payload.role.as_deref() {
        None | Some("") => Role::Customer,
        Some(raw) => raw.parse::<Role>()?,
    };
    if !matches!(role, Role::Customer | Role::Designer) {
        return Err(AppError::bad_request(
            "Only customer or designer accounts can be registered",
        ));
    }

    let user = insert_user(
        state,
        NewUser {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            phone: payload.phone,
            address: payload.address,
            role,
        },
    )
    .await?;

    audit::record(
        &state.pool,
        user.id,
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id, "role": user.role }),
    )
    .await;
    tracing::info!(user_id = %user.id, role = %user.role, "user registered");
    Ok(ApiResponse::success("User created", user.into(), None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let user = Users::find()
        .filter(users::Column::Email.eq(email.trim().to_lowercase()))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::bad_request("Invalid email or password"))?;

    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::bad_request("Invalid email or password"));
    }

    let token = issue_token(&state.config.jwt_secret, user.id, &user.role)?;

    audit::record(
        &state.pool,
        user.id,
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token,
            user: user.into(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn me(state: &AppState, auth: &AuthUser) -> AppResult<ApiResponse<User>> {
    let user = Users::find_by_id(auth.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("OK", user.into(), Some(Meta::empty())))
}

pub async fn update_me(
    state: &AppState,
    auth: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<User>> {
    let user = Users::find_by_id(auth.user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: users::ActiveModel = user.into();
    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request("Name cannot be empty"));
        }
        active.name = Set(name);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(password) = payload.password {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::bad_request(
                "Password must be at least 6 characters",
            ));
        }
        active.password_hash = Set(hash_password(&password)?);
    }
    let user = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        user.id,
        "user_update_profile",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;
    Ok(ApiResponse::success("Profile updated", user.into(), None))
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{DecodingKey, Validation, decode};

    use super::*;

    #[test]
    fn passwords_hash_and_verify() {
        let hash = hash_password("s3cret!").unwrap();
        assert!(verify_password("s3cret!", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn tokens_carry_subject_and_role() {
        let id = Uuid::new_v4();
        let token = issue_token("test-secret", id, "inventory").unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(decoded.claims.sub, id.to_string());
        assert_eq!(decoded.claims.role, "inventory");
    }
}
