use std::sync::Arc;

use log::{info, warn};
use validator::Validate;

use crate::auth::{
    generate_token, hash_password, verify_password, verify_token, Claims, JwtConfig,
    LoginRequest, RegisterRequest,
};
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::repository::UserRepository;

/// Registration, credential checks and session tokens.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            users,
            jwt,
            bcrypt_cost,
        }
    }

    /// Creates an account. A taken username is a `Conflict`.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        if self
            .users
            .get_user_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict("User already exists".into()));
        }

        let password_hash = hash_password(&request.password, self.bcrypt_cost)?;
        let user = self
            .users
            .create_user(&request.username, &password_hash)
            .await?;
        info!("registered user {}", user.username);
        Ok(user)
    }

    /// True only when the user exists and the password matches its hash.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<bool> {
        match self.users.get_user_by_username(username).await? {
            Some(user) => verify_password(password, &user.password_hash),
            None => Ok(false),
        }
    }

    /// Checks the credentials and issues a token for them.
    pub async fn login(&self, request: LoginRequest) -> AppResult<String> {
        request.validate()?;

        if !self
            .verify_credentials(&request.username, &request.password)
            .await?
        {
            warn!("failed login for {:?}", request.username);
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
        self.issue_token(&request.username)
    }

    pub fn issue_token(&self, username: &str) -> AppResult<String> {
        generate_token(&self.jwt, username)
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        verify_token(&self.jwt, token)
    }
}
