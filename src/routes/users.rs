use crate::{
    auth::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse},
    error::AppError,
    services::AuthService,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// ## Responses:
/// - `201 Created`: `{"message": "user created successfully"}`.
/// - `409 Conflict`: the username is taken.
/// - `422 Unprocessable Entity`: username or password does not meet the rules.
#[post("/register")]
pub async fn register(
    service: web::Data<AuthService>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    service.register(register_data.into_inner()).await?;
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "user created successfully".into(),
    }))
}

/// Login user
///
/// Returns a bearer token for valid credentials, `401 Unauthorized` otherwise.
#[post("/login")]
pub async fn login(
    service: web::Data<AuthService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let token = service.login(login_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}
