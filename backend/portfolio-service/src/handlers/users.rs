/// Account endpoints: signup, login, logout
use crate::error::Result;
use crate::middleware::AuthenticatedAccount;
use crate::models::{LoginRequest, SignupRequest};
use crate::services::AuthService;
use actix_web::{web, HttpResponse};

/// POST /users/signup
pub async fn signup(
    auth: web::Data<AuthService>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse> {
    let account = auth.signup(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(account))
}

/// POST /users/login
pub async fn login(
    auth: web::Data<AuthService>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let response = auth.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /users/logout
pub async fn logout(
    auth: web::Data<AuthService>,
    account: AuthenticatedAccount,
) -> Result<HttpResponse> {
    auth.logout(&account.0).await?;
    Ok(HttpResponse::NoContent().finish())
}
