/// Credential and session service
///
/// Signup is gated by the bootstrap admin identifier, login mints HS256
/// access tokens, and `authorize` resolves a bearer token to a live account.
/// Without a signing secret every token check fails closed.
use crate::config::BootstrapAdminConfig;
use crate::db::AccountRepository;
use crate::error::{AppError, Result};
use crate::models::account::normalize_email;
use crate::models::{Account, AccountResponse, LoginRequest, LoginResponse, NewAccount, SignupRequest};
use crate::security::password;
use crate::security::TokenRevocationStore;
use crypto_core::{Claims, JwtManager, VALIDATION_LEEWAY_SECS};
use std::sync::Arc;
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const INVALID_TOKEN: &str = "Invalid or expired token";

/// Account resolved from a valid token
#[derive(Debug, Clone)]
pub struct Session {
    pub account: Account,
    pub claims: Claims,
}

#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    jwt: Option<Arc<JwtManager>>,
    revocations: Arc<dyn TokenRevocationStore>,
    admin_id: Option<String>,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        jwt: Option<Arc<JwtManager>>,
        revocations: Arc<dyn TokenRevocationStore>,
        admin_id: Option<String>,
    ) -> Self {
        if jwt.is_none() {
            tracing::warn!("JWT secret not configured; all authenticated requests will be rejected");
        }
        if admin_id.is_none() {
            tracing::warn!("ADMIN_ID not configured; signup is disabled");
        }

        Self {
            accounts,
            jwt,
            revocations,
            admin_id,
        }
    }

    /// Create a non-admin account on behalf of the bootstrap admin
    pub async fn signup(&self, mut req: SignupRequest) -> Result<AccountResponse> {
        let authorized = match (&self.admin_id, &req.admin_id) {
            (Some(expected), Some(presented)) => expected == presented,
            _ => false,
        };
        if !authorized {
            tracing::warn!("signup rejected: admin identifier mismatch");
            return Err(AppError::Unauthorized(
                "Only the administrator can create accounts".to_string(),
            ));
        }

        req.name = req.name.trim().to_string();
        req.validate()?;

        let email = normalize_email(&req.email);
        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_blocking(req.password).await?;
        let account = self
            .accounts
            .insert(NewAccount {
                name: req.name,
                email,
                password_hash,
                // Signup never grants admin rights
                is_admin: false,
            })
            .await?;

        tracing::info!(account_id = %account.id, "account created");
        Ok(account.into())
    }

    /// Exchange credentials for an access token
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse> {
        let jwt = self
            .jwt
            .as_ref()
            .ok_or_else(|| AppError::Internal("JWT secret is not configured".to_string()))?;

        let email = normalize_email(&req.email);
        let Some(account) = self.accounts.find_by_email(&email).await? else {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_blocking(req.password, account.password_hash.clone()).await? {
            tracing::info!(account_id = %account.id, "login failed: wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = jwt.generate_access_token(account.id)?;
        tracing::info!(account_id = %account.id, "login succeeded");

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.access_token_ttl_secs(),
        })
    }

    /// Resolve a bearer token to a live account
    ///
    /// `Unauthorized` for a missing, invalid, expired or revoked token or a
    /// deleted account; `Forbidden` when `require_admin` is set and the
    /// account is not an admin.
    pub async fn authorize(&self, token: Option<&str>, require_admin: bool) -> Result<Session> {
        let Some(jwt) = self.jwt.as_ref() else {
            return Err(AppError::Unauthorized(INVALID_TOKEN.to_string()));
        };

        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

        let claims = jwt
            .validate_token(token)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AppError::Unauthorized(INVALID_TOKEN.to_string())
            })?
            .claims;

        if self.revocations.is_revoked(&claims.jti).await? {
            return Err(AppError::Unauthorized(INVALID_TOKEN.to_string()));
        }

        let account_id = claims
            .subject_id()
            .map_err(|_| AppError::Unauthorized(INVALID_TOKEN.to_string()))?;

        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;

        if require_admin && !account.is_admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(Session { account, claims })
    }

    /// Revoke the session's token for as long as validation would still accept it
    pub async fn logout(&self, session: &Session) -> Result<()> {
        let ttl_secs = session.claims.remaining_secs() + VALIDATION_LEEWAY_SECS;
        self.revocations
            .revoke(&session.claims.jti, ttl_secs)
            .await?;
        tracing::info!(account_id = %session.account.id, "logged out");
        Ok(())
    }

    /// Create the configured administrator if it does not exist yet
    pub async fn ensure_bootstrap_admin(&self, admin: &BootstrapAdminConfig) -> Result<()> {
        let email = normalize_email(&admin.email);
        if self.accounts.find_by_email(&email).await?.is_some() {
            tracing::debug!("bootstrap admin already present");
            return Ok(());
        }

        let password_hash = hash_blocking(admin.password.clone()).await?;
        let account = self
            .accounts
            .insert(NewAccount {
                name: admin.name.clone(),
                email,
                password_hash,
                is_admin: true,
            })
            .await?;

        tracing::info!(account_id = %account.id, "bootstrap admin created");
        Ok(())
    }
}

async fn hash_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
}

async fn verify_blocking(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("verification task failed: {e}")))?
}
