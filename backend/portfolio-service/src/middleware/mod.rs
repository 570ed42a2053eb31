/// HTTP middleware and auth extractors for portfolio-service
///
/// `AuthenticatedAccount` and `AdminAccount` resolve the bearer token through
/// `AuthService::authorize`; handlers that take one of them are protected.
/// `RequestLogging` logs every request with its status and latency.
use crate::error::AppError;
use crate::services::{AuthService, Session};
use actix_web::dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{http::header, web, Error, FromRequest, HttpRequest};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

/// Any logged-in account
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount(pub Session);

/// Logged-in account with the admin flag
#[derive(Debug, Clone)]
pub struct AdminAccount(pub Session);

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(|t| t.trim().to_string())
}

async fn resolve(
    auth: Option<web::Data<AuthService>>,
    token: Option<String>,
    require_admin: bool,
) -> Result<Session, AppError> {
    let auth = auth.ok_or_else(|| AppError::Internal("AuthService not configured".to_string()))?;
    auth.authorize(token.as_deref(), require_admin).await
}

impl FromRequest for AuthenticatedAccount {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth = req.app_data::<web::Data<AuthService>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let session = resolve(auth, token, false).await?;
            Ok(AuthenticatedAccount(session))
        })
    }
}

impl FromRequest for AdminAccount {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let auth = req.app_data::<web::Data<AuthService>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let session = resolve(auth, token, true).await?;
            Ok(AdminAccount(session))
        })
    }
}

/// Middleware that logs HTTP requests and responses
#[derive(Clone, Default)]
pub struct RequestLogging;

impl<S, B> Transform<S, ServiceRequest> for RequestLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggingService { service }))
    }
}

pub struct RequestLoggingService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let status = res.status();
            let duration_ms = start.elapsed().as_millis() as u64;

            if status.is_server_error() {
                tracing::error!(method = %method, path = %path, status = status.as_u16(), duration_ms, "request failed");
            } else if status.is_client_error() {
                tracing::warn!(method = %method, path = %path, status = status.as_u16(), duration_ms, "request rejected");
            } else {
                tracing::info!(method = %method, path = %path, status = status.as_u16(), duration_ms, "request completed");
            }

            Ok(res)
        })
    }
}
