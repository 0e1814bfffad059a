//! Bearer authentication middleware for protecting API endpoints.
//!
//! The middleware hands the `Authorization` header to the core
//! `RequestGate` and, on success, binds the resulting `AuthContext` to the
//! request. Handlers read it back through the `Authenticated` extractor.
//!
//! The gate comes either from the middleware itself (`JwtAuth::with_gate`)
//! or from application data (`web::Data<RequestGate>`).

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use ak_core::errors::DomainError;
use ak_core::services::gate::{AuthContext, RequestGate};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    ops::Deref,
    rc::Rc,
    task::{Context, Poll},
};

use crate::handlers::error::{handle_domain_error, unauthorized_response};

/// Authentication middleware factory
#[derive(Clone, Default)]
pub struct JwtAuth {
    gate: Option<RequestGate>,
}

impl JwtAuth {
    /// Uses the `RequestGate` registered as application data
    pub fn new() -> Self {
        Self { gate: None }
    }

    /// Uses the given gate regardless of application data
    pub fn with_gate(gate: RequestGate) -> Self {
        Self { gate: Some(gate) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            gate: self.gate.clone(),
        }))
    }
}

/// Authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    gate: Option<RequestGate>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let gate = self
            .gate
            .clone()
            .or_else(|| req.app_data::<web::Data<RequestGate>>().map(|g| g.get_ref().clone()));

        Box::pin(async move {
            let Some(gate) = gate else {
                log::error!("JwtAuth mounted without a RequestGate");
                let response = handle_domain_error(DomainError::Internal {
                    message: "request gate not configured".to_string(),
                });
                return Ok(req.into_response(response).map_into_right_body());
            };

            let header = authorization_header(&req);
            match gate.authenticate(header.as_deref()) {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(_) => {
                    log::debug!("Rejected {} {}: unauthorized", req.method(), req.path());
                    Ok(req
                        .into_response(unauthorized_response())
                        .map_into_right_body())
                }
            }
        })
    }
}

/// Raw `Authorization` header value, if it is valid text
fn authorization_header(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .map(|s| s.to_string())
}

/// Extractor for the identity bound by `JwtAuth`
///
/// Extracting it on a request that did not pass the middleware is a wiring
/// bug and fails with a 500.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthContext);

impl Authenticated {
    pub fn into_inner(self) -> AuthContext {
        self.0
    }
}

impl Deref for Authenticated {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| {
                log::error!("No AuthContext bound for {} {}", req.method(), req.path());
                let response = handle_domain_error(DomainError::Internal {
                    message: "authentication context missing".to_string(),
                });
                actix_web::error::InternalError::from_response("authentication context missing", response)
                    .into()
            });

        ready(result)
    }
}
