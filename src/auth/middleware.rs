use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use tracing::{debug, warn};

use crate::auth::gate::{GateOutcome, check};
use crate::auth::session::SessionStore;
use crate::model::Role;
use crate::shell::layout;

/// Gate for pages every signed-in role may open.
pub async fn require_any_role(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    gate(req, next, &Role::ALL).await
}

/// Gate for admin and manager pages.
pub async fn require_management(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    gate(req, next, &Role::MANAGEMENT).await
}

async fn gate(
    req: ServiceRequest,
    next: Next<BoxBody>,
    allowed: &[Role],
) -> Result<ServiceResponse<BoxBody>, Error> {
    let session = match req.app_data::<Data<SessionStore>>() {
        Some(store) => store.current(),
        None => {
            return Err(actix_web::error::ErrorInternalServerError(
                "Session store missing",
            ));
        }
    };

    match check(session.as_ref(), allowed) {
        GateOutcome::Allowed => {}
        GateOutcome::NoSession => {
            debug!(path = %req.path(), "No session, redirecting to login");
            let resp = layout::redirect("/login");
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
        GateOutcome::Denied(role) => {
            warn!(path = %req.path(), role = %role, "Access denied");
            let resp = layout::access_denied(role);
            return Ok(req.into_response(resp.map_into_boxed_body()));
        }
    }

    if let Some(session) = session {
        req.extensions_mut().insert(session);
    }

    next.call(req).await
}
