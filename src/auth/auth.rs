use std::ops::Deref;

use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

use crate::auth::session::Session;
use crate::shell::layout;

/// The session admitted by the role gate for this request.
pub struct CurrentUser(pub Session);

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Session>() {
            Some(session) => ready(Ok(CurrentUser(session.clone()))),
            None => ready(Err(InternalError::from_response(
                "Not signed in",
                layout::redirect("/login"),
            )
            .into())),
        }
    }
}

impl Deref for CurrentUser {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.0
    }
}
