use std::path::PathBuf;

use crate::domain::errors::ConnectionError;
use crate::domain::request::{Method, Request};
use crate::domain::resource::ResolvedResource;
use crate::domain::status::StatusCode;
use crate::infrastructure::server_impl::response::Response;

/// What the handler has to do once a request has been classified.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Respond(Response),
    /// Remove the file. No response and no log entry follow.
    Delete(PathBuf),
}

/// Decides the outcome for `request`. The checks run in a fixed order and the
/// first one that matches wins: a missing resource is a 404 for every method,
/// including ones that would otherwise get a 501.
pub async fn route(
    request: &Request,
    resource: ResolvedResource,
) -> Result<Outcome, ConnectionError> {
    if !resource.exists() {
        return Ok(Outcome::Respond(Response::header_only(
            StatusCode::NotFound,
            &resource,
        )));
    }

    let outcome = match request.method() {
        Some(Method::GET) => {
            let body = tokio::fs::read(&resource.path).await?;
            Outcome::Respond(Response::with_body(StatusCode::Ok, &resource, body.into()))
        }
        Some(Method::HEAD) => Outcome::Respond(Response::header_only(StatusCode::Ok, &resource)),
        Some(Method::DELETE) => Outcome::Delete(resource.path),
        None => Outcome::Respond(Response::header_only(
            StatusCode::NotImplemented,
            &resource,
        )),
    };

    Ok(outcome)
}
