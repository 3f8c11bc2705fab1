//! HTTP response handlers.

use crate::utils::mime::{self, types};
use anyhow::{Result, anyhow};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Respond with bundle or asset content.
pub fn respond_content(request: Request, mimetype: &str, body: String) -> Result<()> {
    let content_type = mime::content_type(mimetype);
    if is_head_request(&request) {
        return send_head(request, 200, &content_type);
    }
    send_body(request, 200, &content_type, body.into_bytes())
}

/// Respond with a plain 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 404, types::PLAIN);
    }
    send_body(request, 404, types::PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(
        request,
        503,
        types::PLAIN,
        b"503 Service Unavailable".to_vec(),
    )
}

/// Respond with 500. The error chain is only shown in debug mode.
pub fn respond_processing_error(
    request: Request,
    error: &anyhow::Error,
    debug: bool,
) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 500, types::HTML);
    }

    let body = if debug {
        let error_str = format!("{error:#}");
        let msg = crate::utils::html::escape(&error_str);
        format!("<html><body><h1>Processing Error</h1><pre>{msg}</pre></body></html>")
    } else {
        "<html><body><h1>500 Internal Server Error</h1></body></html>".to_owned()
    };
    send_body(request, 500, types::HTML, body.into_bytes())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(request: Request, status: u16, content_type: &str, body: Vec<u8>) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &str, value: &str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid `{key}` header value `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_header() {
        let header = make_header("Content-Type", "text/css; charset=utf-8").unwrap();
        assert_eq!(header.value.as_str(), "text/css; charset=utf-8");
        assert!(make_header("Content-Type", "tëxt/css").is_err());
    }
}
