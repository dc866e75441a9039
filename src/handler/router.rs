//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route matching, standard headers and access logging.

use crate::config::AppState;
use crate::handler::{favicon, generate};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::header::{
    HeaderMap, HeaderName, CONTENT_LENGTH, CONTENT_TYPE, IF_NONE_MATCH, REFERER, USER_AGENT,
};
use hyper::{Method, Request, Response, Version};
use std::net::SocketAddr;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    /// Raw query string, still percent-encoded
    pub query: Option<&'a str>,
    pub content_length: Option<&'a str>,
    pub if_none_match: Option<&'a str>,
}

impl RequestContext<'_> {
    pub fn is_head(&self) -> bool {
        *self.method == Method::HEAD
    }
}

/// Main entry point for HTTP request handling
///
/// The request body is never read; only the head matters to this server.
pub fn handle_request<B>(
    req: &Request<B>,
    state: &AppState,
    peer_addr: SocketAddr,
) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let headers = req.headers();

    let ctx = RequestContext {
        method: req.method(),
        path: req.uri().path(),
        query: req.uri().query(),
        content_length: header_str(headers, CONTENT_LENGTH),
        if_none_match: header_str(headers, IF_NONE_MATCH),
    };

    let mut response = route_request(&ctx, state);
    http::apply_standard_headers(&mut response, &state.config.http.server_name);

    if state.config.logging.access_log {
        let mut entry =
            AccessLogEntry::new(peer_addr.ip().to_string(), ctx.method.as_str(), ctx.path);
        entry.query = ctx.query.map(ToString::to_string);
        entry.http_version = version_label(req.version());
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.content_type = header_str(response.headers(), CONTENT_TYPE).map(ToString::to_string);
        entry.referer = header_str(headers, REFERER).map(ToString::to_string);
        entry.user_agent = header_str(headers, USER_AGENT).map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    response
}

/// Route request based on path and configuration
pub fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(ctx.method) {
        return resp;
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(ctx.content_length, state.config.http.max_body_size) {
        return resp;
    }

    // 3. Health probes
    let routes = &state.config.routes;
    if routes.health.enabled
        && (ctx.path == routes.health.liveness_path || ctx.path == routes.health.readiness_path)
    {
        return http::build_health_response();
    }

    // 4. Favicon
    if routes.favicon_paths.iter().any(|p| ctx.path == p) {
        return favicon::serve_favicon(ctx);
    }

    // 5. Generator
    if ctx.path == state.config.qr.path {
        return generate::serve_qr(ctx, state);
    }

    http::build_404_response()
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    content_length: Option<&str>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let size_str = content_length?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        Ok(_) => None,
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
    }
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
