//! Embedded favicon, referenced by the generator page

use crate::handler::router::RequestContext;
use crate::http::{cache, response};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

const FAVICON: &[u8] = include_bytes!("favicon.svg");

/// Serve the favicon with `ETag` revalidation
pub fn serve_favicon(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(FAVICON);

    if cache::check_etag_match(ctx.if_none_match, &etag) {
        return response::build_304_response(&etag);
    }

    response::build_cached_response(
        Bytes::from_static(FAVICON),
        "image/svg+xml",
        &etag,
        ctx.is_head(),
    )
}
