//! QR generator endpoint
//!
//! Turns the request query into either the HTML page or a file download.

use crate::config::AppState;
use crate::handler::page;
use crate::handler::router::RequestContext;
use crate::http::{self, response};
use crate::logger;
use crate::qr::{self, QrRequest, Rendered};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Serve the generator endpoint
pub fn serve_qr(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let request = QrRequest::from_query(ctx.query);

    match qr::render(
        &request,
        &state.encoder,
        &state.codec,
        state.config.qr.jpeg_quality,
    ) {
        Ok(Rendered::Page { preview_png }) => {
            let html = page::render_page(request.data.as_deref(), preview_png.as_deref());
            response::build_html_response(html, ctx.is_head())
        }
        Ok(Rendered::Download(attachment)) => {
            let content_type = attachment.content_type();
            response::build_attachment_response(
                attachment.body,
                content_type,
                &attachment.filename,
                ctx.is_head(),
            )
        }
        Err(e) => {
            let len = request.data.as_deref().map_or(0, str::len);
            logger::log_error(&format!("QR generation failed ({len} byte payload): {e}"));
            http::build_500_response()
        }
    }
}
