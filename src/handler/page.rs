//! Generator page rendering
//!
//! Fills the embedded HTML template. Output depends only on the inputs, so
//! identical requests yield identical pages.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use url::form_urlencoded;

const TEMPLATE: &str = include_str!("page.html");

/// Render the page. `preview_png` is present whenever `data` was submitted.
pub fn render_page(data: Option<&str>, preview_png: Option<&[u8]>) -> String {
    let value = data.map(escape_html).unwrap_or_default();

    let (actions, preview) = match (data, preview_png) {
        (Some(data), Some(png)) => (download_links(data), preview_block(png)),
        _ => (String::new(), String::new()),
    };

    // User input goes in last so it is never scanned for placeholders
    TEMPLATE
        .replace("{{preview}}", &preview)
        .replace("{{actions}}", &actions)
        .replace("{{value}}", &value)
}

/// Main JPEG download button plus one link per format
fn download_links(data: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(data.as_bytes()).collect();
    let base = format!("?data={encoded}&amp;download=1");

    format!(
        r#"                    <a class="btn" href="{base}">Download QR (JPEG)</a>
                    <div class="formats">
                        <a class="format" href="{base}&amp;format=png">PNG</a>
                        <a class="format" href="{base}&amp;format=svg">SVG</a>
                        <a class="format" href="{base}&amp;format=jpeg">JPEG</a>
                    </div>"#
    )
}

fn preview_block(png: &[u8]) -> String {
    format!(
        r#"        <div class="card preview">
            <img src="data:image/png;base64,{}" alt="QR Code Preview">
            <div class="hint">Scan or download your QR</div>
        </div>"#,
        STANDARD.encode(png)
    )
}

/// Escape text for use in element content and quoted attributes
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
