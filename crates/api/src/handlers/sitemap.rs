//! Sitemap generation.
//!
//! Approved vendor profiles and published blog posts, nothing else; a
//! vendor enters the sitemap the moment the back office approves it.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use sofra_db::repositories::{BlogRepo, VendorRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let base = &state.config.public_base_url;

    let vendor_slugs = VendorRepo::list_approved_slugs(&state.pool).await?;
    let post_slugs = BlogRepo::published_slugs(&state.pool).await?;

    let mut xml = String::with_capacity(256 + 64 * (vendor_slugs.len() + post_slugs.len()));
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    push_url(&mut xml, base, "");
    push_url(&mut xml, base, "/vendors");
    for slug in &vendor_slugs {
        push_url(&mut xml, base, &format!("/vendors/{slug}"));
    }
    for slug in &post_slugs {
        push_url(&mut xml, base, &format!("/blog/{slug}"));
    }
    xml.push_str("</urlset>\n");

    Ok(([(header::CONTENT_TYPE, "application/xml")], xml))
}

fn push_url(xml: &mut String, base: &str, path: &str) {
    xml.push_str("  <url><loc>");
    xml.push_str(base);
    xml.push_str(path);
    xml.push_str("</loc></url>\n");
}
