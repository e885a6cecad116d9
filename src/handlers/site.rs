use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::pages;

pub async fn index_handler() -> Response {
    pages::index(None)
}

pub async fn stylesheet_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        pages::STYLESHEET,
    )
}

// Fallback for unknown paths - the same opaque page the gate serves, so a
// blocked client cannot tell the two apart
pub async fn not_found_handler() -> Response {
    pages::not_found()
}
