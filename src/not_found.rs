//! Defines the template and route handler for the 404 not found page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// Renders the 404 page.
pub struct NotFoundError;

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        (
            StatusCode::NOT_FOUND,
            error_view(
                "Not Found",
                "404",
                "Sorry, that page does not exist.",
                "Check the address, or head back to the expenses page.",
            ),
        )
            .into_response()
    }
}

/// The fallback route handler for unknown paths.
pub async fn get_404_not_found() -> Response {
    NotFoundError.into_response()
}
