use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::{error, warn};

use crate::tmdb::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("the movie database is unavailable: {0}")]
    Upstream(ProviderError),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::UnknownMovie(id) => Self::NotFound(format!("provider movie {id}")),
            other => Self::Upstream(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (title, message) = match &self {
            AppError::NotFound(_) => ("Not found", self.to_string()),
            AppError::Upstream(err) => {
                warn!(error = %err, "upstream unavailable");
                ("Movie database unavailable", self.to_string())
            },
            AppError::Database(err) => {
                error!(error = %err, "database failure");
                ("Error", "Something went wrong while talking to the database.".to_string())
            },
        };
        let body = crate::templates::error_page(title, &message);
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
