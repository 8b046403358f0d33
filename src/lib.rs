pub mod config;
pub mod csrf;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod ranking;
pub mod routes;
pub mod store;
pub mod templates;
pub mod tmdb;

use std::sync::Arc;

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::MovieStore, tmdb::MovieProvider};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
    pub provider: Arc<dyn MovieProvider>,
    cookie_key: Key,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        db: DatabaseConnection,
        provider: Arc<dyn MovieProvider>,
    ) -> Self {
        let cookie_key = csrf::signing_key(&config.secret_key);
        Self { config, store: MovieStore::new(db), provider, cookie_key }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/add", get(routes::add_form).post(routes::add_submit))
        .route("/make/{movie_id}", get(routes::make).post(routes::make))
        .route("/edit/{movie_id}", get(routes::edit_form).post(routes::edit_submit))
        .route("/delete/{movie_id}", get(routes::delete))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
