#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use reelrank::{
    AppState,
    config::Config,
    db,
    tmdb::{MovieDetails, MovieProvider, ProviderError, SearchResult},
};
use tower::ServiceExt;

pub const PLACEHOLDER: &str = "https://example.com/placeholder.jpg";

#[derive(Default)]
pub struct FakeProvider {
    searches: HashMap<String, Vec<SearchResult>>,
    movies: HashMap<u64, MovieDetails>,
    malformed: HashSet<u64>,
    down: bool,
}

impl FakeProvider {
    pub fn with_search(mut self, title: &str, results: Vec<SearchResult>) -> Self {
        self.searches.insert(title.to_string(), results);
        self
    }

    pub fn with_movie(mut self, details: MovieDetails) -> Self {
        self.movies.insert(details.id, details);
        self
    }

    pub fn with_malformed(mut self, id: u64) -> Self {
        self.malformed.insert(id);
        self
    }

    pub fn down() -> Self {
        Self { down: true, ..Default::default() }
    }
}

#[async_trait]
impl MovieProvider for FakeProvider {
    async fn search(&self, title: &str) -> Result<Vec<SearchResult>, ProviderError> {
        if self.down {
            return Err(ProviderError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(self.searches.get(title).cloned().unwrap_or_default())
    }

    async fn movie(&self, id: u64) -> Result<MovieDetails, ProviderError> {
        if self.down {
            return Err(ProviderError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }
        if self.malformed.contains(&id) {
            let err = serde_json::from_str::<MovieDetails>(r#"{"id": 1}"#).unwrap_err();
            return Err(ProviderError::Decode(err));
        }
        self.movies.get(&id).cloned().ok_or(ProviderError::UnknownMovie(id))
    }
}

pub fn details(id: u64, title: &str, release_date: &str, poster_path: Option<&str>) -> MovieDetails {
    MovieDetails {
        id,
        original_title: title.to_string(),
        release_date: Some(release_date.to_string()),
        overview: Some("d".to_string()),
        poster_path: poster_path.map(str::to_string),
    }
}

pub fn candidate(id: u64, title: &str) -> SearchResult {
    SearchResult {
        id,
        original_title: title.to_string(),
        release_date: Some("2001-01-01".to_string()),
        overview: Some(format!("about {title}")),
        poster_path: None,
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    /// The `name=value` part of the first `Set-Cookie` header.
    pub fn cookie(&self) -> Option<String> {
        let raw = self.headers.get(header::SET_COOKIE)?.to_str().ok()?;
        raw.split(';').next().map(str::to_string)
    }

    pub fn csrf_token(&self) -> Option<String> {
        let marker = r#"name="csrf_token" value=""#;
        let start = self.body.find(marker)? + marker.len();
        let end = self.body[start..].find('"')? + start;
        Some(self.body[start..end].to_string())
    }
}

pub async fn spawn(provider: FakeProvider) -> TestApp {
    let config = Config::from_lookup(|key| match key {
        "TMDB_API_KEY" => Some("test-key".to_string()),
        "SECRET_KEY" => Some("integration test secret".to_string()),
        "PLACEHOLDER_IMAGE_URL" => Some(PLACEHOLDER.to_string()),
        _ => None,
    })
    .unwrap();
    let db = db::connect_and_migrate("sqlite::memory:").await.unwrap();
    let state = AppState::new(Arc::new(config), db, Arc::new(provider));
    TestApp { router: reelrank::router(state.clone()), state }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        TestResponse { status, headers, body: String::from_utf8(bytes.to_vec()).unwrap() }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, cookie: Option<&str>, body: &str) -> TestResponse {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        self.send(req.body(Body::from(body.to_string())).unwrap()).await
    }

    /// Loads a form page and returns its CSRF cookie and token.
    pub async fn csrf(&self, form_uri: &str) -> (String, String) {
        let page = self.get(form_uri).await;
        assert_eq!(page.status, StatusCode::OK, "loading {form_uri}");
        (page.cookie().unwrap(), page.csrf_token().unwrap())
    }

    /// Submits the edit form for `id` the way a browser would.
    pub async fn submit_edit(&self, id: i32, rating: &str, review: &str) -> TestResponse {
        let uri = format!("/edit/{id}");
        let (cookie, token) = self.csrf(&uri).await;
        let body = format!("rating={rating}&review={review}&csrf_token={token}");
        self.post_form(&uri, Some(&cookie), &body).await
    }

    pub async fn search(&self, title: &str) -> TestResponse {
        let (cookie, token) = self.csrf("/add").await;
        self.post_form("/add", Some(&cookie), &format!("title={title}&csrf_token={token}")).await
    }
}
