use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{debug, info};

use crate::{
    AppState, csrf,
    error::{AppError, AppResult},
    models::{AddForm, EditForm, FormErrors, NewMovie},
    ranking, templates,
};

pub async fn home(State(state): State<AppState>) -> AppResult<Html<String>> {
    let ranked = ranking::rank(state.store.list_by_rating().await?);
    state.store.sync_rankings(&ranked).await?;
    debug!(movies = ranked.len(), "rendering ranked list");
    Ok(Html(templates::home_page(&ranked)))
}

pub async fn add_form(jar: SignedCookieJar) -> impl IntoResponse {
    let (jar, token) = csrf::issue(jar);
    (jar, Html(templates::add_page(&AddForm::default(), &FormErrors::default(), &token)))
}

pub async fn add_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AddForm>,
) -> AppResult<Response> {
    let csrf_ok = csrf::verify(&jar, &form.csrf_token);
    let title = match form.validate(csrf_ok) {
        Ok(title) => title,
        Err(errors) => {
            let (jar, token) = csrf::issue(jar);
            return Ok((jar, Html(templates::add_page(&form, &errors, &token))).into_response());
        },
    };

    let candidates = state.provider.search(&title).await?;
    info!(title = %title, candidates = candidates.len(), "movie search");
    Ok(Html(templates::select_page(&title, &candidates)).into_response())
}

pub async fn make(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> AppResult<Redirect> {
    let provider_id: u64 = movie_id
        .parse()
        .map_err(|_| AppError::NotFound(format!("provider movie {movie_id}")))?;

    let details = state.provider.movie(provider_id).await?;
    let new = NewMovie::from_details(
        details,
        &state.config.tmdb_image_base_url,
        &state.config.placeholder_image_url,
    );
    let movie = state.store.create(new).await?;

    info!(id = movie.id, provider_id = provider_id, "movie added");
    Ok(Redirect::to(&format!("/edit/{}", movie.id)))
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    jar: SignedCookieJar,
) -> AppResult<impl IntoResponse> {
    let movie = state.store.get(parse_id(&movie_id)?).await?;
    let form = EditForm {
        rating: movie.rating.map(|r| r.to_string()).unwrap_or_default(),
        review: movie.review.clone().unwrap_or_default(),
        csrf_token: String::new(),
    };

    let (jar, token) = csrf::issue(jar);
    Ok((jar, Html(templates::edit_page(&movie, &form, &FormErrors::default(), &token))))
}

pub async fn edit_submit(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    jar: SignedCookieJar,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let movie = state.store.get(parse_id(&movie_id)?).await?;

    let csrf_ok = csrf::verify(&jar, &form.csrf_token);
    match form.validate(csrf_ok) {
        Ok(review) => {
            state.store.update_review(movie.id, review).await?;
            info!(id = movie.id, "movie rating updated");
            Ok(Redirect::to("/").into_response())
        },
        Err(errors) => {
            debug!(id = movie.id, ?errors, "edit rejected");
            let (jar, token) = csrf::issue(jar);
            Ok((jar, Html(templates::edit_page(&movie, &form, &errors, &token))).into_response())
        },
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> AppResult<Redirect> {
    let id = parse_id(&movie_id)?;
    state.store.delete(id).await?;
    info!(id = id, "movie deleted");
    Ok(Redirect::to("/"))
}

/// Non-numeric ids never match a stored movie.
fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse().map_err(|_| AppError::NotFound(format!("movie {raw}")))
}
