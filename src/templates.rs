use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::movie,
    models::{AddForm, EditForm, FormErrors, MAX_RATING, MIN_RATING},
    ranking::RankedMovie,
    tmdb::SearchResult,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON: &str = "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn home_page(movies: &[RankedMovie]) -> String {
    page(
        "My Top Movies",
        html! {
            div class="max-w-4xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                        p class="mt-2 text-gray-600" { "These are my all time favourite movies." }
                    }
                    a class=(BUTTON) href="/add" { "Add Movie" }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies yet. Add one to start your list." }
                    }
                } @else {
                    div class="mt-10 space-y-6" {
                        @for ranked in movies {
                            (movie_card(ranked))
                        }
                    }
                }
            }
        },
    )
}

fn movie_card(ranked: &RankedMovie) -> Markup {
    let movie = &ranked.movie;
    html! {
        div class="bg-white shadow rounded-lg overflow-hidden flex" id=(format!("movie-{}", movie.id)) {
            @if let Some(poster) = &movie.img {
                img class="w-40 object-cover" src=(poster) alt=(movie.title.as_deref().unwrap_or("poster"));
            }
            div class="p-6 flex-1" {
                p class="text-5xl font-bold text-gray-300" data-rank=(ranked.rank) { (ranked.rank) }
                h2 class="mt-2 text-xl font-semibold text-gray-900" {
                    (movie.title.as_deref().unwrap_or("Untitled"))
                    @if let Some(year) = movie.year {
                        span class="ml-2 font-normal text-gray-500" { "(" (year) ")" }
                    }
                }
                @if let Some(rating) = movie.rating {
                    p class="mt-1 text-sm font-medium text-yellow-600" data-rating=(rating) { (rating) " / 10" }
                } @else {
                    p class="mt-1 text-sm text-gray-500" { "Not rated yet" }
                }
                @if let Some(review) = &movie.review {
                    p class="mt-2 italic text-gray-700" { "\u{201c}" (review) "\u{201d}" }
                }
                @if let Some(description) = &movie.description {
                    p class="mt-4 text-sm text-gray-600" { (description) }
                }
                div class="mt-4 flex gap-4 text-sm" {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("/edit/{}", movie.id)) { "Update" }
                    a class="text-red-600 hover:text-red-800" href=(format!("/delete/{}", movie.id)) { "Delete" }
                }
            }
        }
    }
}

pub fn add_page(form: &AddForm, errors: &FormErrors, csrf_token: &str) -> String {
    page(
        "Add Movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }
                    (form_error(errors))
                    form class="mt-8 space-y-6" method="post" action="/add" {
                        input type="hidden" name="csrf_token" value=(csrf_token);
                        div {
                            label class="block text-sm font-medium text-gray-700" for="title" { "Movie Title" }
                            input class=(INPUT) name="title" id="title" value=(form.title) required;
                            (field_error(errors, "title"))
                        }
                        button class=(BUTTON) type="submit" { "Add Movie" }
                    }
                }
            }
        },
    )
}

pub fn select_page(query: &str, candidates: &[SearchResult]) -> String {
    page(
        "Select Movie",
        html! {
            div class="max-w-3xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                        p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }
                    }
                    a class="text-sm text-blue-600 hover:text-blue-800" href="/add" { "New search" }
                }

                @if candidates.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies matched that title." }
                    }
                } @else {
                    ul class="mt-10 space-y-4" {
                        @for candidate in candidates {
                            li class="bg-white shadow rounded-lg p-6" {
                                a class="text-lg font-semibold text-blue-600 hover:text-blue-800" href=(format!("/make/{}", candidate.id)) {
                                    (candidate.original_title)
                                    @if let Some(date) = candidate.release_date.as_deref().filter(|d| !d.is_empty()) {
                                        span class="ml-2 font-normal text-gray-500" { "- " (date) }
                                    }
                                }
                                @if let Some(overview) = &candidate.overview {
                                    p class="mt-2 text-sm text-gray-600" { (overview) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn edit_page(
    movie: &movie::Model,
    form: &EditForm,
    errors: &FormErrors,
    csrf_token: &str,
) -> String {
    let title = movie.title.as_deref().unwrap_or("Untitled");
    page(
        "Edit Movie",
        html! {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { (title) }
                    p class="mt-2 text-gray-600" { "Edit Movie Rating" }
                    (form_error(errors))
                    form class="mt-8 space-y-6" method="post" action=(format!("/edit/{}", movie.id)) {
                        input type="hidden" name="csrf_token" value=(csrf_token);
                        div {
                            label class="block text-sm font-medium text-gray-700" for="rating" { "Your Rating Out of 10 e.g. 7.5" }
                            input class=(INPUT) name="rating" id="rating" type="number" step="0.1" min=(MIN_RATING) max=(MAX_RATING) value=(form.rating);
                            (field_error(errors, "rating"))
                        }
                        div {
                            label class="block text-sm font-medium text-gray-700" for="review" { "Your Review" }
                            input class=(INPUT) name="review" id="review" value=(form.review);
                        }
                        button class=(BUTTON) type="submit" { "Done" }
                    }
                }
            }
        },
    )
}

pub fn error_page(title: &str, message: &str) -> String {
    page(
        title,
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { (title) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="bg-gray-50" { (body) }
        }
    }
    .into_string()
}

fn field_error(errors: &FormErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.get(field) {
            p class="mt-2 text-sm text-red-600" data-error=(field) { (message) }
        }
    }
}

fn form_error(errors: &FormErrors) -> Markup {
    field_error(errors, "csrf_token")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i32, title: &str) -> movie::Model {
        movie::Model {
            id,
            title: Some(title.to_string()),
            year: Some(1999),
            description: Some("A <b>bold</b> story".to_string()),
            rating: Some(8.5),
            ranking: Some(1),
            review: Some("great".to_string()),
            img: Some("https://example.com/p.jpg".to_string()),
        }
    }

    #[test]
    fn home_page_escapes_user_text() {
        let html = home_page(&[RankedMovie { rank: 1, movie: movie(3, "Foo") }]);
        assert!(html.contains("A &lt;b&gt;bold&lt;/b&gt; story"));
        assert!(html.contains("href=\"/edit/3\""));
        assert!(html.contains("href=\"/delete/3\""));
    }

    #[test]
    fn select_page_links_candidates_to_make() {
        let candidates = vec![SearchResult {
            id: 42,
            original_title: "Foo".to_string(),
            release_date: Some("1999-05-01".to_string()),
            overview: None,
            poster_path: None,
        }];
        let html = select_page("foo", &candidates);
        assert!(html.contains("href=\"/make/42\""));
        assert!(!html.contains("No movies matched"));
    }

    #[test]
    fn select_page_renders_empty_state() {
        assert!(select_page("nothing", &[]).contains("No movies matched that title."));
    }

    #[test]
    fn edit_page_shows_inline_errors() {
        let mut errors = FormErrors::default();
        errors.add("rating", crate::models::OUT_OF_RANGE);
        let form = EditForm { rating: "11".to_string(), ..Default::default() };

        let html = edit_page(&movie(1, "Foo"), &form, &errors, "tok");

        assert!(html.contains(crate::models::OUT_OF_RANGE));
        assert!(html.contains("value=\"11\""));
        assert!(html.contains("value=\"tok\""));
    }
}
