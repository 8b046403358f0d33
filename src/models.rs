use jiff::civil::Date;
use serde::Deserialize;

use crate::tmdb::MovieDetails;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_A_NUMBER: &str = "Not a valid float value.";
pub const OUT_OF_RANGE: &str = "Number must be between 1 and 10.";
pub const CSRF_EXPIRED: &str = "The form has expired, please submit it again.";

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 10.0;

/// Fields fixed when a movie is first added to the list.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub img: String,
}

impl NewMovie {
    pub fn from_details(details: MovieDetails, image_base_url: &str, placeholder: &str) -> Self {
        let img = match details.poster_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => {
                format!("{}/{}", image_base_url.trim_end_matches('/'), path.trim_start_matches('/'))
            },
            _ => placeholder.to_string(),
        };

        Self {
            title: details.original_title,
            year: details.release_date.as_deref().and_then(release_year),
            description: details.overview.filter(|o| !o.trim().is_empty()),
            img,
        }
    }
}

/// Year of a provider `release_date` such as `1999-05-01`.
pub fn release_year(release_date: &str) -> Option<i32> {
    release_date.trim().parse::<Date>().ok().map(|d| i32::from(d.year()))
}

/// Per-field validation messages, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors(Vec<(&'static str, &'static str)>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: &'static str) {
        self.0.push((field, message));
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, m)| *m)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl AddForm {
    pub fn validate(&self, csrf_ok: bool) -> Result<String, FormErrors> {
        let mut errors = FormErrors::default();
        if !csrf_ok {
            errors.add("csrf_token", CSRF_EXPIRED);
        }
        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", REQUIRED);
        }
        errors.into_result(|| title.to_string())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    pub rating: f64,
    pub review: Option<String>,
}

impl EditForm {
    pub fn validate(&self, csrf_ok: bool) -> Result<Review, FormErrors> {
        let mut errors = FormErrors::default();
        if !csrf_ok {
            errors.add("csrf_token", CSRF_EXPIRED);
        }

        let raw = self.rating.trim();
        let rating = if raw.is_empty() {
            errors.add("rating", OUT_OF_RANGE);
            None
        } else {
            match raw.parse::<f64>() {
                Ok(r) if (MIN_RATING..=MAX_RATING).contains(&r) => Some(r),
                Ok(_) => {
                    errors.add("rating", OUT_OF_RANGE);
                    None
                },
                Err(_) => {
                    errors.add("rating", NOT_A_NUMBER);
                    None
                },
            }
        };

        let review = self.review.trim();
        errors.into_result(|| Review {
            rating: rating.unwrap_or_default(),
            review: (!review.is_empty()).then(|| review.to_string()),
        })
    }
}
