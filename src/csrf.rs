use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use sha2::{Digest, Sha512};
use uuid::Uuid;

pub const COOKIE_NAME: &str = "csrf_token";

/// Derives the cookie signing key from the configured secret.
pub fn signing_key(secret: &str) -> Key {
    Key::from(Sha512::digest(secret.as_bytes()).as_slice())
}

/// Returns the session's token, minting one and setting the cookie when absent.
pub fn issue(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(cookie) = jar.get(COOKIE_NAME) {
        let token = cookie.value().to_string();
        return (jar, token);
    }

    let token = Uuid::new_v4().simple().to_string();
    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(12));
    (jar.add(cookie), token)
}

pub fn verify(jar: &SignedCookieJar, submitted: &str) -> bool {
    !submitted.is_empty() && jar.get(COOKIE_NAME).is_some_and(|c| c.value() == submitted)
}
