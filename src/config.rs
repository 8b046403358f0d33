use std::net::SocketAddr;

use anyhow::Context;

pub const PLACEHOLDER_IMAGE_URL: &str = "https://www.shortlist.com/media/images/2019/05/the-30-coolest-alternative-movie-posters-ever-2-1556670563-K61a-column-width-inline.jpg";

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub placeholder_image_url: String,
    pub database_url: String,
    pub secret_key: String,
    pub tmdb_rps: u32,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = var("PORT").unwrap_or_else(|| "5000".to_string()).parse().context("PORT")?;

        let tmdb_api_key = var("TMDB_API_KEY")
            .or_else(|| var("API_KEY"))
            .context("TMDB_API_KEY (or API_KEY) must be set")?;
        let secret_key = var("SECRET_KEY").context("SECRET_KEY must be set")?;

        let tmdb_base_url =
            var("TMDB_BASE_URL").unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_base_url = var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|| "https://image.tmdb.org/t/p/w500".to_string());
        let placeholder_image_url =
            var("PLACEHOLDER_IMAGE_URL").unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://movie.db?mode=rwc".to_string());

        let tmdb_rps: u32 = match var("TMDB_RPS") {
            Some(s) => s.parse().context("TMDB_RPS")?,
            None => 4,
        };
        let http_timeout_secs: u64 = match var("HTTP_TIMEOUT_SECS") {
            Some(s) => s.parse().context("HTTP_TIMEOUT_SECS")?,
            None => 30,
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_base_url,
            placeholder_image_url,
            database_url,
            secret_key,
            tmdb_rps,
            http_timeout_secs,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("tmdb_api_key", &"<redacted>")
            .field("tmdb_base_url", &self.tmdb_base_url)
            .field("tmdb_image_base_url", &self.tmdb_image_base_url)
            .field("placeholder_image_url", &self.placeholder_image_url)
            .field("database_url", &self.database_url)
            .field("secret_key", &"<redacted>")
            .field("tmdb_rps", &self.tmdb_rps)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}
