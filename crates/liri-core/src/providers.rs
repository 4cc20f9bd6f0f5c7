//! HTTP clients for the concert, music and movie providers.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{
    BANDS_APPID, Config, Credentials, Endpoints, OMDB_API_KEY, SPOTIFY_ID, SPOTIFY_SECRET,
};
use crate::error::{ProviderError, RequestInfo};
use crate::model::{
    ConcertEvent, MovieDetail, MovieMatch, MovieSearchResponse, TokenResponse, Track,
    TrackSearchResponse, omdb_found,
};
use crate::query::{self, BuiltQuery};

/// The provider operations the dispatcher relies on.
#[async_trait]
pub trait Providers: Send + Sync {
    async fn concerts(&self, artist: &str) -> Result<Vec<ConcertEvent>, ProviderError>;

    async fn songs(&self, title: &str) -> Result<Vec<Track>, ProviderError>;

    async fn movie_search(&self, title: &str) -> Result<Vec<MovieMatch>, ProviderError>;

    async fn movie_detail(&self, imdb_id: &str) -> Result<MovieDetail, ProviderError>;
}

/// Providers backed by the real REST endpoints.
#[derive(Clone)]
pub struct LiveProviders {
    http: Client,
    endpoints: Endpoints,
    credentials: Credentials,
}

impl LiveProviders {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("liri/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(
            http,
            config.endpoints.clone(),
            config.credentials.clone(),
        ))
    }

    pub fn with_client(http: Client, endpoints: Endpoints, credentials: Credentials) -> Self {
        Self {
            http,
            endpoints,
            credentials,
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        info: RequestInfo,
    ) -> Result<T, ProviderError> {
        tracing::debug!(request = %info, "sending provider request");
        let response = request
            .send()
            .await
            .map_err(|err| ProviderError::from_transport(err, info.clone()))?;

        let status = response.status();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|err| ProviderError::from_transport(err, info.clone()))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                headers,
                body,
                request: info,
            });
        }

        serde_json::from_str(&body).map_err(|err| ProviderError::Decode {
            status: status.as_u16(),
            message: err.to_string(),
            body,
            request: info,
        })
    }

    async fn music_token(&self, id: &str, secret: &str) -> Result<String, ProviderError> {
        let BuiltQuery { url, info } = query::music_token(&self.endpoints.music_accounts)?;
        let request = self
            .http
            .post(url)
            .basic_auth(id, Some(secret))
            .form(&[("grant_type", "client_credentials")]);
        let token: TokenResponse = self.fetch(request, info).await?;
        Ok(token.access_token)
    }
}

fn require<'a>(
    value: &'a Option<String>,
    variable: &str,
    info: &RequestInfo,
) -> Result<&'a str, ProviderError> {
    value
        .as_deref()
        .ok_or_else(|| ProviderError::missing_credential(variable, info.clone()))
}

#[async_trait]
impl Providers for LiveProviders {
    async fn concerts(&self, artist: &str) -> Result<Vec<ConcertEvent>, ProviderError> {
        let app_id = self.credentials.bands_app_id.as_deref().unwrap_or_default();
        let BuiltQuery { url, info } =
            query::concert_events(&self.endpoints.concerts, artist, app_id)?;
        require(&self.credentials.bands_app_id, BANDS_APPID, &info)?;

        // Misses come back as an object, a JSON string, or a bare `{warn=Not found}`
        // instead of a list.
        let payload: Value = match self.fetch(self.http.get(url), info.clone()).await {
            Err(ProviderError::Decode { body, request, .. })
                if body.to_ascii_lowercase().contains("not found") =>
            {
                return Err(ProviderError::NotFound {
                    message: format!("No artist found for {artist}."),
                    request,
                });
            }
            result => result?,
        };
        match payload {
            Value::Array(_) => {
                let body = payload.to_string();
                serde_json::from_value(payload).map_err(|err| ProviderError::Decode {
                    status: 200,
                    body,
                    message: err.to_string(),
                    request: info,
                })
            }
            Value::Object(map) => {
                let message = map
                    .get("errorMessage")
                    .or_else(|| map.get("message"))
                    .and_then(Value::as_str)
                    .unwrap_or("artist not found")
                    .to_string();
                Err(ProviderError::NotFound {
                    message,
                    request: info,
                })
            }
            other => Err(ProviderError::NotFound {
                message: format!("artist not found ({})", other.to_string().trim()),
                request: info,
            }),
        }
    }

    async fn songs(&self, title: &str) -> Result<Vec<Track>, ProviderError> {
        let BuiltQuery { url, info } = query::track_search(&self.endpoints.music_api, title)?;
        let id = require(&self.credentials.spotify_id, SPOTIFY_ID, &info)?;
        let secret = require(&self.credentials.spotify_secret, SPOTIFY_SECRET, &info)?;

        let token = self.music_token(id, secret).await?;
        let response: TrackSearchResponse =
            self.fetch(self.http.get(url).bearer_auth(token), info.clone()).await?;
        let tracks = response.tracks.map(|page| page.items).unwrap_or_default();
        if tracks.is_empty() {
            return Err(ProviderError::NotFound {
                message: format!("No songs found for {title}."),
                request: info,
            });
        }
        Ok(tracks)
    }

    async fn movie_search(&self, title: &str) -> Result<Vec<MovieMatch>, ProviderError> {
        let api_key = self.credentials.omdb_api_key.as_deref().unwrap_or_default();
        let BuiltQuery { url, info } =
            query::movie_search(&self.endpoints.movies, title, api_key)?;
        require(&self.credentials.omdb_api_key, OMDB_API_KEY, &info)?;

        let response: MovieSearchResponse = self.fetch(self.http.get(url), info.clone()).await?;
        if !omdb_found(response.response.as_deref()) || response.search.is_empty() {
            return Err(ProviderError::NotFound {
                message: response
                    .error
                    .unwrap_or_else(|| "Movie not found!".to_string()),
                request: info,
            });
        }
        Ok(response.search)
    }

    async fn movie_detail(&self, imdb_id: &str) -> Result<MovieDetail, ProviderError> {
        let api_key = self.credentials.omdb_api_key.as_deref().unwrap_or_default();
        let BuiltQuery { url, info } =
            query::movie_detail(&self.endpoints.movies, imdb_id, api_key)?;
        require(&self.credentials.omdb_api_key, OMDB_API_KEY, &info)?;

        let detail: MovieDetail = self.fetch(self.http.get(url), info.clone()).await?;
        if !omdb_found(detail.response.as_deref()) {
            return Err(ProviderError::NotFound {
                message: detail
                    .error
                    .clone()
                    .unwrap_or_else(|| format!("No details found for {imdb_id}.")),
                request: info,
            });
        }
        Ok(detail)
    }
}
