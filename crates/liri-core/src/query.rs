//! Request URL construction for each provider.
//!
//! Builders take an already-resolved search term (see
//! [`Command::effective_term`](crate::command::Command::effective_term)) and
//! return both the URL to send and a redacted description for error reports.

use reqwest::Url;

use crate::error::{ProviderError, RequestInfo};

/// Query parameters whose values never appear in printed output.
const SECRET_PARAMS: &[&str] = &["app_id", "apikey"];
const REDACTED: &str = "REDACTED";

/// Number of tracks requested from the music catalog.
pub const TRACK_LIMIT: usize = 7;

#[derive(Clone, Debug)]
pub struct BuiltQuery {
    pub url: Url,
    pub info: RequestInfo,
}

impl BuiltQuery {
    fn get(url: Url) -> Self {
        let info = RequestInfo::get(redact(&url));
        Self { url, info }
    }

    fn post(url: Url) -> Self {
        let info = RequestInfo::post(redact(&url));
        Self { url, info }
    }
}

/// `{base}/artists/{artist}/events?app_id=..`
pub fn concert_events(base: &str, artist: &str, app_id: &str) -> Result<BuiltQuery, ProviderError> {
    let artist = artist.trim().to_lowercase();
    let mut url = endpoint(base, &["artists", artist.as_str(), "events"])?;
    url.query_pairs_mut().append_pair("app_id", app_id);
    Ok(BuiltQuery::get(url))
}

/// `{base}/?s=..&type=movie&apikey=..`
pub fn movie_search(base: &str, title: &str, api_key: &str) -> Result<BuiltQuery, ProviderError> {
    let mut url = endpoint(base, &[])?;
    url.query_pairs_mut()
        .append_pair("s", title.trim())
        .append_pair("type", "movie")
        .append_pair("apikey", api_key);
    Ok(BuiltQuery::get(url))
}

/// `{base}/?i=..&plot=short&apikey=..`
pub fn movie_detail(base: &str, imdb_id: &str, api_key: &str) -> Result<BuiltQuery, ProviderError> {
    let mut url = endpoint(base, &[])?;
    url.query_pairs_mut()
        .append_pair("i", imdb_id.trim())
        .append_pair("plot", "short")
        .append_pair("apikey", api_key);
    Ok(BuiltQuery::get(url))
}

/// `{accounts}/api/token`
pub fn music_token(accounts_base: &str) -> Result<BuiltQuery, ProviderError> {
    let url = endpoint(accounts_base, &["api", "token"])?;
    Ok(BuiltQuery::post(url))
}

/// `{api}/v1/search?q=..&type=track&limit=7`
pub fn track_search(api_base: &str, title: &str) -> Result<BuiltQuery, ProviderError> {
    let mut url = endpoint(api_base, &["v1", "search"])?;
    url.query_pairs_mut()
        .append_pair("q", title.trim())
        .append_pair("type", "track")
        .append_pair("limit", &TRACK_LIMIT.to_string());
    Ok(BuiltQuery::get(url))
}

fn endpoint(base: &str, segments: &[&str]) -> Result<Url, ProviderError> {
    let setup_error = |message: String| ProviderError::Request {
        message,
        request: RequestInfo::get(base),
    };

    let mut url =
        Url::parse(base).map_err(|err| setup_error(format!("invalid base URL `{base}`: {err}")))?;
    if !segments.is_empty() {
        url.path_segments_mut()
            .map_err(|_| setup_error(format!("base URL `{base}` cannot carry a path")))?
            .pop_if_empty()
            .extend(segments);
    }
    Ok(url)
}

fn redact(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if SECRET_PARAMS.contains(&key.as_ref()) && !value.is_empty() {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concert_url_encodes_lowercased_artist_as_path_segment() {
        let query =
            concert_events("https://rest.bandsintown.com", " Mayday Parade ", "abc").unwrap();
        assert_eq!(
            query.url.as_str(),
            "https://rest.bandsintown.com/artists/mayday%20parade/events?app_id=abc"
        );

        let slashed = concert_events("https://rest.bandsintown.com/", "AC/DC", "abc").unwrap();
        assert_eq!(slashed.url.path(), "/artists/ac%2Fdc/events");
    }

    #[test]
    fn secrets_are_redacted_from_request_info() {
        let query = movie_search("https://www.omdbapi.com", "Mr. Nobody", "secret-key").unwrap();
        assert!(query.url.as_str().contains("apikey=secret-key"));
        assert_eq!(query.info.method, "GET");
        assert!(query.info.url.contains("apikey=REDACTED"));
        assert!(!query.info.url.contains("secret-key"));
        assert!(query.info.url.contains("s=Mr.+Nobody"));
    }

    #[test]
    fn movie_queries_carry_fixed_flags() {
        let search = movie_search("https://www.omdbapi.com", "Heat", "k").unwrap();
        let pairs: Vec<(String, String)> = search.url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("s".to_string(), "Heat".to_string()),
                ("type".to_string(), "movie".to_string()),
                ("apikey".to_string(), "k".to_string()),
            ]
        );

        let detail = movie_detail("https://www.omdbapi.com", "tt0113277", "k").unwrap();
        assert_eq!(
            detail.url.as_str(),
            "https://www.omdbapi.com/?i=tt0113277&plot=short&apikey=k"
        );
    }

    #[test]
    fn music_queries_target_token_and_search_endpoints() {
        let token = music_token("https://accounts.spotify.com").unwrap();
        assert_eq!(token.info.method, "POST");
        assert_eq!(token.url.as_str(), "https://accounts.spotify.com/api/token");

        let search = track_search("https://api.spotify.com", "The Sign").unwrap();
        assert_eq!(
            search.url.as_str(),
            "https://api.spotify.com/v1/search?q=The+Sign&type=track&limit=7"
        );
    }

    #[test]
    fn empty_credentials_stay_visible_as_empty() {
        let query = concert_events("https://rest.bandsintown.com", "x", "").unwrap();
        assert!(query.info.url.ends_with("app_id="));
    }

    #[test]
    fn invalid_base_is_a_setup_error() {
        let err = movie_search("not a url", "Heat", "k").unwrap_err();
        assert!(matches!(err, ProviderError::Request { .. }));
        assert_eq!(err.request().url, "not a url");
    }
}
