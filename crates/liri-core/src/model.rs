//! Projections of the provider payloads. Only the fields that are printed are
//! modelled; everything is optional because the providers own the schema.

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ConcertEvent {
    #[serde(default)]
    pub venue: Venue,
    #[serde(default)]
    pub datetime: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Venue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: Option<Album>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackSearchResponse {
    #[serde(default)]
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackPage {
    #[serde(default)]
    pub items: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// One entry of a movie title search.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct MovieMatch {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MovieSearchResponse {
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "Search", default)]
    pub search: Vec<MovieMatch>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<Rating>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Rating {
    #[serde(rename = "Source", default)]
    pub source: String,
    #[serde(rename = "Value", default)]
    pub value: String,
}

/// OMDb reports misses in-band through its `Response` flag.
pub(crate) fn omdb_found(flag: Option<&str>) -> bool {
    !matches!(flag, Some(value) if value.eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_omdb_detail_with_ratings() {
        let raw = r#"{
            "Title": "Mr. Nobody",
            "Year": "2009",
            "imdbRating": "7.8",
            "Ratings": [
                {"Source": "Internet Movie Database", "Value": "7.8/10"},
                {"Source": "Rotten Tomatoes", "Value": "67%"}
            ],
            "Country": "Belgium, Germany, Canada, France",
            "Response": "True"
        }"#;
        let detail: MovieDetail = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.title.as_deref(), Some("Mr. Nobody"));
        assert_eq!(detail.ratings.len(), 2);
        assert!(detail.plot.is_none());
        assert!(omdb_found(detail.response.as_deref()));
    }

    #[test]
    fn omdb_false_flag_means_not_found() {
        assert!(!omdb_found(Some("False")));
        assert!(omdb_found(Some("True")));
        assert!(omdb_found(None));
    }

    #[test]
    fn tolerates_sparse_concert_events() {
        let raw = r#"[{"datetime": "2019-03-15T19:00:00"}, {"venue": {"name": "Roxy"}}]"#;
        let events: Vec<ConcertEvent> = serde_json::from_str(raw).unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].venue.name.is_none());
        assert_eq!(events[1].venue.name.as_deref(), Some("Roxy"));
    }
}
