//! Line-oriented rendering of provider results.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::{ConcertEvent, MovieDetail, Track};

pub const MAX_CONCERTS: usize = 5;
pub const MAX_SONGS: usize = 7;
pub const MAX_MOVIES: usize = 5;

const MISSING: &str = "N/A";

pub fn banner(command: &str, term: &str) -> String {
    format!("################ {command}: {term} ################")
}

pub fn concerts(artist: &str, events: &[ConcertEvent]) -> Vec<String> {
    if events.is_empty() {
        return vec![format!("No upcoming events found for {artist}.")];
    }

    let mut lines = Vec::new();
    for (index, event) in events.iter().take(MAX_CONCERTS).enumerate() {
        let venue = &event.venue;
        let location = [&venue.city, &venue.region, &venue.country]
            .into_iter()
            .filter_map(|part| part.as_deref().map(str::trim))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        lines.push(section("VENUE", index));
        lines.push(format!("Name: {}", or_missing(venue.name.as_deref())));
        lines.push(format!("Location: {}", non_empty_or_missing(&location)));
        lines.push(format!(
            "Date: {}",
            event
                .datetime
                .as_deref()
                .map(short_date)
                .unwrap_or_else(|| MISSING.to_string())
        ));
    }
    lines
}

pub fn songs(tracks: &[Track]) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, track) in tracks.iter().take(MAX_SONGS).enumerate() {
        let artists = track
            .artists
            .iter()
            .filter_map(|artist| artist.name.as_deref())
            .collect::<Vec<_>>()
            .join(", ");
        let preview = track
            .preview_url
            .as_deref()
            .or_else(|| {
                track
                    .external_urls
                    .as_ref()
                    .and_then(|urls| urls.spotify.as_deref())
            })
            .unwrap_or("No preview available");
        let album = track.album.as_ref().and_then(|album| album.name.as_deref());

        lines.push(section("SONG", index));
        lines.push(format!("Artist(s): {}", non_empty_or_missing(&artists)));
        lines.push(format!("Song: {}", or_missing(track.name.as_deref())));
        lines.push(format!("Preview: {preview}"));
        lines.push(format!("Album: {}", or_missing(album)));
    }
    lines
}

/// Render one movie block; `index` is the zero-based position in the search.
pub fn movie(index: usize, detail: &MovieDetail) -> Vec<String> {
    let rotten_tomatoes = detail
        .ratings
        .iter()
        .find(|rating| rating.source == "Rotten Tomatoes")
        .map(|rating| rating.value.as_str());

    vec![
        section("MOVIE", index),
        format!("Title: {}", or_missing(detail.title.as_deref())),
        format!("Year: {}", or_missing(detail.year.as_deref())),
        format!("IMDB Rating: {}", or_missing(detail.imdb_rating.as_deref())),
        format!("Rotten Tomatoes Rating: {}", or_missing(rotten_tomatoes)),
        format!("Country: {}", or_missing(detail.country.as_deref())),
        format!("Language: {}", or_missing(detail.language.as_deref())),
        format!("Plot: {}", or_missing(detail.plot.as_deref())),
        format!("Actors: {}", or_missing(detail.actors.as_deref())),
    ]
}

/// Render a provider timestamp as `MM/DD/YYYY`, or verbatim if unparseable.
pub fn short_date(raw: &str) -> String {
    const FORMAT: &str = "%m/%d/%Y";
    let raw = raw.trim();
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return parsed.format(FORMAT).to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format(FORMAT).to_string();
    }
    raw.to_string()
}

fn section(label: &str, index: usize) -> String {
    let title = format!("[ {label} {} ]", index + 1);
    format!("==========={title:=<31}")
}

fn or_missing(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => MISSING,
    }
}

fn non_empty_or_missing(value: &str) -> &str {
    or_missing(Some(value))
}
