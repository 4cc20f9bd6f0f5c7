use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Cli;
use crate::logfile::RotatingLog;

pub const BANDS_APPID: &str = "BANDS_APPID";
pub const OMDB_API_KEY: &str = "OMDB_API_KEY";
pub const SPOTIFY_ID: &str = "SPOTIFY_ID";
pub const SPOTIFY_SECRET: &str = "SPOTIFY_SECRET";

/// Provider secrets. Missing values surface as setup errors on the call that
/// needs them.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub bands_app_id: Option<String>,
    pub omdb_api_key: Option<String>,
    pub spotify_id: Option<String>,
    pub spotify_secret: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            bands_app_id: read(BANDS_APPID),
            omdb_api_key: read(OMDB_API_KEY),
            spotify_id: read(SPOTIFY_ID),
            spotify_secret: read(SPOTIFY_SECRET),
        }
    }
}

/// Base URLs of the providers.
#[derive(Clone, Debug)]
pub struct Endpoints {
    pub concerts: String,
    pub movies: String,
    pub music_api: String,
    pub music_accounts: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            concerts: "https://rest.bandsintown.com".to_string(),
            movies: "https://www.omdbapi.com".to_string(),
            music_api: "https://api.spotify.com".to_string(),
            music_accounts: "https://accounts.spotify.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every provider at one server; used against mock servers.
    pub fn all_at(base: &str) -> Self {
        Self {
            concerts: base.to_string(),
            movies: base.to_string(),
            music_api: base.to_string(),
            music_accounts: base.to_string(),
        }
    }
}

/// Everything a run needs, resolved once at start.
#[derive(Clone, Debug)]
pub struct Config {
    pub credentials: Credentials,
    pub endpoints: Endpoints,
    pub timeout: Duration,
    pub replay_file: PathBuf,
    pub log: Option<RotatingLog>,
}

impl Config {
    pub fn try_from_args(args: &Cli) -> anyhow::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(err) if err.not_found() => {}
            Err(err) => tracing::warn!(error = %err, "ignoring unreadable .env"),
        }

        let log = if args.no_log {
            None
        } else {
            Some(RotatingLog::new(args.log_file.clone()))
        };

        Ok(Self {
            credentials: Credentials::from_env(),
            endpoints: Endpoints::default(),
            timeout: Duration::from_secs(u64::max(1, args.timeout_secs)),
            replay_file: args.replay_file.clone(),
            log,
        })
    }
}
