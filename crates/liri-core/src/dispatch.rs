use std::path::PathBuf;

use futures::stream::{self, StreamExt};

use crate::classify;
use crate::command::{Command, Lookup};
use crate::error::ReplayError;
use crate::format::{self, MAX_MOVIES};
use crate::output::Printer;
use crate::providers::Providers;
use crate::replay;

/// Routes a command token to one provider lookup or to the replay file.
pub struct Dispatcher<P> {
    providers: P,
    replay_file: PathBuf,
}

impl<P: Providers> Dispatcher<P> {
    pub fn new(providers: P, replay_file: impl Into<PathBuf>) -> Self {
        Self {
            providers,
            replay_file: replay_file.into(),
        }
    }

    #[cfg(test)]
    pub(crate) fn providers(&self) -> &P {
        &self.providers
    }

    /// Unknown or missing tokens replay the record in the replay file.
    /// Provider and replay failures are printed, never returned.
    pub async fn dispatch(&self, token: Option<&str>, term: &str, out: &mut Printer) {
        match token.and_then(Command::from_token).and_then(Command::lookup) {
            Some(lookup) => self.lookup(lookup, term, out).await,
            None => {
                if let Some(token) = token.filter(|t| Command::from_token(t).is_none()) {
                    tracing::info!(token, "unrecognized command, replaying from file");
                }
                self.replay(out).await
            }
        }
    }

    async fn replay(&self, out: &mut Printer) {
        let record = match replay::read_record(&self.replay_file).await {
            Ok(record) => record,
            Err(err) => return report_replay_failure(&err, out).await,
        };
        tracing::debug!(command = %record.command, term = %record.term, "replaying record");

        match Command::from_token(&record.command).and_then(Command::lookup) {
            Some(lookup) => self.lookup(lookup, &record.term, out).await,
            None => {
                let err = ReplayError::NotALookup {
                    path: self.replay_file.clone(),
                    command: record.command,
                };
                report_replay_failure(&err, out).await
            }
        }
    }

    async fn lookup(&self, lookup: Lookup, term: &str, out: &mut Printer) {
        let command = lookup.command();
        let term = command.effective_term(term);
        out.line(&format::banner(command.token(), &term)).await;

        let lines = match lookup {
            Lookup::Concert => match self.providers.concerts(&term).await {
                Ok(events) => format::concerts(&term, &events),
                Err(err) => classify::report(&err),
            },
            Lookup::Song => match self.providers.songs(&term).await {
                Ok(tracks) => format::songs(&tracks),
                Err(err) => classify::report(&err),
            },
            Lookup::Movie => self.movies(&term).await,
        };
        out.lines(lines).await;
    }

    /// Title search followed by one detail call per match, capped at
    /// `MAX_MOVIES`. Details are fetched concurrently and reported in match order.
    async fn movies(&self, title: &str) -> Vec<String> {
        let matches = match self.providers.movie_search(title).await {
            Ok(matches) => matches,
            Err(err) => return classify::report(&err),
        };

        let providers = &self.providers;
        let details: Vec<_> = stream::iter(matches.iter().take(MAX_MOVIES).enumerate())
            .map(|(index, found)| async move {
                (index, providers.movie_detail(&found.imdb_id).await)
            })
            .buffered(MAX_MOVIES)
            .collect()
            .await;

        details
            .into_iter()
            .flat_map(|(index, result)| match result {
                Ok(detail) => format::movie(index, &detail),
                Err(err) => classify::report(&err),
            })
            .collect()
    }
}

async fn report_replay_failure(err: &ReplayError, out: &mut Printer) {
    tracing::warn!(error = %err, "replay failed");
    out.lines([err.to_string()]).await;
}
