use std::fmt;

/// A command token accepted on the command line or in the replay file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ConcertThis,
    SpotifyThisSong,
    MovieThis,
    DoWhatItSays,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::ConcertThis,
        Command::SpotifyThisSong,
        Command::MovieThis,
        Command::DoWhatItSays,
    ];

    /// Parse a token; unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.token().eq_ignore_ascii_case(token))
    }

    pub fn token(self) -> &'static str {
        match self {
            Command::ConcertThis => "concert-this",
            Command::SpotifyThisSong => "spotify-this-song",
            Command::MovieThis => "movie-this",
            Command::DoWhatItSays => "do-what-it-says",
        }
    }

    /// The provider lookup this command performs; `None` for replay.
    pub fn lookup(self) -> Option<Lookup> {
        match self {
            Command::ConcertThis => Some(Lookup::Concert),
            Command::SpotifyThisSong => Some(Lookup::Song),
            Command::MovieThis => Some(Lookup::Movie),
            Command::DoWhatItSays => None,
        }
    }

    /// Term searched for when the user gives none.
    pub fn default_term(self) -> Option<&'static str> {
        match self {
            Command::ConcertThis => Some("Mayday Parade"),
            Command::SpotifyThisSong => Some("The Sign"),
            Command::MovieThis => Some("Mr. Nobody"),
            Command::DoWhatItSays => None,
        }
    }

    /// The term actually sent to the provider.
    pub fn effective_term(self, term: &str) -> String {
        let trimmed = term.trim();
        match self.default_term() {
            Some(default) if trimmed.is_empty() => default.to_string(),
            _ => trimmed.to_string(),
        }
    }
}

/// A command that reaches a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    Concert,
    Song,
    Movie,
}

impl Lookup {
    pub fn command(self) -> Command {
        match self {
            Lookup::Concert => Command::ConcertThis,
            Lookup::Song => Command::SpotifyThisSong,
            Lookup::Movie => Command::MovieThis,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tokens() {
        assert_eq!(Command::from_token("concert-this"), Some(Command::ConcertThis));
        assert_eq!(
            Command::from_token(" Spotify-This-Song "),
            Some(Command::SpotifyThisSong)
        );
        assert_eq!(Command::from_token("movie-this"), Some(Command::MovieThis));
        assert_eq!(
            Command::from_token("do-what-it-says"),
            Some(Command::DoWhatItSays)
        );
        assert_eq!(Command::from_token("weather-this"), None);
        assert_eq!(Command::from_token(""), None);
    }

    #[test]
    fn empty_terms_fall_back_to_defaults() {
        assert_eq!(Command::MovieThis.effective_term(""), "Mr. Nobody");
        assert_eq!(Command::SpotifyThisSong.effective_term("   "), "The Sign");
        assert_eq!(Command::ConcertThis.effective_term(""), "Mayday Parade");
        assert_eq!(Command::MovieThis.effective_term(" Heat "), "Heat");
        assert_eq!(Command::DoWhatItSays.effective_term(""), "");
    }

    #[test]
    fn only_provider_commands_are_lookups() {
        for command in Command::ALL {
            match command.lookup() {
                Some(lookup) => assert_eq!(lookup.command(), command),
                None => assert_eq!(command, Command::DoWhatItSays),
            }
        }
    }
}
