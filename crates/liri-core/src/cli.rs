use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI definition for liri.
#[derive(Parser, Debug)]
#[command(name = "liri")]
#[command(
    about = "Look up concerts, songs and movies from the command line",
    long_about = None,
    after_help = "Commands:\n  concert-this <artist>\n  spotify-this-song <song>\n  \
                  movie-this <title>\n  do-what-it-says\n\n\
                  Any other command replays the record stored in the replay file.\n\
                  Options go before the command: everything after the first search \
                  word is part of the search term."
)]
pub struct Cli {
    /// Command to run (concert-this, spotify-this-song, movie-this, do-what-it-says).
    pub command: Option<String>,

    /// Search term; multiple words are joined with spaces.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub term: Vec<String>,

    /// File read by `do-what-it-says`, holding one `command,term` record.
    #[arg(long, default_value = "random.txt")]
    pub replay_file: PathBuf,

    /// Append-only log mirroring everything printed to the console.
    #[arg(long, default_value = "log.txt")]
    pub log_file: PathBuf,

    /// Disable the log file.
    #[arg(long, default_value_t = false)]
    pub no_log: bool,

    /// Timeout applied per provider request (seconds).
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Cli {
    /// The search term reassembled from the trailing arguments.
    pub fn search_term(&self) -> String {
        self.term.join(" ").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn joins_trailing_words_into_one_term() {
        let cli = Cli::parse_from(["liri", "movie-this", "The", "Big", "Lebowski"]);
        assert_eq!(cli.command.as_deref(), Some("movie-this"));
        assert_eq!(cli.search_term(), "The Big Lebowski");
    }

    #[test]
    fn options_precede_the_command() {
        let cli = Cli::parse_from([
            "liri",
            "--no-log",
            "--timeout-secs",
            "3",
            "concert-this",
            "Mayday",
            "Parade",
        ]);
        assert!(cli.no_log);
        assert_eq!(cli.timeout_secs, 3);
        assert_eq!(cli.search_term(), "Mayday Parade");
        assert_eq!(cli.log_file, PathBuf::from("log.txt"));
    }

    #[test]
    fn words_after_the_term_belong_to_the_term() {
        let cli = Cli::parse_from(["liri", "movie-this", "Heat", "--no-log"]);
        assert!(!cli.no_log);
        assert_eq!(cli.search_term(), "Heat --no-log");

        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Options go before the command"));
    }

    #[test]
    fn command_and_term_are_optional() {
        let cli = Cli::parse_from(["liri"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.search_term(), "");
    }
}
