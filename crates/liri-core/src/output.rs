use std::io::{self, Write};

use crate::logfile::RotatingLog;

/// Console writer that mirrors every line into the log file.
///
/// Neither sink can fail a run: a log failure is reported per line, and the
/// first console failure (a closed pipe, say) is reported once and silences
/// the console while the log keeps recording.
pub struct Printer {
    console: Box<dyn Write + Send>,
    console_closed: bool,
    log: Option<RotatingLog>,
}

impl Printer {
    pub fn stdout(log: Option<RotatingLog>) -> Self {
        Self::with_writer(Box::new(io::stdout()), log)
    }

    pub fn with_writer(console: Box<dyn Write + Send>, log: Option<RotatingLog>) -> Self {
        Self {
            console,
            console_closed: false,
            log,
        }
    }

    pub async fn line(&mut self, line: &str) {
        if !self.console_closed {
            let written = writeln!(self.console, "{line}");
            self.check_console(written);
        }
        if let Some(log) = &self.log {
            if let Err(err) = log.append_line(line).await {
                tracing::warn!(
                    path = %log.path().display(),
                    error = %err,
                    "log file write failed"
                );
            }
        }
    }

    pub async fn lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line.as_ref()).await;
        }
        if !self.console_closed {
            let flushed = self.console.flush();
            self.check_console(flushed);
        }
    }

    fn check_console(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            tracing::warn!(
                error = %err,
                "console write failed; further output goes to the log only"
            );
            self.console_closed = true;
        }
    }
}

#[cfg(test)]
pub(crate) mod capture {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// In-memory console shared between a `Printer` and the test reading it.
    #[derive(Clone, Default)]
    pub struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        pub fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::capture::Captured;
    use super::*;
    use tempfile::tempdir;

    /// Console whose every write fails like a closed pipe.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[tokio::test]
    async fn console_and_log_receive_identical_lines() {
        let dir = tempdir().unwrap();
        let log = RotatingLog::new(dir.path().join("log.txt"));
        let console = Captured::default();
        let mut printer = Printer::with_writer(Box::new(console.clone()), Some(log.clone()));

        printer
            .lines(["Name: Metro", "Location: Chicago, IL", "Date: 03/15/2019"])
            .await;

        let logged = tokio::fs::read_to_string(log.path()).await.unwrap();
        assert_eq!(console.text(), logged);
        assert_eq!(logged.lines().count(), 3);
    }

    #[tokio::test]
    async fn unwritable_log_does_not_stop_console_output() {
        let dir = tempdir().unwrap();
        // A directory in place of the log file makes every append fail.
        let log = RotatingLog::new(dir.path());
        let console = Captured::default();
        let mut printer = Printer::with_writer(Box::new(console.clone()), Some(log));

        printer.line("still printed").await;
        assert_eq!(console.text(), "still printed\n");
    }

    #[tokio::test]
    async fn closed_console_keeps_logging() {
        let dir = tempdir().unwrap();
        let log = RotatingLog::new(dir.path().join("log.txt"));
        let mut printer = Printer::with_writer(Box::new(ClosedPipe), Some(log.clone()));

        printer.lines(["Title: Heat", "Year: 1995"]).await;
        printer.line("Actors: Al Pacino").await;

        assert!(printer.console_closed);
        let logged = tokio::fs::read_to_string(log.path()).await.unwrap();
        assert_eq!(logged, "Title: Heat\nYear: 1995\nActors: Al Pacino\n");
    }
}
