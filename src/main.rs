mod app;
mod calendar;
mod help;
mod jumpto;
mod theme;
mod weekview;
use crate::app::App;
use crate::calendar::{Clock, Gregorian, LocalClock};
use crate::weekview::WeekView;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Weekday};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Config),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Config {
    date: Option<Date>,
    week_start: Weekday,
    log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            date: None,
            week_start: Weekday::Sunday,
            log_file: None,
        }
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut config = Config::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("week-start") => {
                    config.week_start = parser.value()?.parse_with(parse_weekday)?;
                }
                Arg::Long("log-file") => config.log_file = Some(parser.value()?.into()),
                Arg::Value(value) if config.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => config.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(config))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(config) => {
                if let Some(path) = &config.log_file {
                    init_logging(path)?;
                }
                let today = LocalClock.now().context("failed to determine local date")?;
                tracing::info!(%today, week_start = %config.week_start, "starting up");
                let mut view = WeekView::new(Gregorian::new(config.week_start), today);
                if let Some(date) = config.date {
                    view = view.start_date(date.midnight());
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(view, LocalClock).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: weekstrip [options] [YYYY-MM-DD]");
                println!();
                println!("Show the calendar week around a date");
                println!();
                println!("Options:");
                println!("  -w, --week-start DAY   Day on which weeks start [default: sunday]");
                println!("      --log-file PATH    Write log messages to PATH");
                println!("  -h, --help             Display this help message and exit");
                println!("  -V, --version          Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

// The terminal belongs to the calendar, so logs only go to a file, and only
// when one is requested.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;
    install_logger(path, filter)
}

fn install_logger(path: &Path, filter: EnvFilter) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install logger")
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid weekday: {0:?}")]
struct ParseWeekdayError(String);

fn parse_weekday(s: &str) -> Result<Weekday, ParseWeekdayError> {
    match s.to_ascii_lowercase().as_str() {
        "sunday" | "sun" => Ok(Weekday::Sunday),
        "monday" | "mon" => Ok(Weekday::Monday),
        "tuesday" | "tue" => Ok(Weekday::Tuesday),
        "wednesday" | "wed" => Ok(Weekday::Wednesday),
        "thursday" | "thu" => Ok(Weekday::Thursday),
        "friday" | "fri" => Ok(Weekday::Friday),
        "saturday" | "sat" => Ok(Weekday::Saturday),
        _ => Err(ParseWeekdayError(s.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("weekstrip").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).ok(), Some(Command::Run(Config::default())));
    }

    #[test]
    fn test_date_and_options() {
        assert_eq!(
            parse(&["--week-start", "Mon", "--log-file", "ws.log", "2022-03-09"]).ok(),
            Some(Command::Run(Config {
                date: Some(date!(2022-03-09)),
                week_start: Weekday::Monday,
                log_file: Some(PathBuf::from("ws.log")),
            }))
        );
        assert_eq!(
            parse(&["-w", "saturday"]).ok(),
            Some(Command::Run(Config {
                week_start: Weekday::Saturday,
                ..Config::default()
            }))
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).ok(), Some(Command::Help));
        assert_eq!(parse(&["2022-03-09", "-V"]).ok(), Some(Command::Version));
    }

    #[test]
    fn test_bad_args() {
        assert!(parse(&["2022-13-09"]).is_err());
        assert!(parse(&["2022-03-09", "2022-03-10"]).is_err());
        assert!(parse(&["--week-start", "someday"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }

    // Installs the process-wide subscriber, so no other test may do so
    #[test]
    fn test_log_file() {
        let path = std::env::temp_dir()
            .join(format!("weekstrip-test-{}.log", std::process::id()));
        let r = install_logger(&path, EnvFilter::new(DEFAULT_LOG_FILTER));
        assert!(r.is_ok(), "installing logger failed: {r:?}");
        tracing::info!(answer = 42, "week strip info line");
        tracing::debug!("week strip debug line");
        let logged = std::fs::read_to_string(&path);
        let _ = std::fs::remove_file(&path);
        let logged = logged.unwrap_or_default();
        assert!(logged.contains("week strip info line"), "log: {logged:?}");
        assert!(logged.contains("answer=42"), "log: {logged:?}");
        assert!(!logged.contains("week strip debug line"), "log: {logged:?}");
        assert!(!logged.contains("\x1b["), "log: {logged:?}");
    }

    #[test]
    fn test_unwritable_log_file() {
        let path = std::env::temp_dir()
            .join("weekstrip-no-such-dir")
            .join("x.log");
        assert!(install_logger(&path, EnvFilter::new(DEFAULT_LOG_FILTER)).is_err());
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("WEDNESDAY"), Ok(Weekday::Wednesday));
        assert_eq!(parse_weekday("thu"), Ok(Weekday::Thursday));
        assert_eq!(
            parse_weekday("thurs"),
            Err(ParseWeekdayError(String::from("thurs")))
        );
    }
}
