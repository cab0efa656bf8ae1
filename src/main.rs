mod app;
mod calendar;
mod help;
mod locale;
mod theme;
use crate::app::App;
use crate::calendar::{parse_first_week_contains_date, parse_week_start, DayPickerContext};
use crate::locale::Locale;
use crate::theme::Styles;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::error::Error;
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
    Weekday,
};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Environment variable holding the log filter
const LOG_ENV: &str = "DAYGRID_LOG";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    month: Option<Date>,
    locale: Option<Locale>,
    week_starts_on: Option<Weekday>,
    first_week_contains_date: Option<u8>,
    iso_week: bool,
    fixed_weeks: bool,
    hide_head: bool,
    show_week_number: bool,
    show_outside_days: bool,
    footer: Option<String>,
    no_animate: bool,
    monochrome: bool,
    log_file: Option<PathBuf>,
}

impl Options {
    fn context(&self, today: Date) -> DayPickerContext {
        let mut ctx = DayPickerContext::new(today)
            .locale(self.locale.unwrap_or_default())
            .iso_week(self.iso_week)
            .fixed_weeks(self.fixed_weeks)
            .hide_head(self.hide_head)
            .show_week_number(self.show_week_number)
            .show_outside_days(self.show_outside_days)
            .animate(!self.no_animate);
        if let Some(wd) = self.week_starts_on {
            ctx = ctx.week_starts_on(wd);
        }
        if let Some(day) = self.first_week_contains_date {
            ctx = ctx.first_week_contains_date(day);
        }
        if let Some(footer) = &self.footer {
            ctx = ctx.footer(footer.as_str());
        }
        if self.monochrome {
            ctx = ctx.styles(Styles::monochrome());
        }
        ctx
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('l') | Arg::Long("locale") => {
                    let locale = parse_value(parser.value()?, |s| Locale::lookup(s).copied())?;
                    opts.locale = Some(locale);
                }
                Arg::Short('w') | Arg::Long("week-starts-on") => {
                    opts.week_starts_on = Some(parse_value(parser.value()?, parse_week_start)?);
                }
                Arg::Long("first-week-contains-date") => {
                    let day = parse_value(parser.value()?, parse_first_week_contains_date)?;
                    opts.first_week_contains_date = Some(day);
                }
                Arg::Long("iso-week") => opts.iso_week = true,
                Arg::Long("fixed-weeks") => opts.fixed_weeks = true,
                Arg::Long("hide-head") => opts.hide_head = true,
                Arg::Long("show-week-number") => opts.show_week_number = true,
                Arg::Long("show-outside-days") => opts.show_outside_days = true,
                Arg::Long("footer") => opts.footer = Some(parser.value()?.string()?),
                Arg::Long("no-animate") => opts.no_animate = true,
                Arg::Long("monochrome") => opts.monochrome = true,
                Arg::Long("log-file") => opts.log_file = Some(parser.value()?.into()),
                Arg::Value(value) if opts.month.is_none() => {
                    opts.month = Some(parse_value(value, parse_month)?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = &opts.log_file {
                    init_logging(path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let ctx = opts.context(today);
                let start = opts.month.unwrap_or(today);
                log::info!("starting at {start} (today is {today})");
                let picked = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    Ok(App::new(ctx, start, Instant::now()).run(&mut terminal)?)
                })?;
                if let Some(date) = picked {
                    println!("{}", date.format(&YMD_FMT)?);
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: daygrid [OPTIONS] [YYYY-MM[-DD]]");
                println!();
                println!("Terminal date picker with locale-aware month grids");
                println!();
                println!("Options:");
                println!("  -l, --locale CODE                 Use the given locale (en-US, en-GB, de, fr, es, ja)");
                println!("  -w, --week-starts-on N            Start weeks on day N (0 = Sunday ... 6 = Saturday)");
                println!("      --first-week-contains-date N  Number weeks so that week 1 contains January N");
                println!("      --iso-week                    Use ISO 8601 weeks and week numbers");
                println!("      --fixed-weeks                 Always show six weeks");
                println!("      --hide-head                   Do not show weekday names");
                println!("      --show-week-number            Show week numbers");
                println!("      --show-outside-days           Show days of adjacent months");
                println!("      --footer TEXT                 Show TEXT below the calendar");
                println!("      --no-animate                  Do not animate month changes");
                println!("      --monochrome                  Do not use colors");
                println!("      --log-file PATH               Write logs to PATH (filter with ${LOG_ENV})");
                println!("  -h, --help                        Display this help message and exit");
                println!("  -V, --version                     Show the program version and exit");
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

/// Run `func` on an option value, reporting failure as a lexopt parsing error
fn parse_value<T, E, F>(value: OsString, func: F) -> Result<T, lexopt::Error>
where
    F: FnOnce(&str) -> Result<T, E>,
    E: Error + Send + Sync + 'static,
{
    let value = value.string()?;
    match func(&value) {
        Ok(v) => Ok(v),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

/// Parse either `YYYY-MM-DD` or `YYYY-MM`, the latter meaning the first of
/// the month
fn parse_month(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT).or_else(|e| Date::parse(&format!("{s}-01"), &YMD_FMT).map_err(|_| e))
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logging")?;
    Ok(())
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
