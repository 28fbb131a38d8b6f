use std::{env, io::Write, process::ExitCode, sync::LazyLock};

use {
    anyhow::Context,
    jiff::{Zoned, civil::Date, tz::TimeZone},
};

mod args;
mod cmd;
mod logger;
mod style;

static TZ: LazyLock<TimeZone> = LazyLock::new(|| TimeZone::system());

/// The date used for `today` and whenever a first date is omitted.
static TODAY: LazyLock<Date> = LazyLock::new(|| {
    match read_env_enumdate_today() {
        Ok(Some(date)) => {
            log::trace!(
                "setting today's date to `{date}` from `ENUMDATE_TODAY` \
                 environment variable",
            );
            date
        }
        Ok(None) => {
            let today = Zoned::now().with_time_zone(TZ.clone()).date();
            log::trace!(
                "`ENUMDATE_TODAY` environment variable not set, using \
                 current date `{today}`",
            );
            today
        }
        Err(err) => {
            let today = Zoned::now().with_time_zone(TZ.clone()).date();
            log::warn!(
                "reading `ENUMDATE_TODAY` failed, using current date \
                 `{today}`: {err:#}",
            );
            today
        }
    }
});

/// Once more, and again, and again.
fn main() -> ExitCode {
    let err = match run() {
        Ok(code) => return code,
        Err(err) => err,
    };
    if let Some(help) = err.root_cause().downcast_ref::<args::Help>() {
        let _ = writeln!(&mut std::io::stdout(), "{help}");
        return ExitCode::SUCCESS;
    }
    if let Some(version) = err.root_cause().downcast_ref::<args::Version>() {
        let _ = writeln!(&mut std::io::stdout(), "{version}");
        return ExitCode::SUCCESS;
    }
    // A broken pipe, e.g., from `enumdate seq daily | head`, is how a
    // consumer says it has seen enough. So it isn't an error.
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<std::io::Error>() {
            if err.kind() == std::io::ErrorKind::BrokenPipe {
                return ExitCode::from(0);
            }
        }
    }
    if std::env::var("RUST_BACKTRACE").map_or(false, |v| v == "1")
        && std::env::var("RUST_LIB_BACKTRACE").map_or(true, |v| v == "1")
    {
        let _ = writeln!(&mut std::io::stderr(), "{:?}", err);
    } else {
        let _ = writeln!(&mut std::io::stderr(), "{:#}", err);
    }
    ExitCode::from(1)
}

fn run() -> anyhow::Result<ExitCode> {
    let level = env::var("ENUMDATE_LOG").unwrap_or_else(|_| String::new());
    let level = match &*level {
        "" | "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        unk => anyhow::bail!("unrecognized log level '{}'", unk),
    };
    log::set_max_level(level);
    logger::Logger::init()?;
    cmd::run(&mut lexopt::Parser::from_env())?;
    Ok(ExitCode::SUCCESS)
}

fn read_env_enumdate_today() -> anyhow::Result<Option<Date>> {
    let Some(val) = std::env::var_os("ENUMDATE_TODAY") else {
        return Ok(None);
    };
    let Some(val) = val.to_str() else {
        anyhow::bail!(
            "`ENUMDATE_TODAY` environment variable is not valid UTF-8: \
             {val:?}"
        )
    };
    val.parse::<Date>()
        .context(
            "`ENUMDATE_TODAY` environment variable is not a valid \
             YYYY-MM-DD date",
        )
        .map(Some)
}
