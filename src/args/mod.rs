use std::{
    fmt::{Debug, Display},
    str::FromStr,
    sync::LazyLock,
};

use {
    anyhow::Context,
    lexopt::{Arg, Parser, ValueExt},
    regex::Regex,
};

pub mod flags;

/// Anything that consumes command line arguments.
///
/// A command typically has one `Configurable` for its flags and positional
/// arguments. `configure` hands every argument to each target in turn until
/// one of them claims it.
pub trait Configurable: Debug {
    /// Returns `true` when `arg` was recognized (and its value, if any, was
    /// consumed from `p`).
    fn configure(
        &mut self,
        p: &mut Parser,
        arg: &mut Arg,
    ) -> anyhow::Result<bool>;

    /// Documentation for the flags and arguments this target recognizes.
    fn usage(&self) -> &[Usage] {
        &[]
    }
}

/// Feeds every remaining argument in `p` to `targets`.
///
/// `usage` is the command's help text. It may contain `%args%` and
/// `%flags%` placeholders, which are replaced with the rendered docs of
/// every target. Anything between `%snip-start%` and `%snip-end%` is only
/// shown for `--help` and not for `-h`.
pub fn configure(
    p: &mut Parser,
    usage: &str,
    targets: &mut [&mut dyn Configurable],
) -> anyhow::Result<()> {
    static REMOVE_SNIPS: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^\s*%snip-start%\p{any}*?%snip-end%\s*$").unwrap()
    });
    static REMOVE_SNIP_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^\s*%snip-(start|end)%\s*$").unwrap()
    });

    while let Some(arg) = p.next()? {
        match arg {
            Arg::Short('h') | Arg::Long("help") => {
                let short = arg == Arg::Short('h');
                let (args, flags) = collect_usages(targets);
                let (usage, args, flags) = if short {
                    (
                        REMOVE_SNIPS.replace_all(usage, ""),
                        Usage::short(&args),
                        Usage::short(&flags),
                    )
                } else {
                    (
                        REMOVE_SNIP_MARKERS.replace_all(usage, ""),
                        Usage::long(&args),
                        Usage::long(&flags),
                    )
                };
                let usage =
                    usage.replace("%args%", &args).replace("%flags%", &flags);
                return Err(anyhow::Error::from(Help(
                    usage.trim().to_string(),
                )));
            }
            Arg::Long("version") => return Err(anyhow::Error::from(Version)),
            _ => {}
        }
        // Long flag names borrow from `p`, but `p` needs to be borrowed
        // mutably by the targets. So give the name a home of its own.
        let long_flag: Option<String> = match arg {
            Arg::Long(name) => Some(name.to_string()),
            _ => None,
        };
        let mut arg = match (long_flag.as_deref(), arg) {
            (Some(name), _) => Arg::Long(name),
            (None, Arg::Short(c)) => Arg::Short(c),
            (None, Arg::Value(value)) => Arg::Value(value),
            (None, Arg::Long(_)) => unreachable!(),
        };
        let mut recognized = false;
        for t in targets.iter_mut() {
            if t.configure(p, &mut arg)? {
                recognized = true;
                break;
            }
        }
        if !recognized {
            return Err(arg.unexpected().into());
        }
    }
    Ok(())
}

/// Splits the usage docs of all targets into positional arguments and
/// flags.
///
/// Arguments keep their order, since that's the order in which they must
/// be given. Flags are sorted by their long name, and always include
/// `-h/--help` and `--version`.
fn collect_usages(
    targets: &[&mut dyn Configurable],
) -> (Vec<Usage>, Vec<Usage>) {
    let (args, mut flags): (Vec<Usage>, Vec<Usage>) = targets
        .iter()
        .flat_map(|t| t.usage().iter().copied())
        .partition(|u| !u.flag);
    flags.push(Help::USAGE);
    flags.push(Version::USAGE);
    flags.sort_by_key(|u| {
        let long = u.format.split_once('/').map_or(u.format, |(_, l)| l);
        long.trim_start_matches('-')
    });
    (args, flags)
}

/// Parses the argument from the given parser as a command name, and returns
/// it. If the next arg isn't a simple value then this returns an error.
///
/// `-h/--help` and `--version` are turned into their corresponding error
/// types so that `main` can print them.
pub fn next_as_command(usage: &str, p: &mut Parser) -> anyhow::Result<String> {
    let usage = usage.trim();
    let arg = match p.next()? {
        Some(arg) => arg,
        None => anyhow::bail!("{}", usage),
    };
    let cmd = match arg {
        Arg::Value(cmd) => cmd.string()?,
        Arg::Short('h') | Arg::Long("help") => {
            return Err(anyhow::Error::from(Help(usage.to_string())));
        }
        Arg::Long("version") => return Err(anyhow::Error::from(Version)),
        arg => return Err(arg.unexpected().into()),
    };
    Ok(cmd)
}

/// Parses the next `p.value()` into `T`. Any error messages will include the
/// given flag name in them.
pub fn parse<T>(p: &mut Parser, flag_name: &'static str) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: Display + Debug + Send + Sync + 'static,
{
    let value = p.value().context(flag_name)?;
    let value = value.string().context(flag_name)?;
    value.parse().map_err(|err| anyhow::Error::msg(err).context(flag_name))
}

/// Parses a positional argument into `T`, using `name` for error context.
pub fn parse_value<T>(
    value: &std::ffi::OsStr,
    name: &'static str,
) -> anyhow::Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: Display + Debug + Send + Sync + 'static,
{
    let Some(value) = value.to_str() else {
        let err = lexopt::Error::NonUnicodeValue(value.to_os_string());
        return Err(anyhow::Error::from(err).context(name));
    };
    value.parse().map_err(|err| anyhow::Error::msg(err).context(name))
}

/// The documentation of a single flag or positional argument.
///
/// `Usage::short` and `Usage::long` render a slice of these for the `-h` and
/// `--help` outputs, respectively.
#[derive(Clone, Copy, Debug)]
pub struct Usage {
    /// Whether this is docs for a flag (optional) or an argument.
    pub flag: bool,
    /// The format of the flag, for example, `-c/--count <number>`.
    pub format: &'static str,
    /// A one line description.
    pub short: &'static str,
    /// A longer description. Paragraphs are separated by blank lines and
    /// get re-wrapped when rendered.
    pub long: &'static str,
}

impl Usage {
    pub const fn flag(
        format: &'static str,
        short: &'static str,
        long: &'static str,
    ) -> Usage {
        Usage { flag: true, format, short, long }
    }

    pub const fn arg(
        format: &'static str,
        short: &'static str,
        long: &'static str,
    ) -> Usage {
        Usage { flag: false, format, short, long }
    }

    /// Format a two column table of formats and short descriptions.
    pub fn short(usages: &[Usage]) -> String {
        let Some(width) = usages.iter().map(|u| u.format.len()).max() else {
            return String::new();
        };
        let mut result = String::new();
        for usage in usages.iter() {
            result.push_str(&format!(
                "    {format:width$}  {short}\n",
                format = usage.format,
                short = usage.short,
            ));
        }
        result
    }

    /// Format each usage followed by its long description, indented and
    /// wrapped to fit in an OPTIONS section.
    pub fn long(usages: &[Usage]) -> String {
        let wrap_opts = textwrap::Options::new(79)
            .initial_indent("        ")
            .subsequent_indent("        ");
        let mut result = String::new();
        for (i, usage) in usages.iter().enumerate() {
            if i > 0 {
                result.push('\n');
            }
            result.push_str(&format!("    {}\n", usage.format));
            for (i, paragraph) in usage.long.trim().split("\n\n").enumerate() {
                if i > 0 {
                    result.push('\n');
                }
                let flattened = paragraph.replace('\n', " ");
                for line in textwrap::wrap(&flattened, &wrap_opts) {
                    result.push_str(&line);
                    result.push('\n');
                }
            }
        }
        result
    }
}

/// An error type indicating that the error is a `-h/--help` message.
///
/// `main` sniffs this out by downcasting and prints it to stdout with a
/// success exit code.
#[derive(Debug)]
pub struct Help(String);

impl Help {
    const USAGE: Usage = Usage::flag(
        "-h/--help",
        "Print help output. Use --help for more details.",
        r#"
Print help output.

The short flag, -h, shows a condensed help output with a single line for every
flag. The long flag, --help, shows complete documentation.
"#,
    );
}

impl std::fmt::Display for Help {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Help {}

/// An error type indicating that the error is a `--version` message.
///
/// Like `Help`, `main` prints this to stdout with a success exit code.
#[derive(Debug)]
pub struct Version;

impl Version {
    const USAGE: Usage = Usage::flag(
        "--version",
        "Print the version of enumdate.",
        r#"
Print the version of enumdate.
"#,
    );
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let semver = option_env!("CARGO_PKG_VERSION").unwrap_or("N/A");
        match option_env!("ENUMDATE_BUILD_GIT_HASH") {
            None => write!(f, "enumdate {semver}"),
            Some(hash) => write!(f, "enumdate {semver} (rev {hash})"),
        }
    }
}

impl std::error::Error for Version {}
