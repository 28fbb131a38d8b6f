mod frames;
mod seq;

const USAGE: &'static str = "\
Enumerate the dates of recurring calendar events.

USAGE:
    enumdate <command> ...

COMMANDS:
    frames  Print the first day of every frame (year, month, week or day)
    seq     Generate the dates of one or more recurrence rules
";

pub fn run(p: &mut lexopt::Parser) -> anyhow::Result<()> {
    let cmd = crate::args::next_as_command(USAGE, p)?;
    match &*cmd {
        "frames" => frames::run(p),
        "seq" => seq::run(p),
        unk => anyhow::bail!("unrecognized command '{}'", unk),
    }
}
