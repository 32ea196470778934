//! The `expand` command: show the date pairs searched for a trip.

use std::io::Write;

use farewatch_core::{expand_date_range, parse_day_first};

/// Print every `(departure, return)` pair searched around the given dates.
///
/// # Errors
///
/// Returns an error if either date does not parse, the return date is not
/// after the departure date, or stdout cannot be written.
pub(crate) fn run_expand(departure: &str, return_date: &str) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_expansion(&mut stdout.lock(), departure, return_date)
}

fn write_expansion<W: Write>(
    out: &mut W,
    departure: &str,
    return_date: &str,
) -> anyhow::Result<()> {
    let dep = parse_day_first(departure)?;
    let ret = parse_day_first(return_date)?;
    if dep >= ret {
        anyhow::bail!("return date {ret} must be after departure date {dep}");
    }
    for pair in expand_date_range(dep, ret) {
        writeln!(out, "{pair}")?;
    }
    Ok(())
}
