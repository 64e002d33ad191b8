use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};

use crate::lookup::{LookupError, PassWindow};

const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S %Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Local,
    Utc,
}

pub fn format_risetime(risetime: i64, zone: Zone) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp(risetime, 0) else {
        return format!("@{}", risetime);
    };
    match zone {
        Zone::Utc => utc.format(TIMESTAMP_FORMAT).to_string(),
        Zone::Local => utc.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
    }
}

pub fn format_pass(pass: &PassWindow, zone: Zone) -> String {
    format!(
        "Next pass at {} for {} seconds!",
        format_risetime(pass.risetime, zone),
        pass.duration
    )
}

/// One line per pass, in the order given.
pub fn write_passes<W: Write>(out: &mut W, passes: &[PassWindow], zone: Zone) -> io::Result<()> {
    for pass in passes {
        writeln!(out, "{}", format_pass(pass, zone))?;
    }
    Ok(())
}

pub fn write_failure<W: Write>(out: &mut W, err: &LookupError) -> io::Result<()> {
    writeln!(out, "It didn't work: {}", err)
}
