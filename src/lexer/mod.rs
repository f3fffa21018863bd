use core::fmt;
use std::fmt::Display;

use super::error::{Error, Result};

pub(crate) const END_LINE: &str = "\r\n";

/// split_line separates one SDP line into its type key and value at the
/// first '='. The key is everything before the separator ("v", "o", or a
/// longer literal prefix for non-standard lines).
pub fn split_line(line: &str) -> Result<(&str, &str)> {
    match line.find('=') {
        Some(0) | None => Err(Error::SyntaxError {
            s: line.to_owned(),
            p: 0,
        }),
        Some(p) => Ok((&line[..p], &line[p + 1..])),
    }
}

/// split_attribute separates an "a=" value into its attribute name and the
/// remainder after the first ':'. Flag attributes have no remainder.
pub fn split_attribute(value: &str) -> (&str, Option<&str>) {
    match value.find(':') {
        Some(p) => (&value[..p], Some(&value[p + 1..])),
        None => (value, None),
    }
}

pub fn write_key_value<W: fmt::Write, V: Display>(
    writer: &mut W,
    key: &str,
    value: Option<V>,
) -> fmt::Result {
    let Some(value) = value else {
        return Ok(());
    };

    write!(writer, "{key}{value}{END_LINE}")
}
