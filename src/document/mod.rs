#[cfg(test)]
mod document_test;

use std::convert::TryFrom;
use std::fmt;
use std::io;

use crate::attribute::SdpLine;
use crate::error::{Error, Result};
use crate::lexer::split_line;
use crate::section::SdpSection;

/// Canonical session-level line order per RFC 4566 section 5.
const SESSION_LINE_ORDER: &[&str] = &[
    "v", "o", "s", "i", "u", "e", "p", "c", "b", "t", "r", "z", "k",
];

/// Canonical media-level line order.
const MEDIA_LINE_ORDER: &[&str] = &["m", "i", "c", "b", "k"];

/// SdpDocument is one parsed SDP text: the session-scope section followed
/// by one section per "m=" line, in source order.
///
/// Parsing is resilient: a malformed line is dropped with a diagnostic and
/// the rest of the document is kept, since real-world SDP from varied
/// clients is not always strictly conformant. Only a document with zero
/// parsable lines fails.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SdpDocument {
    pub session: SdpSection,
    pub medias: Vec<SdpSection>,
}

impl SdpDocument {
    /// unmarshal reads and parses a whole SDP text.
    pub fn unmarshal<R: io::BufRead>(reader: &mut R) -> Result<Self> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Self::parse(&raw)
    }

    /// parse splits the text into lines and folds them into scoped
    /// sections. Lines before the first "m=" belong to the session scope;
    /// an "m=" line opens a new media scope and belongs to it.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut doc = SdpDocument::default();
        let mut dropped = 0usize;

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parsed = split_line(line)
                .and_then(|(key, value)| SdpLine::unmarshal(key, value));
            match parsed {
                Ok(line @ SdpLine::Media(_)) => {
                    let mut section = SdpSection::default();
                    section.push(line);
                    doc.medias.push(section);
                }
                Ok(line) => match doc.medias.last_mut() {
                    Some(media) => media.push(line),
                    None => doc.session.push(line),
                },
                Err(err) => {
                    log::warn!("dropping malformed SDP line `{line}`: {err}");
                    dropped += 1;
                }
            }
        }

        if doc.session.is_empty() && doc.medias.is_empty() {
            return Err(Error::SdpEmptyDocument);
        }
        if dropped > 0 {
            log::trace!("dropped {dropped} malformed SDP lines");
        }

        Ok(doc)
    }

    /// marshal emits the document in canonical line order: the session
    /// section first, then each media section, each line CRLF-terminated.
    pub fn marshal(&self) -> String {
        self.to_string()
    }

    /// media_count returns the number of media sections, one per "m=" line
    /// in the source.
    pub fn media_count(&self) -> usize {
        self.medias.len()
    }
}

impl fmt::Display for SdpDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.session.write_ordered(f, SESSION_LINE_ORDER)?;
        for media in &self.medias {
            media.write_ordered(f, MEDIA_LINE_ORDER)?;
        }
        Ok(())
    }
}

impl From<SdpDocument> for String {
    fn from(doc: SdpDocument) -> String {
        doc.marshal()
    }
}

impl TryFrom<&str> for SdpDocument {
    type Error = Error;
    fn try_from(raw: &str) -> Result<Self> {
        SdpDocument::parse(raw)
    }
}

impl TryFrom<String> for SdpDocument {
    type Error = Error;
    fn try_from(raw: String) -> Result<Self> {
        SdpDocument::parse(&raw)
    }
}
