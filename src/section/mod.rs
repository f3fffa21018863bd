
use core::fmt;

use crate::attribute::*;
use crate::direction::RtpDirection;
use crate::lexer::write_key_value;

/// SdpSection is the ordered list of lines making up one SDP scope: either
/// the session block or one media block. Arrival order is preserved exactly;
/// it is also the canonical order for repeatable attributes (candidate
/// priority, extmap, ssrc).
///
/// Lookup is deliberately dual-path: `find`/`find_attribute` return the
/// first match for singleton lines, repeatable attributes are collected
/// through `attributes()`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SdpSection {
    lines: Vec<SdpLine>,
}

impl SdpSection {
    /// push appends one line, preserving arrival order.
    pub fn push(&mut self, line: SdpLine) {
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[SdpLine] {
        &self.lines
    }

    /// find returns the first line whose type key matches, scanning in
    /// declared order.
    pub fn find(&self, key: &str) -> Option<&SdpLine> {
        self.lines.iter().find(|line| line.key() == key)
    }

    /// find_attribute returns the first "a=" payload whose attribute name
    /// matches, skipping non-attribute lines.
    pub fn find_attribute(&self, name: &str) -> Option<&SdpAttribute> {
        self.attributes().find(|attr| attr.key() == name)
    }

    /// attributes iterates all "a=" payloads in declared order. This is the
    /// collection path for repeatable attributes.
    pub fn attributes(&self) -> impl Iterator<Item = &SdpAttribute> {
        self.lines.iter().filter_map(|line| match line {
            SdpLine::Attribute(attr) => Some(attr),
            _ => None,
        })
    }

    /// has_attribute returns whether an attribute with the given name
    /// exists, valued or flag.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.find_attribute(name).is_some()
    }

    /// attr_value returns the string payload of the first matching
    /// attribute, for the attributes whose grammar is a bare string
    /// (ice-ufrag, ice-pwd, ice-options, mid) and for opaque ones.
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        match self.find_attribute(name)? {
            SdpAttribute::IceUfrag(value)
            | SdpAttribute::IcePwd(value)
            | SdpAttribute::IceOptions(value)
            | SdpAttribute::Mid(value) => Some(value),
            SdpAttribute::Other { value, .. } => value.as_deref(),
            _ => None,
        }
    }

    pub fn version(&self) -> Option<u32> {
        match self.find("v")? {
            SdpLine::Version(version) => Some(*version),
            _ => None,
        }
    }

    pub fn origin(&self) -> Option<&Origin> {
        match self.find("o")? {
            SdpLine::Origin(origin) => Some(origin),
            _ => None,
        }
    }

    pub fn session_name(&self) -> Option<&str> {
        match self.find("s")? {
            SdpLine::SessionName(name) => Some(name),
            _ => None,
        }
    }

    pub fn information(&self) -> Option<&str> {
        match self.find("i")? {
            SdpLine::Information(info) => Some(info),
            _ => None,
        }
    }

    pub fn connection(&self) -> Option<&ConnectionInformation> {
        match self.find("c")? {
            SdpLine::Connection(conn) => Some(conn),
            _ => None,
        }
    }

    pub fn bandwidth(&self) -> Option<&Bandwidth> {
        match self.find("b")? {
            SdpLine::Bandwidth(bandwidth) => Some(bandwidth),
            _ => None,
        }
    }

    pub fn timing(&self) -> Option<&Timing> {
        match self.find("t")? {
            SdpLine::Timing(timing) => Some(timing),
            _ => None,
        }
    }

    pub fn media(&self) -> Option<&MediaName> {
        match self.find("m")? {
            SdpLine::Media(media) => Some(media),
            _ => None,
        }
    }

    /// direction scans for the first flag attribute that names an RTP
    /// direction; absent or unrecognized resolves to RtpDirection::Invalid.
    pub fn direction(&self) -> RtpDirection {
        for attr in self.attributes() {
            if let SdpAttribute::Other { key, value: None } = attr {
                let direction = RtpDirection::new(key);
                if direction != RtpDirection::Invalid {
                    return direction;
                }
            }
        }
        RtpDirection::Invalid
    }

    /// write_ordered emits the section's lines grouped by type in the given
    /// canonical key order, preserving relative order within a type.
    /// Unknown line types follow the listed ones; "a=" lines always come
    /// last, in arrival order.
    pub(crate) fn write_ordered(&self, f: &mut fmt::Formatter<'_>, order: &[&str]) -> fmt::Result {
        for key in order {
            // A repeat line belongs to the timing line it follows, so "t"
            // and "r" are emitted together in arrival order.
            if *key == "r" {
                continue;
            }
            if *key == "t" {
                for line in self
                    .lines
                    .iter()
                    .filter(|line| line.key() == "t" || line.key() == "r")
                {
                    write_key_value(f, &format!("{}=", line.key()), Some(line))?;
                }
                continue;
            }
            let prefix = format!("{key}=");
            for line in self.lines.iter().filter(|line| line.key() == *key) {
                write_key_value(f, &prefix, Some(line))?;
            }
        }
        for line in &self.lines {
            let key = line.key();
            if key != "a" && !order.contains(&key) {
                write_key_value(f, &format!("{key}="), Some(line))?;
            }
        }
        for line in self.lines.iter().filter(|line| line.key() == "a") {
            write_key_value(f, "a=", Some(line))?;
        }
        Ok(())
    }
}
