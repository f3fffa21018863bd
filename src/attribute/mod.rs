#[cfg(test)]
mod attribute_test;

use std::fmt;

use url::Url;

use crate::direction::RtpDirection;
use crate::error::{Error, Result};
use crate::lexer::split_attribute;
use crate::util::ConnectionRole;

/// Attribute keys with a dedicated grammar. Anything else parsed from an
/// "a=" line is kept as an opaque SdpAttribute::Other.
pub const ATTR_KEY_GROUP: &str = "group";
pub const ATTR_KEY_MSID_SEMANTIC: &str = "msid-semantic";
pub const ATTR_KEY_RTCP: &str = "rtcp";
pub const ATTR_KEY_ICE_UFRAG: &str = "ice-ufrag";
pub const ATTR_KEY_ICE_PWD: &str = "ice-pwd";
pub const ATTR_KEY_ICE_OPTIONS: &str = "ice-options";
pub const ATTR_KEY_ICELITE: &str = "ice-lite";
pub const ATTR_KEY_FINGERPRINT: &str = "fingerprint";
pub const ATTR_KEY_SETUP: &str = "setup";
pub const ATTR_KEY_MID: &str = "mid";
pub const ATTR_KEY_EXTMAP: &str = "extmap";
pub const ATTR_KEY_RTPMAP: &str = "rtpmap";
pub const ATTR_KEY_RTCPFB: &str = "rtcp-fb";
pub const ATTR_KEY_FMTP: &str = "fmtp";
pub const ATTR_KEY_SSRC: &str = "ssrc";
pub const ATTR_KEY_SSRCGROUP: &str = "ssrc-group";
pub const ATTR_KEY_SCTPMAP: &str = "sctpmap";
pub const ATTR_KEY_CANDIDATE: &str = "candidate";
pub const ATTR_KEY_RTCPMUX: &str = "rtcp-mux";
pub const ATTR_KEY_RTCPRSIZE: &str = "rtcp-rsize";

/// Semantic tokens for "a=group" and "a=ssrc-group".
pub const SEMANTIC_TOKEN_BUNDLE: &str = "BUNDLE";
pub const SEMANTIC_TOKEN_FLOW_IDENTIFICATION: &str = "FID";
pub const SEMANTIC_TOKEN_SIMULCAST: &str = "SIM";

/// Origin defines the structure for the "o=" field which provides the
/// originator of the session plus a session identifier and version number.
///
/// `o=<username> <sess-id> <sess-version> <nettype> <addrtype> <unicast-address>`
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    pub username: String,
    pub session_id: u64,
    pub session_version: u64,
    pub network_type: String,
    pub address_type: String,
    pub address: String,
}

impl Default for Origin {
    fn default() -> Self {
        Origin {
            username: "-".to_owned(),
            session_id: 0,
            session_version: 0,
            network_type: "IN".to_owned(),
            address_type: "IP4".to_owned(),
            address: "0.0.0.0".to_owned(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.username,
            self.session_id,
            self.session_version,
            self.network_type,
            self.address_type,
            self.address,
        )
    }
}

impl Origin {
    /// unmarshal assigns the space-delimited fields by position; missing
    /// trailing fields keep their defaults.
    pub fn unmarshal(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split_whitespace().collect();
        let mut origin = Origin::default();
        if let Some(username) = fields.first() {
            origin.username = (*username).to_owned();
        }
        if let Some(session_id) = fields.get(1) {
            origin.session_id = session_id.parse::<u64>()?;
        }
        if let Some(session_version) = fields.get(2) {
            origin.session_version = session_version.parse::<u64>()?;
        }
        if let Some(network_type) = fields.get(3) {
            origin.network_type = (*network_type).to_owned();
        }
        if let Some(address_type) = fields.get(4) {
            origin.address_type = (*address_type).to_owned();
        }
        if let Some(address) = fields.get(5) {
            origin.address = (*address).to_owned();
        }
        Ok(origin)
    }
}

/// ConnectionInformation defines the representation for the "c=" field
/// containing connection data. The same triple is embedded in the "rtcp"
/// attribute and resolved for candidates.
///
/// `c=<nettype> <addrtype> <connection-address>`
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionInformation {
    pub network_type: String,
    pub address_type: String,
    pub address: String,
}

impl Default for ConnectionInformation {
    fn default() -> Self {
        ConnectionInformation {
            network_type: "IN".to_owned(),
            address_type: "IP4".to_owned(),
            address: "0.0.0.0".to_owned(),
        }
    }
}

impl fmt::Display for ConnectionInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.network_type, self.address_type, self.address
        )
    }
}

impl ConnectionInformation {
    /// Any "/ttl" or "/range" suffix stays inside the address string so the
    /// line reserializes verbatim.
    pub fn unmarshal(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split_whitespace().collect();
        let mut conn = ConnectionInformation::default();
        if let Some(network_type) = fields.first() {
            conn.network_type = (*network_type).to_owned();
        }
        if let Some(address_type) = fields.get(1) {
            conn.address_type = (*address_type).to_owned();
        }
        if let Some(address) = fields.get(2) {
            conn.address = (*address).to_owned();
        }
        Ok(conn)
    }
}

/// Bandwidth describes the "b=" field which denotes the proposed bandwidth
/// to be used by the session or media.
///
/// `b=<bwtype>:<bandwidth>`
#[derive(Debug, Clone, PartialEq)]
pub struct Bandwidth {
    pub bandwidth_type: String,
    pub bandwidth: u64,
}

impl Default for Bandwidth {
    fn default() -> Self {
        Bandwidth {
            bandwidth_type: "AS".to_owned(),
            bandwidth: 0,
        }
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.bandwidth_type, self.bandwidth)
    }
}

impl Bandwidth {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.splitn(2, ':').collect();
        if parts.len() != 2 {
            return Err(Error::SdpInvalidSyntax(format!("`b={value}`")));
        }
        Ok(Bandwidth {
            bandwidth_type: parts[0].to_owned(),
            bandwidth: parts[1].parse::<u64>()?,
        })
    }
}

/// Timing defines the "t=" field's structured representation for the start
/// and stop times.
///
/// `t=<start-time> <stop-time>`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Timing {
    pub start_time: u64,
    pub stop_time: u64,
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start_time, self.stop_time)
    }
}

impl Timing {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split_whitespace().collect();
        let mut timing = Timing::default();
        if let Some(start_time) = fields.first() {
            timing.start_time = start_time.parse::<u64>()?;
        }
        if let Some(stop_time) = fields.get(1) {
            timing.stop_time = stop_time.parse::<u64>()?;
        }
        Ok(timing)
    }
}

/// MediaName describes the "m=" field storage structure. The transport
/// profile is kept as one token (e.g. "UDP/TLS/RTP/SAVPF") and the format
/// identifiers stay in declared order.
///
/// `m=<media> <port> <proto> <fmt> ...`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MediaName {
    pub media: String,
    pub port: u16,
    pub proto: String,
    pub formats: Vec<String>,
}

impl fmt::Display for MediaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.media, self.port, self.proto)?;
        for format in &self.formats {
            write!(f, " {format}")?;
        }
        Ok(())
    }
}

impl MediaName {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(Error::SdpInvalidSyntax(format!("`m={value}`")));
        }
        Ok(MediaName {
            media: fields[0].to_owned(),
            port: fields[1].parse::<u16>()?,
            proto: fields[2].to_owned(),
            formats: fields[3..].iter().map(|s| (*s).to_owned()).collect(),
        })
    }
}

/// Group describes the "a=group" attribute, most prominently
/// `a=group:BUNDLE` listing the mids multiplexed onto one transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub semantic: String,
    pub mids: Vec<String>,
}

impl Default for Group {
    fn default() -> Self {
        Group {
            semantic: SEMANTIC_TOKEN_BUNDLE.to_owned(),
            mids: vec![],
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.semantic)?;
        for mid in &self.mids {
            write!(f, " {mid}")?;
        }
        Ok(())
    }
}

impl Group {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let mut fields = value.split_whitespace();
        let semantic = fields
            .next()
            .ok_or_else(|| Error::SdpInvalidSyntax(format!("`group:{value}`")))?;
        Ok(Group {
            semantic: semantic.to_owned(),
            mids: fields.map(|s| s.to_owned()).collect(),
        })
    }
}

/// MsidSemantic describes the "a=msid-semantic" attribute which binds a
/// grouping semantic (usually "WMS") to media stream identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct MsidSemantic {
    pub semantic: String,
    pub token: String,
}

impl Default for MsidSemantic {
    fn default() -> Self {
        MsidSemantic {
            semantic: "WMS".to_owned(),
            token: String::new(),
        }
    }
}

impl fmt::Display for MsidSemantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.token.is_empty() {
            write!(f, "{}", self.semantic)
        } else {
            write!(f, "{} {}", self.semantic, self.token)
        }
    }
}

impl MsidSemantic {
    pub fn unmarshal(value: &str) -> Result<Self> {
        // Chrome emits "msid-semantic: WMS …" with a leading space.
        let mut fields = value.trim().splitn(2, char::is_whitespace);
        let semantic = fields
            .next()
            .ok_or_else(|| Error::SdpInvalidSyntax(format!("`msid-semantic:{value}`")))?;
        Ok(MsidSemantic {
            semantic: semantic.to_owned(),
            token: fields.next().unwrap_or("").to_owned(),
        })
    }
}

/// RtcpAddress describes the "a=rtcp" attribute carrying the RTCP port and
/// optionally a full connection triple.
///
/// `a=rtcp:9 IN IP4 0.0.0.0`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RtcpAddress {
    pub port: u16,
    pub connection: Option<ConnectionInformation>,
}

impl fmt::Display for RtcpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.port)?;
        if let Some(connection) = &self.connection {
            write!(f, " {connection}")?;
        }
        Ok(())
    }
}

impl RtcpAddress {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let mut fields = value.splitn(2, char::is_whitespace);
        let port = fields
            .next()
            .ok_or_else(|| Error::SdpInvalidSyntax(format!("`rtcp:{value}`")))?
            .parse::<u16>()?;
        let connection = match fields.next() {
            Some(rest) => Some(ConnectionInformation::unmarshal(rest)?),
            None => None,
        };
        Ok(RtcpAddress { port, connection })
    }
}

/// Fingerprint describes the "a=fingerprint" attribute binding the DTLS
/// certificate to the session.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Fingerprint {
    pub algorithm: String,
    pub digest: String,
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.algorithm, self.digest)
    }
}

impl Fingerprint {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(Error::SdpInvalidSyntax(format!("`fingerprint:{value}`")));
        }
        Ok(Fingerprint {
            algorithm: fields[0].to_owned(),
            digest: fields[1].to_owned(),
        })
    }
}

/// ExtMap represents the activation of a single RTP header extension.
///
/// `a=extmap:<value>["/"<direction>] <uri> [<extensionattributes>]`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExtMap {
    pub value: u16,
    pub direction: RtpDirection,
    pub uri: Option<Url>,
    pub ext_attr: Option<String>,
}

impl fmt::Display for ExtMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if self.direction != RtpDirection::Invalid {
            write!(f, "/{}", self.direction)?;
        }
        if let Some(uri) = &self.uri {
            write!(f, " {uri}")?;
        }
        if let Some(ext_attr) = &self.ext_attr {
            write!(f, " {ext_attr}")?;
        }
        Ok(())
    }
}

impl ExtMap {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split_whitespace().collect();
        if fields.is_empty() {
            return Err(Error::ParseExtMap(value.to_owned()));
        }

        let valdir: Vec<&str> = fields[0].split('/').collect();
        let id = valdir[0].parse::<u16>()?;
        if !(1..=246).contains(&id) {
            return Err(Error::ParseExtMap(format!(
                "{} -- extmap key must be in the range 1-246",
                valdir[0]
            )));
        }

        let mut direction = RtpDirection::Invalid;
        if valdir.len() == 2 {
            direction = RtpDirection::new(valdir[1]);
            if direction == RtpDirection::Invalid {
                return Err(Error::ParseExtMap(format!(
                    "unknown direction from {}",
                    valdir[1]
                )));
            }
        }

        let uri = match fields.get(1) {
            Some(uri) => Some(Url::parse(uri)?),
            None => None,
        };

        let ext_attr = if fields.len() > 2 {
            Some(fields[2..].join(" "))
        } else {
            None
        };

        Ok(ExtMap {
            value: id,
            direction,
            uri,
            ext_attr,
        })
    }
}

/// RtpMap binds a payload type to its codec name, clock rate and channel
/// count.
///
/// `a=rtpmap:<payload type> <encoding name>/<clock rate>[/<encoding parameters>]`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RtpMap {
    pub payload_type: u8,
    pub codec: String,
    pub clock_rate: u32,
    /// 0 when the channel count is absent or irrelevant.
    pub channels: u32,
}

impl fmt::Display for RtpMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.payload_type, self.codec, self.clock_rate)?;
        if self.channels > 0 {
            write!(f, "/{}", self.channels)?;
        }
        Ok(())
    }
}

impl RtpMap {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(Error::SdpInvalidSyntax(format!("`rtpmap:{value}`")));
        }
        let payload_type = fields[0].parse::<u8>()?;

        let split: Vec<&str> = fields[1].split('/').collect();
        let codec = split[0].to_owned();
        let clock_rate = if split.len() > 1 {
            split[1].parse::<u32>()?
        } else {
            0
        };
        let channels = if split.len() > 2 {
            split[2].parse::<u32>()?
        } else {
            0
        };

        Ok(RtpMap {
            payload_type,
            codec,
            clock_rate,
            channels,
        })
    }
}

/// RtcpFeedback lists the RTCP feedback mechanisms enabled for one payload
/// type (nack, nack pli, ccm fir, goog-remb, transport-cc, ...).
///
/// `a=rtcp-fb:<payload type> <feedback> ...`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RtcpFeedback {
    pub payload_type: u8,
    pub feedback: Vec<String>,
}

impl fmt::Display for RtcpFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.payload_type)?;
        for token in &self.feedback {
            write!(f, " {token}")?;
        }
        Ok(())
    }
}

impl RtcpFeedback {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let mut fields = value.split_whitespace();
        let payload_type = fields
            .next()
            .ok_or_else(|| Error::SdpInvalidSyntax(format!("`rtcp-fb:{value}`")))?
            .parse::<u8>()?;
        Ok(RtcpFeedback {
            payload_type,
            feedback: fields.map(|s| s.to_owned()).collect(),
        })
    }
}

/// Fmtp carries format specific parameters for one payload type as an
/// ordered key/value list. Duplicate keys are preserved, and a token
/// without '=' keeps an empty value.
///
/// `a=fmtp:<format> <format specific parameters>`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Fmtp {
    pub payload_type: u8,
    pub parameters: Vec<(String, String)>,
}

impl fmt::Display for Fmtp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.payload_type)?;
        let mut first = true;
        for (key, value) in &self.parameters {
            let sep = if first { ' ' } else { ';' };
            first = false;
            if value.is_empty() {
                write!(f, "{sep}{key}")?;
            } else {
                write!(f, "{sep}{key}={value}")?;
            }
        }
        Ok(())
    }
}

impl Fmtp {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let mut fields = value.splitn(2, char::is_whitespace);
        let payload_type = fields
            .next()
            .ok_or_else(|| Error::SdpInvalidSyntax(format!("`fmtp:{value}`")))?
            .parse::<u8>()?;

        let mut parameters = vec![];
        if let Some(rest) = fields.next() {
            for token in rest.split(';') {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                let mut kv = token.splitn(2, '=');
                let key = kv.next().unwrap_or("").to_owned();
                let value = kv.next().unwrap_or("").to_owned();
                parameters.push((key, value));
            }
        }

        Ok(Fmtp {
            payload_type,
            parameters,
        })
    }
}

/// Ssrc describes one "a=ssrc" source-attribute line. Multiple lines share
/// the same ssrc id, one per attribute.
///
/// `a=ssrc:<ssrc-id> <attribute>[:<value>]`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Ssrc {
    pub ssrc: u32,
    pub attribute: String,
    pub value: String,
}

impl fmt::Display for Ssrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{} {}", self.ssrc, self.attribute)
        } else {
            write!(f, "{} {}:{}", self.ssrc, self.attribute, self.value)
        }
    }
}

impl Ssrc {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let mut fields = value.splitn(2, char::is_whitespace);
        let ssrc = fields
            .next()
            .ok_or_else(|| Error::SdpInvalidSyntax(format!("`ssrc:{value}`")))?
            .parse::<u32>()?;
        let rest = fields
            .next()
            .ok_or_else(|| Error::SdpInvalidSyntax(format!("`ssrc:{value}`")))?;

        let mut kv = rest.splitn(2, ':');
        Ok(Ssrc {
            ssrc,
            attribute: kv.next().unwrap_or("").to_owned(),
            value: kv.next().unwrap_or("").to_owned(),
        })
    }
}

/// SsrcGroup associates several RTP streams: FID pairs a stream with its
/// retransmission flow, SIM orders three simulcast tiers from low to high.
/// Exactly one shape is valid per semantic.
///
/// `a=ssrc-group:FID 2430709021 3715850271`
/// `a=ssrc-group:SIM 360918977 360918978 360918980`
#[derive(Debug, Clone, PartialEq)]
pub enum SsrcGroup {
    Fid { rtp: u32, rtx: u32 },
    Sim { low: u32, mid: u32, high: u32 },
}

impl fmt::Display for SsrcGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SsrcGroup::Fid { rtp, rtx } => {
                write!(f, "{SEMANTIC_TOKEN_FLOW_IDENTIFICATION} {rtp} {rtx}")
            }
            SsrcGroup::Sim { low, mid, high } => {
                write!(f, "{SEMANTIC_TOKEN_SIMULCAST} {low} {mid} {high}")
            }
        }
    }
}

impl SsrcGroup {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split_whitespace().collect();
        let semantic = fields.first().copied().unwrap_or("");
        if semantic == SEMANTIC_TOKEN_FLOW_IDENTIFICATION && fields.len() == 3 {
            Ok(SsrcGroup::Fid {
                rtp: fields[1].parse::<u32>()?,
                rtx: fields[2].parse::<u32>()?,
            })
        } else if semantic == SEMANTIC_TOKEN_SIMULCAST && fields.len() == 4 {
            Ok(SsrcGroup::Sim {
                low: fields[1].parse::<u32>()?,
                mid: fields[2].parse::<u32>()?,
                high: fields[3].parse::<u32>()?,
            })
        } else {
            Err(Error::SdpInvalidValue(format!("`ssrc-group:{value}`")))
        }
    }

    /// members returns the ssrc ids in declared order.
    pub fn members(&self) -> Vec<u32> {
        match self {
            SsrcGroup::Fid { rtp, rtx } => vec![*rtp, *rtx],
            SsrcGroup::Sim { low, mid, high } => vec![*low, *mid, *high],
        }
    }
}

/// SctpMap describes the "a=sctpmap" attribute of data channel media.
///
/// `a=sctpmap:<number> <media-subtypes> [streams]`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SctpMap {
    pub port: u16,
    pub subprotocol: String,
    /// 0 when the stream count is absent.
    pub streams: u32,
}

impl fmt::Display for SctpMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.port, self.subprotocol)?;
        if self.streams > 0 {
            write!(f, " {}", self.streams)?;
        }
        Ok(())
    }
}

impl SctpMap {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(Error::SdpInvalidSyntax(format!("`sctpmap:{value}`")));
        }
        Ok(SctpMap {
            port: fields[0].parse::<u16>()?,
            subprotocol: fields[1].to_owned(),
            streams: match fields.get(2) {
                Some(streams) => streams.parse::<u32>()?,
                None => 0,
            },
        })
    }
}

/// IceCandidate describes one "a=candidate" attribute. Everything after the
/// candidate type, including raddr/rport, is kept as ordered extension
/// key/value pairs.
///
/// `a=candidate:<foundation> <component-id> <transport> <priority> <address> <port> typ <cand-type> *(<ext-name> <ext-value>)`
#[derive(Debug, Clone, PartialEq)]
pub struct IceCandidate {
    pub foundation: String,
    pub component: u16,
    pub transport: String,
    pub priority: u32,
    pub address: String,
    pub port: u16,
    pub typ: String,
    pub extensions: Vec<(String, String)>,
}

impl Default for IceCandidate {
    fn default() -> Self {
        IceCandidate {
            foundation: String::new(),
            component: 0,
            transport: "udp".to_owned(),
            priority: 0,
            address: String::new(),
            port: 0,
            typ: String::new(),
            extensions: vec![],
        }
    }
}

impl fmt::Display for IceCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} typ {}",
            self.foundation,
            self.component,
            self.transport,
            self.priority,
            self.address,
            self.port,
            self.typ,
        )?;
        for (key, value) in &self.extensions {
            if value.is_empty() {
                write!(f, " {key}")?;
            } else {
                write!(f, " {key} {value}")?;
            }
        }
        Ok(())
    }
}

impl IceCandidate {
    pub fn unmarshal(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split_whitespace().collect();
        if fields.len() < 8 || fields[6] != "typ" {
            return Err(Error::SdpInvalidSyntax(format!("`candidate:{value}`")));
        }

        let mut extensions = vec![];
        for pair in fields[8..].chunks(2) {
            extensions.push((
                pair[0].to_owned(),
                pair.get(1).map(|s| (*s).to_owned()).unwrap_or_default(),
            ));
        }

        Ok(IceCandidate {
            foundation: fields[0].to_owned(),
            component: fields[1].parse::<u16>()?,
            transport: fields[2].to_owned(),
            priority: fields[3].parse::<u32>()?,
            address: fields[4].to_owned(),
            port: fields[5].parse::<u16>()?,
            typ: fields[7].to_owned(),
            extensions,
        })
    }
}

/// SdpAttribute is the typed payload of one "a=" line. Known attribute
/// names dispatch to their own grammar; everything else, including flag
/// attributes such as "rtcp-mux" or "sendrecv", is preserved verbatim in
/// SdpAttribute::Other.
#[derive(Debug, Clone, PartialEq)]
pub enum SdpAttribute {
    Group(Group),
    MsidSemantic(MsidSemantic),
    Rtcp(RtcpAddress),
    IceUfrag(String),
    IcePwd(String),
    IceOptions(String),
    Fingerprint(Fingerprint),
    Setup(ConnectionRole),
    Mid(String),
    ExtMap(ExtMap),
    RtpMap(RtpMap),
    RtcpFeedback(RtcpFeedback),
    Fmtp(Fmtp),
    Ssrc(Ssrc),
    SsrcGroup(SsrcGroup),
    SctpMap(SctpMap),
    Candidate(IceCandidate),
    Other { key: String, value: Option<String> },
}

impl SdpAttribute {
    /// key returns the attribute name this payload serializes under.
    pub fn key(&self) -> &str {
        match self {
            SdpAttribute::Group(_) => ATTR_KEY_GROUP,
            SdpAttribute::MsidSemantic(_) => ATTR_KEY_MSID_SEMANTIC,
            SdpAttribute::Rtcp(_) => ATTR_KEY_RTCP,
            SdpAttribute::IceUfrag(_) => ATTR_KEY_ICE_UFRAG,
            SdpAttribute::IcePwd(_) => ATTR_KEY_ICE_PWD,
            SdpAttribute::IceOptions(_) => ATTR_KEY_ICE_OPTIONS,
            SdpAttribute::Fingerprint(_) => ATTR_KEY_FINGERPRINT,
            SdpAttribute::Setup(_) => ATTR_KEY_SETUP,
            SdpAttribute::Mid(_) => ATTR_KEY_MID,
            SdpAttribute::ExtMap(_) => ATTR_KEY_EXTMAP,
            SdpAttribute::RtpMap(_) => ATTR_KEY_RTPMAP,
            SdpAttribute::RtcpFeedback(_) => ATTR_KEY_RTCPFB,
            SdpAttribute::Fmtp(_) => ATTR_KEY_FMTP,
            SdpAttribute::Ssrc(_) => ATTR_KEY_SSRC,
            SdpAttribute::SsrcGroup(_) => ATTR_KEY_SSRCGROUP,
            SdpAttribute::SctpMap(_) => ATTR_KEY_SCTPMAP,
            SdpAttribute::Candidate(_) => ATTR_KEY_CANDIDATE,
            SdpAttribute::Other { key, .. } => key,
        }
    }

    /// unmarshal dispatches the value of one "a=" line on the attribute name
    /// before the first ':'. The Other fallback keeps unrecognized
    /// attributes round-tripping without data loss.
    pub fn unmarshal(value: &str) -> Result<Self> {
        let (key, rest) = split_attribute(value);
        let Some(rest) = rest else {
            return Ok(SdpAttribute::Other {
                key: key.to_owned(),
                value: None,
            });
        };

        Ok(match key {
            ATTR_KEY_GROUP => SdpAttribute::Group(Group::unmarshal(rest)?),
            ATTR_KEY_MSID_SEMANTIC => SdpAttribute::MsidSemantic(MsidSemantic::unmarshal(rest)?),
            ATTR_KEY_RTCP => SdpAttribute::Rtcp(RtcpAddress::unmarshal(rest)?),
            ATTR_KEY_ICE_UFRAG => SdpAttribute::IceUfrag(rest.to_owned()),
            ATTR_KEY_ICE_PWD => SdpAttribute::IcePwd(rest.to_owned()),
            ATTR_KEY_ICE_OPTIONS => SdpAttribute::IceOptions(rest.to_owned()),
            ATTR_KEY_FINGERPRINT => SdpAttribute::Fingerprint(Fingerprint::unmarshal(rest)?),
            ATTR_KEY_SETUP => SdpAttribute::Setup(ConnectionRole::from(rest)),
            ATTR_KEY_MID => SdpAttribute::Mid(rest.to_owned()),
            ATTR_KEY_EXTMAP => SdpAttribute::ExtMap(ExtMap::unmarshal(rest)?),
            ATTR_KEY_RTPMAP => SdpAttribute::RtpMap(RtpMap::unmarshal(rest)?),
            ATTR_KEY_RTCPFB => SdpAttribute::RtcpFeedback(RtcpFeedback::unmarshal(rest)?),
            ATTR_KEY_FMTP => SdpAttribute::Fmtp(Fmtp::unmarshal(rest)?),
            ATTR_KEY_SSRC => SdpAttribute::Ssrc(Ssrc::unmarshal(rest)?),
            ATTR_KEY_SSRCGROUP => SdpAttribute::SsrcGroup(SsrcGroup::unmarshal(rest)?),
            ATTR_KEY_SCTPMAP => SdpAttribute::SctpMap(SctpMap::unmarshal(rest)?),
            ATTR_KEY_CANDIDATE => SdpAttribute::Candidate(IceCandidate::unmarshal(rest)?),
            _ => SdpAttribute::Other {
                key: key.to_owned(),
                value: Some(rest.to_owned()),
            },
        })
    }
}

impl fmt::Display for SdpAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpAttribute::Group(group) => write!(f, "{}:{group}", self.key()),
            SdpAttribute::MsidSemantic(msid) => write!(f, "{}:{msid}", self.key()),
            SdpAttribute::Rtcp(rtcp) => write!(f, "{}:{rtcp}", self.key()),
            SdpAttribute::IceUfrag(ufrag) => write!(f, "{}:{ufrag}", self.key()),
            SdpAttribute::IcePwd(pwd) => write!(f, "{}:{pwd}", self.key()),
            SdpAttribute::IceOptions(options) => write!(f, "{}:{options}", self.key()),
            SdpAttribute::Fingerprint(fingerprint) => write!(f, "{}:{fingerprint}", self.key()),
            SdpAttribute::Setup(role) => write!(f, "{}:{role}", self.key()),
            SdpAttribute::Mid(mid) => write!(f, "{}:{mid}", self.key()),
            SdpAttribute::ExtMap(extmap) => write!(f, "{}:{extmap}", self.key()),
            SdpAttribute::RtpMap(rtpmap) => write!(f, "{}:{rtpmap}", self.key()),
            SdpAttribute::RtcpFeedback(fb) => write!(f, "{}:{fb}", self.key()),
            SdpAttribute::Fmtp(fmtp) => write!(f, "{}:{fmtp}", self.key()),
            SdpAttribute::Ssrc(ssrc) => write!(f, "{}:{ssrc}", self.key()),
            SdpAttribute::SsrcGroup(group) => write!(f, "{}:{group}", self.key()),
            SdpAttribute::SctpMap(sctpmap) => write!(f, "{}:{sctpmap}", self.key()),
            SdpAttribute::Candidate(candidate) => write!(f, "{}:{candidate}", self.key()),
            SdpAttribute::Other { key, value } => match value {
                Some(value) => write!(f, "{key}:{value}"),
                None => write!(f, "{key}"),
            },
        }
    }
}

/// SdpLine is one parsed SDP line: a typed value plus the line key it
/// serializes under. Unknown line types degrade to SdpLine::Raw.
#[derive(Debug, Clone, PartialEq)]
pub enum SdpLine {
    Version(u32),
    Origin(Origin),
    SessionName(String),
    Information(String),
    Uri(String),
    Email(String),
    Phone(String),
    Connection(ConnectionInformation),
    Bandwidth(Bandwidth),
    Timing(Timing),
    RepeatTimes(String),
    TimeZones(String),
    EncryptionKey(String),
    Media(MediaName),
    Attribute(SdpAttribute),
    Raw { key: String, value: String },
}

impl SdpLine {
    /// key returns the single-character line type ("v", "o", ...), or the
    /// literal prefix of an unknown line.
    pub fn key(&self) -> &str {
        match self {
            SdpLine::Version(_) => "v",
            SdpLine::Origin(_) => "o",
            SdpLine::SessionName(_) => "s",
            SdpLine::Information(_) => "i",
            SdpLine::Uri(_) => "u",
            SdpLine::Email(_) => "e",
            SdpLine::Phone(_) => "p",
            SdpLine::Connection(_) => "c",
            SdpLine::Bandwidth(_) => "b",
            SdpLine::Timing(_) => "t",
            SdpLine::RepeatTimes(_) => "r",
            SdpLine::TimeZones(_) => "z",
            SdpLine::EncryptionKey(_) => "k",
            SdpLine::Media(_) => "m",
            SdpLine::Attribute(_) => "a",
            SdpLine::Raw { key, .. } => key,
        }
    }

    /// unmarshal builds the typed value for one line from its key and the
    /// remainder after '='.
    pub fn unmarshal(key: &str, value: &str) -> Result<Self> {
        Ok(match key {
            "v" => SdpLine::Version(value.trim().parse::<u32>()?),
            "o" => SdpLine::Origin(Origin::unmarshal(value)?),
            "s" => SdpLine::SessionName(value.to_owned()),
            "i" => SdpLine::Information(value.to_owned()),
            "u" => SdpLine::Uri(value.to_owned()),
            "e" => SdpLine::Email(value.to_owned()),
            "p" => SdpLine::Phone(value.to_owned()),
            "c" => SdpLine::Connection(ConnectionInformation::unmarshal(value)?),
            "b" => SdpLine::Bandwidth(Bandwidth::unmarshal(value)?),
            "t" => SdpLine::Timing(Timing::unmarshal(value)?),
            "r" => SdpLine::RepeatTimes(value.to_owned()),
            "z" => SdpLine::TimeZones(value.to_owned()),
            "k" => SdpLine::EncryptionKey(value.to_owned()),
            "m" => SdpLine::Media(MediaName::unmarshal(value)?),
            "a" => SdpLine::Attribute(SdpAttribute::unmarshal(value)?),
            _ => SdpLine::Raw {
                key: key.to_owned(),
                value: value.to_owned(),
            },
        })
    }
}

impl fmt::Display for SdpLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpLine::Version(version) => write!(f, "{version}"),
            SdpLine::Origin(origin) => write!(f, "{origin}"),
            SdpLine::SessionName(name) => write!(f, "{name}"),
            SdpLine::Information(info) => write!(f, "{info}"),
            SdpLine::Uri(uri) => write!(f, "{uri}"),
            SdpLine::Email(email) => write!(f, "{email}"),
            SdpLine::Phone(phone) => write!(f, "{phone}"),
            SdpLine::Connection(conn) => write!(f, "{conn}"),
            SdpLine::Bandwidth(bandwidth) => write!(f, "{bandwidth}"),
            SdpLine::Timing(timing) => write!(f, "{timing}"),
            SdpLine::RepeatTimes(value)
            | SdpLine::TimeZones(value)
            | SdpLine::EncryptionKey(value) => write!(f, "{value}"),
            SdpLine::Media(media) => write!(f, "{media}"),
            SdpLine::Attribute(attribute) => write!(f, "{attribute}"),
            SdpLine::Raw { value, .. } => write!(f, "{value}"),
        }
    }
}
