
use std::fmt;

/// ConnectionRole indicates which of the end points should initiate the DTLS
/// connection establishment ("a=setup").
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConnectionRole {
    /// ConnectionRole::Invalid marks an unrecognized or absent role token.
    #[default]
    Invalid,

    /// ConnectionRole::Active indicates the endpoint will initiate an outgoing connection.
    Active,

    /// ConnectionRole::Passive indicates the endpoint will accept an incoming connection.
    Passive,

    /// ConnectionRole::Actpass indicates the endpoint is willing to accept an
    /// incoming connection or to initiate an outgoing connection.
    Actpass,
}

const CONNECTION_ROLE_ACTIVE_STR: &str = "active";
const CONNECTION_ROLE_PASSIVE_STR: &str = "passive";
const CONNECTION_ROLE_ACTPASS_STR: &str = "actpass";

impl fmt::Display for ConnectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionRole::Active => CONNECTION_ROLE_ACTIVE_STR,
            ConnectionRole::Passive => CONNECTION_ROLE_PASSIVE_STR,
            ConnectionRole::Actpass => CONNECTION_ROLE_ACTPASS_STR,
            _ => "invalid",
        };
        write!(f, "{s}")
    }
}

impl From<&str> for ConnectionRole {
    fn from(raw: &str) -> Self {
        match raw {
            CONNECTION_ROLE_ACTIVE_STR => ConnectionRole::Active,
            CONNECTION_ROLE_PASSIVE_STR => ConnectionRole::Passive,
            CONNECTION_ROLE_ACTPASS_STR => ConnectionRole::Actpass,
            _ => ConnectionRole::Invalid,
        }
    }
}

/// TrackKind is the media kind carried by one "m=" section.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrackKind {
    /// TrackKind::Invalid marks an unrecognized media token.
    #[default]
    Invalid,
    Audio,
    Video,
    Application,
}

const TRACK_KIND_AUDIO_STR: &str = "audio";
const TRACK_KIND_VIDEO_STR: &str = "video";
const TRACK_KIND_APPLICATION_STR: &str = "application";

/// resolve_track_kind maps a media token from an "m=" line to its kind.
/// Unrecognized tokens resolve to TrackKind::Invalid.
pub fn resolve_track_kind(raw: &str) -> TrackKind {
    match raw {
        TRACK_KIND_AUDIO_STR => TrackKind::Audio,
        TRACK_KIND_VIDEO_STR => TrackKind::Video,
        TRACK_KIND_APPLICATION_STR => TrackKind::Application,
        _ => TrackKind::Invalid,
    }
}

/// track_kind_name returns the wire token for a track kind.
pub fn track_kind_name(kind: TrackKind) -> &'static str {
    match kind {
        TrackKind::Audio => TRACK_KIND_AUDIO_STR,
        TrackKind::Video => TRACK_KIND_VIDEO_STR,
        TrackKind::Application => TRACK_KIND_APPLICATION_STR,
        TrackKind::Invalid => "invalid",
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", track_kind_name(*self))
    }
}

impl From<&str> for TrackKind {
    fn from(raw: &str) -> Self {
        resolve_track_kind(raw)
    }
}

/// https://tools.ietf.org/html/draft-ietf-rtcweb-jsep-26#section-5.2.1
/// Session ID is recommended to be constructed by generating a 64-bit
/// quantity with the highest bit set to zero and the remaining 63-bits
/// being cryptographically random.
pub(crate) fn new_session_id() -> u64 {
    let c = u64::MAX ^ (1u64 << 63);
    rand::random::<u64>() & c
}
