use std::fmt;

#[cfg(test)]
mod direction_test;

/// RtpDirection is a marker for transmission direction of an endpoint.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum RtpDirection {
    /// RtpDirection::Invalid marks an unrecognized or absent direction token.
    #[default]
    Invalid,
    /// RtpDirection::SendRecv is for bidirectional communication.
    SendRecv,
    /// RtpDirection::SendOnly is for outgoing communication.
    SendOnly,
    /// RtpDirection::RecvOnly is for incoming communication.
    RecvOnly,
    /// RtpDirection::Inactive is for no communication.
    Inactive,
}

const DIRECTION_SEND_RECV_STR: &str = "sendrecv";
const DIRECTION_SEND_ONLY_STR: &str = "sendonly";
const DIRECTION_RECV_ONLY_STR: &str = "recvonly";
const DIRECTION_INACTIVE_STR: &str = "inactive";
const DIRECTION_INVALID_STR: &str = "invalid";

impl fmt::Display for RtpDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RtpDirection::SendRecv => DIRECTION_SEND_RECV_STR,
            RtpDirection::SendOnly => DIRECTION_SEND_ONLY_STR,
            RtpDirection::RecvOnly => DIRECTION_RECV_ONLY_STR,
            RtpDirection::Inactive => DIRECTION_INACTIVE_STR,
            _ => DIRECTION_INVALID_STR,
        };
        write!(f, "{s}")
    }
}

impl RtpDirection {
    /// new defines a procedure for creating a new direction from a raw string.
    /// Unrecognized tokens resolve to RtpDirection::Invalid so callers can
    /// detect unsupported offers instead of silently defaulting.
    pub fn new(raw: &str) -> Self {
        match raw {
            DIRECTION_SEND_RECV_STR => RtpDirection::SendRecv,
            DIRECTION_SEND_ONLY_STR => RtpDirection::SendOnly,
            DIRECTION_RECV_ONLY_STR => RtpDirection::RecvOnly,
            DIRECTION_INACTIVE_STR => RtpDirection::Inactive,
            _ => RtpDirection::Invalid,
        }
    }
}
