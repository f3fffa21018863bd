use super::*;
use crate::error::Result;

fn round_trip(key: &str, value: &str) -> Result<()> {
    let line = SdpLine::unmarshal(key, value)?;
    assert_eq!(line.key(), key, "key survives for `{key}={value}`");
    let output = line.to_string();
    assert_eq!(output, value, "serialize for `{key}={value}`");
    let reparsed = SdpLine::unmarshal(key, &output)?;
    assert_eq!(reparsed, line, "reparse for `{key}={value}`");
    Ok(())
}

#[test]
fn test_line_round_trip() -> Result<()> {
    round_trip("v", "0")?;
    round_trip("o", "jdoe 2890844526 2890842807 IN IP4 10.47.16.5")?;
    round_trip("s", "SDP Seminar")?;
    round_trip("i", "A Seminar on the session description protocol")?;
    round_trip("u", "http://www.example.com/seminars/sdp.pdf")?;
    round_trip("e", "j.doe@example.com (Jane Doe)")?;
    round_trip("p", "+1 617 555-6011")?;
    round_trip("c", "IN IP4 224.2.17.12/127")?;
    round_trip("b", "AS:12345")?;
    round_trip("b", "X-YZ:128")?;
    round_trip("t", "2873397496 2873404696")?;
    round_trip("t", "0 0")?;
    round_trip("r", "604800 3600 0 90000")?;
    round_trip("z", "2882844526 -3600 2898848070 0")?;
    round_trip("k", "prompt")?;
    round_trip("m", "audio 49170 RTP/AVP 0")?;
    round_trip("m", "video 9 UDP/TLS/RTP/SAVPF 96 97 98")?;
    round_trip("m", "application 9 UDP/DTLS/SCTP webrtc-datachannel")?;
    Ok(())
}

#[test]
fn test_attribute_round_trip() -> Result<()> {
    round_trip("a", "group:BUNDLE 0 1")?;
    round_trip("a", "group:LS")?;
    round_trip("a", "msid-semantic:WMS 616cfbb1-33a3-4d8c-8275-a199d6005549")?;
    round_trip("a", "rtcp:9 IN IP4 0.0.0.0")?;
    round_trip("a", "rtcp:65535")?;
    round_trip("a", "ice-ufrag:sXJ3")?;
    round_trip("a", "ice-pwd:yEclOTrLg1gEubBFefOqtmyV")?;
    round_trip("a", "ice-options:trickle renomination")?;
    round_trip(
        "a",
        "fingerprint:sha-256 22:14:B5:AF:66:12:C7:C7:8D:EF:4B:DE:40:25:ED:5D",
    )?;
    round_trip("a", "setup:actpass")?;
    round_trip("a", "setup:active")?;
    round_trip("a", "mid:audio")?;
    round_trip("a", "extmap:1 urn:ietf:params:rtp-hdrext:ssrc-audio-level")?;
    round_trip(
        "a",
        "extmap:2/sendonly urn:ietf:params:rtp-hdrext:ssrc-audio-level",
    )?;
    round_trip("a", "rtpmap:111 opus/48000/2")?;
    round_trip("a", "rtpmap:99 h263-1998/90000")?;
    round_trip("a", "rtcp-fb:98 nack pli")?;
    round_trip("a", "rtcp-fb:120 goog-remb")?;
    round_trip("a", "ssrc:3245185839 cname:Cx4i/VTR51etgjT7")?;
    round_trip(
        "a",
        "ssrc:3245185839 msid:cb373bff-0fea-4edb-bc39-e49bb8e8e3b9 0cf7e597-36a2-4480-9796-69bf0955eef5",
    )?;
    round_trip("a", "ssrc-group:FID 2430709021 3715850271")?;
    round_trip("a", "ssrc-group:SIM 360918977 360918978 360918980")?;
    round_trip("a", "sctpmap:5000 webrtc-datachannel 1024")?;
    round_trip("a", "sctpmap:5000 webrtc-datachannel")?;
    round_trip("a", "candidate:4 1 udp 2 192.168.1.7 58107 typ host")?;
    round_trip(
        "a",
        "candidate:1 1 udp 1686052607 1.2.3.4 57252 typ srflx raddr 192.168.1.7 rport 57252 generation 0",
    )?;
    round_trip("a", "rtcp-mux")?;
    round_trip("a", "rtcp-rsize")?;
    round_trip("a", "sendrecv")?;
    round_trip("a", "ice-lite")?;
    Ok(())
}

#[test]
fn test_port_boundaries() -> Result<()> {
    round_trip("m", "audio 0 RTP/AVP 0")?;
    round_trip("m", "audio 65535 RTP/AVP 0")?;
    assert!(SdpLine::unmarshal("m", "audio 65536 RTP/AVP 0").is_err());
    Ok(())
}

#[test]
fn test_unknown_attribute_preserved() -> Result<()> {
    let line = SdpLine::unmarshal("a", "x-custom:foo=bar")?;
    match &line {
        SdpLine::Attribute(SdpAttribute::Other { key, value }) => {
            assert_eq!(key, "x-custom");
            assert_eq!(value.as_deref(), Some("foo=bar"));
        }
        _ => panic!("expected an opaque attribute, got {line:?}"),
    }
    assert_eq!(line.to_string(), "x-custom:foo=bar");
    Ok(())
}

#[test]
fn test_unknown_line_type_preserved() -> Result<()> {
    let line = SdpLine::unmarshal("x-vendor", "anything goes here")?;
    assert_eq!(line.key(), "x-vendor");
    assert_eq!(line.to_string(), "anything goes here");
    Ok(())
}

#[test]
fn test_origin_defaults() -> Result<()> {
    let origin = Origin::unmarshal("jdoe 2890844526")?;
    assert_eq!(origin.username, "jdoe");
    assert_eq!(origin.session_id, 2890844526);
    assert_eq!(origin.session_version, 0);
    assert_eq!(origin.network_type, "IN");
    assert_eq!(origin.address_type, "IP4");
    assert_eq!(origin.address, "0.0.0.0");

    assert!(Origin::unmarshal("jdoe not-a-number").is_err());
    Ok(())
}

#[test]
fn test_fmtp_order_preserved() -> Result<()> {
    let value = "96 level-asymmetry-allowed=1;packetization-mode=0;profile-level-id=42e01f";
    let fmtp = Fmtp::unmarshal(value)?;
    assert_eq!(fmtp.payload_type, 96);
    assert_eq!(
        fmtp.parameters,
        vec![
            ("level-asymmetry-allowed".to_owned(), "1".to_owned()),
            ("packetization-mode".to_owned(), "0".to_owned()),
            ("profile-level-id".to_owned(), "42e01f".to_owned()),
        ]
    );
    assert_eq!(fmtp.to_string(), value);
    Ok(())
}

#[test]
fn test_fmtp_duplicate_and_flag_tokens() -> Result<()> {
    let fmtp = Fmtp::unmarshal("101 0-16;0-16;flag")?;
    assert_eq!(
        fmtp.parameters,
        vec![
            ("0-16".to_owned(), "".to_owned()),
            ("0-16".to_owned(), "".to_owned()),
            ("flag".to_owned(), "".to_owned()),
        ]
    );
    assert_eq!(fmtp.to_string(), "101 0-16;0-16;flag");
    Ok(())
}

#[test]
fn test_rtpmap_channel_default() -> Result<()> {
    let rtpmap = RtpMap::unmarshal("99 h263-1998/90000")?;
    assert_eq!(rtpmap.channels, 0);
    let rtpmap = RtpMap::unmarshal("111 opus/48000/2")?;
    assert_eq!(rtpmap.channels, 2);
    assert!(RtpMap::unmarshal("111 opus/notanumber").is_err());
    Ok(())
}

#[test]
fn test_setup_unknown_role_is_invalid() -> Result<()> {
    let line = SdpLine::unmarshal("a", "setup:holdconn")?;
    match line {
        SdpLine::Attribute(SdpAttribute::Setup(role)) => {
            assert_eq!(role, crate::util::ConnectionRole::Invalid)
        }
        _ => panic!("expected a setup attribute"),
    }
    Ok(())
}

#[test]
fn test_ssrc_group_shapes() {
    assert!(SsrcGroup::unmarshal("FID 1 2 3").is_err());
    assert!(SsrcGroup::unmarshal("SIM 1 2").is_err());
    assert!(SsrcGroup::unmarshal("FEC 1 2").is_err());

    let group = SsrcGroup::unmarshal("FID 2430709021 3715850271").unwrap();
    assert_eq!(group.members(), vec![2430709021, 3715850271]);
}

#[test]
fn test_candidate_extensions_ordered() -> Result<()> {
    let candidate =
        IceCandidate::unmarshal("4 1 udp 2 192.168.1.7 58107 typ srflx raddr 10.0.0.1 rport 1 generation 0")?;
    assert_eq!(
        candidate.extensions,
        vec![
            ("raddr".to_owned(), "10.0.0.1".to_owned()),
            ("rport".to_owned(), "1".to_owned()),
            ("generation".to_owned(), "0".to_owned()),
        ]
    );
    assert!(IceCandidate::unmarshal("4 1 udp 2 192.168.1.7 58107 host").is_err());
    Ok(())
}

#[test]
fn test_candidate_dangling_extension_token() -> Result<()> {
    // An extension name without a value reserializes without a trailing
    // space.
    let value = "4 1 udp 2 192.168.1.7 58107 typ host raddr";
    let candidate = IceCandidate::unmarshal(value)?;
    assert_eq!(
        candidate.extensions,
        vec![("raddr".to_owned(), "".to_owned())]
    );
    assert_eq!(candidate.to_string(), value);
    Ok(())
}
