use std::io::Cursor;

use super::*;
use crate::attribute::SdpAttribute;

const CANONICAL_MARSHAL: &str = "v=0\r\n\
o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5\r\n\
s=SDP Seminar\r\n\
i=A Seminar on the session description protocol\r\n\
u=http://www.example.com/seminars/sdp.pdf\r\n\
e=j.doe@example.com (Jane Doe)\r\n\
p=+1 617 555-6011\r\n\
c=IN IP4 224.2.17.12/127\r\n\
b=X-YZ:128\r\n\
b=AS:12345\r\n\
t=2873397496 2873404696\r\n\
t=3034423619 3042462419\r\n\
r=604800 3600 0 90000\r\n\
z=2882844526 -3600 2898848070 0\r\n\
k=prompt\r\n\
a=candidate:0 1 UDP 2113667327 203.0.113.1 54400 typ host\r\n\
a=recvonly\r\n\
m=audio 49170 RTP/AVP 0\r\n\
i=Vivamus a posuere nisl\r\n\
c=IN IP4 203.0.113.1\r\n\
b=X-YZ:128\r\n\
k=prompt\r\n\
a=sendrecv\r\n\
m=video 51372 RTP/AVP 99\r\n\
a=rtpmap:99 h263-1998/90000\r\n";

#[test]
fn test_round_trip() -> Result<()> {
    let doc = SdpDocument::parse(CANONICAL_MARSHAL)?;
    assert_eq!(doc.media_count(), 2);
    assert_eq!(doc.marshal(), CANONICAL_MARSHAL);

    // A second pass over the emitted text is stable.
    let reparsed = SdpDocument::parse(&doc.marshal())?;
    assert_eq!(reparsed, doc);
    Ok(())
}

#[test]
fn test_unmarshal_reader() -> Result<()> {
    let mut reader = Cursor::new(CANONICAL_MARSHAL.as_bytes());
    let doc = SdpDocument::unmarshal(&mut reader)?;
    assert_eq!(doc.marshal(), CANONICAL_MARSHAL);
    Ok(())
}

#[test]
fn test_misordered_input_is_reordered() -> Result<()> {
    // Session lines shuffled, "a=" interleaved; media "c=" after "a=".
    let raw = "s=SDP Seminar\r\n\
a=recvonly\r\n\
v=0\r\n\
t=0 0\r\n\
o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5\r\n\
m=audio 49170 RTP/AVP 0\r\n\
a=sendrecv\r\n\
c=IN IP4 203.0.113.1\r\n";

    let expected = "v=0\r\n\
o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5\r\n\
s=SDP Seminar\r\n\
t=0 0\r\n\
a=recvonly\r\n\
m=audio 49170 RTP/AVP 0\r\n\
c=IN IP4 203.0.113.1\r\n\
a=sendrecv\r\n";

    let doc = SdpDocument::parse(raw)?;
    assert_eq!(doc.marshal(), expected);
    Ok(())
}

#[test]
fn test_repeat_lines_follow_their_timing() -> Result<()> {
    // Each "r=" stays with the "t=" it qualifies.
    let raw = "v=0\r\n\
o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5\r\n\
s=SDP Seminar\r\n\
t=2873397496 2873404696\r\n\
r=604800 3600 0 90000\r\n\
t=3034423619 3042462419\r\n\
r=7d 1h 0 25h\r\n";

    let doc = SdpDocument::parse(raw)?;
    assert_eq!(doc.marshal(), raw);
    Ok(())
}

#[test]
fn test_malformed_lines_are_dropped() -> Result<()> {
    let raw = "v=0\r\n\
o=jdoe 2890844526 2890842807 IN IP4 10.47.16.5\r\n\
s=SDP Seminar\r\n\
this line has no separator\r\n\
=value without a key\r\n\
b=AS:not-a-number\r\n\
t=0 0\r\n\
m=audio 49170 RTP/AVP 0\r\n\
a=rtpmap:badpt opus/48000/2\r\n\
a=sendrecv\r\n";

    let doc = SdpDocument::parse(raw)?;
    assert_eq!(doc.session.len(), 4);
    assert_eq!(doc.media_count(), 1);

    // The well-formed remainder of the media section survives.
    let media = &doc.medias[0];
    assert!(media.find_attribute("rtpmap").is_none());
    assert_eq!(media.direction(), crate::direction::RtpDirection::SendRecv);
    Ok(())
}

#[test]
fn test_empty_document() {
    assert_eq!(SdpDocument::parse(""), Err(Error::SdpEmptyDocument));
    assert_eq!(
        SdpDocument::parse("\r\n  \r\n\r\n"),
        Err(Error::SdpEmptyDocument)
    );
}

#[test]
fn test_unix_line_endings_accepted() -> Result<()> {
    let raw = "v=0\no=- 1 1 IN IP4 0.0.0.0\ns=-\nt=0 0\n";
    let doc = SdpDocument::parse(raw)?;
    assert_eq!(doc.session.len(), 4);
    assert_eq!(
        doc.marshal(),
        "v=0\r\no=- 1 1 IN IP4 0.0.0.0\r\ns=-\r\nt=0 0\r\n"
    );
    Ok(())
}

#[test]
fn test_unknown_lines_survive() -> Result<()> {
    let raw = "v=0\r\n\
s=-\r\n\
t=0 0\r\n\
x-vendor=opaque payload\r\n\
a=x-flag\r\n";

    let doc = SdpDocument::parse(raw)?;
    assert!(doc.session.find("x-vendor").is_some());
    match doc.session.find_attribute("x-flag") {
        Some(SdpAttribute::Other { value: None, .. }) => {}
        other => panic!("expected a flag attribute, got {other:?}"),
    }
    assert_eq!(
        doc.marshal(),
        "v=0\r\ns=-\r\nt=0 0\r\nx-vendor=opaque payload\r\na=x-flag\r\n"
    );
    Ok(())
}

#[test]
fn test_try_from() -> Result<()> {
    let doc = SdpDocument::try_from(CANONICAL_MARSHAL)?;
    let text: String = doc.into();
    assert_eq!(text, CANONICAL_MARSHAL);
    Ok(())
}
