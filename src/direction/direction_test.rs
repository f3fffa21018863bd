use super::*;

#[test]
fn test_new_direction() {
    let passingtests = vec![
        ("sendrecv", RtpDirection::SendRecv),
        ("sendonly", RtpDirection::SendOnly),
        ("recvonly", RtpDirection::RecvOnly),
        ("inactive", RtpDirection::Inactive),
    ];
    let failingtests = vec!["", "whatever", "sendRecv"];

    for (i, u) in passingtests.iter().enumerate() {
        let dir = RtpDirection::new(u.0);
        assert_eq!(u.1, dir, "{}: {}", i, u.0);
    }
    for &u in &failingtests {
        let dir = RtpDirection::new(u);
        assert_eq!(dir, RtpDirection::Invalid);
    }
}

#[test]
fn test_direction_string() {
    let tests = vec![
        (RtpDirection::Invalid, "invalid"),
        (RtpDirection::SendRecv, "sendrecv"),
        (RtpDirection::SendOnly, "sendonly"),
        (RtpDirection::RecvOnly, "recvonly"),
        (RtpDirection::Inactive, "inactive"),
    ];

    for (d, expected) in tests {
        assert_eq!(d.to_string(), expected);
    }
}
