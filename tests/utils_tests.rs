use geoip2_extras::utils::{UNSPECIFIED_ADDR, remote_addr};

#[test]
fn test_remote_addr_cases() {
    let cases = [
        (None, None, "0.0.0.0"),
        (None, Some("1.2.3.4"), "1.2.3.4"),
        (Some("8.8.8.8"), Some("1.2.3.4"), "8.8.8.8"),
        (Some("1.2.3.4, 8.8.8.8 "), None, "8.8.8.8"),
        (Some(" 2001:db8::1 "), None, "2001:db8::1"),
        (Some(""), Some("1.2.3.4"), "1.2.3.4"),
    ];

    for (forwarded, direct, expected) in cases {
        assert_eq!(
            remote_addr(forwarded, direct),
            expected,
            "forwarded={:?} direct={:?}",
            forwarded,
            direct
        );
    }
}

#[test]
fn test_unspecified_addr() {
    assert_eq!(UNSPECIFIED_ADDR, "0.0.0.0");
    assert_eq!(remote_addr(Some("   "), None), UNSPECIFIED_ADDR);
}
