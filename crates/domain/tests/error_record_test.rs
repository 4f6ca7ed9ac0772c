use showip_domain::{report, ErrorRecord, PoolError, ERR_MSG_MAX};

#[test]
fn test_default_record_is_unset() {
    let record = ErrorRecord::default();

    assert_eq!(record.code(), 0);
    assert_eq!(record.message(), "");
    assert!(!record.is_set());
}

#[test]
fn test_report_sets_code_and_message() {
    let mut record = ErrorRecord::new();

    report(Some(&mut record), 2, Some("getaddrinfo failed"));

    assert_eq!(record.code(), 2);
    assert_eq!(record.message(), "getaddrinfo failed");
    assert_eq!(record.message_bytes_with_nul(), b"getaddrinfo failed\0");
}

#[test]
fn test_missing_message_uses_placeholder() {
    let mut record = ErrorRecord::new();

    report(Some(&mut record), 9, None);

    assert_eq!(record.code(), 9);
    assert_eq!(record.message(), "No error msg");
}

#[test]
fn test_long_message_is_truncated() {
    let mut record = ErrorRecord::new();
    let long = "x".repeat(300);

    report(Some(&mut record), 1, Some(&long));

    assert_eq!(record.message().len(), ERR_MSG_MAX);
    assert_eq!(record.message_bytes_with_nul().len(), ERR_MSG_MAX + 1);
    assert_eq!(*record.message_bytes_with_nul().last().unwrap(), 0);
}

#[test]
fn test_truncation_keeps_whole_characters() {
    let mut record = ErrorRecord::new();
    // 127 ASCII bytes followed by a two-byte character straddling the limit.
    let message = format!("{}é", "a".repeat(ERR_MSG_MAX - 1));

    report(Some(&mut record), 1, Some(&message));

    assert_eq!(record.message(), "a".repeat(ERR_MSG_MAX - 1));
}

#[test]
fn test_last_report_wins() {
    let mut record = ErrorRecord::new();

    report(Some(&mut record), 3, Some("a much longer first message"));
    report(Some(&mut record), 4, Some("short"));

    assert_eq!(record.code(), 4);
    assert_eq!(record.message(), "short");
}

#[test]
fn test_absent_target_is_ignored() {
    report(None, 5, Some("nobody listens"));
}

#[test]
fn test_display_renders_code_and_message() {
    let mut record = ErrorRecord::new();
    report(Some(&mut record), 5, Some("pool->ip_iu allocation failed"));

    assert_eq!(
        record.to_string(),
        "@Error: code -> 5, message -> pool->ip_iu allocation failed"
    );
}

#[test]
fn test_record_from_pool_error() {
    let err = PoolError::PoolAllocation { bytes: 64 };

    let record = ErrorRecord::from(&err);

    assert_eq!(record.code(), 4);
    assert_eq!(record.message(), "pool allocation failed");
}

#[test]
fn test_pool_error_codes_are_stable() {
    let reason = || "boom".to_string();
    let cases = [
        (PoolError::InvalidHostname, 1),
        (PoolError::Resolution { reason: reason() }, 2),
        (PoolError::MeasureFormat { reason: reason() }, 3),
        (PoolError::PoolAllocation { bytes: 1 }, 4),
        (PoolError::RecordAllocation { bytes: 1 }, 5),
        (PoolError::FillFormat { reason: reason() }, 6),
        (PoolError::CounterOverflow { family: "IPv4" }, 7),
    ];

    for (err, code) in cases {
        assert_eq!(err.code(), code, "{err}");
    }
}
