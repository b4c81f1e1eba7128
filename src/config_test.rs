use super::*;

/// # Safety
/// Each test uses its own variable names, so parallel runs do not race.
unsafe fn set(key: &str, value: &str) {
    unsafe { std::env::set_var(key, value) };
}

#[test]
fn env_parse_reads_valid_values() {
    unsafe { set("TRESDE_TEST_PARSE_OK", "42") };
    assert_eq!(env_parse("TRESDE_TEST_PARSE_OK", 7u64), 42);
}

#[test]
fn env_parse_falls_back_on_garbage() {
    unsafe { set("TRESDE_TEST_PARSE_BAD", "soon") };
    assert_eq!(env_parse("TRESDE_TEST_PARSE_BAD", 7u64), 7);
}

#[test]
fn env_parse_falls_back_when_unset() {
    assert_eq!(env_parse("TRESDE_TEST_PARSE_UNSET", 15u32), 15);
}

#[test]
fn timeouts_default_and_convert() {
    let timeouts = HttpTimeouts::default();
    assert_eq!(timeouts.request(), Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    assert_eq!(timeouts.connect(), Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
}
