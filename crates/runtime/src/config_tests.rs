use super::*;
use serial_test::serial;

const TEST_VAR: &str = "FSTREAM_RUNTIME_TEST_VALUE";

#[test]
#[serial]
fn env_usize_parses_cases() {
    let cases: &[(Option<&str>, usize)] = &[
        (None, 7),
        (Some("12"), 12),
        (Some(" 3 "), 3),
        (Some("0"), 7),
        (Some("-4"), 7),
        (Some("many"), 7),
    ];

    for (value, expected) in cases {
        match value {
            Some(v) => unsafe { std::env::set_var(TEST_VAR, v) },
            None => unsafe { std::env::remove_var(TEST_VAR) },
        }

        let got = env_usize(TEST_VAR, 7);
        assert_eq!(
            got, *expected,
            "env {:?} should yield {}, got {}",
            value, expected, got
        );
    }

    unsafe { std::env::remove_var(TEST_VAR) };
}

#[test]
#[serial]
fn env_flag_parses_cases() {
    let cases: &[(Option<&str>, bool)] = &[
        (None, false),
        (Some("1"), true),
        (Some("true"), true),
        (Some("TRUE"), true),
        (Some("yes"), true),
        (Some("on"), true),
        (Some("0"), false),
        (Some("off"), false),
        (Some(""), false),
    ];

    for (value, expected) in cases {
        match value {
            Some(v) => unsafe { std::env::set_var(TEST_VAR, v) },
            None => unsafe { std::env::remove_var(TEST_VAR) },
        }

        assert_eq!(env_flag(TEST_VAR), *expected, "env {:?}", value);
    }

    unsafe { std::env::remove_var(TEST_VAR) };
}

#[test]
fn default_root_is_not_empty() {
    assert!(!default_root().as_os_str().is_empty());
}
