use std::time::Duration;

use mizuyari::services::gemini::retry::{backoff_delay, parse_retry_delay};

#[test]
fn test_parse_returns_embedded_seconds() {
    let message = "429 Resource has been exhausted (e.g. check quota). \
                   retry_delay { seconds: 21 }";
    assert_eq!(parse_retry_delay(message), 21);

    let message = "quota exceeded, retry_delay: { seconds: 3 }";
    assert_eq!(parse_retry_delay(message), 3);
}

#[test]
fn test_parse_defaults_to_60_when_absent() {
    assert_eq!(parse_retry_delay("429 Too Many Requests"), 60);
    assert_eq!(parse_retry_delay("retry_delay but no number"), 60);
    assert_eq!(parse_retry_delay(""), 60);
}

#[test]
fn test_parse_takes_first_match() {
    let message = "retry_delay { seconds: 12 } ... retry_delay { seconds: 88 }";
    assert_eq!(parse_retry_delay(message), 12);
}

#[test]
fn test_wait_is_at_least_base_delay_times_attempts() {
    let base = Duration::from_secs(120);

    for attempt in 0..5 {
        let delay = backoff_delay("429 Too Many Requests", base, attempt);
        assert!(
            delay >= base * (attempt as u32 + 1),
            "attempt {attempt}: delay {delay:?} below floor"
        );
    }
}

#[test]
fn test_server_hint_wins_when_larger() {
    let base = Duration::from_secs(10);
    let message = "retry_delay { seconds: 300 }";

    assert_eq!(backoff_delay(message, base, 0), Duration::from_secs(300));
    // Once the scaled base overtakes the hint, the floor applies again.
    assert_eq!(backoff_delay(message, base, 40), Duration::from_secs(410));
}

#[test]
fn test_scaled_base_wins_when_hint_is_small() {
    let base = Duration::from_secs(120);
    let message = "retry_delay { seconds: 5 }";

    assert_eq!(backoff_delay(message, base, 0), Duration::from_secs(120));
    assert_eq!(backoff_delay(message, base, 2), Duration::from_secs(360));
}
