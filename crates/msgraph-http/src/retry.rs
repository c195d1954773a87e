//! Back-off policy for throttled and unavailable responses.

use crate::options::RetryHandlerOption;
use chrono::{DateTime, Utc};
use std::time::Duration;

pub const RETRY_ATTEMPT_HEADER: &str = "Retry-Attempt";
pub const RETRY_AFTER_HEADER: &str = "Retry-After";

/// 429 Too Many Requests, 503 Service Unavailable, 504 Gateway Timeout.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 503 | 504)
}

/// Parse `Retry-After` as delta-seconds or an HTTP date.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}

/// Delay before retry number `attempt` (1-based).
///
/// A `Retry-After` value wins; otherwise the delay doubles each attempt
/// starting at `delay_sec`. Never more than `max_delay_sec`.
pub fn retry_delay(retry_after: Option<&str>, attempt: u32, option: &RetryHandlerOption) -> Duration {
    let max = Duration::from_secs(option.max_delay_sec);
    let delay = retry_after
        .and_then(|v| parse_retry_after(v, Utc::now()))
        .unwrap_or_else(|| {
            let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
            Duration::from_secs(option.delay_sec.saturating_mul(factor))
        });
    delay.min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option() -> RetryHandlerOption {
        RetryHandlerOption {
            max_retries: 3,
            delay_sec: 3,
            max_delay_sec: 180,
        }
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(503));
        assert!(is_retryable_status(504));
        assert!(!is_retryable_status(500));
        assert!(!is_retryable_status(404));
    }

    #[test]
    fn test_retry_after_seconds() {
        assert_eq!(retry_delay(Some("7"), 1, &option()), Duration::from_secs(7));
    }

    #[test]
    fn test_retry_after_http_date() {
        let now = DateTime::parse_from_rfc2822("Wed, 21 Oct 2015 07:28:00 GMT")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            parse_retry_after("Wed, 21 Oct 2015 07:28:30 GMT", now),
            Some(Duration::from_secs(30))
        );
        assert_eq!(
            parse_retry_after("Wed, 21 Oct 2015 07:27:00 GMT", now),
            Some(Duration::ZERO)
        );
        assert_eq!(parse_retry_after("soon", now), None);
    }

    #[test]
    fn test_exponential_backoff() {
        assert_eq!(retry_delay(None, 1, &option()), Duration::from_secs(3));
        assert_eq!(retry_delay(None, 2, &option()), Duration::from_secs(6));
        assert_eq!(retry_delay(None, 3, &option()), Duration::from_secs(12));
    }

    #[test]
    fn test_delay_is_capped() {
        assert_eq!(retry_delay(Some("600"), 1, &option()), Duration::from_secs(180));
        assert_eq!(retry_delay(None, 40, &option()), Duration::from_secs(180));
    }
}
