/// Current UTC timestamp in milliseconds.
///
/// All persisted `created_at` / `updated_at` columns use this format.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_recent() {
        // 2026-01-01 00:00:00 UTC
        assert!(now_millis() > 1_767_225_600_000);
    }
}
