pub mod assets;
pub mod persistence;
pub mod version;

/// Compact age like "45s", "5m" or "2d" for cache bookkeeping displays.
pub fn compact_age(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ages_bucket_at_unit_boundaries() {
        assert_eq!(compact_age(0), "0s");
        assert_eq!(compact_age(59), "59s");
        assert_eq!(compact_age(60), "1m");
        assert_eq!(compact_age(3599), "59m");
        assert_eq!(compact_age(3600), "1h");
        assert_eq!(compact_age(86400), "1d");
        assert_eq!(compact_age(86400 * 9), "9d");
    }
}
