//! Feed file naming
//!
//! Feed files are named `facility_feed_<unix-seconds>.json.gz`. Several pages
//! can be written within the same second, so the namer hands out strictly
//! increasing timestamps for the lifetime of one run.

/// Prefix of every feed file name
pub const FEED_FILE_PREFIX: &str = "facility_feed_";

/// Extension of every feed file name
pub const FEED_FILE_SUFFIX: &str = ".json.gz";

/// Fixed local and remote name of the manifest
pub const MANIFEST_FILE_NAME: &str = "metadata.json";

/// Name for a feed file generated at `timestamp`
pub fn feed_file_name(timestamp: i64) -> String {
    format!("{FEED_FILE_PREFIX}{timestamp}{FEED_FILE_SUFFIX}")
}

/// Hands out unique feed file names within one run
#[derive(Debug, Default)]
pub struct FeedFileNamer {
    last_timestamp: Option<i64>,
}

impl FeedFileNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next file name for a batch generated at `now` (UNIX seconds)
    ///
    /// If `now` does not advance past the previous name's timestamp, the
    /// previous timestamp + 1 is used instead.
    pub fn next_name(&mut self, now: i64) -> String {
        let timestamp = match self.last_timestamp {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last_timestamp = Some(timestamp);
        feed_file_name(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_file_name_pattern() {
        assert_eq!(
            feed_file_name(1_700_000_000),
            "facility_feed_1700000000.json.gz"
        );
    }

    #[test]
    fn test_namer_uses_clock_when_it_advances() {
        let mut namer = FeedFileNamer::new();
        assert_eq!(namer.next_name(100), "facility_feed_100.json.gz");
        assert_eq!(namer.next_name(105), "facility_feed_105.json.gz");
    }

    #[test]
    fn test_namer_never_repeats_within_a_second() {
        let mut namer = FeedFileNamer::new();
        let names: Vec<String> = (0..3).map(|_| namer.next_name(100)).collect();
        assert_eq!(
            names,
            vec![
                "facility_feed_100.json.gz",
                "facility_feed_101.json.gz",
                "facility_feed_102.json.gz"
            ]
        );
    }

    #[test]
    fn test_namer_ignores_clock_going_backwards() {
        let mut namer = FeedFileNamer::new();
        namer.next_name(200);
        assert_eq!(namer.next_name(150), "facility_feed_201.json.gz");
    }
}
