use chrono::{DateTime, Utc};

/// Sheet-name limit of spreadsheet applications
pub const SPREADSHEET_SHEET_NAME_LEN: usize = 31;

/// Settings shared by the codecs and the on-disk container
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Written to the `version` column of the Metadata sheet
    pub format_version: String,
    /// Gzip level of the container, 0-9
    pub compression_level: u32,
    /// Check per-sheet digests recorded in the container manifest on read
    pub verify_checksums: bool,
    /// Longest sheet name accepted, prefix included. The archive container
    /// has no limit of its own.
    pub max_sheet_name_len: Option<usize>,
    /// Fixed Metadata timestamp; `None` stamps the current time
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            format_version: "1.0".to_string(),
            compression_level: 6,
            verify_checksums: true,
            max_sheet_name_len: None,
            timestamp: None,
        }
    }
}

impl CodecConfig {
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Keep sheet names within what spreadsheet applications accept
    pub fn spreadsheet_compatible(mut self) -> Self {
        self.max_sheet_name_len = Some(SPREADSHEET_SHEET_NAME_LEN);
        self
    }

    pub(crate) fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp.unwrap_or_else(Utc::now)
    }

    pub(crate) fn timestamp_string(&self) -> String {
        self.timestamp().format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
