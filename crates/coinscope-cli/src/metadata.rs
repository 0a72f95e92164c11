use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::CliError;

pub const SCHEMA_VERSION: &str = "v1.0.0";

/// Request identifier (UUID v4) attached to every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Envelope metadata. Field order is fixed so JSON output is stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub request_id: RequestId,
    pub schema_version: String,
    /// RFC3339 UTC timestamp.
    pub generated_at: String,
    /// Page location the data was scraped from.
    pub source: String,
    pub latency_ms: u64,
}

impl Metadata {
    pub fn new(source: impl Into<String>, latency_ms: u64) -> Result<Self, CliError> {
        Ok(Self {
            request_id: RequestId::new_v4(),
            schema_version: String::from(SCHEMA_VERSION),
            generated_at: OffsetDateTime::now_utc().format(&Rfc3339)?,
            source: source.into(),
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_is_uuid_v4() {
        let request_id = RequestId::new_v4();
        let parsed = Uuid::parse_str(&request_id.to_string()).expect("valid uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn generated_at_is_rfc3339() {
        let meta = Metadata::new("https://coinmarketcap.com/", 12).expect("metadata");
        OffsetDateTime::parse(&meta.generated_at, &Rfc3339).expect("parses back");
        assert_eq!(meta.schema_version, SCHEMA_VERSION);
    }
}
