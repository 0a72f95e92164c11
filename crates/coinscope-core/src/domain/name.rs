use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_NAME_LEN: usize = 64;
const RESERVED: [char; 3] = ['/', '?', '#'];

/// Currency name as requested by a caller, e.g. `bitcoin` or `BTC`.
///
/// The caller's spelling is preserved; the detail page location uses the
/// uppercased form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyName(String);

impl CurrencyName {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCurrencyName);
        }

        let len = trimmed.chars().count();
        if len > MAX_NAME_LEN {
            return Err(ValidationError::CurrencyNameTooLong {
                len,
                max: MAX_NAME_LEN,
            });
        }

        if let Some(ch) = trimmed.chars().find(|ch| RESERVED.contains(ch)) {
            return Err(ValidationError::CurrencyNameInvalidChar { ch });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercased, percent-encoded path segment for the detail page.
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.0.to_uppercase()).into_owned()
    }
}

impl Display for CurrencyName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CurrencyName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for CurrencyName {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CurrencyName> for String {
    fn from(value: CurrencyName) -> Self {
        value.0
    }
}
