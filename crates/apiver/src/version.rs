//! API version type and parsing
//!
//! An [`ApiVersion`] is made of an optional group version (a calendar date),
//! an optional major and minor version and an optional status label.
//!
//! Accepted text forms:
//! - `1`, `1.0`, `1.0-Beta` (major, minor, status)
//! - `v1`, `V1.0` (optional prefix, dropped when formatting)
//! - `2013-08-06`, `2013-08-06.1`, `2013-08-06.1.1-RC1` (group version first)

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

const GROUP_VERSION_FORMAT: &str = "%Y-%m-%d";
const GROUP_VERSION_LEN: usize = 10;

/// API version value
///
/// Two versions are equal when their group versions, major versions, minor
/// versions (an absent minor counts as `0`) and statuses (compared without
/// regard to case) are equal. Ordering follows the same components in that
/// order; a version without a status sorts after the same version with one.
#[derive(Debug, Clone)]
pub struct ApiVersion {
    group: Option<NaiveDate>,
    major: Option<u32>,
    minor: Option<u32>,
    status: Option<String>,
}

/// Text formats an [`ApiVersion`] can be rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersionFormat {
    /// Canonical form, e.g. `2013-08-06.1.1-Beta` or `1.0-RC1`
    #[default]
    Full,
    /// Group version only (`yyyy-MM-dd`), empty when there is none
    Group,
    /// Major version only, empty when there is none
    Major,
    /// `major.minor`, with an absent minor rendered as `0`
    MajorMinor,
    /// Status only, empty when there is none
    Status,
}

/// Error raised when text does not match the version grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// Nothing to parse
    #[error("empty version string")]
    Empty,
    /// Text does not follow the version grammar
    #[error("'{0}' is not a valid API version")]
    InvalidFormat(String),
    /// Major or minor component is not a non-negative integer
    #[error("'{0}' contains an invalid version number")]
    InvalidNumber(String),
    /// Group version is not a valid `yyyy-MM-dd` date
    #[error("'{0}' contains an invalid group version")]
    InvalidGroupVersion(String),
    /// Status is not made of ASCII letters and digits
    #[error("'{0}' contains an invalid status")]
    InvalidStatus(String),
}

/// Error raised when an [`ApiVersion`] is built from inconsistent parts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// Neither a group version nor a major version was given
    #[error("an API version requires a group version or a major version")]
    MissingVersion,
    /// A minor version was given without a major version
    #[error("a minor version requires a major version")]
    MinorWithoutMajor,
    /// Status label does not match the status grammar
    #[error("'{0}' is not a valid API version status")]
    InvalidStatus(String),
    /// An endpoint maps to a version it does not implement
    #[error("mapped API version '{0}' is not implemented")]
    NotImplemented(String),
}

impl ApiVersion {
    /// Create a `major.minor` version
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            group: None,
            major: Some(major),
            minor: Some(minor),
            status: None,
        }
    }

    /// Create a version with only a major number
    pub fn major(major: u32) -> Self {
        Self {
            group: None,
            major: Some(major),
            minor: None,
            status: None,
        }
    }

    /// Create a date-based version
    pub fn from_group(group: NaiveDate) -> Self {
        Self {
            group: Some(group),
            major: None,
            minor: None,
            status: None,
        }
    }

    /// Create a version from all of its components
    ///
    /// Fails when neither a group nor a major version is given, when a minor
    /// version has no major version, or when the status is malformed.
    pub fn try_new(
        group: Option<NaiveDate>,
        major: Option<u32>,
        minor: Option<u32>,
        status: Option<&str>,
    ) -> Result<Self, ConstructionError> {
        if group.is_none() && major.is_none() {
            return Err(ConstructionError::MissingVersion);
        }
        if major.is_none() && minor.is_some() {
            return Err(ConstructionError::MinorWithoutMajor);
        }
        let status = match status {
            Some(status) if is_valid_status(status) => Some(status.to_string()),
            Some(status) => return Err(ConstructionError::InvalidStatus(status.to_string())),
            None => None,
        };

        Ok(Self {
            group,
            major,
            minor,
            status,
        })
    }

    /// Version that matches every request; formats as the empty string
    pub fn neutral() -> Self {
        Self {
            group: None,
            major: None,
            minor: None,
            status: None,
        }
    }

    /// Attach a status label (e.g. `Beta`, `RC1`)
    pub fn with_status(mut self, status: impl Into<String>) -> Result<Self, ConstructionError> {
        let status = status.into();
        if !is_valid_status(&status) {
            return Err(ConstructionError::InvalidStatus(status));
        }
        self.status = Some(status);
        Ok(self)
    }

    /// Group version, if any
    pub fn group_version(&self) -> Option<NaiveDate> {
        self.group
    }

    /// Major version, if any
    pub fn major_version(&self) -> Option<u32> {
        self.major
    }

    /// Minor version, if any
    pub fn minor_version(&self) -> Option<u32> {
        self.minor
    }

    /// Status label, if any
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether this is the neutral version
    pub fn is_neutral(&self) -> bool {
        self.group.is_none() && self.major.is_none()
    }

    /// Render the version in the requested format
    pub fn format(&self, format: ApiVersionFormat) -> String {
        match format {
            ApiVersionFormat::Full => self.to_string(),
            ApiVersionFormat::Group => self
                .group
                .map(|group| group.format(GROUP_VERSION_FORMAT).to_string())
                .unwrap_or_default(),
            ApiVersionFormat::Major => self.major.map(|m| m.to_string()).unwrap_or_default(),
            ApiVersionFormat::MajorMinor => match self.major {
                Some(major) => format!("{}.{}", major, self.minor.unwrap_or(0)),
                None => String::new(),
            },
            ApiVersionFormat::Status => self.status.clone().unwrap_or_default(),
        }
    }

    fn cmp_status(&self, other: &Self) -> Ordering {
        match (&self.status, &other.status) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a
                .bytes()
                .map(|c| c.to_ascii_uppercase())
                .cmp(b.bytes().map(|c| c.to_ascii_uppercase())),
        }
    }
}

/// Status labels are non-empty runs of ASCII letters and digits
pub(crate) fn is_valid_status(status: &str) -> bool {
    !status.is_empty() && status.bytes().all(|c| c.is_ascii_alphanumeric())
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(group) = &self.group {
            write!(f, "{}", group.format(GROUP_VERSION_FORMAT))?;
            if self.major.is_some() {
                f.write_str(".")?;
            }
        }
        if let Some(major) = self.major {
            write!(f, "{}", major)?;
            if let Some(minor) = self.minor {
                write!(f, ".{}", minor)?;
            }
        }
        if let Some(status) = &self.status {
            write!(f, "-{}", status)?;
        }
        Ok(())
    }
}

impl FromStr for ApiVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let (group, rest) = split_group(text)?;

        let rest = if let Some(date) = group {
            match rest.as_bytes().first() {
                None => return Ok(ApiVersion::from_group(date)),
                Some(b'.') if rest.len() > 1 => &rest[1..],
                // group and status with no numbers, e.g. 2013-08-06-Beta
                Some(b'-') => rest,
                Some(_) => return Err(VersionParseError::InvalidFormat(text.to_string())),
            }
        } else {
            rest.strip_prefix('v')
                .or_else(|| rest.strip_prefix('V'))
                .unwrap_or(rest)
        };

        let (numbers, status) = match rest.split_once('-') {
            Some((numbers, status)) => (numbers, Some(status)),
            None => (rest, None),
        };

        if let Some(status) = status {
            if !is_valid_status(status) {
                return Err(VersionParseError::InvalidStatus(text.to_string()));
            }
        }

        let (major, minor) = if numbers.is_empty() {
            if group.is_none() {
                return Err(VersionParseError::InvalidFormat(text.to_string()));
            }
            (None, None)
        } else {
            match numbers.split_once('.') {
                Some((major, minor)) => (
                    Some(parse_number(major, text)?),
                    Some(parse_number(minor, text)?),
                ),
                None => (Some(parse_number(numbers, text)?), None),
            }
        };

        Ok(Self {
            group,
            major,
            minor,
            status: status.map(str::to_string),
        })
    }
}

/// Split a leading `yyyy-MM-dd` group version off the text
fn split_group(text: &str) -> Result<(Option<NaiveDate>, &str), VersionParseError> {
    let bytes = text.as_bytes();
    let looks_like_date = bytes.len() >= GROUP_VERSION_LEN
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes[..GROUP_VERSION_LEN]
            .iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());

    if !looks_like_date {
        return Ok((None, text));
    }

    let date = NaiveDate::parse_from_str(&text[..GROUP_VERSION_LEN], GROUP_VERSION_FORMAT)
        .map_err(|_| VersionParseError::InvalidGroupVersion(text.to_string()))?;
    Ok((Some(date), &text[GROUP_VERSION_LEN..]))
}

fn parse_number(part: &str, text: &str) -> Result<u32, VersionParseError> {
    if part.is_empty() || !part.bytes().all(|c| c.is_ascii_digit()) {
        return Err(VersionParseError::InvalidFormat(text.to_string()));
    }
    part.parse()
        .map_err(|_| VersionParseError::InvalidNumber(text.to_string()))
}

impl PartialEq for ApiVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ApiVersion {}

impl Hash for ApiVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_neutral().hash(state);
        self.group.hash(state);
        self.major.unwrap_or(0).hash(state);
        self.minor.unwrap_or(0).hash(state);
        if let Some(status) = &self.status {
            for c in status.bytes() {
                c.to_ascii_uppercase().hash(state);
            }
        }
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // neutral sorts before every concrete version
        other
            .is_neutral()
            .cmp(&self.is_neutral())
            .then_with(|| self.group.cmp(&other.group))
            .then_with(|| self.major.unwrap_or(0).cmp(&other.major.unwrap_or(0)))
            .then_with(|| self.minor.unwrap_or(0).cmp(&other.minor.unwrap_or(0)))
            .then_with(|| self.cmp_status(other))
    }
}

impl Serialize for ApiVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
