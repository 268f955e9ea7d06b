//! Minimal media type parsing for `Accept` and `Content-Type` values

use std::cmp::Ordering;
use std::fmt;

const QUALITY: &str = "q";

/// A media type with its parameters, e.g. `application/json; q=0.5; v=2.0`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MediaType {
    essence: String,
    params: Vec<(String, String)>,
}

impl MediaType {
    /// Parse a single media type; returns `None` for blank input
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split(';');
        let essence = parts.next()?.trim();
        if essence.is_empty() {
            return None;
        }

        let params = parts
            .filter_map(|part| {
                let (name, value) = part.split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                let value = value.trim().trim_matches('"');
                Some((name.to_string(), value.to_string()))
            })
            .collect();

        Some(Self {
            essence: essence.to_string(),
            params,
        })
    }

    /// Parse a comma-separated list of media types (one header line)
    pub(crate) fn parse_list(text: &str) -> Vec<Self> {
        text.split(',').filter_map(Self::parse).collect()
    }

    /// Value of a parameter, looked up without regard to case
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Quality weight; `1.0` when absent or malformed
    pub(crate) fn quality(&self) -> f32 {
        self.param(QUALITY)
            .and_then(|q| q.parse::<f32>().ok())
            .map(|q| q.clamp(0.0, 1.0))
            .unwrap_or(1.0)
    }

    /// Add a parameter unless one with the same name exists
    ///
    /// Returns `true` when the parameter was added.
    pub(crate) fn add_param(&mut self, name: &str, value: &str) -> bool {
        if self.param(name).is_some() {
            return false;
        }
        self.params.push((name.to_string(), value.to_string()));
        true
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.essence)?;
        for (name, value) in &self.params {
            write!(f, "; {}={}", name, value)?;
        }
        Ok(())
    }
}

/// Sort media types by quality, highest first, keeping declaration order for ties
pub(crate) fn sort_by_quality(entries: &mut [MediaType]) {
    entries.sort_by(|a, b| {
        b.quality()
            .partial_cmp(&a.quality())
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_media_type() {
        let media_type = MediaType::parse(" application/json ; q=0.5; V=\"2.0\"").unwrap();

        assert_eq!(media_type.param("v"), Some("2.0"));
        assert_eq!(media_type.quality(), 0.5);
        assert_eq!(media_type.to_string(), "application/json; q=0.5; V=2.0");
        assert!(MediaType::parse("  ").is_none());
    }

    #[test]
    fn test_sort_by_quality_is_stable() {
        let mut entries = MediaType::parse_list("text/plain;q=0.2, application/xml, application/json");
        sort_by_quality(&mut entries);

        let order: Vec<_> = entries.iter().map(|e| e.essence.as_str()).collect();
        assert_eq!(order, vec!["application/xml", "application/json", "text/plain"]);
    }

    #[test]
    fn test_add_param_does_not_overwrite() {
        let mut media_type = MediaType::parse("application/json; v=1.0").unwrap();

        assert!(!media_type.add_param("V", "2.0"));
        assert!(media_type.add_param("charset", "utf-8"));
        assert_eq!(media_type.to_string(), "application/json; v=1.0; charset=utf-8");
    }
}
