//! Certificate records shown by the carousel.

use std::collections::BTreeMap;
use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Accent colors assigned to certificates that do not carry their own.
pub const ACCENT_PALETTE: [&str; 4] = ["#ff6b00", "#8b5cf6", "#0ea5e9", "#10b981"];

/// Stable unique key of a certificate.
///
/// Content files may use strings or any JSON/TOML number as keys; all are
/// normalized to their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId")]
pub struct CertificateId(CompactString);

impl CertificateId {
    /// Create an id from any string-like value.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(CompactString::new(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CertificateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for CertificateId {
    fn from(id: u64) -> Self {
        Self(compact_str::format_compact!("{id}"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl From<RawId> for CertificateId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => Self::new(text),
            RawId::Unsigned(number) => Self::from(number),
            RawId::Signed(number) => Self(compact_str::format_compact!("{number}")),
            // Integral floats collapse to the integer spelling
            RawId::Float(number) => Self(compact_str::format_compact!("{number}")),
        }
    }
}

/// A certificate card.
///
/// The named fields are the ones the carousel knows how to display. Anything
/// else found in the source document is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    /// Stable unique key.
    pub id: CertificateId,

    /// Certificate title.
    pub title: String,

    /// Issuing organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    /// Human-readable issue date (e.g. "Dec 2023").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Accent color in `#rgb` or `#rrggbb` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Reference to the certificate image.
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Passthrough fields not interpreted by the carousel.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Certificate {
    /// Create a certificate with only an id and a title.
    pub fn new(id: impl Into<CertificateId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            issuer: None,
            date: None,
            color: None,
            image_url: None,
            description: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the issue date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the accent color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the image reference.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Accent color as RGB components, if the color is well formed.
    pub fn accent_rgb(&self) -> Option<(u8, u8, u8)> {
        self.color.as_deref().and_then(parse_hex_color)
    }

    /// Palette color used when the certificate has no accent of its own.
    ///
    /// The choice depends only on the id, so a card keeps its color across
    /// reloads.
    pub fn fallback_accent(&self) -> &'static str {
        let hash = self
            .id
            .as_str()
            .bytes()
            .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
        ACCENT_PALETTE[hash % ACCENT_PALETTE.len()]
    }
}

/// Parse `#rgb` or `#rrggbb` into RGB components.
pub(crate) fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut digits = hex.chars().filter_map(|c| c.to_digit(16)).map(|d| (d * 17) as u8);
            Some((digits.next()?, digits.next()?, digits.next()?))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

/// Certificates shown when no content is available.
pub fn builtin_certificates() -> Vec<Certificate> {
    vec![
        Certificate::new(1u64, "Full Stack Web Development")
            .with_issuer("Meta / Coursera")
            .with_date("Dec 2023")
            .with_color("#ff6b00")
            .with_image_url("https://images.unsplash.com/photo-1496171367470-9ed9a91ea931?q=80&w=800")
            .with_description(
                "Specialization in React, Node.js, and modern cloud deployment architectures.",
            ),
        Certificate::new(2u64, "AI & Machine Learning")
            .with_issuer("Google Cloud")
            .with_date("Oct 2023")
            .with_color("#8b5cf6")
            .with_image_url("https://images.unsplash.com/photo-1677442136019-21780ecad995?q=80&w=800")
            .with_description(
                "In-depth study of neural networks, TensorFlow, and large scale data processing.",
            ),
        Certificate::new(3u64, "Cloud Architecture Professional")
            .with_issuer("AWS")
            .with_date("Aug 2023")
            .with_color("#0ea5e9")
            .with_image_url("https://images.unsplash.com/photo-1451187580459-43490279c0fa?q=80&w=800")
            .with_description(
                "Designing resilient, high-availability systems using AWS global infrastructure.",
            ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_number_and_string() {
        let from_json: Vec<CertificateId> = serde_json::from_str(r#"[7, "seven"]"#).unwrap();
        assert_eq!(from_json[0].as_str(), "7");
        assert_eq!(from_json[1].as_str(), "seven");
        assert_eq!(CertificateId::from(7u64), from_json[0]);
    }

    #[test]
    fn test_id_accepts_any_json_number() {
        let ids: Vec<CertificateId> =
            serde_json::from_str("[18446744073709551615, -3, 1.0, 2.5]").unwrap();
        assert_eq!(ids[0], CertificateId::from(u64::MAX));
        assert_eq!(ids[0].as_str(), "18446744073709551615");
        assert_eq!(ids[1].as_str(), "-3");
        assert_eq!(ids[2], CertificateId::from(1u64));
        assert_eq!(ids[3].as_str(), "2.5");
    }

    #[test]
    fn test_large_numeric_id_in_certificate() {
        let cert: Certificate =
            serde_json::from_str(r#"{"id": 18446744073709551615, "title": "Max"}"#).unwrap();
        assert_eq!(cert.id, CertificateId::from(u64::MAX));
    }

    #[test]
    fn test_extra_fields_are_kept() {
        let json = r#"{
            "id": "aws",
            "title": "Cloud Architecture Professional",
            "imageUrl": "https://example.com/aws.png",
            "credentialUrl": "https://example.com/verify",
            "order": 3
        }"#;
        let cert: Certificate = serde_json::from_str(json).unwrap();

        assert_eq!(cert.image_url.as_deref(), Some("https://example.com/aws.png"));
        assert_eq!(cert.extra.len(), 2);
        assert_eq!(cert.extra["order"], serde_json::json!(3));
        assert!(cert.issuer.is_none());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff6b00"), Some((255, 107, 0)));
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("ff6b00"), None);
        assert_eq!(parse_hex_color("#ff6b0"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn test_fallback_accent_is_stable() {
        let a = Certificate::new("cert-a", "A");
        let again = Certificate::new("cert-a", "Different title");
        assert_eq!(a.fallback_accent(), again.fallback_accent());
        assert!(ACCENT_PALETTE.contains(&a.fallback_accent()));
    }

    #[test]
    fn test_builtin_certificates() {
        let certs = builtin_certificates();
        assert_eq!(certs.len(), 3);
        assert!(certs.iter().all(|c| c.accent_rgb().is_some()));
        assert_eq!(certs[2].issuer.as_deref(), Some("AWS"));
    }
}
