//! Content sources for the carousel.
//!
//! Sources hand back raw certificate lists. [`load_certificates`] is the
//! boundary where those lists are validated and normalized before they reach
//! the selector.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::certificate::{Certificate, builtin_certificates, parse_hex_color};
use crate::config::CarouselConfig;
use crate::error::ContentError;

/// A provider of certificate lists.
pub trait ContentSource: Send + Sync {
    /// Human-readable description of where content comes from.
    fn describe(&self) -> String;

    /// Fetch the current list of certificates.
    fn fetch(&self) -> Result<Vec<Certificate>, ContentError>;
}

/// The certificates bundled with certring.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

impl ContentSource for BuiltinSource {
    fn describe(&self) -> String {
        "built-in certificates".to_string()
    }

    fn fetch(&self) -> Result<Vec<Certificate>, ContentError> {
        Ok(builtin_certificates())
    }
}

/// On-disk document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Json,
    Toml,
}

impl ContentFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Certificates read from a JSON or TOML file.
///
/// JSON documents may be a bare array or an object with a `certificates`
/// array. TOML documents use a `[[certificates]]` array of tables.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    format: ContentFormat,
}

#[derive(Deserialize)]
struct CertificateDocument {
    #[serde(default)]
    certificates: Vec<Certificate>,
}

impl FileSource {
    /// Create a source for `path`, detecting the format from its extension.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ContentError> {
        let path = path.into();
        let format = ContentFormat::from_path(&path)
            .ok_or_else(|| ContentError::UnsupportedFormat { path: path.clone() })?;
        Ok(Self { path, format })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a document held in memory.
    pub fn parse(&self, text: &str) -> Result<Vec<Certificate>, ContentError> {
        match self.format {
            ContentFormat::Json => {
                let value: serde_json::Value =
                    serde_json::from_str(text).map_err(|e| ContentError::parse(&self.path, e))?;
                let parsed = match value {
                    serde_json::Value::Array(_) => serde_json::from_value(value),
                    _ => serde_json::from_value::<CertificateDocument>(value)
                        .map(|doc| doc.certificates),
                };
                parsed.map_err(|e| ContentError::parse(&self.path, e))
            }
            ContentFormat::Toml => toml::from_str::<CertificateDocument>(text)
                .map(|doc| doc.certificates)
                .map_err(|e| ContentError::parse(&self.path, e)),
        }
    }
}

impl ContentSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<Certificate>, ContentError> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|e| ContentError::io(&self.path, e))?;
        self.parse(&text)
    }
}

/// Fetch, validate and normalize certificates from `source`.
///
/// Titles must be non-empty, ids unique and colors well formed. Certificates
/// without a color get one from the accent palette. An empty list is
/// replaced by the built-in certificates when the config allows it.
pub fn load_certificates(
    source: &dyn ContentSource,
    config: &CarouselConfig,
) -> Result<Vec<Certificate>, ContentError> {
    let mut certificates = source.fetch()?;

    if certificates.is_empty() && config.fallback_to_builtin {
        tracing::info!(source = %source.describe(), "no certificates found, using built-in list");
        certificates = builtin_certificates();
    }

    let mut seen = HashSet::with_capacity(certificates.len());
    for cert in &mut certificates {
        if cert.title.trim().is_empty() {
            return Err(ContentError::Invalid {
                id: cert.id.to_string(),
                reason: "title is empty".to_string(),
            });
        }
        if !seen.insert(cert.id.clone()) {
            return Err(ContentError::DuplicateId {
                id: cert.id.to_string(),
            });
        }
        match cert.color.as_deref() {
            Some(color) if parse_hex_color(color).is_none() => {
                return Err(ContentError::Invalid {
                    id: cert.id.to_string(),
                    reason: format!("color {color:?} is not #rgb or #rrggbb"),
                });
            }
            Some(_) => {}
            None => cert.color = Some(cert.fallback_accent().to_string()),
        }
    }

    tracing::info!(
        source = %source.describe(),
        count = certificates.len(),
        "certificates loaded"
    );
    Ok(certificates)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<Certificate>);

    impl ContentSource for FixedSource {
        fn describe(&self) -> String {
            "fixed".to_string()
        }

        fn fetch(&self) -> Result<Vec<Certificate>, ContentError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ContentFormat::from_path(Path::new("a.JSON")), Some(ContentFormat::Json));
        assert_eq!(ContentFormat::from_path(Path::new("a.toml")), Some(ContentFormat::Toml));
        assert_eq!(ContentFormat::from_path(Path::new("a.yaml")), None);
        assert!(matches!(
            FileSource::new("certs.csv"),
            Err(ContentError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_parse_json_shapes() {
        let source = FileSource::new("certs.json").unwrap();
        let bare = source.parse(r#"[{"id": 1, "title": "A"}]"#).unwrap();
        let wrapped = source
            .parse(r#"{"certificates": [{"id": 1, "title": "A"}]}"#)
            .unwrap();
        assert_eq!(bare, wrapped);
    }

    #[test]
    fn test_parse_toml() {
        let source = FileSource::new("certs.toml").unwrap();
        let certs = source
            .parse(
                r##"
                [[certificates]]
                id = "aws"
                title = "Cloud Architecture Professional"
                issuer = "AWS"
                color = "#0ea5e9"
                "##,
            )
            .unwrap();
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].id.as_str(), "aws");
    }

    #[test]
    fn test_parse_error_names_path() {
        let source = FileSource::new("broken.json").unwrap();
        let err = source.parse("{not json").unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_empty_falls_back_to_builtin() {
        let config = CarouselConfig::default();
        let certs = load_certificates(&FixedSource(Vec::new()), &config).unwrap();
        assert_eq!(certs, builtin_certificates());
    }

    #[test]
    fn test_empty_without_fallback() {
        let config = CarouselConfig::builder()
            .fallback_to_builtin(false)
            .build()
            .unwrap();
        let certs = load_certificates(&FixedSource(Vec::new()), &config).unwrap();
        assert!(certs.is_empty());
    }

    #[test]
    fn test_missing_color_gets_palette_accent() {
        let cert = Certificate::new("x", "X");
        let expected = cert.fallback_accent();
        let certs =
            load_certificates(&FixedSource(vec![cert]), &CarouselConfig::default()).unwrap();
        assert_eq!(certs[0].color.as_deref(), Some(expected));
    }

    #[test]
    fn test_validation_errors() {
        let config = CarouselConfig::default();

        let dup = FixedSource(vec![Certificate::new("a", "A"), Certificate::new("a", "B")]);
        assert!(matches!(
            load_certificates(&dup, &config),
            Err(ContentError::DuplicateId { .. })
        ));

        let blank = FixedSource(vec![Certificate::new("a", "  ")]);
        assert!(matches!(
            load_certificates(&blank, &config),
            Err(ContentError::Invalid { .. })
        ));

        let bad_color = FixedSource(vec![Certificate::new("a", "A").with_color("orange")]);
        let err = load_certificates(&bad_color, &config).unwrap_err();
        assert!(err.to_string().contains("orange"));
    }
}
