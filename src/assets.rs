//! Asset collaborator – raster brand assets and the optional display font.
//!
//! The engine never touches the filesystem directly; it asks an
//! [`AssetProvider`] for raw bytes by [`AssetKind`]. Every asset is
//! optional: a `None` (or an undecodable payload downstream) leaves the
//! corresponding slot blank and the document is still produced.

use std::collections::HashMap;
use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use serde::{Deserialize, Serialize};

/// The named asset slots the voucher knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Brand mark placed in the header band.
    BrandMark,
    /// Authorization seal placed in the footer block.
    Seal,
    /// Optional TTF/OTF used only to refine text measurement.
    DisplayFont,
}

impl AssetKind {
    /// Conventional path of this asset relative to the asset root.
    pub fn relative_path(self) -> &'static str {
        match self {
            AssetKind::BrandMark => "brand-mark.png",
            AssetKind::Seal => "seal.png",
            AssetKind::DisplayFont => "display-font.ttf",
        }
    }
}

/// Capability handed to the engine: raw bytes for a named asset, or `None`.
pub trait AssetProvider {
    fn load(&self, kind: AssetKind) -> Option<Vec<u8>>;
}

/// Directory-backed provider using the conventional relative paths, with
/// optional per-slot source overrides (a file path or a base64 data URI).
pub struct DirAssets {
    root: PathBuf,
    overrides: HashMap<AssetKind, String>,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overrides: HashMap::new(),
        }
    }

    /// Override one slot's source. `source` may be a file path or a
    /// `data:<mime>;base64,...` URI.
    pub fn with_source(mut self, kind: AssetKind, source: impl Into<String>) -> Self {
        self.overrides.insert(kind, source.into());
        self
    }
}

impl AssetProvider for DirAssets {
    fn load(&self, kind: AssetKind) -> Option<Vec<u8>> {
        let source = match self.overrides.get(&kind) {
            Some(s) => s.clone(),
            None => self.root.join(kind.relative_path()).display().to_string(),
        };

        if source.starts_with("data:") {
            return match decode_data_uri(&source) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    log::warn!("Skipping {kind:?} — {e}");
                    None
                }
            };
        }

        match std::fs::read(&source) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("Skipping {kind:?} — {source}: {e}");
                None
            }
        }
    }
}

/// In-memory provider for tests and embedded deployments.
#[derive(Default)]
pub struct StaticAssets {
    entries: HashMap<AssetKind, Vec<u8>>,
}

impl StaticAssets {
    /// A provider with every slot empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: AssetKind, bytes: Vec<u8>) -> Self {
        self.entries.insert(kind, bytes);
        self
    }
}

impl AssetProvider for StaticAssets {
    fn load(&self, kind: AssetKind) -> Option<Vec<u8>> {
        self.entries.get(&kind).cloned()
    }
}

/// Parse a `data:<mime>;base64,<data>` URI and return the decoded bytes.
pub fn decode_data_uri(src: &str) -> Result<Vec<u8>, String> {
    let rest = src
        .strip_prefix("data:")
        .ok_or_else(|| "not a data URI".to_string())?;
    let comma_pos = rest
        .find(',')
        .ok_or_else(|| "invalid data URI: missing `,` separator".to_string())?;
    let header = &rest[..comma_pos];
    if !header.contains(";base64") {
        return Err("only base64-encoded data URIs are supported".to_string());
    }
    let b64_data = rest[comma_pos + 1..].trim();
    BASE64_STD
        .decode(b64_data)
        .map_err(|e| format!("base64 decode error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_provider_round_trips() {
        let assets = StaticAssets::empty().with(AssetKind::Seal, vec![1, 2, 3]);
        assert_eq!(assets.load(AssetKind::Seal), Some(vec![1, 2, 3]));
        assert_eq!(assets.load(AssetKind::BrandMark), None);
    }

    #[test]
    fn missing_files_are_tolerated() {
        let assets = DirAssets::new("/nonexistent/asset/dir");
        assert!(assets.load(AssetKind::BrandMark).is_none());
        assert!(assets.load(AssetKind::DisplayFont).is_none());
    }

    #[test]
    fn data_uri_sources_decode() {
        // "abc" in base64
        let assets = DirAssets::new(".").with_source(AssetKind::Seal, "data:image/png;base64,YWJj");
        assert_eq!(assets.load(AssetKind::Seal), Some(b"abc".to_vec()));
    }

    #[test]
    fn malformed_data_uri_is_tolerated() {
        let assets = DirAssets::new(".").with_source(AssetKind::Seal, "data:image/png;base64");
        assert!(assets.load(AssetKind::Seal).is_none());
        assert!(decode_data_uri("data:image/png,plain").is_err());
    }
}
