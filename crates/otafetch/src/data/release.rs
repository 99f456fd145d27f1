use serde::Deserialize;

/// A published release manifest (GitHub-style releases JSON).
///
/// Only the fields the engine needs are modeled; unknown fields are
/// ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Version tag of the release, e.g. `v1.4.2`.
    pub tag_name: String,

    /// Downloadable artifacts attached to the release.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// One downloadable artifact within a [`Release`].
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

impl Release {
    /// First asset whose name ends with `suffix`, compared
    /// case-insensitively.
    pub fn find_asset(&self, suffix: &str) -> Option<&ReleaseAsset> {
        let suffix = suffix.to_ascii_lowercase();
        self.assets
            .iter()
            .find(|asset| asset.name.to_ascii_lowercase().ends_with(&suffix))
    }
}
