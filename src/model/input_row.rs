use serde::Deserialize;

/// One parsed CSV line, keyed by the header row.
///
/// Columns the file doesn't have read as empty strings; columns this type
/// doesn't name are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InputRow {
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub usecase: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub figma: String,
}
