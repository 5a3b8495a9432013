//! Rule-set file loading shared by the validate and resolve commands.

use std::path::Path;

use serde::Deserialize;

use visado_store::RequiredDocument;

/// A rule set authored as a JSON file. The store assigns version
/// numbers and ids; the file carries only the pair and its documents,
/// plus optional display labels used when emitting checklist schemas.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RuleSetFile {
    pub country_code: String,
    #[serde(default)]
    pub country_name: String,
    pub visa_type: String,
    #[serde(default)]
    pub visa_type_label: String,
    pub documents: Vec<RequiredDocument>,
}

pub(crate) fn load(path: &Path) -> Result<RuleSetFile, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("cannot parse {}: {}", path.display(), e))
}
