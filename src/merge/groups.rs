//! Grouped-predictor membership map.
//!
//! Inference runs emit a synthetic `pred.group.N` regulator when several
//! regulators share identical prior evidence and cannot be distinguished.
//! The map records which real regulators each group stands for, so grouped
//! rows can be expanded back into one row per member before merging.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{GroupMapError, GroupMapResult};

/// Synthetic regulator names follow the inference engine's naming scheme.
static GROUP_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^pred\.group\.\d+$").expect("group id regex")
});

/// Whether a regulator name is a grouped-predictor placeholder.
pub fn is_group_id(name: &str) -> bool {
    GROUP_ID_RE.is_match(name)
}

/// Map from grouped-predictor ids to their member regulators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMap {
    /// Version of the map format
    #[serde(default = "default_version")]
    pub version: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Group id → member regulator names
    pub groups: HashMap<String, Vec<String>>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl GroupMap {
    /// Parse a map from a JSON string, checking group structure.
    pub fn from_json(json: &str) -> GroupMapResult<Self> {
        let map: GroupMap = serde_json::from_str(json)?;
        map.check()?;
        Ok(map)
    }

    /// Load a map from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GroupMapResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize the map to pretty JSON.
    pub fn to_json(&self) -> GroupMapResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Member regulators of a group, if the group is known.
    pub fn members(&self, group_id: &str) -> Option<&[String]> {
        self.groups.get(group_id).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn check(&self) -> GroupMapResult<()> {
        for (group, members) in &self.groups {
            if !is_group_id(group) {
                return Err(GroupMapError::InvalidGroup {
                    group: group.clone(),
                    message: "id does not match 'pred.group.N'".into(),
                });
            }
            if members.is_empty() {
                return Err(GroupMapError::InvalidGroup {
                    group: group.clone(),
                    message: "empty member list".into(),
                });
            }
            for member in members {
                if member.trim().is_empty() || is_group_id(member) {
                    return Err(GroupMapError::InvalidGroup {
                        group: group.clone(),
                        message: format!("invalid member name '{}'", member),
                    });
                }
            }
        }
        Ok(())
    }
}

/// The published cell-lines map: `pred.group.1` stands for the two
/// indistinguishable MHC-II regulators RFXANK and RFXAP.
pub fn example_group_map() -> GroupMap {
    let mut groups = HashMap::new();
    groups.insert(
        "pred.group.1".to_string(),
        vec!["RFXANK".to_string(), "RFXAP".to_string()],
    );

    GroupMap {
        version: default_version(),
        description: "Cell-lines TRRUST grouped predictors".to_string(),
        groups,
    }
}
