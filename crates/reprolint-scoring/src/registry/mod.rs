//! Requirements Registry
//!
//! Maps an action label to the parameters a step of that kind must state to be
//! reproducible. Unknown actions are an expected case, not an error: every
//! lookup on an unregistered action answers with an empty set.

mod table;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::info;

use reprolint_common::RegistryError;

pub use table::{RequirementSpec, BUILTIN_REQUIREMENTS};

/// Description returned for actions the registry does not know
pub const UNKNOWN_ACTION_DESCRIPTION: &str = "Unknown action type";

static BUILTIN: Lazy<Arc<RequirementsRegistry>> =
    Lazy::new(|| Arc::new(RegistryBuilder::new().with_builtin().build()));

/// Required and optional parameters for one action type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequirement {
    pub action: String,
    pub required_params: BTreeSet<String>,
    #[serde(default)]
    pub optional_params: BTreeSet<String>,
    #[serde(default)]
    pub description: String,
}

impl ActionRequirement {
    pub fn new<R, O, S>(
        action: impl Into<String>,
        required: R,
        optional: O,
        description: impl Into<String>,
    ) -> Self
    where
        R: IntoIterator<Item = S>,
        O: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            action: action.into(),
            required_params: required.into_iter().map(Into::into).collect(),
            optional_params: optional.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }

    fn from_spec(spec: &RequirementSpec) -> Self {
        Self::new(
            spec.action,
            spec.required.iter().copied(),
            spec.optional.iter().copied(),
            spec.description,
        )
    }

    /// Check the definition is usable
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.action.trim().is_empty() {
            return Err(RegistryError::EmptyActionName);
        }
        if let Some(param) = self.required_params.intersection(&self.optional_params).next() {
            return Err(RegistryError::ConflictingParameter {
                action: self.action.clone(),
                param: param.clone(),
            });
        }
        Ok(())
    }
}

/// Builder for a [`RequirementsRegistry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<String, ActionRequirement>,
}

impl RegistryBuilder {
    /// Start from an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every built-in action
    pub fn with_builtin(mut self) -> Self {
        for spec in BUILTIN_REQUIREMENTS {
            let requirement = ActionRequirement::from_spec(spec);
            self.entries.insert(requirement.action.clone(), requirement);
        }
        self
    }

    /// Add one action, replacing any existing definition with the same name
    pub fn requirement(mut self, requirement: ActionRequirement) -> Result<Self, RegistryError> {
        requirement.validate()?;
        if self.entries.contains_key(&requirement.action) {
            info!("Overriding requirements for action '{}'", requirement.action);
        }
        self.entries.insert(requirement.action.clone(), requirement);
        Ok(self)
    }

    /// Add actions from a JSON array of requirement objects
    ///
    /// A document may not define the same action twice.
    pub fn extend_from_json(mut self, json: &str) -> Result<Self, RegistryError> {
        let requirements: Vec<ActionRequirement> =
            serde_json::from_str(json).map_err(|e| RegistryError::Malformed(e.to_string()))?;

        let mut seen = HashSet::new();
        for requirement in requirements {
            if !seen.insert(requirement.action.clone()) {
                return Err(RegistryError::DuplicateAction {
                    action: requirement.action,
                });
            }
            self = self.requirement(requirement)?;
        }
        Ok(self)
    }

    pub fn build(self) -> RequirementsRegistry {
        RequirementsRegistry {
            by_action: self.entries,
        }
    }
}

/// Immutable action → requirements table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementsRegistry {
    by_action: BTreeMap<String, ActionRequirement>,
}

impl Default for RequirementsRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RequirementsRegistry {
    /// Registry holding the built-in table
    pub fn builtin() -> Self {
        RegistryBuilder::new().with_builtin().build()
    }

    /// Process-wide built-in registry, built on first use
    pub fn shared() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn get(&self, action: &str) -> Option<&ActionRequirement> {
        self.by_action.get(action)
    }

    pub fn contains(&self, action: &str) -> bool {
        self.by_action.contains_key(action)
    }

    /// Required parameters, empty for unknown actions
    pub fn required_params(&self, action: &str) -> BTreeSet<String> {
        self.get(action)
            .map(|r| r.required_params.clone())
            .unwrap_or_default()
    }

    /// Optional parameters, empty for unknown actions
    pub fn optional_params(&self, action: &str) -> BTreeSet<String> {
        self.get(action)
            .map(|r| r.optional_params.clone())
            .unwrap_or_default()
    }

    /// Required parameters absent from `provided`, in ascending order
    pub fn missing_params<'a, I>(&self, action: &str, provided: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let Some(requirement) = self.get(action) else {
            return Vec::new();
        };
        let provided: HashSet<&str> = provided.into_iter().collect();
        requirement
            .required_params
            .iter()
            .filter(|param| !provided.contains(param.as_str()))
            .cloned()
            .collect()
    }

    /// Human-readable description of an action
    pub fn describe(&self, action: &str) -> &str {
        self.get(action)
            .map(|r| r.description.as_str())
            .unwrap_or(UNKNOWN_ACTION_DESCRIPTION)
    }

    /// Every registered action, sorted
    pub fn all_actions(&self) -> Vec<&str> {
        self.by_action.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionRequirement> {
        self.by_action.values()
    }

    pub fn len(&self) -> usize {
        self.by_action.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_action.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_well_formed() {
        let mut seen = HashSet::new();
        for spec in BUILTIN_REQUIREMENTS {
            assert!(seen.insert(spec.action), "duplicate row for {}", spec.action);
            ActionRequirement::from_spec(spec).validate().unwrap();
            assert!(!spec.required.is_empty(), "{} requires nothing", spec.action);
            assert!(spec.required.len() <= 4, "{} requires too much", spec.action);
        }
        assert_eq!(RequirementsRegistry::builtin().len(), 24);
    }

    #[test]
    fn test_required_params_for_fix() {
        let registry = RequirementsRegistry::builtin();
        let required: Vec<String> = registry.required_params("fix").into_iter().collect();
        assert_eq!(
            required,
            vec!["duration_min", "fixative", "fixative_concentration", "temperature"]
        );
    }

    #[test]
    fn test_unknown_action_is_empty_not_error() {
        let registry = RequirementsRegistry::builtin();
        assert!(registry.required_params("sonicate").is_empty());
        assert!(registry.optional_params("sonicate").is_empty());
        assert!(registry.missing_params("sonicate", ["anything"]).is_empty());
        assert_eq!(registry.describe("sonicate"), "Unknown action type");
    }

    #[test]
    fn test_missing_params_sorted() {
        let registry = RequirementsRegistry::builtin();
        let missing = registry.missing_params("fix", ["fixative", "duration_min"]);
        assert_eq!(missing, vec!["fixative_concentration", "temperature"]);

        let missing = registry.missing_params("wash", ["wash_buffer"]);
        assert_eq!(missing, vec!["duration_per_wash_min", "number_of_washes"]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let registry = RequirementsRegistry::builtin();
        assert!(!registry.contains("Fix"));
        let missing = registry.missing_params("incubate", ["Temperature", "duration_min"]);
        assert_eq!(missing, vec!["temperature"]);
    }

    #[test]
    fn test_all_actions_sorted() {
        let registry = RequirementsRegistry::builtin();
        let actions = registry.all_actions();
        let mut sorted = actions.clone();
        sorted.sort();
        assert_eq!(actions, sorted);
        assert!(actions.contains(&"image"));
        assert_eq!(registry.describe("image"), "Microscopy imaging parameters");
    }

    #[test]
    fn test_extend_from_json_adds_and_overrides() {
        let registry = RegistryBuilder::new()
            .with_builtin()
            .extend_from_json(
                r#"[
                    {"action": "sonicate", "required_params": ["amplitude_percent", "duration_s"],
                     "optional_params": ["pulse_pattern"], "description": "Sonication"},
                    {"action": "mount", "required_params": ["mounting_medium", "coverslip_thickness"]}
                ]"#,
            )
            .unwrap()
            .build();

        assert_eq!(registry.len(), 25);
        assert_eq!(registry.describe("sonicate"), "Sonication");
        assert_eq!(registry.required_params("mount").len(), 2);
        assert!(registry.optional_params("mount").is_empty());
    }

    #[test]
    fn test_extend_rejects_duplicates_in_one_document() {
        let err = RegistryBuilder::new()
            .extend_from_json(
                r#"[{"action": "lyse", "required_params": ["buffer"]},
                    {"action": "lyse", "required_params": ["duration_min"]}]"#,
            )
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateAction {
                action: "lyse".to_string()
            }
        );
    }

    #[test]
    fn test_extend_rejects_conflicting_parameter() {
        let err = RegistryBuilder::new()
            .extend_from_json(
                r#"[{"action": "lyse", "required_params": ["buffer"], "optional_params": ["buffer"]}]"#,
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::ConflictingParameter { .. }));
    }

    #[test]
    fn test_extend_rejects_empty_action_and_bad_json() {
        let err = RegistryBuilder::new()
            .extend_from_json(r#"[{"action": " ", "required_params": []}]"#)
            .unwrap_err();
        assert_eq!(err, RegistryError::EmptyActionName);

        let err = RegistryBuilder::new().extend_from_json("{}").unwrap_err();
        assert!(matches!(err, RegistryError::Malformed(_)));
    }

    #[test]
    fn test_shared_registry_is_builtin() {
        assert_eq!(*RequirementsRegistry::shared(), RequirementsRegistry::builtin());
    }
}
