// ─────────────────────────────────────────────────────────────────────
// EDACEC — Locked Dictionary (HESM components)
// ─────────────────────────────────────────────────────────────────────
//! The versioned keyword dictionary.
//!
//! A spec is built exactly once through [`EdacecSpec::load`] and exposes
//! read accessors only. Changing a keyword list or a cap means shipping
//! a new dictionary under a new version string.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EdacecError, EdacecResult};

/// The four HESM scoring dimensions, in their fixed evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentName {
    Structural,
    Emotional,
    Irreversibility,
    Agenda,
}

impl ComponentName {
    /// Evaluation and output order.
    pub const ALL: [ComponentName; 4] = [
        ComponentName::Structural,
        ComponentName::Emotional,
        ComponentName::Irreversibility,
        ComponentName::Agenda,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Emotional => "emotional",
            Self::Irreversibility => "irreversibility",
            Self::Agenda => "agenda",
        }
    }

    /// One-letter label used in reports (S/E/I/A).
    pub fn short(self) -> char {
        match self {
            Self::Structural => 'S',
            Self::Emotional => 'E',
            Self::Irreversibility => 'I',
            Self::Agenda => 'A',
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per HESM component.
///
/// Serializes as a JSON object whose keys always appear in
/// [`ComponentName::ALL`] order, which keeps output lines byte-stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMap<T> {
    pub structural: T,
    pub emotional: T,
    pub irreversibility: T,
    pub agenda: T,
}

impl<T> ComponentMap<T> {
    /// Build a map by evaluating `f` once per component, in fixed order.
    pub fn from_fn(mut f: impl FnMut(ComponentName) -> T) -> Self {
        Self {
            structural: f(ComponentName::Structural),
            emotional: f(ComponentName::Emotional),
            irreversibility: f(ComponentName::Irreversibility),
            agenda: f(ComponentName::Agenda),
        }
    }

    /// Fallible variant of [`ComponentMap::from_fn`]; stops at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(ComponentName) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            structural: f(ComponentName::Structural)?,
            emotional: f(ComponentName::Emotional)?,
            irreversibility: f(ComponentName::Irreversibility)?,
            agenda: f(ComponentName::Agenda)?,
        })
    }

    pub fn get(&self, name: ComponentName) -> &T {
        match name {
            ComponentName::Structural => &self.structural,
            ComponentName::Emotional => &self.emotional,
            ComponentName::Irreversibility => &self.irreversibility,
            ComponentName::Agenda => &self.agenda,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentName, &T)> {
        ComponentName::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(ComponentName, &T) -> U) -> ComponentMap<U> {
        ComponentMap::from_fn(|c| f(c, self.get(c)))
    }
}

/// One scoring dimension: a cap and a de-duplicated, lowercase keyword set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSpec {
    name: ComponentName,
    max_score: u32,
    keywords: BTreeSet<String>,
}

impl ComponentSpec {
    /// Keywords are lowercased; duplicates collapse to one entry.
    pub fn new<I, S>(name: ComponentName, max_score: u32, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name,
            max_score,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn name(&self) -> ComponentName {
        self.name
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Keywords in lexicographic order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }
}

/// The full, frozen EDACEC dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdacecSpec {
    version: String,
    components: ComponentMap<ComponentSpec>,
}

impl EdacecSpec {
    /// Assemble a spec from already-validated parts.
    pub fn new(version: impl Into<String>, components: ComponentMap<ComponentSpec>) -> Self {
        Self {
            version: version.into(),
            components,
        }
    }

    /// Load a spec from its JSON representation.
    ///
    /// Shape: `{"version": str, "dictionary": {"structural": {"max_score":
    /// int, "keywords": [str]}, "emotional": ..., "irreversibility": ...,
    /// "agenda": ...}}`. All four components are required.
    pub fn load(raw: &Value) -> EdacecResult<Self> {
        let root = raw
            .as_object()
            .ok_or_else(|| EdacecError::SpecLoad("spec root must be a JSON object".into()))?;

        let version = match root.get("version") {
            None | Some(Value::Null) => "unknown".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        let dictionary = root
            .get("dictionary")
            .and_then(Value::as_object)
            .ok_or_else(|| EdacecError::SpecLoad("missing 'dictionary' object".into()))?;

        for key in dictionary.keys() {
            if ComponentName::parse(key).is_none() {
                log::warn!("spec {version}: ignoring unknown component '{key}'");
            }
        }

        let components = ComponentMap::try_from_fn(|name| -> EdacecResult<ComponentSpec> {
            let entry = dictionary.get(name.as_str()).ok_or_else(|| {
                EdacecError::SpecLoad(format!("missing component '{name}'"))
            })?;
            load_component(name, entry)
        })?;

        let spec = Self { version, components };
        log::debug!(
            "loaded spec {}: S={} E={} I={} A={} keywords",
            spec.version,
            spec.components.structural.keyword_count(),
            spec.components.emotional.keyword_count(),
            spec.components.irreversibility.keyword_count(),
            spec.components.agenda.keyword_count(),
        );
        Ok(spec)
    }

    /// Parse a JSON document and [`load`](Self::load) it.
    pub fn from_json_str(json: &str) -> EdacecResult<Self> {
        let raw: Value = serde_json::from_str(json)
            .map_err(|e| EdacecError::SpecLoad(format!("JSON parse error: {e}")))?;
        Self::load(&raw)
    }

    /// Read a spec file from disk.
    pub fn from_path(path: &Path) -> EdacecResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| EdacecError::io(path, e))?;
        Self::from_json_str(&text)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn component(&self, name: ComponentName) -> &ComponentSpec {
        self.components.get(name)
    }

    /// Components in fixed evaluation order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentSpec> {
        self.components.iter().map(|(_, c)| c)
    }

    /// Upper bound of `k_total` under this dictionary.
    ///
    /// Widened to `u64`: four caps of up to `u32::MAX` each always fit.
    pub fn max_k(&self) -> u64 {
        self.components().map(|c| u64::from(c.max_score())).sum()
    }
}

fn load_component(name: ComponentName, entry: &Value) -> EdacecResult<ComponentSpec> {
    let obj = entry.as_object().ok_or_else(|| {
        EdacecError::SpecLoad(format!("component '{name}' must be a JSON object"))
    })?;

    let max_score = obj
        .get("max_score")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            EdacecError::SpecLoad(format!(
                "component '{name}': max_score must be a non-negative integer"
            ))
        })?;

    let raw_keywords = obj.get("keywords").and_then(Value::as_array).ok_or_else(|| {
        EdacecError::SpecLoad(format!("component '{name}': keywords must be a list of strings"))
    })?;

    let keywords = raw_keywords
        .iter()
        .map(|k| {
            k.as_str().ok_or_else(|| {
                EdacecError::SpecLoad(format!(
                    "component '{name}': keywords must be a list of strings, found {k}"
                ))
            })
        })
        .collect::<EdacecResult<Vec<&str>>>()?;

    let component = ComponentSpec::new(name, max_score, keywords);
    if component.keyword_count() < raw_keywords.len() {
        log::warn!(
            "component '{name}': {} duplicate keyword(s) collapsed",
            raw_keywords.len() - component.keyword_count()
        );
    }
    Ok(component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "version": "1.08",
            "dictionary": {
                "structural": {"max_score": 2, "keywords": ["strike", "collapse"]},
                "emotional": {"max_score": 3, "keywords": ["Panic", "fear"]},
                "irreversibility": {"max_score": 1, "keywords": ["permanent"]},
                "agenda": {"max_score": 2, "keywords": []}
            }
        })
    }

    #[test]
    fn test_load_valid() {
        let spec = EdacecSpec::load(&sample()).unwrap();
        assert_eq!(spec.version(), "1.08");
        assert_eq!(spec.component(ComponentName::Structural).max_score(), 2);
        assert_eq!(spec.component(ComponentName::Agenda).keyword_count(), 0);
        assert_eq!(spec.max_k(), 8);
    }

    #[test]
    fn test_max_k_large_caps_do_not_overflow() {
        let mut raw = sample();
        raw["dictionary"]["structural"]["max_score"] = json!(3_000_000_000u64);
        raw["dictionary"]["emotional"]["max_score"] = json!(3_000_000_000u64);
        let spec = EdacecSpec::load(&raw).unwrap();
        assert_eq!(spec.max_k(), 6_000_000_003);

        raw["dictionary"]["irreversibility"]["max_score"] = json!(u32::MAX);
        raw["dictionary"]["agenda"]["max_score"] = json!(u32::MAX);
        let spec = EdacecSpec::load(&raw).unwrap();
        assert_eq!(spec.max_k(), 6_000_000_000 + 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_keywords_lowercased() {
        let spec = EdacecSpec::load(&sample()).unwrap();
        let emotional = spec.component(ComponentName::Emotional);
        assert!(emotional.contains("panic"));
        assert!(!emotional.contains("Panic"));
    }

    #[test]
    fn test_duplicate_keywords_collapse() {
        let mut raw = sample();
        raw["dictionary"]["structural"]["keywords"] = json!(["war", "war", "WAR"]);
        let spec = EdacecSpec::load(&raw).unwrap();
        let s = spec.component(ComponentName::Structural);
        assert_eq!(s.keyword_count(), 1);
        assert_eq!(s.keywords().collect::<Vec<_>>(), vec!["war"]);
    }

    #[test]
    fn test_missing_component_rejected() {
        let mut raw = sample();
        raw["dictionary"].as_object_mut().unwrap().remove("agenda");
        let err = EdacecSpec::load(&raw).unwrap_err();
        assert!(matches!(err, EdacecError::SpecLoad(ref m) if m.contains("agenda")));
    }

    #[test]
    fn test_missing_dictionary_rejected() {
        let err = EdacecSpec::load(&json!({"version": "x"})).unwrap_err();
        assert!(matches!(err, EdacecError::SpecLoad(_)));
    }

    #[test]
    fn test_bad_max_score_rejected() {
        for bad in [json!(-1), json!(2.5), json!("2"), json!(null)] {
            let mut raw = sample();
            raw["dictionary"]["emotional"]["max_score"] = bad;
            let err = EdacecSpec::load(&raw).unwrap_err();
            assert!(matches!(err, EdacecError::SpecLoad(ref m) if m.contains("max_score")));
        }
    }

    #[test]
    fn test_bad_keywords_rejected() {
        for bad in [json!("war"), json!(["war", 3]), json!(null)] {
            let mut raw = sample();
            raw["dictionary"]["agenda"]["keywords"] = bad;
            let err = EdacecSpec::load(&raw).unwrap_err();
            assert!(matches!(err, EdacecError::SpecLoad(ref m) if m.contains("keywords")));
        }
    }

    #[test]
    fn test_version_defaults_and_stringifies() {
        let mut raw = sample();
        raw.as_object_mut().unwrap().remove("version");
        assert_eq!(EdacecSpec::load(&raw).unwrap().version(), "unknown");

        raw["version"] = json!(1.08);
        assert_eq!(EdacecSpec::load(&raw).unwrap().version(), "1.08");
    }

    #[test]
    fn test_unknown_component_ignored() {
        let mut raw = sample();
        raw["dictionary"]["extra"] = json!({"max_score": 1, "keywords": ["x"]});
        let spec = EdacecSpec::load(&raw).unwrap();
        assert_eq!(spec.components().count(), 4);
    }

    #[test]
    fn test_from_json_str_parse_error() {
        let err = EdacecSpec::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, EdacecError::SpecLoad(ref m) if m.contains("JSON parse error")));
    }

    #[test]
    fn test_components_fixed_order() {
        let spec = EdacecSpec::load(&sample()).unwrap();
        let names: Vec<_> = spec.components().map(ComponentSpec::name).collect();
        assert_eq!(names, ComponentName::ALL.to_vec());
    }

    #[test]
    fn test_component_map_serializes_in_order() {
        let m = ComponentMap::from_fn(|c| c.as_str().len());
        let s = serde_json::to_string(&m).unwrap();
        assert_eq!(
            s,
            r#"{"structural":10,"emotional":9,"irreversibility":15,"agenda":6}"#
        );
    }
}
