use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named place with one display name per language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Bare id, without any storage prefix.
    pub id: String,
    pub name: BTreeMap<String, String>,
}

impl Location {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), name: BTreeMap::new() }
    }

    pub fn with_name(mut self, lang: impl Into<String>, name: impl Into<String>) -> Self {
        self.name.insert(lang.into(), name.into());
        self
    }

    /// Display name in exactly `lang`, if one is recorded.
    pub fn get_name(&self, lang: &str) -> Option<&str> {
        self.name.get(lang).map(String::as_str)
    }
}

/// Loose pointer to a location as found on other documents.
///
/// Either side may be missing; empty strings count as missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl LocationRef {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()), name: None }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self { id: None, name: Some(name.into()) }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|s| !s.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_name_is_exact_per_language() {
        let loc = Location::new("mayapur").with_name("en", "Mayapur").with_name("ru", "Маяпур");
        assert_eq!(loc.get_name("ru"), Some("Маяпур"));
        assert_eq!(loc.get_name("de"), None);
    }

    #[test]
    fn empty_ref_fields_are_absent() {
        let r = LocationRef { id: Some(String::new()), name: Some("Vrindavan".into()) };
        assert_eq!(r.id(), None);
        assert_eq!(r.name(), Some("Vrindavan"));
    }
}
