use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single key/value tag pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A collection of tags with unique keys.
///
/// Key order is normalized on construction so that provider payloads built
/// from a tag set come out the same on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Build a tag set from a tag mapping, sorted by key.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let mut tags: Vec<Tag> = map
            .iter()
            .map(|(key, value)| Tag::new(key.clone(), value.clone()))
            .collect();
        tags.sort_by(|a, b| a.key.cmp(&b.key));
        Self { tags }
    }

    /// Build a tag set from key/value pairs; a repeated key keeps its first
    /// position and takes the last value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut tags: Vec<Tag> = Vec::new();
        for (key, value) in pairs {
            match tags.iter_mut().find(|tag| tag.key == key) {
                Some(tag) => tag.value = value,
                None => tags.push(Tag::new(key, value)),
            }
        }
        Self { tags }
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        self.tags
            .iter()
            .map(|tag| (tag.key.clone(), tag.value.clone()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_map_sorts_by_key() {
        let map = HashMap::from([
            ("Owner".to_string(), "platform".to_string()),
            ("Env".to_string(), "prd".to_string()),
        ]);

        let set = TagSet::from_map(&map);
        let keys: Vec<&str> = set.iter().map(|tag| tag.key.as_str()).collect();
        assert_eq!(keys, vec!["Env", "Owner"]);
    }

    #[test]
    fn test_from_pairs_last_write_wins() {
        let set = TagSet::from_pairs(vec![
            ("Owner".to_string(), "alice".to_string()),
            ("Env".to_string(), "dev".to_string()),
            ("Owner".to_string(), "bob".to_string()),
        ]);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("Owner"), Some("bob"));
        let keys: Vec<&str> = set.iter().map(|tag| tag.key.as_str()).collect();
        assert_eq!(keys, vec!["Owner", "Env"]);
    }

    #[test]
    fn test_round_trip_through_map() {
        let map = HashMap::from([
            ("A".to_string(), "1".to_string()),
            ("B".to_string(), "2".to_string()),
        ]);

        assert_eq!(TagSet::from_map(&map).to_map(), map);
    }

    #[test]
    fn test_get_missing_key() {
        let set = TagSet::new();
        assert!(set.is_empty());
        assert_eq!(set.get("Owner"), None);
    }
}
