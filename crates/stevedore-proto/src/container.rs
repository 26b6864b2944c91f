//! Container snapshots and start specifications.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{ContainerId, ContainerStatus};
use crate::validation::{validate_env_key, validate_image, ValidationError};

/// Environment variables with insertion order preserved.
///
/// Duplicate keys are not permitted: inserting an existing key overwrites its
/// value in place, so display order is the order keys first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap(Vec<(String, String)>);

impl EnvMap {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a variable; the last write for a key wins.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Look up a variable by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the map holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for EnvMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct EnvMapVisitor;

impl<'de> Visitor<'de> for EnvMapVisitor {
    type Value = EnvMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of environment variable names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<EnvMap, A::Error> {
        let mut env = EnvMap::new();
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            env.insert(key, value);
        }
        Ok(env)
    }
}

impl<'de> Deserialize<'de> for EnvMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EnvMapVisitor)
    }
}

/// Read snapshot of a container as observed at one point in time.
///
/// Snapshots are owned by the remote service; the client never caches or
/// reconciles them across commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Container identifier.
    pub id: ContainerId,
    /// Image reference the container runs.
    pub image: String,
    /// Lifecycle state at observation time.
    pub status: ContainerStatus,
    /// Creation time in epoch milliseconds; 0 means unknown.
    pub created_at_ms: i64,
    /// Auto-termination deadline in seconds; 0 means none.
    pub auto_terminate_seconds: u64,
    /// Native container identity, once the runtime has assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_container_id: Option<String>,
    /// Failure cause, present only when status is `FAILED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Environment variables in insertion order.
    #[serde(default, skip_serializing_if = "EnvMap::is_empty")]
    pub env: EnvMap,
}

/// Start request payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContainerSpec {
    /// Image reference to run.
    pub image: String,
    /// Environment variables.
    #[serde(default, skip_serializing_if = "EnvMap::is_empty")]
    pub env: EnvMap,
    /// Auto-termination deadline in seconds; 0 means none.
    #[serde(default)]
    pub timeout_seconds: u64,
}

impl ContainerSpec {
    /// Create a new spec for the given image.
    #[must_use]
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            env: EnvMap::new(),
            timeout_seconds: 0,
        }
    }

    /// Add an environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key, value);
        self
    }

    /// Set the auto-termination deadline in seconds.
    #[must_use]
    pub const fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Validate the spec.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure: a malformed image reference or
    /// an invalid environment variable name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_image(&self.image)?;
        for (key, _) in self.env.iter() {
            validate_env_key(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_map_preserves_insertion_order() {
        let mut env = EnvMap::new();
        env.insert("ZEBRA", "1");
        env.insert("ALPHA", "2");
        env.insert("MIDDLE", "3");

        let keys: Vec<&str> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["ZEBRA", "ALPHA", "MIDDLE"]);
    }

    #[test]
    fn env_map_last_write_wins_in_place() {
        let mut env = EnvMap::new();
        env.insert("PORT", "8080");
        env.insert("HOST", "0.0.0.0");
        env.insert("PORT", "9090");

        assert_eq!(env.len(), 2);
        assert_eq!(env.get("PORT"), Some("9090"));
        let keys: Vec<&str> = env.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["PORT", "HOST"]);
    }

    #[test]
    fn env_map_serializes_as_ordered_object() {
        let mut env = EnvMap::new();
        env.insert("B", "2");
        env.insert("A", "1");

        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"{"B":"2","A":"1"}"#);
    }

    #[test]
    fn env_map_round_trips() {
        let mut env = EnvMap::new();
        env.insert("PORT", "8080");
        env.insert("MODE", "debug");

        let json = serde_json::to_string(&env).unwrap();
        let parsed: EnvMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, env);
    }

    #[test]
    fn spec_builder_collects_env_and_timeout() {
        let spec = ContainerSpec::new("nginx:latest")
            .with_env("PORT", "8080")
            .with_timeout_seconds(3600);

        assert_eq!(spec.image, "nginx:latest");
        assert_eq!(spec.env.get("PORT"), Some("8080"));
        assert_eq!(spec.timeout_seconds, 3600);
    }

    #[test]
    fn spec_validate_accepts_registry_image() {
        let spec = ContainerSpec::new("docker.io/library/nginx:latest").with_env("PORT", "8080");
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn spec_validate_rejects_empty_image() {
        let spec = ContainerSpec::new("");
        assert!(spec.validate().is_err());
    }

    #[test]
    fn spec_validate_rejects_bad_env_key() {
        let spec = ContainerSpec::new("nginx:latest").with_env("9BAD", "x");
        assert!(spec.validate().is_err());
    }

    #[test]
    fn container_info_omits_absent_optionals() {
        let info = ContainerInfo {
            id: ContainerId::new(),
            image: "nginx:latest".into(),
            status: ContainerStatus::Running,
            created_at_ms: 0,
            auto_terminate_seconds: 0,
            docker_container_id: None,
            error_message: None,
            env: EnvMap::new(),
        };

        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("docker_container_id"));
        assert!(!json.contains("error_message"));
        assert!(!json.contains("\"env\""));
    }

    #[test]
    fn container_info_round_trips_with_optionals() {
        let mut env = EnvMap::new();
        env.insert("PORT", "8080");
        let info = ContainerInfo {
            id: ContainerId::new(),
            image: "redis:7".into(),
            status: ContainerStatus::Failed,
            created_at_ms: 1_700_000_000_000,
            auto_terminate_seconds: 120,
            docker_container_id: Some("d0cker123".into()),
            error_message: Some("image pull failed".into()),
            env,
        };

        let json = serde_json::to_string(&info).unwrap();
        let parsed: ContainerInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, info);
    }
}
