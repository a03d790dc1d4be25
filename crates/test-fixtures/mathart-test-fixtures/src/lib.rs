//! Shared JSON fixtures for the math-art crates' tests and benches.
//!
//! `fixtures/manifest.json` at the workspace root maps fixture names to files:
//! generator definitions (a schema plus current property values) and portable
//! snapshots, each tagged with the generator it belongs to.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    generators: HashMap<String, String>,
    snapshots: HashMap<String, SnapshotEntry>,
}

#[derive(Debug, Deserialize)]
struct SnapshotEntry {
    generator: String,
    path: String,
}

/// Generator fixture split into its two halves, left as raw JSON so callers
/// pick their own types.
#[derive(Debug, Deserialize)]
pub struct GeneratorFixture {
    pub schema: serde_json::Value,
    pub values: serde_json::Value,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod generators {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.generators.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.generators, "generator", name)?;
        read_to_string(rel)
    }

    pub fn load(name: &str) -> Result<GeneratorFixture> {
        let rel = lookup(&MANIFEST.generators, "generator", name)?;
        super::load_json(rel)
    }

    /// Just the schema object, serialized back to text.
    pub fn schema_json(name: &str) -> Result<String> {
        let fixture = load(name)?;
        serde_json::to_string(&fixture.schema).context("serialize schema fixture")
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.generators, "generator", name)?;
        Ok(resolve_path(rel))
    }
}

pub mod snapshots {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.snapshots.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.snapshots, "snapshot", name)?;
        read_to_string(&entry.path)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.snapshots, "snapshot", name)?;
        super::load_json(&entry.path)
    }

    /// Name of the generator fixture this snapshot was taken from.
    pub fn generator(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.snapshots, "snapshot", name)?;
        Ok(entry.generator.clone())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.snapshots, "snapshot", name)?;
        Ok(resolve_path(&entry.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_resolves() {
        for name in generators::keys() {
            let fixture = generators::load(&name).unwrap();
            assert!(fixture.schema.is_object(), "{name}");
            assert!(fixture.values.is_object(), "{name}");
        }
        for name in snapshots::keys() {
            let raw: serde_json::Value = snapshots::load(&name).unwrap();
            assert!(raw.get("properties").is_some(), "{name}");
            let generator = snapshots::generator(&name).unwrap();
            assert!(generators::path(&generator).unwrap().exists());
        }
        assert!(generators::json("nope").is_err());
    }
}
