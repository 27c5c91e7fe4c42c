//! Entity description providers
//!
//! The generator pulls entity descriptions from an [`EntityProvider`]. Slices
//! and vectors of descriptors are providers, and [`ManifestProvider`] loads
//! them from a TOML manifest.

use crate::descriptor::EntityDescriptor;
use crate::options::GeneratorOptions;
use crate::{GeneratorError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source of entity descriptions
pub trait EntityProvider {
    /// All entities to generate, in generation order
    fn entities(&self) -> Result<Vec<EntityDescriptor>>;
}

impl EntityProvider for [EntityDescriptor] {
    fn entities(&self) -> Result<Vec<EntityDescriptor>> {
        Ok(self.to_vec())
    }
}

impl EntityProvider for Vec<EntityDescriptor> {
    fn entities(&self) -> Result<Vec<EntityDescriptor>> {
        Ok(self.clone())
    }
}

/// On-disk manifest layout
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(default)]
    options: GeneratorOptions,
    #[serde(default, rename = "entity")]
    entities: Vec<EntityDescriptor>,
}

/// Entities and options loaded from a TOML manifest
///
/// ```toml
/// [options]
/// nullable_types = true
///
/// [[entity]]
/// qualified_name = "App\\Entity\\Post"
/// output_path = "Post.php"
///
/// [[entity.field]]
/// name = "id"
/// type = "integer"
/// primary_key = true
/// ```
#[derive(Debug, Clone)]
pub struct ManifestProvider {
    options: GeneratorOptions,
    entities: Vec<EntityDescriptor>,
}

impl ManifestProvider {
    /// Read and parse a manifest file
    ///
    /// Relative output paths are resolved against the manifest's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GeneratorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

        let provider = Self::parse(&text, base_dir).map_err(|err| match err {
            GeneratorError::InvalidManifest { message, .. } => GeneratorError::InvalidManifest {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        debug!(
            manifest = %path.display(),
            entities = provider.entities.len(),
            "loaded manifest"
        );
        Ok(provider)
    }

    /// Parse manifest text, resolving relative output paths against `base_dir`
    pub fn parse(text: &str, base_dir: &Path) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(text).map_err(|err| GeneratorError::InvalidManifest {
                path: PathBuf::new(),
                message: err.to_string(),
            })?;

        let entities = manifest
            .entities
            .into_iter()
            .map(|entity| normalize(entity, base_dir))
            .collect();

        Ok(ManifestProvider {
            options: manifest.options,
            entities,
        })
    }

    /// Options declared in the manifest, or the defaults
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }
}

impl EntityProvider for ManifestProvider {
    fn entities(&self) -> Result<Vec<EntityDescriptor>> {
        Ok(self.entities.clone())
    }
}

fn normalize(mut entity: EntityDescriptor, base_dir: &Path) -> EntityDescriptor {
    if entity.output_path.is_relative() {
        entity.output_path = base_dir.join(&entity.output_path);
    }
    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Cardinality;
    use crate::types::StorageType;

    const MANIFEST: &str = r#"
[options]
mapping_alias = "Mapping"

[[entity]]
qualified_name = "App\\Entity\\Post"
output_path = "Post.php"
translation_domain = "blog.post"

[[entity.field]]
name = "id"
type = "integer"
primary_key = true

[[entity.field]]
name = "price"
type = "decimal"
precision = 8
scale = 2
nullable = true

[[entity.field]]
name = "amount"
type = "App\\Money"

[[entity.association]]
name = "comments"
type = "OneToMany"
target_entity = "App\\Entity\\Comment"
mapped_by = "post"
"#;

    #[test]
    fn test_parse_manifest() {
        let provider = ManifestProvider::parse(MANIFEST, Path::new("out")).unwrap();
        assert_eq!(provider.options().mapping_alias, "Mapping");
        assert_eq!(provider.options().constraint_alias, "Assert");

        let entities = provider.entities().unwrap();
        assert_eq!(entities.len(), 1);

        let post = &entities[0];
        assert_eq!(post.short_name, "Post");
        assert_eq!(post.output_path, Path::new("out").join("Post.php"));
        assert_eq!(post.translation_domain(), "blog.post");
        assert_eq!(post.fields.len(), 3);
        assert!(post.fields[0].primary_key);
        assert_eq!(post.fields[1].precision, Some(8));
        assert!(post.fields[1].nullable);
        assert_eq!(
            post.fields[2].storage_type,
            StorageType::Custom("App\\Money".to_string())
        );
        assert_eq!(post.associations[0].cardinality, Cardinality::OneToMany);
        assert_eq!(post.associations[0].mapped_by.as_deref(), Some("post"));
    }

    #[test]
    fn test_absolute_output_path_is_kept() {
        let text = r#"
[[entity]]
qualified_name = "Tag"
output_path = "/tmp/Tag.php"
"#;
        let provider = ManifestProvider::parse(text, Path::new("ignored")).unwrap();
        let entities = provider.entities().unwrap();
        assert_eq!(entities[0].output_path, PathBuf::from("/tmp/Tag.php"));
    }

    #[test]
    fn test_unknown_cardinality_is_rejected() {
        let text = r#"
[[entity]]
qualified_name = "Post"
output_path = "Post.php"

[[entity.association]]
name = "tags"
type = "SomeToMany"
target_entity = "Tag"
"#;
        let err = ManifestProvider::parse(text, Path::new("")).unwrap_err();
        match err {
            GeneratorError::InvalidManifest { message, .. } => {
                assert!(message.contains("SomeToMany"), "message: {}", message)
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let text = "[options]\nphp_version = \"5.6\"\n";
        assert!(ManifestProvider::parse(text, Path::new("")).is_err());
    }

    #[test]
    fn test_slice_provider() {
        let entities = vec![EntityDescriptor::new("Post", "Post.php")];
        assert_eq!(entities.entities().unwrap().len(), 1);
        assert_eq!(entities.as_slice().entities().unwrap().len(), 1);
    }
}
