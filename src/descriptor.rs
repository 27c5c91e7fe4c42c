//! Entity descriptions consumed by the generator
//!
//! An [`EntityDescriptor`] is built by the caller (or loaded from a manifest
//! by a [`crate::provider::EntityProvider`]) and is read-only while a class is
//! generated.

use crate::types::StorageType;
use crate::GeneratorError;
use heck::ToSnakeCase;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One entity to generate
///
/// When deserialized without a `short_name`, it is taken from `qualified_name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "EntityEntry")]
pub struct EntityDescriptor {
    /// Unqualified class name, e.g. `Post`
    pub short_name: String,
    /// Fully qualified class name, e.g. `App\Entity\Post`
    pub qualified_name: String,
    /// File the generated class is written to
    pub output_path: PathBuf,
    /// Namespace for validation message keys; defaults to the snake_case short name
    pub translation_domain: Option<String>,
    /// Scalar fields, in output order
    pub fields: Vec<FieldDescriptor>,
    /// Relations to other entities, in output order
    pub associations: Vec<AssociationDescriptor>,
}

/// Serialized form of an [`EntityDescriptor`]
#[derive(Deserialize)]
struct EntityEntry {
    #[serde(default)]
    short_name: Option<String>,
    qualified_name: String,
    output_path: PathBuf,
    #[serde(default)]
    translation_domain: Option<String>,
    #[serde(default, rename = "field")]
    fields: Vec<FieldDescriptor>,
    #[serde(default, rename = "association")]
    associations: Vec<AssociationDescriptor>,
}

impl From<EntityEntry> for EntityDescriptor {
    fn from(entry: EntityEntry) -> Self {
        let short_name = entry
            .short_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| short_name_of(&entry.qualified_name).to_string());

        EntityDescriptor {
            short_name,
            qualified_name: entry.qualified_name,
            output_path: entry.output_path,
            translation_domain: entry.translation_domain,
            fields: entry.fields,
            associations: entry.associations,
        }
    }
}

impl EntityDescriptor {
    /// Create an entity with no members
    ///
    /// The short name is the last `\`-separated segment of `qualified_name`.
    pub fn new(qualified_name: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        let qualified_name = qualified_name.into();
        let short_name = short_name_of(&qualified_name).to_string();
        EntityDescriptor {
            short_name,
            qualified_name,
            output_path: output_path.into(),
            translation_domain: None,
            fields: Vec::new(),
            associations: Vec::new(),
        }
    }

    /// Append a field
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append an association
    pub fn association(mut self, association: AssociationDescriptor) -> Self {
        self.associations.push(association);
        self
    }

    /// Whether a field (not an association) with this name exists
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// The identity field, if the entity declares one
    pub fn primary_key(&self) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.primary_key)
    }

    /// Namespace part of the qualified name, `None` for a global class
    pub fn namespace(&self) -> Option<&str> {
        self.qualified_name
            .trim_start_matches('\\')
            .rsplit_once('\\')
            .map(|(namespace, _)| namespace)
    }

    /// Prefix of the validation message keys of this entity
    pub fn translation_domain(&self) -> String {
        match &self.translation_domain {
            Some(domain) => domain.clone(),
            None => self.short_name.to_snake_case(),
        }
    }

    /// Multi-valued associations, in declaration order
    pub fn collections(&self) -> impl Iterator<Item = &AssociationDescriptor> {
        self.associations.iter().filter(|a| a.is_multi_valued())
    }
}

/// Last segment of a `\`-separated class name
pub fn short_name_of(qualified_name: &str) -> &str {
    qualified_name
        .rsplit('\\')
        .next()
        .unwrap_or(qualified_name)
}

/// A scalar attribute of an entity
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldDescriptor {
    /// Property and column name
    pub name: String,
    /// Doctrine storage type
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    /// Column length, for `string` columns
    #[serde(default)]
    pub length: Option<u32>,
    /// Total digits, for `decimal` columns
    #[serde(default)]
    pub precision: Option<u32>,
    /// Digits after the decimal point, for `decimal` columns
    #[serde(default)]
    pub scale: Option<u32>,
    /// Whether the column accepts NULL
    #[serde(default)]
    pub nullable: bool,
    /// Whether the column carries a unique index
    #[serde(default)]
    pub unique: bool,
    /// Identity column; gets no setter and an auto-generation strategy
    #[serde(default)]
    pub primary_key: bool,
}

impl FieldDescriptor {
    /// A non-nullable, non-unique field
    pub fn new(name: impl Into<String>, storage_type: impl Into<StorageType>) -> Self {
        FieldDescriptor {
            name: name.into(),
            storage_type: storage_type.into(),
            length: None,
            precision: None,
            scale: None,
            nullable: false,
            unique: false,
            primary_key: false,
        }
    }

    /// An identity field
    pub fn primary_key(name: impl Into<String>, storage_type: impl Into<StorageType>) -> Self {
        FieldDescriptor {
            primary_key: true,
            ..FieldDescriptor::new(name, storage_type)
        }
    }
}

/// Association cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Cardinality {
    /// Single reference, unique on both sides
    OneToOne,
    /// Single reference, many of these point at one target
    ManyToOne,
    /// Collection on the inverse side of a ManyToOne
    OneToMany,
    /// Collection on both sides, via a join table
    ManyToMany,
}

impl Cardinality {
    /// The Doctrine annotation name, e.g. `ManyToOne`
    pub fn annotation_name(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "OneToOne",
            Cardinality::ManyToOne => "ManyToOne",
            Cardinality::OneToMany => "OneToMany",
            Cardinality::ManyToMany => "ManyToMany",
        }
    }

    /// OneToMany and ManyToMany are backed by a collection
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Cardinality::OneToMany | Cardinality::ManyToMany)
    }
}

impl FromStr for Cardinality {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(*c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "onetoone" => Ok(Cardinality::OneToOne),
            "manytoone" => Ok(Cardinality::ManyToOne),
            "onetomany" => Ok(Cardinality::OneToMany),
            "manytomany" => Ok(Cardinality::ManyToMany),
            _ => Err(GeneratorError::UnknownCardinality(s.to_string())),
        }
    }
}

impl TryFrom<String> for Cardinality {
    type Error = GeneratorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.annotation_name())
    }
}

/// A relation from one entity to another
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssociationDescriptor {
    /// Property name
    pub name: String,
    /// Relation kind
    #[serde(rename = "type")]
    pub cardinality: Cardinality,
    /// Fully qualified class name of the target entity
    pub target_entity: String,
    /// Owning-side property on the target; set when this side is the inverse side
    #[serde(default)]
    pub mapped_by: Option<String>,
    /// Inverse-side property on the target; set when this side owns the relation
    #[serde(default)]
    pub inversed_by: Option<String>,
}

impl AssociationDescriptor {
    /// A unidirectional association
    pub fn new(
        name: impl Into<String>,
        cardinality: Cardinality,
        target_entity: impl Into<String>,
    ) -> Self {
        AssociationDescriptor {
            name: name.into(),
            cardinality,
            target_entity: target_entity.into(),
            mapped_by: None,
            inversed_by: None,
        }
    }

    /// Mark this side as the inverse side, mapped by `field` on the target
    pub fn mapped_by(mut self, field: impl Into<String>) -> Self {
        self.mapped_by = Some(field.into());
        self
    }

    /// Mark this side as the owning side, inversed by `field` on the target
    pub fn inversed_by(mut self, field: impl Into<String>) -> Self {
        self.inversed_by = Some(field.into());
        self
    }

    /// True unless the relation is mapped by the target
    pub fn is_owning_side(&self) -> bool {
        self.mapped_by.is_none()
    }

    /// True when either side references the other
    pub fn is_bidirectional(&self) -> bool {
        self.mapped_by.is_some() || self.inversed_by.is_some()
    }

    /// True for OneToMany and ManyToMany
    pub fn is_multi_valued(&self) -> bool {
        self.cardinality.is_multi_valued()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_and_namespace() {
        let entity = EntityDescriptor::new("App\\Entity\\Blog\\Post", "Post.php");
        assert_eq!(entity.short_name, "Post");
        assert_eq!(entity.namespace(), Some("App\\Entity\\Blog"));

        let global = EntityDescriptor::new("Post", "Post.php");
        assert_eq!(global.short_name, "Post");
        assert_eq!(global.namespace(), None);
    }

    #[test]
    fn test_deserialized_entity_gets_short_name() {
        let entity: EntityDescriptor = toml::from_str(
            "qualified_name = 'App\\Entity\\Invoice'\noutput_path = 'Invoice.php'\n",
        )
        .unwrap();
        assert_eq!(entity.short_name, "Invoice");
        assert!(entity.fields.is_empty());

        let renamed: EntityDescriptor = toml::from_str(
            "short_name = 'Bill'\nqualified_name = 'App\\Entity\\Invoice'\noutput_path = 'Invoice.php'\n",
        )
        .unwrap();
        assert_eq!(renamed.short_name, "Bill");
    }

    #[test]
    fn test_translation_domain_default() {
        let mut entity = EntityDescriptor::new("App\\Entity\\BlogPost", "BlogPost.php");
        assert_eq!(entity.translation_domain(), "blog_post");

        entity.translation_domain = Some("app.blog".to_string());
        assert_eq!(entity.translation_domain(), "app.blog");
    }

    #[test]
    fn test_cardinality_parsing() {
        assert_eq!("ManyToOne".parse::<Cardinality>().unwrap(), Cardinality::ManyToOne);
        assert_eq!("one-to-many".parse::<Cardinality>().unwrap(), Cardinality::OneToMany);
        assert_eq!("many_to_many".parse::<Cardinality>().unwrap(), Cardinality::ManyToMany);

        let err = "ManyToSome".parse::<Cardinality>().unwrap_err();
        assert!(matches!(err, GeneratorError::UnknownCardinality(ref s) if s == "ManyToSome"));
    }

    #[test]
    fn test_association_sides() {
        let owning = AssociationDescriptor::new("createdBy", Cardinality::ManyToOne, "User")
            .inversed_by("posts");
        assert!(owning.is_owning_side());
        assert!(owning.is_bidirectional());
        assert!(!owning.is_multi_valued());

        let inverse = AssociationDescriptor::new("comments", Cardinality::OneToMany, "Comment")
            .mapped_by("post");
        assert!(!inverse.is_owning_side());
        assert!(inverse.is_bidirectional());
        assert!(inverse.is_multi_valued());

        let unidirectional = AssociationDescriptor::new("tags", Cardinality::ManyToMany, "Tag");
        assert!(unidirectional.is_owning_side());
        assert!(!unidirectional.is_bidirectional());
    }

    #[test]
    fn test_primary_key_lookup() {
        let entity = EntityDescriptor::new("Post", "Post.php")
            .field(FieldDescriptor::primary_key("id", StorageType::Integer))
            .field(FieldDescriptor::new("title", StorageType::String));
        assert_eq!(entity.primary_key().map(|f| f.name.as_str()), Some("id"));
        assert!(entity.has_field("title"));
        assert!(!entity.has_field("name"));
    }
}
