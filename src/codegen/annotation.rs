//! Annotation generation for entity properties
//!
//! This module generates the `@Assert\...` validation annotations and the
//! `@ORM\...` mapping annotations placed in property doc comments. Validation
//! lines come first, separated from the mapping lines by one blank line.

use crate::descriptor::{AssociationDescriptor, EntityDescriptor, FieldDescriptor};
use crate::options::GeneratorOptions;
use heck::ToSnakeCase;

/// Doctrine's default length for `string` columns
const DEFAULT_LENGTH: u32 = 255;

/// Doctrine's default precision for `decimal` columns
const DEFAULT_PRECISION: u32 = 10;

/// Doctrine's default scale for `decimal` columns
const DEFAULT_SCALE: u32 = 0;

/// All annotation lines of a field property
pub fn field_annotations(
    entity: &EntityDescriptor,
    field: &FieldDescriptor,
    options: &GeneratorOptions,
) -> Vec<String> {
    let mut lines = validation_annotations(entity, field, options);
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.extend(column_annotations(field, options));
    lines
}

/// The `@Assert\Type` block of a field; primary keys get none
pub fn validation_annotations(
    entity: &EntityDescriptor,
    field: &FieldDescriptor,
    options: &GeneratorOptions,
) -> Vec<String> {
    if field.primary_key {
        return Vec::new();
    }

    vec![
        format!("@{}\\Type(", options.constraint_alias),
        format!("    type=\"{}\",", field.storage_type.name()),
        format!("    message=\"{}\"", message_key(entity, field)),
        ")".to_string(),
    ]
}

/// Translation key of the type constraint message
///
/// `<translation domain>.<field in snake_case>.constraint.type`. The field
/// name is snake_cased rather than used as declared, so `birthDate` gives
/// `post.birth_date.constraint.type`, matching the snake_case domain.
pub fn message_key(entity: &EntityDescriptor, field: &FieldDescriptor) -> String {
    format!(
        "{}.{}.constraint.type",
        entity.translation_domain(),
        field.name.to_snake_case()
    )
}

/// The `@ORM\Column` line, plus `@ORM\Id` and `@ORM\GeneratedValue` for primary keys
pub fn column_annotations(field: &FieldDescriptor, options: &GeneratorOptions) -> Vec<String> {
    let mut column = vec![
        format!("name=\"{}\"", field.name),
        format!("type=\"{}\"", field.storage_type.name()),
        format!("nullable={}", field.nullable),
        format!("unique={}", field.unique),
    ];

    if field.storage_type.has_length() {
        column.push(format!("length={}", field.length.unwrap_or(DEFAULT_LENGTH)));
    }

    if field.storage_type.has_precision() {
        column.push(format!(
            "precision={}",
            field.precision.unwrap_or(DEFAULT_PRECISION)
        ));
        column.push(format!("scale={}", field.scale.unwrap_or(DEFAULT_SCALE)));
    }

    let mut lines = vec![format!("Column({})", column.join(", "))];

    if field.primary_key {
        lines.push("Id".to_string());
        lines.push("GeneratedValue(strategy=\"AUTO\")".to_string());
    }

    lines
        .into_iter()
        .map(|line| format!("@{}\\{}", options.mapping_alias, line))
        .collect()
}

/// The relation annotation of an association, e.g. `@ORM\ManyToOne(targetEntity="User", inversedBy="posts")`
pub fn association_annotations(
    association: &AssociationDescriptor,
    options: &GeneratorOptions,
) -> Vec<String> {
    let mut attributes = vec![format!("targetEntity=\"{}\"", association.target_entity)];

    if let Some(mapped_by) = &association.mapped_by {
        attributes.push(format!("mappedBy=\"{}\"", mapped_by));
    }

    if let Some(inversed_by) = &association.inversed_by {
        attributes.push(format!("inversedBy=\"{}\"", inversed_by));
    }

    vec![format!(
        "@{}\\{}({})",
        options.mapping_alias,
        association.cardinality.annotation_name(),
        attributes.join(", ")
    )]
}
