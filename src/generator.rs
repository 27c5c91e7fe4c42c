//! Entity class assembly
//!
//! Collects the members produced by [`crate::codegen`] into one
//! [`ClassModel`], renders it, tidies the text and writes it to the entity's
//! output path. Generation is not incremental: the target file is replaced.

use crate::codegen::{self, member, Context};
use crate::descriptor::EntityDescriptor;
use crate::inflector::{humanize, EnglishInflector, Inflector};
use crate::options::GeneratorOptions;
use crate::php::{self, ClassModel, DocBlock, UseStatement};
use crate::provider::EntityProvider;
use crate::{GeneratorError, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Generates one PHP class per entity description
pub struct EntityGenerator<I: Inflector = EnglishInflector> {
    options: GeneratorOptions,
    inflector: I,
}

impl EntityGenerator {
    /// A generator using the English inflector
    pub fn new(options: GeneratorOptions) -> Self {
        EntityGenerator::with_inflector(options, EnglishInflector)
    }
}

impl Default for EntityGenerator {
    fn default() -> Self {
        EntityGenerator::new(GeneratorOptions::default())
    }
}

impl<I: Inflector> EntityGenerator<I> {
    /// A generator using a custom inflector
    pub fn with_inflector(options: GeneratorOptions, inflector: I) -> Self {
        EntityGenerator { options, inflector }
    }

    /// The options this generator was built with
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Build the class model of an entity without rendering it
    pub fn build_class(&self, entity: &EntityDescriptor) -> ClassModel {
        let ctx = Context {
            entity,
            options: &self.options,
            inflector: &self.inflector,
        };

        let mut class = ClassModel {
            namespace: entity.namespace().map(str::to_string),
            name: entity.short_name.clone(),
            uses: vec![
                UseStatement {
                    path: self.options.mapping_namespace.clone(),
                    alias: Some(self.options.mapping_alias.clone()),
                },
                UseStatement {
                    path: self.options.constraint_namespace.clone(),
                    alias: Some(self.options.constraint_alias.clone()),
                },
            ],
            doc: Some(DocBlock::new(format!(
                "Represents a {}.",
                humanize(&entity.short_name)
            ))),
            properties: Vec::new(),
            methods: vec![member::constructor(&ctx), member::to_string_method(&ctx)],
        };

        for group in codegen::generate_members(&ctx) {
            debug!(
                entity = %entity.short_name,
                property = %group.property.name,
                methods = ?group.method_names(),
                "generated members"
            );
            class.properties.push(group.property);
            class.methods.extend(group.methods);
        }

        class
    }

    /// Render the final PHP source of an entity
    pub fn render(&self, entity: &EntityDescriptor) -> String {
        let class = self.build_class(entity);
        clean_up(&php::render_file(&class), entity)
    }

    /// Render an entity and write it to its output path, replacing any previous content
    pub fn generate(&self, entity: &EntityDescriptor) -> Result<PathBuf> {
        let code = self.render(entity);
        let path = entity.output_path.clone();

        fs::write(&path, code).map_err(|source| GeneratorError::Io {
            path: path.clone(),
            source,
        })?;

        info!(entity = %entity.qualified_name, path = %path.display(), "wrote entity class");
        Ok(path)
    }

    /// Generate every entity a provider yields, stopping at the first error
    pub fn generate_all<P: EntityProvider + ?Sized>(&self, provider: &P) -> Result<Vec<PathBuf>> {
        provider
            .entities()?
            .iter()
            .map(|entity| self.generate(entity))
            .collect()
    }
}

/// Cosmetic pass over rendered code
///
/// Drops the trailing space of empty doc comment lines and shortens return
/// types naming the entity itself to its short name.
pub fn clean_up(code: &str, entity: &EntityDescriptor) -> String {
    let self_reference = format!(" : {}", php::type_hint(&entity.qualified_name));
    let short_reference = format!(" : {}", entity.short_name);

    code.replace("     * \n", "     *\n")
        .replace(&self_reference, &short_reference)
}
