//! doctrine-entity-gen library
//!
//! This crate provides the code generation logic for turning abstract entity
//! descriptions into Doctrine entity classes written in PHP.

#![deny(missing_docs)]
#![deny(warnings)]

pub mod codegen;
pub mod descriptor;
pub mod generator;
pub mod inflector;
pub mod logging;
pub mod options;
pub mod php;
pub mod provider;
pub mod types;

use std::path::PathBuf;
use thiserror::Error;

pub use descriptor::{AssociationDescriptor, Cardinality, EntityDescriptor, FieldDescriptor};
pub use generator::EntityGenerator;
pub use options::GeneratorOptions;
pub use types::StorageType;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Association cardinality outside OneToOne, ManyToOne, OneToMany, ManyToMany
    #[error("Unknown association type: {0}")]
    UnknownCardinality(String),

    /// Invalid generator configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An entity manifest could not be parsed
    #[error("Invalid manifest {}: {message}", .path.display())]
    InvalidManifest {
        /// Manifest that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Reading a manifest or writing a generated file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Render the PHP source of one entity with default options
///
/// Nothing is written to disk; see [`EntityGenerator::generate`] for that.
pub fn render(entity: &EntityDescriptor) -> String {
    EntityGenerator::new(GeneratorOptions::default()).render(entity)
}

/// Generate one entity with default options and write it to its output path
pub fn generate(entity: &EntityDescriptor) -> Result<PathBuf> {
    EntityGenerator::new(GeneratorOptions::default()).generate(entity)
}
