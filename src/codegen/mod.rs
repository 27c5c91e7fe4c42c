//! Code generation modules for entity classes
//!
//! This module contains the member-level generation logic: properties and
//! accessors for fields ([`member`]) and associations ([`relation`]), and the
//! mapping/validation annotations of their doc comments ([`annotation`]).

pub mod annotation;
pub mod member;
pub mod relation;

use crate::descriptor::EntityDescriptor;
use crate::inflector::Inflector;
use crate::options::GeneratorOptions;
use crate::php::{MethodSpec, PropertySpec};

/// Everything member generation needs to know about the current run
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Entity being generated
    pub entity: &'a EntityDescriptor,
    /// Generator options
    pub options: &'a GeneratorOptions,
    /// Inflector used for `add*`/`remove*` names
    pub inflector: &'a dyn Inflector,
}

/// A property and the accessors generated for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberGroup {
    /// The backing property
    pub property: PropertySpec,
    /// Getter first, then setter or add/remove
    pub methods: Vec<MethodSpec>,
}

impl MemberGroup {
    /// Names of the generated methods, in order
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }
}

/// Generate the member groups of all fields, then all associations
pub fn generate_members(ctx: &Context<'_>) -> Vec<MemberGroup> {
    let fields = ctx
        .entity
        .fields
        .iter()
        .map(|field| member::field_members(ctx, field));

    let associations = ctx
        .entity
        .associations
        .iter()
        .map(|association| relation::association_members(ctx, association));

    fields.chain(associations).collect()
}

/// The body shared by every mutator
pub(crate) fn return_this(statement: &str) -> String {
    format!("{}\n\nreturn $this;", statement)
}
