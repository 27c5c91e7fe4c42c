//! PHP class model and renderer
//!
//! The generator describes a class as plain data ([`ClassModel`] and the
//! member specs it owns) and hands it to [`render::render_file`], which turns
//! it into source text. Members are built once and never mutated after they
//! are added to the class.

pub mod render;

pub use render::render_file;

/// PHP types that are never namespace-qualified
const BUILTIN_TYPES: &[&str] = &[
    "array", "bool", "callable", "float", "int", "iterable", "mixed", "object", "self", "static",
    "string", "void",
];

/// Normalize a type hint: builtin types as-is, class names with a leading `\`
///
/// A leading `?` is preserved.
pub fn type_hint(ty: &str) -> String {
    let (nullable, bare) = match ty.strip_prefix('?') {
        Some(rest) => ("?", rest),
        None => ("", ty),
    };

    let lowered = bare.to_lowercase();
    if bare.starts_with('\\') || BUILTIN_TYPES.iter().any(|b| *b == lowered) {
        format!("{}{}", nullable, bare)
    } else {
        format!("{}\\{}", nullable, bare)
    }
}

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// `public`
    #[default]
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
}

impl Visibility {
    /// The PHP keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// A doc block tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// `@var <type>`
    Var(String),
    /// `@param <types> $<name> [<description>]`
    Param {
        /// Variable name without `$`
        name: String,
        /// Type list, e.g. `null|string`
        types: String,
        /// Optional trailing description
        description: Option<String>,
    },
    /// `@return <types> [<description>]`
    Return {
        /// Type list
        types: String,
        /// Optional trailing description
        description: Option<String>,
    },
}

impl Tag {
    /// Render the tag without the leading ` * `
    pub fn to_line(&self) -> String {
        let (head, description) = match self {
            Tag::Var(ty) => (format!("@var {}", ty), None),
            Tag::Param {
                name,
                types,
                description,
            } => (format!("@param {} ${}", types, name), description.as_deref()),
            Tag::Return { types, description } => {
                (format!("@return {}", types), description.as_deref())
            }
        };

        match description {
            Some(description) => format!("{} {}", head, description),
            None => head,
        }
    }
}

/// A `/** ... */` comment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocBlock {
    /// First sentence
    pub short_description: String,
    /// Free text rendered after a blank line, one entry per line
    pub long_description: Vec<String>,
    /// Tags rendered last, after a blank line
    pub tags: Vec<Tag>,
}

impl DocBlock {
    /// A doc block with only a short description
    pub fn new(short_description: impl Into<String>) -> Self {
        DocBlock {
            short_description: short_description.into(),
            ..Default::default()
        }
    }
}

/// A `use <path> [as <alias>];` import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseStatement {
    /// Imported namespace or class
    pub path: String,
    /// Local alias
    pub alias: Option<String>,
}

/// A class property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    /// Name without `$`
    pub name: String,
    /// Visibility
    pub visibility: Visibility,
    /// Doc comment
    pub doc: Option<DocBlock>,
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Name without `$`
    pub name: String,
    /// Type hint, normalized with [`type_hint`] on render
    pub type_hint: Option<String>,
    /// Render `= null` after the parameter
    pub default_null: bool,
}

/// A class method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    /// Method name
    pub name: String,
    /// Visibility
    pub visibility: Visibility,
    /// Parameters, in order
    pub parameters: Vec<ParameterSpec>,
    /// Declared return type, normalized with [`type_hint`] on render
    pub return_type: Option<String>,
    /// Body without indentation; lines separated by `\n`
    pub body: String,
    /// Doc comment
    pub doc: Option<DocBlock>,
}

/// A whole class, ready to render
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassModel {
    /// Namespace declaration
    pub namespace: Option<String>,
    /// Class name
    pub name: String,
    /// Imports, in order
    pub uses: Vec<UseStatement>,
    /// Class doc comment
    pub doc: Option<DocBlock>,
    /// Properties, in order
    pub properties: Vec<PropertySpec>,
    /// Methods, in order
    pub methods: Vec<MethodSpec>,
}

impl ClassModel {
    /// Find a method by name
    pub fn method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Find a property by name
    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_hint() {
        assert_eq!(type_hint("string"), "string");
        assert_eq!(type_hint("?int"), "?int");
        assert_eq!(type_hint("\\DateTime"), "\\DateTime");
        assert_eq!(type_hint("App\\Entity\\User"), "\\App\\Entity\\User");
        assert_eq!(type_hint("?App\\Entity\\User"), "?\\App\\Entity\\User");
    }

    #[test]
    fn test_tag_lines() {
        assert_eq!(Tag::Var("string".into()).to_line(), "@var string");
        assert_eq!(
            Tag::Param {
                name: "birthDate".into(),
                types: "null|\\DateTime".into(),
                description: Some("The birth date.".into()),
            }
            .to_line(),
            "@param null|\\DateTime $birthDate The birth date."
        );
        assert_eq!(
            Tag::Return {
                types: "self".into(),
                description: None,
            }
            .to_line(),
            "@return self"
        );
    }
}
