//! Text rendering of a [`ClassModel`]
//!
//! Output layout follows the usual PHP code generator conventions: four
//! space indentation, properties before methods, a blank line after the
//! opening and before the closing brace of the class.

use super::{type_hint, ClassModel, DocBlock, MethodSpec, ParameterSpec, PropertySpec};
use std::fmt::Write;

const INDENT: &str = "    ";

/// Render a complete PHP file holding one class
pub fn render_file(class: &ClassModel) -> String {
    let mut out = String::from("<?php\n\n");

    if let Some(namespace) = &class.namespace {
        let _ = writeln!(out, "namespace {};\n", namespace);
    }

    if !class.uses.is_empty() {
        for import in &class.uses {
            match &import.alias {
                Some(alias) => {
                    let _ = writeln!(out, "use {} as {};", import.path, alias);
                }
                None => {
                    let _ = writeln!(out, "use {};", import.path);
                }
            }
        }
        out.push('\n');
    }

    if let Some(doc) = &class.doc {
        render_doc_block(&mut out, doc, "");
    }

    let _ = writeln!(out, "class {}\n{{", class.name);

    for property in &class.properties {
        out.push('\n');
        render_property(&mut out, property);
    }

    for method in &class.methods {
        out.push('\n');
        render_method(&mut out, method);
    }

    out.push_str("\n}\n");
    out
}

/// Render a doc comment at the given indentation
///
/// Blank separator lines keep the trailing space after `*`.
pub fn render_doc_block(out: &mut String, doc: &DocBlock, indent: &str) {
    let mut lines: Vec<String> = vec![doc.short_description.clone()];

    if !doc.long_description.is_empty() {
        lines.push(String::new());
        lines.extend(doc.long_description.iter().cloned());
    }

    if !doc.tags.is_empty() {
        lines.push(String::new());
        lines.extend(doc.tags.iter().map(|tag| tag.to_line()));
    }

    let _ = writeln!(out, "{}/**", indent);
    for line in lines {
        let _ = writeln!(out, "{} * {}", indent, line);
    }
    let _ = writeln!(out, "{} */", indent);
}

fn render_property(out: &mut String, property: &PropertySpec) {
    if let Some(doc) = &property.doc {
        render_doc_block(out, doc, INDENT);
    }
    let _ = writeln!(
        out,
        "{}{} ${};",
        INDENT,
        property.visibility.keyword(),
        property.name
    );
}

fn render_parameter(parameter: &ParameterSpec) -> String {
    let mut out = String::new();
    if let Some(ty) = &parameter.type_hint {
        out.push_str(&type_hint(ty));
        out.push(' ');
    }
    out.push('$');
    out.push_str(&parameter.name);
    if parameter.default_null {
        out.push_str(" = null");
    }
    out
}

/// Render the signature line of a method, e.g. `public function getName() : string`
pub fn render_signature(method: &MethodSpec) -> String {
    let parameters: Vec<String> = method.parameters.iter().map(render_parameter).collect();
    let mut signature = format!(
        "{} function {}({})",
        method.visibility.keyword(),
        method.name,
        parameters.join(", ")
    );
    if let Some(ty) = &method.return_type {
        let _ = write!(signature, " : {}", type_hint(ty));
    }
    signature
}

fn render_method(out: &mut String, method: &MethodSpec) {
    if let Some(doc) = &method.doc {
        render_doc_block(out, doc, INDENT);
    }

    let _ = writeln!(out, "{}{}", INDENT, render_signature(method));
    let _ = writeln!(out, "{}{{", INDENT);

    for line in method.body.trim().lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "{}{}{}", INDENT, INDENT, line);
        }
    }

    let _ = writeln!(out, "{}}}", INDENT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::php::{Tag, UseStatement, Visibility};

    fn getter() -> MethodSpec {
        MethodSpec {
            name: "getName".to_string(),
            visibility: Visibility::Public,
            parameters: vec![],
            return_type: Some("?string".to_string()),
            body: "return $this->name;".to_string(),
            doc: Some(DocBlock {
                short_description: "Gets the name.".to_string(),
                long_description: vec![],
                tags: vec![Tag::Return {
                    types: "string".to_string(),
                    description: Some("The name.".to_string()),
                }],
            }),
        }
    }

    #[test]
    fn test_render_signature() {
        assert_eq!(render_signature(&getter()), "public function getName() : ?string");

        let setter = MethodSpec {
            name: "setAuthor".to_string(),
            visibility: Visibility::Public,
            parameters: vec![ParameterSpec {
                name: "author".to_string(),
                type_hint: Some("App\\User".to_string()),
                default_null: true,
            }],
            return_type: None,
            body: String::new(),
            doc: None,
        };
        assert_eq!(
            render_signature(&setter),
            "public function setAuthor(\\App\\User $author = null)"
        );
    }

    #[test]
    fn test_render_doc_block_separates_sections() {
        let mut out = String::new();
        render_doc_block(&mut out, getter().doc.as_ref().unwrap(), INDENT);
        assert_eq!(
            out,
            "    /**\n     * Gets the name.\n     * \n     * @return string The name.\n     */\n"
        );
    }

    #[test]
    fn test_render_file_layout() {
        let class = ClassModel {
            namespace: Some("App\\Entity".to_string()),
            name: "Tag".to_string(),
            uses: vec![UseStatement {
                path: "Doctrine\\ORM\\Mapping".to_string(),
                alias: Some("ORM".to_string()),
            }],
            doc: Some(DocBlock::new("Represents a tag.")),
            properties: vec![PropertySpec {
                name: "name".to_string(),
                visibility: Visibility::Private,
                doc: None,
            }],
            methods: vec![getter()],
        };

        let text = render_file(&class);
        assert!(text.starts_with("<?php\n\nnamespace App\\Entity;\n\nuse Doctrine\\ORM\\Mapping as ORM;\n\n"));
        assert!(text.contains("/**\n * Represents a tag.\n */\nclass Tag\n{\n"));
        assert!(text.contains("    private $name;\n"));
        assert!(text.contains("    {\n        return $this->name;\n    }\n"));
        assert!(text.ends_with("\n}\n"));
    }

    #[test]
    fn test_body_blank_lines_are_not_indented() {
        let method = MethodSpec {
            body: "$this->name = $name;\n\nreturn $this;".to_string(),
            ..getter()
        };
        let mut out = String::new();
        render_method(&mut out, &method);
        assert!(out.contains("        $this->name = $name;\n\n        return $this;\n"));
    }
}
