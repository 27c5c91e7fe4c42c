//! Field members and entity-level methods
//!
//! Generates the constructor, `__toString()`, and for each field its
//! property, getter and (except for primary keys) fluent setter.

use super::annotation::field_annotations;
use super::{return_this, Context, MemberGroup};
use crate::descriptor::FieldDescriptor;
use crate::inflector::{humanize, ucfirst};
use crate::php::{DocBlock, MethodSpec, ParameterSpec, PropertySpec, Tag, Visibility};

/// `__construct()`, initializing every collection-backed association
pub fn constructor(ctx: &Context<'_>) -> MethodSpec {
    let body = ctx
        .entity
        .collections()
        .map(|association| {
            format!(
                "$this->{} = new {}();",
                association.name, ctx.options.collection_class
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    MethodSpec {
        name: "__construct".to_string(),
        visibility: Visibility::Public,
        parameters: Vec::new(),
        return_type: None,
        body,
        doc: Some(DocBlock::new(format!(
            "Creates a new {}.",
            humanize(&ctx.entity.short_name)
        ))),
    }
}

/// The expression `__toString()` casts to string
///
/// The first preferred field present wins; otherwise the short name joined
/// with the primary key, or the bare short name when there is no primary key.
pub fn to_string_expression(ctx: &Context<'_>) -> String {
    let entity = ctx.entity;

    if let Some(name) = ctx
        .options
        .to_string_fields
        .iter()
        .find(|name| entity.has_field(name))
    {
        return format!("$this->{}", name);
    }

    match entity.primary_key() {
        Some(pk) => format!("'{} #'.$this->{}", entity.short_name, pk.name),
        None => format!("'{}'", entity.short_name),
    }
}

/// `__toString() : string`
pub fn to_string_method(ctx: &Context<'_>) -> MethodSpec {
    MethodSpec {
        name: "__toString".to_string(),
        visibility: Visibility::Public,
        parameters: Vec::new(),
        return_type: Some("string".to_string()),
        body: format!("return (string) {};", to_string_expression(ctx)),
        doc: Some(DocBlock {
            short_description: format!(
                "Returns the string representation of the {}.",
                humanize(&ctx.entity.short_name)
            ),
            long_description: Vec::new(),
            tags: vec![Tag::Return {
                types: "string".to_string(),
                description: Some("The string representation.".to_string()),
            }],
        }),
    }
}

/// Property, getter and setter of one field
pub fn field_members(ctx: &Context<'_>, field: &FieldDescriptor) -> MemberGroup {
    let readable = humanize(&field.name);
    let ty = field.storage_type.host_type().to_string();

    let property = PropertySpec {
        name: field.name.clone(),
        visibility: Visibility::Private,
        doc: Some(DocBlock {
            short_description: format!("Contains the {}.", readable),
            long_description: field_annotations(ctx.entity, field, ctx.options),
            tags: vec![Tag::Var(ty.clone())],
        }),
    };

    let mut methods = vec![getter(ctx, field, &ty, &readable)];

    if !field.primary_key {
        methods.push(setter(ctx, field, &ty, &readable));
    }

    MemberGroup { property, methods }
}

fn getter(ctx: &Context<'_>, field: &FieldDescriptor, ty: &str, readable: &str) -> MethodSpec {
    let return_type = match (field.nullable, ctx.options.nullable_types) {
        (false, _) => Some(ty.to_string()),
        (true, true) => Some(format!("?{}", ty)),
        (true, false) => None,
    };

    MethodSpec {
        name: format!("get{}", ucfirst(&field.name)),
        visibility: Visibility::Public,
        parameters: Vec::new(),
        return_type,
        body: format!("return $this->{};", field.name),
        doc: Some(DocBlock {
            short_description: format!("Gets the {}.", readable),
            long_description: Vec::new(),
            tags: vec![Tag::Return {
                types: ty.to_string(),
                description: Some(format!("The {}.", readable)),
            }],
        }),
    }
}

fn setter(ctx: &Context<'_>, field: &FieldDescriptor, ty: &str, readable: &str) -> MethodSpec {
    let param_types = if field.nullable {
        format!("null|{}", ty)
    } else {
        ty.to_string()
    };

    MethodSpec {
        name: format!("set{}", ucfirst(&field.name)),
        visibility: Visibility::Public,
        parameters: vec![ParameterSpec {
            name: field.name.clone(),
            type_hint: Some(ty.to_string()),
            default_null: field.nullable,
        }],
        return_type: Some(ctx.entity.qualified_name.clone()),
        body: return_this(&format!("$this->{0} = ${0};", field.name)),
        doc: Some(DocBlock {
            short_description: format!("Sets the {}.", readable),
            long_description: Vec::new(),
            tags: vec![
                Tag::Param {
                    name: field.name.clone(),
                    types: param_types,
                    description: Some(format!("The {}.", readable)),
                },
                Tag::Return {
                    types: "self".to_string(),
                    description: None,
                },
            ],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{AssociationDescriptor, Cardinality, EntityDescriptor};
    use crate::inflector::EnglishInflector;
    use crate::options::GeneratorOptions;
    use crate::types::StorageType;

    fn with_context<R>(entity: &EntityDescriptor, f: impl FnOnce(&Context<'_>) -> R) -> R {
        let options = GeneratorOptions::default();
        let ctx = Context {
            entity,
            options: &options,
            inflector: &EnglishInflector,
        };
        f(&ctx)
    }

    #[test]
    fn test_constructor_initializes_collections_only() {
        let entity = EntityDescriptor::new("App\\Entity\\Post", "Post.php")
            .association(AssociationDescriptor::new("author", Cardinality::ManyToOne, "App\\User"))
            .association(AssociationDescriptor::new("tags", Cardinality::ManyToMany, "App\\Tag"));

        let method = with_context(&entity, constructor);
        assert_eq!(
            method.body,
            "$this->tags = new \\Doctrine\\Common\\Collections\\ArrayCollection();"
        );
        assert_eq!(method.doc.unwrap().short_description, "Creates a new post.");
    }

    #[test]
    fn test_to_string_prefers_listed_fields() {
        let entity = EntityDescriptor::new("Post", "Post.php")
            .field(FieldDescriptor::primary_key("id", StorageType::Integer))
            .field(FieldDescriptor::new("email", StorageType::String))
            .field(FieldDescriptor::new("title", StorageType::String));

        let method = with_context(&entity, to_string_method);
        assert_eq!(method.body, "return (string) $this->title;");
        assert_eq!(method.return_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_to_string_falls_back_to_primary_key() {
        let entity = EntityDescriptor::new("Post", "Post.php")
            .field(FieldDescriptor::primary_key("id", StorageType::Integer));
        assert_eq!(
            with_context(&entity, to_string_expression),
            "'Post #'.$this->id"
        );
    }

    #[test]
    fn test_to_string_falls_back_to_short_name() {
        let entity = EntityDescriptor::new("App\\Setting", "Setting.php")
            .field(FieldDescriptor::new("value", StorageType::Text));
        assert_eq!(with_context(&entity, to_string_expression), "'Setting'");
    }

    #[test]
    fn test_field_getter_and_setter() {
        let field = FieldDescriptor {
            nullable: true,
            ..FieldDescriptor::new("birthDate", StorageType::DateTime)
        };
        let entity = EntityDescriptor::new("App\\Entity\\Post", "Post.php").field(field.clone());

        let group = with_context(&entity, |ctx| field_members(ctx, &field));
        assert_eq!(group.method_names(), vec!["getBirthDate", "setBirthDate"]);

        let getter = &group.methods[0];
        assert_eq!(getter.return_type.as_deref(), Some("?\\DateTime"));

        let setter = &group.methods[1];
        assert_eq!(setter.return_type.as_deref(), Some("App\\Entity\\Post"));
        assert_eq!(setter.parameters[0].type_hint.as_deref(), Some("\\DateTime"));
        assert!(setter.parameters[0].default_null);
        assert_eq!(setter.body, "$this->birthDate = $birthDate;\n\nreturn $this;");

        let doc = group.property.doc.unwrap();
        assert_eq!(doc.short_description, "Contains the birth date.");
        assert_eq!(doc.tags, vec![Tag::Var("\\DateTime".to_string())]);
    }

    #[test]
    fn test_primary_key_has_no_setter() {
        let field = FieldDescriptor::primary_key("id", StorageType::Integer);
        let entity = EntityDescriptor::new("Post", "Post.php").field(field.clone());

        let group = with_context(&entity, |ctx| field_members(ctx, &field));
        assert_eq!(group.method_names(), vec!["getId"]);
        assert_eq!(group.methods[0].return_type.as_deref(), Some("int"));
    }

    #[test]
    fn test_nullable_getter_without_nullable_types() {
        let field = FieldDescriptor {
            nullable: true,
            ..FieldDescriptor::new("nickname", StorageType::String)
        };
        let entity = EntityDescriptor::new("User", "User.php").field(field.clone());
        let options = GeneratorOptions {
            nullable_types: false,
            ..Default::default()
        };
        let ctx = Context {
            entity: &entity,
            options: &options,
            inflector: &EnglishInflector,
        };

        let group = field_members(&ctx, &field);
        assert_eq!(group.methods[0].return_type, None);
    }
}
