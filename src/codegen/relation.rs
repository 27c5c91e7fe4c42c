//! Association members
//!
//! Single-valued associations (OneToOne, ManyToOne) get a getter and a
//! nullable setter. Multi-valued associations (OneToMany, ManyToMany) are
//! backed by a collection and get a getter plus an add/remove pair named
//! after the singular of the association.
//!
//! On the inverse side of a bidirectional relation the add method first
//! updates the owning side.

use super::annotation::association_annotations;
use super::{return_this, Context, MemberGroup};
use crate::descriptor::{AssociationDescriptor, Cardinality};
use crate::inflector::{humanize, ucfirst};
use crate::php::{type_hint, DocBlock, MethodSpec, ParameterSpec, PropertySpec, Tag, Visibility};

/// Property and accessors of one association
pub fn association_members(ctx: &Context<'_>, association: &AssociationDescriptor) -> MemberGroup {
    let readable = humanize(&association.name);
    let target = type_hint(&association.target_entity);
    let ty = if association.is_multi_valued() {
        ctx.options.collection_class.clone()
    } else {
        target.clone()
    };

    let property = PropertySpec {
        name: association.name.clone(),
        visibility: Visibility::Private,
        doc: Some(DocBlock {
            short_description: format!("Contains the {}.", readable),
            long_description: association_annotations(association, ctx.options),
            tags: vec![Tag::Var(ty.clone())],
        }),
    };

    let mut methods = vec![getter(ctx, association, &ty, &readable)];

    if association.is_multi_valued() {
        let singular = ctx.inflector.singularize(&association.name);
        methods.push(add_method(ctx, association, &singular, &target));
        methods.push(remove_method(ctx, association, &singular, &target));
    } else {
        methods.push(setter(ctx, association, &target, &readable));
    }

    MemberGroup { property, methods }
}

fn getter(
    ctx: &Context<'_>,
    association: &AssociationDescriptor,
    ty: &str,
    readable: &str,
) -> MethodSpec {
    let return_type = if !ctx.options.nullable_types {
        None
    } else if association.is_multi_valued() {
        Some(ty.to_string())
    } else {
        Some(format!("?{}", ty))
    };

    MethodSpec {
        name: format!("get{}", ucfirst(&association.name)),
        visibility: Visibility::Public,
        parameters: Vec::new(),
        return_type,
        body: format!("return $this->{};", association.name),
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

fn setter(
    ctx: &Context<'_>,
    association: &AssociationDescriptor,
    target: &str,
    readable: &str,
) -> MethodSpec {
    MethodSpec {
        name: format!("set{}", ucfirst(&association.name)),
        visibility: Visibility::Public,
        parameters: vec![ParameterSpec {
            name: association.name.clone(),
            type_hint: Some(target.to_string()),
            default_null: true,
        }],
        return_type: Some(ctx.entity.qualified_name.clone()),
        body: return_this(&format!("$this->{0} = ${0};", association.name)),
        doc: Some(DocBlock {
            short_description: format!("Sets the {}.", readable),
            long_description: Vec::new(),
            tags: vec![
                Tag::Param {
                    name: association.name.clone(),
                    types: format!("null|{}", target),
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

/// The call keeping the owning side in sync, e.g. `$comment->setPost($this);`
///
/// Only the inverse side of a bidirectional collection needs one.
pub fn owning_side_sync(
    ctx: &Context<'_>,
    association: &AssociationDescriptor,
    singular: &str,
) -> Option<String> {
    if !association.is_bidirectional() || association.is_owning_side() {
        return None;
    }

    // OneToMany is mapped by a single-valued field, ManyToMany by a collection
    let mapped_by = association.mapped_by.as_deref()?;
    let method = match association.cardinality {
        Cardinality::OneToMany => format!("set{}", ucfirst(mapped_by)),
        Cardinality::ManyToMany => {
            format!("add{}", ucfirst(&ctx.inflector.singularize(mapped_by)))
        }
        Cardinality::OneToOne | Cardinality::ManyToOne => return None,
    };

    Some(format!("${}->{}($this);", singular, method))
}

/// Body of `add<Singular>()`
pub fn add_body(ctx: &Context<'_>, association: &AssociationDescriptor, singular: &str) -> String {
    let mut body = String::new();

    if let Some(sync) = owning_side_sync(ctx, association, singular) {
        body.push_str(&sync);
        body.push_str("\n\n");
    }

    body.push_str(&format!(
        "if (!$this->{0}->contains(${1})) {{\n    $this->{0}->add(${1});\n}}",
        association.name, singular
    ));

    return_this(&body)
}

fn add_method(
    ctx: &Context<'_>,
    association: &AssociationDescriptor,
    singular: &str,
    target: &str,
) -> MethodSpec {
    collection_method(
        ctx,
        format!("add{}", ucfirst(singular)),
        format!("Adds a {}.", humanize(singular)),
        singular,
        target,
        add_body(ctx, association, singular),
    )
}

fn remove_method(
    ctx: &Context<'_>,
    association: &AssociationDescriptor,
    singular: &str,
    target: &str,
) -> MethodSpec {
    collection_method(
        ctx,
        format!("remove{}", ucfirst(singular)),
        format!("Removes a {}.", humanize(singular)),
        singular,
        target,
        return_this(&format!(
            "$this->{}->removeElement(${});",
            association.name, singular
        )),
    )
}

fn collection_method(
    ctx: &Context<'_>,
    name: String,
    summary: String,
    singular: &str,
    target: &str,
    body: String,
) -> MethodSpec {
    MethodSpec {
        name,
        visibility: Visibility::Public,
        parameters: vec![ParameterSpec {
            name: singular.to_string(),
            type_hint: Some(target.to_string()),
            default_null: false,
        }],
        return_type: Some(ctx.entity.qualified_name.clone()),
        body,
        doc: Some(DocBlock {
            short_description: summary,
            long_description: Vec::new(),
            tags: vec![
                Tag::Param {
                    name: singular.to_string(),
                    types: target.to_string(),
                    description: Some(format!("The {}.", humanize(singular))),
                },
                Tag::Return {
                    types: "self".to_string(),
                    description: None,
                },
            ],
        }),
    }
}
