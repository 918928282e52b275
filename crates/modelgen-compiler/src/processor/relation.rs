//! Relation accessor methods.

use super::Processor;
use crate::codegen::php_string;
use crate::config::Config;
use crate::diagnostic::Result;
use crate::ir::{Method, Model, Relation, VirtualProperty};
use crate::naming::{
    camel, default_foreign_column, default_join_table, pluralize, singularize, snake,
    strip_id_suffix, studly, ucfirst, DEFAULT_PRIMARY_KEY,
};
use crate::relations::classify;
use crate::schema::Schema;

/// Turns every classified relation into a method and a virtual property.
pub struct RelationProcessor<'a> {
    schema: &'a Schema,
}

impl<'a> RelationProcessor<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }
}

impl Processor for RelationProcessor<'_> {
    fn name(&self) -> &'static str {
        "relations"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn process(&self, model: &mut Model, _config: &mut Config) -> Result<()> {
        for relation in classify(self.schema, &model.table_name) {
            add_relation(model, &relation);
        }
        Ok(())
    }
}

fn add_relation(model: &mut Model, relation: &Relation) {
    let name = method_name(model, relation);
    let related_class = related_class_name(relation.related_table());
    let typ = if relation.is_many() {
        format!("{related_class}[]")
    } else {
        related_class
    };

    tracing::debug!(
        model = %model.class_name,
        method = %name,
        kind = relation.builder_method(),
        "relation added"
    );

    let doc = format!("@return {}", relation.orm_class());
    let body = method_body(model, relation);
    model.add_method(Method::new(name.as_str(), body).with_doc(&[doc.as_str()]));
    model.add_virtual_property(VirtualProperty {
        name,
        typ,
        nullable: false,
    });
}

/// Accessor method name for `relation` on `model`.
pub fn method_name(model: &Model, relation: &Relation) -> String {
    let table = relation.related_table();
    match relation {
        Relation::HasOne(_) => singularize(&camel(table)),
        Relation::HasMany(r) => {
            let name = pluralize(&camel(table));
            let own_key = format!("{}_id", snake(&model.class_name));
            if r.foreign_column == own_key {
                if model.method_names().contains(&name.as_str()) {
                    format!("HasMany{name}")
                } else {
                    name
                }
            } else {
                let qualified = format!(
                    "{}{}",
                    singularize(table),
                    pluralize(&ucfirst(strip_id_suffix(&r.foreign_column)))
                );
                pluralize(&camel(&qualified))
            }
        }
        Relation::BelongsTo(r) => {
            match resolve_argument(&r.foreign_column, &default_foreign_column(table)) {
                None => singularize(&camel(table)),
                Some(key) => singularize(&camel(strip_id_suffix(&key))),
            }
        }
        Relation::BelongsToMany(_) => pluralize(&camel(table)),
    }
}

fn related_class_name(table: &str) -> String {
    singularize(&studly(table))
}

fn method_body(model: &Model, relation: &Relation) -> String {
    let related = relation.related_table();
    let mut arguments = vec![Some(format!(
        "{}\\{}",
        model.namespace,
        related_class_name(related)
    ))];

    let mut suffix = String::new();
    match relation {
        Relation::BelongsToMany(r) => {
            let default_join = default_join_table(&model.table_name, related);
            arguments.push(resolve_argument(&r.join_table, &default_join));
            arguments.push(resolve_argument(
                &r.foreign_column,
                &default_foreign_column(&model.table_name),
            ));
            arguments.push(resolve_argument(
                &r.local_column,
                &default_foreign_column(related),
            ));
            if r.has_timestamps {
                suffix.push_str("->withTimestamps()");
            }
            if !r.extra_pivot_columns.is_empty() {
                let pivots: Vec<String> = r
                    .extra_pivot_columns
                    .iter()
                    .map(|c| php_string(c))
                    .collect();
                suffix.push_str(&format!("->withPivot({})", pivots.join(",")));
            }
        }
        Relation::HasMany(r) | Relation::HasOne(r) => {
            arguments.push(resolve_argument(
                &r.foreign_column,
                &default_foreign_column(&model.table_name),
            ));
            arguments.push(resolve_argument(&r.local_column, DEFAULT_PRIMARY_KEY));
        }
        Relation::BelongsTo(r) => {
            arguments.push(resolve_argument(
                &r.foreign_column,
                &default_foreign_column(related),
            ));
            arguments.push(resolve_argument(&r.local_column, DEFAULT_PRIMARY_KEY));
        }
    }

    format!(
        "return $this->{}({}){};",
        relation.builder_method(),
        prepare_arguments(&arguments),
        suffix
    )
}

/// `None` when `actual` matches the convention.
fn resolve_argument(actual: &str, default: &str) -> Option<String> {
    (actual != default).then(|| actual.to_string())
}

/// Renders call arguments: trailing `None`s are dropped, inner ones become
/// `null`, everything else is a PHP string literal.
pub fn prepare_arguments(arguments: &[Option<String>]) -> String {
    let used = arguments
        .iter()
        .rposition(Option::is_some)
        .map_or(0, |last| last + 1);

    arguments[..used]
        .iter()
        .map(|arg| match arg {
            Some(value) => php_string(value),
            None => "null".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
