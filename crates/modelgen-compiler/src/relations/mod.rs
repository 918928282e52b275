//! Relation inference.
//!
//! Walks the foreign key graph of a schema and classifies how a table reaches
//! its neighbours: outbound keys become `BelongsTo`, inbound keys become
//! `HasOne` or `HasMany`, and keys arriving through a junction table become a
//! single `BelongsToMany`.

mod pivot;

pub use pivot::{is_pivot_table, is_relation_table_name};

use tracing::debug;

use crate::ir::{DirectRelation, PivotRelation, Relation};
use crate::naming::is_translation_table;
use crate::schema::{ForeignKey, Schema, Table};

/// Classifies every relation of the logical table `table_name`.
///
/// Translation tables and unknown tables have no relations. Foreign keys that
/// span more than one column are skipped.
pub fn classify(schema: &Schema, table_name: &str) -> Vec<Relation> {
    if is_translation_table(table_name) {
        return Vec::new();
    }
    let physical = schema.prefixed(table_name);
    let Some(table) = schema.table(&physical) else {
        return Vec::new();
    };

    let mut relations = outbound(schema, table);
    relations.extend(inbound(schema, &physical));
    relations
}

/// Foreign keys declared on the table itself.
fn outbound(schema: &Schema, table: &Table) -> Vec<Relation> {
    table
        .foreign_keys
        .iter()
        .filter_map(|fk| {
            let (local, foreign) = single_column(fk)?;
            Some(Relation::BelongsTo(DirectRelation::new(
                schema.strip_prefix(&fk.foreign_table),
                local,
                foreign,
            )))
        })
        .collect()
}

/// Foreign keys on other tables that point at `physical`.
fn inbound(schema: &Schema, physical: &str) -> Vec<Relation> {
    let all_names = schema.table_names();
    let mut relations = Vec::new();

    for other in schema.tables.iter().filter(|t| t.name != physical) {
        for (position, fk) in other.foreign_keys.iter().enumerate() {
            if fk.foreign_table != physical {
                continue;
            }
            let Some((local, foreign)) = single_column(fk) else {
                continue;
            };

            if is_pivot_table(other, &all_names) {
                let second = &other.foreign_keys[if position == 0 { 1 } else { 0 }];
                let Some(second_local) = second.local_columns.first() else {
                    continue;
                };
                debug!(pivot = %other.name, target = %physical, "pivot table detected");
                relations.push(Relation::BelongsToMany(pivot_relation(
                    schema,
                    other,
                    local,
                    second,
                    second_local,
                )));
                // One many-to-many per pivot.
                break;
            }

            let related = schema.strip_prefix(&other.name);
            let relation = DirectRelation::new(related, local, foreign);
            if other.is_column_unique(local) {
                relations.push(Relation::HasOne(relation));
            } else {
                relations.push(Relation::HasMany(relation));
            }
        }
    }

    relations
}

fn pivot_relation(
    schema: &Schema,
    pivot: &Table,
    local: &str,
    second: &ForeignKey,
    second_local: &str,
) -> PivotRelation {
    const TIMESTAMPS: [&str; 2] = ["created_at", "updated_at"];

    let extra_pivot_columns = pivot
        .column_names()
        .filter(|c| !TIMESTAMPS.contains(c) && *c != local && *c != second_local)
        .map(str::to_string)
        .collect();

    PivotRelation {
        related_table: schema.strip_prefix(&second.foreign_table).to_string(),
        join_table: schema.strip_prefix(&pivot.name).to_string(),
        foreign_column: local.to_string(),
        local_column: second_local.to_string(),
        has_timestamps: pivot.has_timestamps(),
        extra_pivot_columns,
    }
}

/// Local and referenced column of a single-column foreign key.
fn single_column(fk: &ForeignKey) -> Option<(&str, &str)> {
    match (fk.local_columns.as_slice(), fk.foreign_columns.as_slice()) {
        ([local], [foreign]) => Some((local.as_str(), foreign.as_str())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    fn blog_schema() -> Schema {
        Schema::new(vec![
            Table::new("users").with_id().with_column(Column::new("name", "string")),
            Table::new("posts")
                .with_id()
                .with_column(Column::new("user_id", "integer"))
                .with_foreign_key(ForeignKey::new("user_id", "users", "id")),
            Table::new("profiles")
                .with_id()
                .with_column(Column::new("user_id", "integer"))
                .with_foreign_key(ForeignKey::new("user_id", "users", "id"))
                .with_unique_index(&["user_id"]),
            Table::new("tags").with_id().with_column(Column::new("label", "string")),
            Table::new("post_tag")
                .with_column(Column::new("post_id", "integer"))
                .with_column(Column::new("tag_id", "integer"))
                .with_foreign_key(ForeignKey::new("post_id", "posts", "id"))
                .with_foreign_key(ForeignKey::new("tag_id", "tags", "id")),
        ])
    }

    #[test]
    fn test_outbound_key_is_belongs_to() {
        let relations = classify(&blog_schema(), "posts");
        assert_eq!(
            relations[0],
            Relation::BelongsTo(DirectRelation::new("users", "user_id", "id"))
        );
    }

    #[test]
    fn test_inbound_keys_split_on_uniqueness() {
        let relations = classify(&blog_schema(), "users");
        assert_eq!(
            relations,
            vec![
                Relation::HasMany(DirectRelation::new("posts", "user_id", "id")),
                Relation::HasOne(DirectRelation::new("profiles", "user_id", "id")),
            ]
        );
    }

    #[test]
    fn test_shared_primary_key_is_has_one() {
        let schema = Schema::new(vec![
            Table::new("users").with_id(),
            Table::new("profiles")
                .with_column(Column::new("user_id", "integer"))
                .with_primary_key(&["user_id"])
                .with_foreign_key(ForeignKey::new("user_id", "users", "id")),
            Table::new("passports")
                .with_column(Column::new("user_code", "text"))
                .with_primary_key(&["user_code"])
                .with_foreign_key(ForeignKey::new("user_code", "users", "id")),
        ]);
        assert_eq!(
            classify(&schema, "users"),
            vec![
                Relation::HasOne(DirectRelation::new("profiles", "user_id", "id")),
                Relation::HasOne(DirectRelation::new("passports", "user_code", "id")),
            ]
        );
    }

    #[test]
    fn test_pivot_seen_from_both_sides() {
        let schema = blog_schema();

        let from_posts: Vec<_> = classify(&schema, "posts")
            .into_iter()
            .filter(|r| matches!(r, Relation::BelongsToMany(_)))
            .collect();
        assert_eq!(from_posts.len(), 1);
        let Relation::BelongsToMany(pivot) = &from_posts[0] else {
            unreachable!()
        };
        assert_eq!(pivot.related_table, "tags");
        assert_eq!(pivot.join_table, "post_tag");
        assert_eq!(pivot.foreign_column, "post_id");
        assert_eq!(pivot.local_column, "tag_id");
        assert!(!pivot.has_timestamps);
        assert!(pivot.extra_pivot_columns.is_empty());

        let from_tags = classify(&schema, "tags");
        assert_eq!(from_tags.len(), 1);
        assert_eq!(from_tags[0].related_table(), "posts");
    }

    #[test]
    fn test_wide_pivot_keeps_extra_columns_and_timestamps() {
        let schema = Schema::new(vec![
            Table::new("districts").with_id(),
            Table::new("contact_histories").with_id(),
            Table::new("district_contact_histories")
                .with_column(Column::new("district_id", "integer"))
                .with_column(Column::new("contact_history_id", "integer"))
                .with_column(Column::new("role", "string"))
                .with_column(Column::new("created_at", "datetime"))
                .with_column(Column::new("updated_at", "datetime"))
                .with_foreign_key(ForeignKey::new("district_id", "districts", "id"))
                .with_foreign_key(ForeignKey::new(
                    "contact_history_id",
                    "contact_histories",
                    "id",
                )),
        ]);

        let relations = classify(&schema, "districts");
        assert_eq!(relations.len(), 1);
        let Relation::BelongsToMany(pivot) = &relations[0] else {
            panic!("expected a many-to-many relation, got {:?}", relations[0]);
        };
        assert_eq!(pivot.related_table, "contact_histories");
        assert!(pivot.has_timestamps);
        assert_eq!(pivot.extra_pivot_columns, vec!["role".to_string()]);
    }

    #[test]
    fn test_wide_table_with_unrelated_name_is_not_a_pivot() {
        let schema = Schema::new(vec![
            Table::new("users").with_id(),
            Table::new("products").with_id(),
            Table::new("orders")
                .with_id()
                .with_column(Column::new("user_id", "integer"))
                .with_column(Column::new("product_id", "integer"))
                .with_foreign_key(ForeignKey::new("user_id", "users", "id"))
                .with_foreign_key(ForeignKey::new("product_id", "products", "id")),
        ]);

        let relations = classify(&schema, "users");
        assert_eq!(
            relations,
            vec![Relation::HasMany(DirectRelation::new("orders", "user_id", "id"))]
        );
    }

    #[test]
    fn test_composite_keys_are_skipped_from_both_sides() {
        let composite = ForeignKey {
            name: None,
            local_columns: vec!["order_id".to_string(), "line_no".to_string()],
            foreign_table: "order_lines".to_string(),
            foreign_columns: vec!["order_id".to_string(), "line_no".to_string()],
        };
        let schema = Schema::new(vec![
            Table::new("order_lines")
                .with_column(Column::new("order_id", "integer"))
                .with_column(Column::new("line_no", "integer"))
                .with_primary_key(&["order_id", "line_no"]),
            Table::new("shipments")
                .with_id()
                .with_column(Column::new("order_id", "integer"))
                .with_column(Column::new("line_no", "integer"))
                .with_foreign_key(composite),
        ]);

        assert!(classify(&schema, "shipments").is_empty());
        assert!(classify(&schema, "order_lines").is_empty());
    }

    #[test]
    fn test_self_reference_is_outbound_only() {
        let schema = Schema::new(vec![Table::new("categories")
            .with_id()
            .with_column(Column::new("parent_id", "integer").nullable())
            .with_foreign_key(ForeignKey::new("parent_id", "categories", "id"))]);

        assert_eq!(
            classify(&schema, "categories"),
            vec![Relation::BelongsTo(DirectRelation::new(
                "categories",
                "parent_id",
                "id"
            ))]
        );
    }

    #[test]
    fn test_prefix_is_stripped_from_related_tables() {
        let schema = Schema::new(vec![
            Table::new("app_users").with_id(),
            Table::new("app_posts")
                .with_id()
                .with_column(Column::new("user_id", "integer"))
                .with_foreign_key(ForeignKey::new("user_id", "app_users", "id")),
        ])
        .with_prefix("app_");

        assert_eq!(classify(&schema, "posts")[0].related_table(), "users");
        assert_eq!(classify(&schema, "users")[0].related_table(), "posts");
    }

    #[test]
    fn test_translation_tables_have_no_relations() {
        let schema = Schema::new(vec![
            Table::new("posts").with_id(),
            Table::new("post_translations")
                .with_id()
                .with_column(Column::new("post_id", "integer"))
                .with_foreign_key(ForeignKey::new("post_id", "posts", "id")),
        ]);
        assert!(classify(&schema, "post_translations").is_empty());
    }
}
