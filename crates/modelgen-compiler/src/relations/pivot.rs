//! Junction table detection.

use crate::naming::singularize;
use crate::schema::Table;

/// Whether `table` links the target table to exactly one other table.
///
/// A table with two foreign keys is a pivot when it holds nothing but the two
/// key columns, or when it carries extra columns and its name reads like a
/// junction of two other tables.
pub fn is_pivot_table(table: &Table, all_table_names: &[&str]) -> bool {
    if table.foreign_keys.len() != 2 {
        return false;
    }
    match table.columns.len() {
        2 => true,
        n if n > 2 => is_relation_table_name(&table.name, all_table_names),
        _ => false,
    }
}

/// Whether `name` embeds the singular names of two lexically unrelated tables.
///
/// `district_contact_histories` qualifies when `districts` and
/// `contact_histories` both exist: their singular forms appear in the name (or
/// in its singular form) and share no `_` separated token.
pub fn is_relation_table_name(name: &str, all_table_names: &[&str]) -> bool {
    let own_singular = singularize(name);

    let contained: Vec<String> = all_table_names
        .iter()
        .map(|t| singularize(t))
        .filter(|singular| !singular.is_empty())
        .filter(|singular| *singular != own_singular)
        .filter(|singular| name.contains(singular.as_str()) || own_singular.contains(singular.as_str()))
        .collect();

    if contained.len() < 2 {
        return false;
    }

    let first: Vec<&str> = contained[0].split('_').collect();
    let second: Vec<&str> = contained[1].split('_').collect();
    !first.iter().any(|token| second.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, ForeignKey};

    #[test]
    fn test_relation_table_name_with_two_unrelated_tables() {
        let names = ["districts", "contact_histories", "district_contact_histories"];
        assert!(is_relation_table_name("district_contact_histories", &names));
    }

    #[test]
    fn test_relation_table_name_needs_two_matches() {
        let names = ["districts", "district_notes"];
        assert!(!is_relation_table_name("district_notes", &names));
    }

    #[test]
    fn test_relation_table_name_rejects_shared_tokens() {
        let names = ["contacts", "contact_histories", "contact_contact_histories"];
        assert!(!is_relation_table_name("contact_contact_histories", &names));
    }

    #[test]
    fn test_own_singular_is_not_a_match() {
        let names = ["post_tags", "posts"];
        assert!(!is_relation_table_name("post_tags", &names));
    }

    #[test]
    fn test_two_column_table_with_two_keys_is_pivot() {
        let table = Table::new("post_tag")
            .with_column(Column::new("post_id", "integer"))
            .with_column(Column::new("tag_id", "integer"))
            .with_foreign_key(ForeignKey::new("post_id", "posts", "id"))
            .with_foreign_key(ForeignKey::new("tag_id", "tags", "id"));
        assert!(is_pivot_table(&table, &["posts", "tags", "post_tag"]));
    }

    #[test]
    fn test_wide_table_needs_relation_name() {
        let table = Table::new("orders")
            .with_id()
            .with_column(Column::new("user_id", "integer"))
            .with_column(Column::new("product_id", "integer"))
            .with_foreign_key(ForeignKey::new("user_id", "users", "id"))
            .with_foreign_key(ForeignKey::new("product_id", "products", "id"));
        assert!(!is_pivot_table(&table, &["users", "products", "orders"]));

        let mut renamed = table.clone();
        renamed.name = "product_users".to_string();
        assert!(is_pivot_table(&renamed, &["users", "products", "product_users"]));
    }
}
