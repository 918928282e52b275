//! Naming conventions shared by the processors and the emitter.
//!
//! These mirror the conventions the target ORM applies at runtime: when a
//! generated name equals what the convention would produce, the generated code
//! can omit it.

mod inflect;

use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

pub use inflect::{pluralize, singularize};

/// Primary key column name assumed by the ORM.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Suffix carried by translation tables.
pub const TRANSLATION_SUFFIX: &str = "_translations";

/// Converts a snake_case name to StudlyCase (`post_tag` -> `PostTag`).
pub fn studly(s: &str) -> String {
    s.to_pascal_case()
}

/// Converts a name to camelCase (`post_tag` -> `postTag`).
pub fn camel(s: &str) -> String {
    s.to_lower_camel_case()
}

/// Converts a StudlyCase or camelCase name to snake_case.
pub fn snake(s: &str) -> String {
    s.to_snake_case()
}

/// Upper-cases the first character.
pub fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Returns the last segment of a namespaced class name.
pub fn short_class_name(full_class_name: &str) -> &str {
    full_class_name
        .rsplit('\\')
        .next()
        .unwrap_or(full_class_name)
}

/// Table name the ORM derives from a class name (`PostTag` -> `post_tags`).
pub fn default_table_name(class_name: &str) -> String {
    pluralize(&snake(class_name))
}

/// Foreign key column the ORM derives from a table name (`users` -> `user_id`).
pub fn default_foreign_column(table: &str) -> String {
    format!("{}_{}", singularize(table), DEFAULT_PRIMARY_KEY)
}

/// Pivot table name the ORM derives for two tables (`tags`, `posts` -> `post_tag`).
pub fn default_join_table(table_one: &str, table_two: &str) -> String {
    let mut tables = [singularize(table_one), singularize(table_two)];
    tables.sort();
    tables.join("_")
}

/// Class name derived from a table name (`post_tags` -> `PostTag`).
pub fn default_class_name(table: &str) -> String {
    ucfirst(&camel(&singularize(table)))
}

/// Removes a trailing `_id` from a column name.
pub fn strip_id_suffix(column: &str) -> &str {
    column.strip_suffix("_id").unwrap_or(column)
}

/// Whether the table holds per-locale values for another table.
pub fn is_translation_table(table: &str) -> bool {
    table.ends_with(TRANSLATION_SUFFIX)
}

/// Name of the translation table belonging to `table` (`posts` -> `post_translations`).
pub fn translation_table_name(table: &str) -> String {
    format!("{}{}", singularize(table), TRANSLATION_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        assert_eq!(studly("post_tag"), "PostTag");
        assert_eq!(camel("post_tag"), "postTag");
        assert_eq!(snake("PostTag"), "post_tag");
        assert_eq!(ucfirst("postTag"), "PostTag");
        assert_eq!(ucfirst(""), "");
    }

    #[test]
    fn test_short_class_name() {
        assert_eq!(short_class_name("\\Illuminate\\Database\\Eloquent\\Model"), "Model");
        assert_eq!(short_class_name("BaseModel"), "BaseModel");
    }

    #[test]
    fn test_default_names() {
        assert_eq!(default_table_name("PostTag"), "post_tags");
        assert_eq!(default_table_name("Person"), "people");
        assert_eq!(default_foreign_column("users"), "user_id");
        assert_eq!(default_foreign_column("contact_histories"), "contact_history_id");
        assert_eq!(default_join_table("tags", "posts"), "post_tag");
        assert_eq!(default_join_table("posts", "tags"), "post_tag");
        assert_eq!(default_class_name("post_tags"), "PostTag");
        assert_eq!(default_class_name("categories"), "Category");
    }

    #[test]
    fn test_id_suffix_and_translations() {
        assert_eq!(strip_id_suffix("author_id"), "author");
        assert_eq!(strip_id_suffix("owner"), "owner");
        assert!(is_translation_table("post_translations"));
        assert!(!is_translation_table("posts"));
        assert_eq!(translation_table_name("posts"), "post_translations");
    }
}
