//! English inflection for table and class names.
//!
//! Only the trailing word of a snake_case or camelCase name is inflected, so
//! `district_contact_histories` singularizes to `district_contact_history` and
//! `postTag` pluralizes to `postTags`.

/// Words that are identical in singular and plural form.
const UNCOUNTABLE: &[&str] = &[
    "audio",
    "cattle",
    "data",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "furniture",
    "hardware",
    "information",
    "knowledge",
    "metadata",
    "money",
    "news",
    "police",
    "rice",
    "series",
    "sheep",
    "software",
    "species",
    "staff",
    "traffic",
];

/// (singular, plural) pairs that do not follow the suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("cookie", "cookies"),
    ("criterion", "criteria"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("movie", "movies"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("valve", "valves"),
    ("woman", "women"),
    ("zombie", "zombies"),
];

/// Singular words ending in `s` that pluralize with `es`.
const SIBILANT_S: &[&str] = &[
    "alias", "atlas", "bonus", "bus", "campus", "canvas", "census", "gas", "status", "virus",
];

/// Returns the plural form of `word`.
pub fn pluralize(word: &str) -> String {
    let (head, last) = split_last_word(word);
    if last.is_empty() {
        return word.to_string();
    }
    let lower = last.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return format!("{}{}", head, match_case(plural, last));
    }
    if IRREGULAR.iter().any(|(_, plural)| *plural == lower) {
        return word.to_string();
    }

    let inflected = if SIBILANT_S.iter().any(|w| lower.ends_with(w)) {
        format!("{}es", last)
    } else if let Some(stem) = last.strip_suffix("sis") {
        format!("{}ses", stem)
    } else if ["ss", "sh", "ch", "x"].iter().any(|s| lower.ends_with(s)) {
        format!("{}es", last)
    } else if lower.ends_with('s') {
        // Already plural.
        last.to_string()
    } else if lower.ends_with('y') && !ends_with_vowel_before(&lower, 1) {
        format!("{}ies", &last[..last.len() - 1])
    } else if lower.ends_with("fe") && !lower.ends_with("ffe") {
        format!("{}ves", &last[..last.len() - 2])
    } else if lower.ends_with("lf") {
        format!("{}ves", &last[..last.len() - 1])
    } else {
        format!("{}s", last)
    };

    format!("{}{}", head, inflected)
}

/// Returns the singular form of `word`.
pub fn singularize(word: &str) -> String {
    let (head, last) = split_last_word(word);
    if last.is_empty() {
        return word.to_string();
    }
    let lower = last.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == lower) {
        return format!("{}{}", head, match_case(singular, last));
    }
    if IRREGULAR.iter().any(|(singular, _)| *singular == lower) {
        return word.to_string();
    }
    if SIBILANT_S.iter().any(|w| lower.ends_with(w)) {
        return word.to_string();
    }

    let inflected = if SIBILANT_S.iter().any(|w| lower.ends_with(&format!("{}es", w))) {
        last[..last.len() - 2].to_string()
    } else if lower.ends_with("ss") || lower.ends_with("is") {
        last.to_string()
    } else if let Some(stem) = last.strip_suffix("yses") {
        format!("{}ysis", stem)
    } else if lower.ends_with("ies") && last.len() > 3 && !ends_with_vowel_before(&lower, 3) {
        format!("{}y", &last[..last.len() - 3])
    } else if ["sses", "shes", "ches", "xes"].iter().any(|s| lower.ends_with(s)) {
        last[..last.len() - 2].to_string()
    } else if lower.ends_with("lves") {
        format!("{}f", &last[..last.len() - 3])
    } else if lower.ends_with("ives") && !lower.ends_with("tives") && !lower.ends_with("hives") {
        format!("{}fe", &last[..last.len() - 3])
    } else if lower.ends_with("oes") && !lower.ends_with("shoes") && !lower.ends_with("toes") {
        last[..last.len() - 2].to_string()
    } else if let Some(stem) = last.strip_suffix('s') {
        stem.to_string()
    } else {
        last.to_string()
    };

    format!("{}{}", head, inflected)
}

/// Splits a name into everything before its trailing word and the trailing word.
fn split_last_word(word: &str) -> (&str, &str) {
    let mut boundary = 0;
    for (i, c) in word.char_indices() {
        if c == '_' {
            boundary = i + 1;
        } else if c.is_uppercase() && i > 0 {
            boundary = i;
        }
    }
    word.split_at(boundary)
}

/// Whether the character `offset` positions from the end is preceded by a vowel.
fn ends_with_vowel_before(lower: &str, offset: usize) -> bool {
    let chars: Vec<char> = lower.chars().collect();
    if chars.len() <= offset {
        return false;
    }
    matches!(chars[chars.len() - offset - 1], 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Copies the capitalisation of `original`'s first letter onto `replacement`.
fn match_case(replacement: &str, original: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        super::ucfirst(replacement)
    } else {
        replacement.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize_regular() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("post_tag"), "post_tags");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("match"), "matches");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("shelf"), "shelves");
    }

    #[test]
    fn test_pluralize_keeps_plural_words() {
        assert_eq!(pluralize("posts"), "posts");
        assert_eq!(pluralize("contact_histories"), "contact_histories");
        assert_eq!(pluralize("people"), "people");
    }

    #[test]
    fn test_pluralize_irregular_and_uncountable() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("sales_person"), "sales_people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("equipment"), "equipment");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("analysis"), "analyses");
    }

    #[test]
    fn test_pluralize_camel_case() {
        assert_eq!(pluralize("postTag"), "postTags");
        assert_eq!(pluralize("userPerson"), "userPeople");
        assert_eq!(pluralize("category"), "categories");
    }

    #[test]
    fn test_singularize_regular() {
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("contact_histories"), "contact_history");
        assert_eq!(singularize("district_contact_histories"), "district_contact_history");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("houses"), "house");
        assert_eq!(singularize("wolves"), "wolf");
        assert_eq!(singularize("knives"), "knife");
        assert_eq!(singularize("archives"), "archive");
        assert_eq!(singularize("heroes"), "hero");
        assert_eq!(singularize("keys"), "key");
    }

    #[test]
    fn test_singularize_keeps_singular_words() {
        assert_eq!(singularize("user"), "user");
        assert_eq!(singularize("post_tag"), "post_tag");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("analysis"), "analysis");
    }

    #[test]
    fn test_singularize_irregular_and_uncountable() {
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("movies"), "movie");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("analyses"), "analysis");
        assert_eq!(singularize("news"), "news");
        assert_eq!(singularize("series"), "series");
        assert_eq!(singularize("Children"), "Child");
    }

    #[test]
    fn test_split_last_word() {
        assert_eq!(split_last_word("post_tags"), ("post_", "tags"));
        assert_eq!(split_last_word("postTags"), ("post", "Tags"));
        assert_eq!(split_last_word("users"), ("", "users"));
    }
}
