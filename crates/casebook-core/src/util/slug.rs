//! URL slug generation.
//!
//! Slugs for case studies without a stored `slug` column are derived from
//! the title. The rule must stay stable: published URLs and the detail
//! lookup both depend on it.

/// Generate a URL slug from a title.
///
/// Performs the following transformations:
/// 1. Converts to lowercase
/// 2. Drops every character that is neither an ASCII word character
///    (`[A-Za-z0-9_]`) nor whitespace
/// 3. Replaces each run of whitespace with a single hyphen
///
/// Leading and trailing whitespace become hyphens too; titles in the store
/// are not trimmed, and existing links were generated without trimming.
///
/// # Examples
///
/// ```
/// use casebook_core::util::slug::generate_slug;
///
/// assert_eq!(generate_slug("Zero Trust Rollout"), "zero-trust-rollout");
/// assert_eq!(generate_slug("AI & ML: A Story!"), "ai-ml-a-story");
/// assert_eq!(generate_slug("snake_case  title"), "snake_case-title");
/// ```
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
            in_whitespace = false;
        }
        // Anything else is dropped without ending a whitespace run.
    }

    slug
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_slug_charset(title in "\\PC{0,60}") {
            let slug = generate_slug(&title);
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
