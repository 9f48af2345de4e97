//! Codename derivation for field matching
//!
//! Target-type field identifiers are matched against element codenames by
//! case-folding the identifier to the snake_case codename convention. An
//! explicit per-field override always wins over the derived key.

/// Case-fold a field identifier to its snake_case codename.
///
/// Handles camelCase, PascalCase, acronym runs, kebab-case and spaces.
/// Identifiers already in snake_case pass through unchanged.
///
/// # Examples
///
/// ```rust
/// use tessera_core::derive_codename;
///
/// assert_eq!(derive_codename("postDate"), "post_date");
/// assert_eq!(derive_codename("PostDate"), "post_date");
/// assert_eq!(derive_codename("post_date"), "post_date");
/// assert_eq!(derive_codename("URLSlug"), "url_slug");
/// ```
pub fn derive_codename(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut out = String::with_capacity(identifier.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' || c == '.' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if c.is_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1);
            // Word boundary: lower/digit before an upper, or the last upper
            // of an acronym run followed by a lower ("URLSlug" -> url_slug)
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
