//! Case conversion: camelCase request keys to snake_case column names, identifiers to display labels.

/// Split an identifier into words on `_`, `-`, whitespace and lower-to-upper boundaries.
fn words(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in s.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// "media_types" -> "Media Types", "playlistTrack" -> "Playlist Track".
pub fn capital_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Convert a single identifier from camelCase to snake_case.
/// e.g. "mediaTypeId" -> "media_type_id"; already snake_case input is unchanged.
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capital_case_splits_on_separators_and_humps() {
        assert_eq!(capital_case("media_types"), "Media Types");
        assert_eq!(capital_case("playlistTrack"), "Playlist Track");
        assert_eq!(capital_case("invoice-items"), "Invoice Items");
        assert_eq!(capital_case("ARTISTS"), "Artists");
        assert_eq!(capital_case(""), "");
    }

    #[test]
    fn snake_case_from_camel() {
        assert_eq!(to_snake_case("mediaTypeId"), "media_type_id");
        assert_eq!(to_snake_case("name"), "name");
        assert_eq!(to_snake_case("genre_id"), "genre_id");
    }
}
