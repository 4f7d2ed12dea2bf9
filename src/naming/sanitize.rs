//! Slug sanitization for hosting-platform project names.
//!
//! Rendered repository names may contain arbitrary text (student names,
//! free-form labels, template output). GitLab project names only tolerate
//! a narrow character set, so every rendered name passes through
//! [`clean_project_name`] before it is used remotely.
//!
//! The transformation is pure and idempotent: sanitizing an
//! already-sanitized string returns it unchanged. It can produce an empty
//! string when every input character is illegal; callers must treat that
//! as a valid but degenerate slug.

use regex::Regex;
use std::sync::LazyLock;

static ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9-]+").expect("hard-coded character class is valid"));

static HYPHEN_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("hard-coded hyphen pattern is valid"));

/// Turn a rendered repository name into a GitLab-legal slug.
///
/// Applied in order:
/// 1. German umlauts and sharp s are transliterated (`ä` → `ae`, `Ö` →
///    `Oe`, …), uppercased to `AE`/`OE`/… when they sit inside an
///    all-caps run.
/// 2. Every remaining character outside `[A-Za-z0-9-]` becomes a hyphen.
/// 3. Hyphen runs collapse to a single hyphen; leading and trailing
///    hyphens are stripped.
///
/// # Examples
///
/// ```
/// use repodist::naming::clean_project_name;
///
/// assert_eq!(
///     clean_project_name("Gänsefüßchen-Ölprüfer"),
///     "Gaensefuesschen-Oelpruefer"
/// );
/// assert_eq!(clean_project_name("test@#project$%^&name"), "test-project-name");
/// ```
#[must_use]
pub fn clean_project_name(name: &str) -> String {
    let cleaned = replace_umlauts(name);
    let cleaned = clean_up_illegal_characters(&cleaned);
    clean_up_hyphens(&cleaned)
}

/// Replace umlauts with their ASCII transliteration.
///
/// The case heuristic approximates "this character sits inside an all-caps
/// word": if the character is uppercase and an adjacent character is an
/// uppercase letter, the whole replacement is uppercased (`Ü` → `UE`),
/// otherwise the replacement keeps its natural case (`Ü` → `Ue`).
fn replace_umlauts(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len());

    for (i, &c) in chars.iter().enumerate() {
        let Some(replacement) = umlaut_replacement(c) else {
            result.push(c);
            continue;
        };

        let before_upper = i > 0 && is_uppercase_letter(chars[i - 1]);
        let after_upper = i + 1 < chars.len() && is_uppercase_letter(chars[i + 1]);

        if c.is_uppercase() && (before_upper || after_upper) {
            result.push_str(&replacement.to_uppercase());
        } else {
            result.push_str(replacement);
        }
    }

    result
}

fn umlaut_replacement(c: char) -> Option<&'static str> {
    match c {
        'ä' => Some("ae"),
        'ö' => Some("oe"),
        'ü' => Some("ue"),
        'ß' => Some("ss"),
        'Ä' => Some("Ae"),
        'Ö' => Some("Oe"),
        'Ü' => Some("Ue"),
        'ẞ' => Some("Ss"),
        _ => None,
    }
}

fn is_uppercase_letter(c: char) -> bool {
    c.is_alphabetic() && c.is_uppercase()
}

/// Replace every run of characters outside `[A-Za-z0-9-]` with a hyphen.
fn clean_up_illegal_characters(name: &str) -> String {
    ILLEGAL_CHARS.replace_all(name, "-").into_owned()
}

/// Collapse hyphen runs and strip leading/trailing hyphens.
fn clean_up_hyphens(name: &str) -> String {
    let collapsed = HYPHEN_RUNS.replace_all(name, "-");
    collapsed.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_umlauts() {
        assert_eq!(
            replace_umlauts("Gänsefüßchen-Ölprüfer"),
            "Gaensefuesschen-Oelpruefer"
        );
    }

    #[test]
    fn replaces_umlaut_at_end_of_all_caps_string() {
        assert_eq!(replace_umlauts("AEIOÜ"), "AEIOUE");
    }

    #[test]
    fn replaces_umlaut_at_beginning_of_all_caps_string() {
        assert_eq!(replace_umlauts("ÄEIOU"), "AEEIOU");
    }

    #[test]
    fn replaces_umlaut_inside_all_caps_string() {
        assert_eq!(replace_umlauts("AEIÖU"), "AEIOEU");
    }

    #[test]
    fn lowercase_sharp_s_never_uppercases() {
        // ß itself is lowercase, so the caps-run heuristic must not fire.
        assert_eq!(replace_umlauts("GROßE"), "GROssE");
    }

    #[test]
    fn cleans_up_hyphens() {
        assert_eq!(clean_up_hyphens("test----project---name----"), "test-project-name");
    }

    #[test]
    fn cleans_up_illegal_characters() {
        assert_eq!(clean_up_illegal_characters("test@#project$%^&name"), "test-project-name");
    }

    #[test]
    fn cleans_full_project_name() {
        assert_eq!(clean_project_name("Projekt-ÄÖÜß@@@***"), "Projekt-AEOEUEss");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean_project_name(""), "");
    }

    #[test]
    fn fully_illegal_input_collapses_to_empty() {
        assert_eq!(clean_project_name("@@@***!!!"), "");
    }

    #[test]
    fn sanitization_is_idempotent() {
        for input in [
            "Gänsefüßchen-Ölprüfer",
            "test----project---name----",
            "test@#project$%^&name",
            "Projekt-ÄÖÜß@@@***",
            "already-clean-slug-42",
            "",
        ] {
            let once = clean_project_name(input);
            assert_eq!(clean_project_name(&once), once, "not idempotent for {input:?}");
        }
    }
}
