//! Title → URL slug derivation with Cyrillic transliteration.
//!
//! Steps follow pytils `slugify`: lowercase, `&` to `and`, whitespace and
//! hyphen runs to a single `-`, drop characters outside the slug alphabet,
//! transliterate, truncate.
//!
//! # Invariants
//! - Output only contains `[a-z0-9-]`.
//! - Output is at most `max_chars` characters.

use once_cell::sync::Lazy;
use regex::Regex;

static AMPERSAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&amp;|&").expect("valid ampersand regex"));
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("valid separator regex"));

/// Transliterates one lowercase Cyrillic character into Latin.
///
/// Returns `None` for characters outside the table.
fn transliterate_char(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        _ => return None,
    };
    Some(latin)
}

/// Derives a URL-safe slug from `title`.
///
/// `"Заметка без slug"` becomes `"zametka-bez-slug"`. Separators are
/// collapsed before symbols are dropped, so `"a ! b"` yields `"a--b"`, and
/// surrounding whitespace leaves a leading or trailing `-`. Returns an empty
/// string when nothing slug-worthy remains.
pub fn slugify(title: &str, max_chars: usize) -> String {
    let lowered = title.to_lowercase();
    let with_and = AMPERSAND_RE.replace_all(&lowered, " and ");
    let hyphenated = SEPARATOR_RE.replace_all(&with_and, "-");

    let mut slug = String::with_capacity(hyphenated.len());
    for ch in hyphenated.chars() {
        match ch {
            'a'..='z' | '0'..='9' | '-' => slug.push(ch),
            _ => {
                if let Some(latin) = transliterate_char(ch) {
                    slug.push_str(latin);
                }
            }
        }
    }
    slug.chars().take(max_chars).collect()
}
