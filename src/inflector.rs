//! Identifier inflection
//!
//! Humanizes identifiers for doc comments and singularizes collection names
//! for the `add*`/`remove*` accessors of multi-valued associations.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Singular/plural conversion of English nouns
///
/// The generator receives an implementation at construction; swap it out to
/// support project-specific vocabulary.
pub trait Inflector {
    /// Turn a plural noun into its singular form (`categories` -> `category`)
    fn singularize(&self, word: &str) -> String;

    /// Turn a singular noun into its plural form (`category` -> `categories`)
    fn pluralize(&self, word: &str) -> String;
}

/// Rule-based English inflector
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

/// Ordered (pattern, replacement) rules; the first matching rule wins
type Rules = Vec<(Regex, &'static str)>;

fn compile(rules: &[(&str, &'static str)]) -> Rules {
    rules
        .iter()
        .map(|(pattern, replacement)| {
            let regex = Regex::new(pattern).expect("inflection rule must be a valid regex");
            (regex, *replacement)
        })
        .collect()
}

static SINGULAR_RULES: Lazy<Rules> = Lazy::new(|| {
    compile(&[
        ("(?i)(s)tatuses$", "${1}tatus"),
        ("(?i)^(.*)(menu)s$", "${1}${2}"),
        ("(?i)(quiz)zes$", "${1}"),
        ("(?i)(matr)ices$", "${1}ix"),
        ("(?i)(vert|ind)ices$", "${1}ex"),
        ("(?i)^(ox)en$", "${1}"),
        ("(?i)(alias)(es)*$", "${1}"),
        ("(?i)(buffal|her|potat|tomat|volcan)oes$", "${1}o"),
        (
            "(?i)(alumn|bacill|cact|foc|fung|nucle|radi|stimul|syllab|termin|viri?)i$",
            "${1}us",
        ),
        ("(?i)([ftw]ax)es$", "${1}"),
        ("(?i)(analy|ba|diagno|parenthe|progno|synop|the)ses$", "${1}sis"),
        ("(?i)(shoe|slave)s$", "${1}"),
        ("(?i)ouses$", "ouse"),
        ("(?i)([^a])uses$", "${1}us"),
        ("(?i)([ml])ice$", "${1}ouse"),
        ("(?i)(x|ch|ss|sh)es$", "${1}"),
        ("(?i)(m)ovies$", "${1}ovie"),
        ("(?i)(s)eries$", "${1}eries"),
        ("(?i)([^aeiouy]|qu)ies$", "${1}y"),
        ("(?i)([lr])ves$", "${1}f"),
        ("(?i)(tive|hive|drive)s$", "${1}"),
        ("(?i)([^fo])ves$", "${1}fe"),
        ("(?i)eaus$", "eau"),
        ("(?i)^(.*us)$", "${1}"),
        ("(?i)s$", ""),
    ])
});

static PLURAL_RULES: Lazy<Rules> = Lazy::new(|| {
    compile(&[
        ("(?i)(s)tatus$", "${1}tatuses"),
        ("(?i)(quiz)$", "${1}zes"),
        ("(?i)^(ox)$", "${1}en"),
        ("(?i)([ml])ouse$", "${1}ice"),
        ("(?i)(matr|vert|ind)(ix|ex)$", "${1}ices"),
        ("(?i)(x|ch|ss|sh)$", "${1}es"),
        ("(?i)([^aeiouy]|qu)y$", "${1}ies"),
        ("(?i)(hive|gulf)$", "${1}s"),
        ("(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        ("(?i)sis$", "ses"),
        ("(?i)([ti])um$", "${1}a"),
        ("(?i)(buffal|her|potat|tomat|volcan)o$", "${1}oes"),
        (
            "(?i)(alumn|bacill|cact|foc|fung|nucle|radi|stimul|syllab|termin|vir)us$",
            "${1}i",
        ),
        ("(?i)us$", "uses"),
        ("(?i)(alias)$", "${1}es"),
        ("(?i)s$", "s"),
        ("$", "s"),
    ])
});

/// Words with the same singular and plural form
const UNCOUNTABLE: &[&str] = &[
    "audio",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
    "staff",
];

/// Word patterns left unchanged in both directions
static UNINFLECTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(?i)^(?:.*deer|.*fish|.*measles|.*[nrlm]ese|.*ois|.*pox|.*sheep)$")
        .expect("uninflected pattern must be a valid regex")
});

/// Already singular, `address` must not lose its final `s`
static SINGULAR_UNINFLECTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(?i)ss$").expect("uninflected pattern must be a valid regex")
});

/// (singular, plural) pairs no suffix rule handles
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("criterion", "criteria"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("move", "moves"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

static SINGULAR_OF: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR.iter().map(|(s, p)| (*p, *s)).collect());

static PLURAL_OF: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR.iter().copied().collect());

impl EnglishInflector {
    fn inflect(
        word: &str,
        uninflected: Option<&Regex>,
        irregular: &HashMap<&'static str, &'static str>,
        rules: &Rules,
    ) -> String {
        if word.is_empty() {
            return String::new();
        }

        if UNINFLECTED.is_match(word) || uninflected.map_or(false, |re| re.is_match(word)) {
            return word.to_string();
        }

        // Irregular and uncountable words are matched on the last camelCase
        // segment so that `blogPeople` still becomes `blogPerson`.
        let (prefix, segment) = split_last_segment(word);
        let lowered = segment.to_lowercase();

        if UNCOUNTABLE.iter().any(|w| *w == lowered) {
            return word.to_string();
        }

        if let Some(replacement) = irregular.get(lowered.as_str()) {
            let replacement = if segment.starts_with(char::is_uppercase) {
                ucfirst(replacement)
            } else {
                (*replacement).to_string()
            };
            return format!("{}{}", prefix, replacement);
        }

        for (pattern, replacement) in rules {
            if pattern.is_match(word) {
                return pattern.replace(word, *replacement).into_owned();
            }
        }

        word.to_string()
    }
}

impl Inflector for EnglishInflector {
    fn singularize(&self, word: &str) -> String {
        Self::inflect(
            word,
            Some(&*SINGULAR_UNINFLECTED),
            &SINGULAR_OF,
            &SINGULAR_RULES,
        )
    }

    fn pluralize(&self, word: &str) -> String {
        Self::inflect(word, None, &PLURAL_OF, &PLURAL_RULES)
    }
}

/// Split `blogPosts` into (`blog`, `Posts`)
fn split_last_segment(word: &str) -> (&str, &str) {
    let index = word
        .char_indices()
        .skip(1)
        .filter(|(_, c)| c.is_uppercase())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0);
    word.split_at(index)
}

/// Turn an identifier into lowercase words (`birthDate` -> `birth date`)
///
/// A space is inserted before every uppercase letter that follows a letter.
pub fn humanize(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    let mut previous: Option<char> = None;

    for c in identifier.chars() {
        if c.is_uppercase() && previous.map_or(false, char::is_alphabetic) {
            out.push(' ');
        }
        out.extend(c.to_lowercase());
        previous = Some(c);
    }

    out
}

/// Uppercase the first character only (`birthDate` -> `BirthDate`)
pub fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
