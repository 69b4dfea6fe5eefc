//! Language metadata.
//!
//! This module holds the catalog of languages that have query files,
//! along with their ISO 639 code and Wikidata item.
//!
use std::collections::BTreeMap;

use lazy_static::lazy_static;

/// Data types that are queried when none are requested.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["nouns", "verbs", "prepositions"];

/// Language whose verbs are queried once per auxiliary verb (haben/sein).
const AUXILIARY_SPLIT_LANGUAGE: &str = "German";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageMeta {
    pub iso: &'static str,
    pub qid: &'static str,
}

lazy_static! {

    /// Languages known to the extraction tree, keyed by their directory name.
    pub static ref LANGUAGES: BTreeMap<&'static str, LanguageMeta> = {
        let mut m = BTreeMap::new();
        m.insert("Arabic", LanguageMeta { iso: "ar", qid: "Q13955" });
        m.insert("Basque", LanguageMeta { iso: "eu", qid: "Q8752" });
        m.insert("Bengali", LanguageMeta { iso: "bn", qid: "Q9610" });
        m.insert("Czech", LanguageMeta { iso: "cs", qid: "Q9056" });
        m.insert("Danish", LanguageMeta { iso: "da", qid: "Q9035" });
        m.insert("English", LanguageMeta { iso: "en", qid: "Q1860" });
        m.insert("Esperanto", LanguageMeta { iso: "eo", qid: "Q143" });
        m.insert("Estonian", LanguageMeta { iso: "et", qid: "Q9072" });
        m.insert("Finnish", LanguageMeta { iso: "fi", qid: "Q1412" });
        m.insert("French", LanguageMeta { iso: "fr", qid: "Q150" });
        m.insert("German", LanguageMeta { iso: "de", qid: "Q188" });
        m.insert("Greek", LanguageMeta { iso: "el", qid: "Q36510" });
        m.insert("Hebrew", LanguageMeta { iso: "he", qid: "Q9288" });
        m.insert("Indonesian", LanguageMeta { iso: "id", qid: "Q9240" });
        m.insert("Italian", LanguageMeta { iso: "it", qid: "Q652" });
        m.insert("Japanese", LanguageMeta { iso: "ja", qid: "Q5287" });
        m.insert("Latin", LanguageMeta { iso: "la", qid: "Q397" });
        m.insert("Malay", LanguageMeta { iso: "ms", qid: "Q9237" });
        m.insert("Malayalam", LanguageMeta { iso: "ml", qid: "Q36236" });
        m.insert("Norwegian", LanguageMeta { iso: "no", qid: "Q9043" });
        m.insert("Polish", LanguageMeta { iso: "pl", qid: "Q809" });
        m.insert("Portuguese", LanguageMeta { iso: "pt", qid: "Q5146" });
        m.insert("Russian", LanguageMeta { iso: "ru", qid: "Q7737" });
        m.insert("Slovak", LanguageMeta { iso: "sk", qid: "Q9058" });
        m.insert("Spanish", LanguageMeta { iso: "es", qid: "Q1321" });
        m.insert("Swahili", LanguageMeta { iso: "sw", qid: "Q7838" });
        m.insert("Swedish", LanguageMeta { iso: "sv", qid: "Q9027" });
        m.insert("Tamil", LanguageMeta { iso: "ta", qid: "Q5885" });
        m.insert("Ukrainian", LanguageMeta { iso: "uk", qid: "Q8798" });
        m.insert("Yoruba", LanguageMeta { iso: "yo", qid: "Q34311" });

        m
    };
}

/// Uppercase the first character, lowercase the rest.
///
/// Output folders are named this way (`finnish` and `FINNISH` both give `Finnish`).
pub fn capitalize(language: &str) -> String {
    let mut chars = language.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// true if later query parts have to carry an `auxiliaryVerb` field.
pub fn uses_auxiliary_split(language: &str) -> bool {
    language == AUXILIARY_SPLIT_LANGUAGE
}

/// Get the metadata of a language, if it is in the catalog.
pub fn get(language: &str) -> Option<&'static LanguageMeta> {
    LANGUAGES.get(language)
}
