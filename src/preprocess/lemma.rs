// Lemmatization — heuristic part-of-speech tagging plus suffix rules.
//
// Each token is first stripped to its letters (empty results are dropped),
// tagged with a coarse word class, and then reduced by the suffix rules for
// that class. The tagger is a suffix heuristic, not a trained model; it only
// needs to pick the right rule family often enough for vocabulary folding.

use super::traits::Stage;

/// The coarse word classes the lemmatizer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    Adjective,
    Verb,
    Noun,
    Adverb,
    Other,
}

/// Tag a (letters-only, lowercased) token with its likely word class.
pub fn tag(token: &str) -> WordClass {
    const ADJECTIVE_SUFFIXES: [&str; 8] =
        ["ous", "ful", "ive", "less", "able", "ible", "est", "ier"];
    const VERB_SUFFIXES: [&str; 3] = ["ing", "ed", "ize"];

    if token.len() < 3 {
        return WordClass::Other;
    }
    if token.ends_with("ly") {
        return WordClass::Adverb;
    }
    if ADJECTIVE_SUFFIXES.iter().any(|s| token.ends_with(s)) {
        return WordClass::Adjective;
    }
    if VERB_SUFFIXES.iter().any(|s| token.ends_with(s)) {
        return WordClass::Verb;
    }
    WordClass::Noun
}

/// Reduce a token according to its word class.
pub fn lemmatize(token: &str, class: WordClass) -> String {
    match class {
        WordClass::Noun => noun_lemma(token),
        WordClass::Verb => verb_lemma(token),
        WordClass::Adjective => adjective_lemma(token),
        // Adverbs and everything else keep their surface form; stripping
        // "-ly" too eagerly mangles words like "family".
        WordClass::Adverb | WordClass::Other => token.to_string(),
    }
}

fn noun_lemma(token: &str) -> String {
    if let Some(stem) = token.strip_suffix("ies").filter(|s| s.len() > 2) {
        return format!("{stem}y");
    }
    for suffix in ["ches", "shes", "sses", "xes", "zes"] {
        if let Some(stem) = token.strip_suffix("es").filter(|_| token.ends_with(suffix)) {
            return stem.to_string();
        }
    }
    match token.strip_suffix('s') {
        // Keep "-ss" and "-us" endings ("boss", "virus") intact.
        Some(stem) if !stem.ends_with('s') && !stem.ends_with('u') && stem.len() > 2 => {
            stem.to_string()
        }
        _ => token.to_string(),
    }
}

fn verb_lemma(token: &str) -> String {
    for suffix in ["ing", "ed"] {
        if let Some(stem) = token.strip_suffix(suffix).filter(|s| s.len() > 2) {
            return undouble(stem);
        }
    }
    token.to_string()
}

fn adjective_lemma(token: &str) -> String {
    if let Some(stem) = token.strip_suffix("iest").filter(|s| s.len() > 2) {
        return format!("{stem}y");
    }
    if let Some(stem) = token.strip_suffix("ier").filter(|s| s.len() > 2) {
        return format!("{stem}y");
    }
    for suffix in ["est", "er"] {
        if let Some(stem) = token.strip_suffix(suffix).filter(|s| s.len() > 3) {
            return stem.to_string();
        }
    }
    token.to_string()
}

/// "runn" -> "run": drop one of a doubled trailing consonant left behind by
/// suffix removal.
fn undouble(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() >= 2 {
        let last = chars[chars.len() - 1];
        if last == chars[chars.len() - 2] && !"aeiou".contains(last) && last != 'l' && last != 's' {
            return chars[..chars.len() - 1].iter().collect();
        }
    }
    stem.to_string()
}

/// The chain stage: strip, tag, lemmatize, drop empties.
#[derive(Default)]
pub struct Lemmatize;

impl Stage for Lemmatize {
    fn optimize(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .map(|t| t.chars().filter(|c| c.is_alphabetic()).collect::<String>())
            .filter(|t| !t.is_empty())
            .map(|t| lemmatize(&t, tag(&t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn tags_by_suffix() {
        assert_eq!(tag("quickly"), WordClass::Adverb);
        assert_eq!(tag("running"), WordClass::Verb);
        assert_eq!(tag("famous"), WordClass::Adjective);
        assert_eq!(tag("video"), WordClass::Noun);
        assert_eq!(tag("at"), WordClass::Other);
    }

    #[test]
    fn noun_plurals_reduce() {
        assert_eq!(lemmatize("videos", WordClass::Noun), "video");
        assert_eq!(lemmatize("parties", WordClass::Noun), "party");
        assert_eq!(lemmatize("boxes", WordClass::Noun), "box");
        assert_eq!(lemmatize("boss", WordClass::Noun), "boss");
        assert_eq!(lemmatize("virus", WordClass::Noun), "virus");
    }

    #[test]
    fn verb_forms_reduce() {
        assert_eq!(lemmatize("running", WordClass::Verb), "run");
        assert_eq!(lemmatize("subscribed", WordClass::Verb), "subscrib");
        assert_eq!(lemmatize("sing", WordClass::Verb), "sing");
    }

    #[test]
    fn adjective_comparatives_reduce() {
        assert_eq!(lemmatize("happier", WordClass::Adjective), "happy");
        assert_eq!(lemmatize("greatest", WordClass::Adjective), "great");
    }

    #[test]
    fn stage_strips_non_letters_and_drops_empties() {
        let stage = Lemmatize;
        assert_eq!(
            stage.optimize(toks(&["videos!", "123", "running..."])),
            toks(&["video", "run"])
        );
    }
}
