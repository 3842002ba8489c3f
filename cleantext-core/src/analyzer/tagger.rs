//! Part-of-speech tagging.
//!
//! [`RuleTagger`] produces Penn Treebank tags and converts them on request
//! to the universal or Brown tagset. A token's tag comes from, in order:
//!
//! 1. its punctuation or number shape,
//! 2. the closed-class lexicon (determiners, pronouns, auxiliaries, ...),
//! 3. capitalization away from a sentence start (`NNP`),
//! 4. suffix heuristics (`-ing` -> `VBG`, `-ed` -> `VBD`, `-s` -> `NNS`, ...).
//!
//! A second pass then revises heuristic tags from the previous tag:
//! after `to` or a modal a noun or past form becomes `VB`, after a
//! determiner, adjective or possessive an `-ing` form becomes `NN`, and
//! after a personal pronoun `NNS`/`NN` become `VBZ`/`VBP`.

use cleantext_types::{TaggedToken, Tagset};
use rustc_hash::FxHashMap;

use super::lemmatizer::PartOfSpeech;

/// Assigns part-of-speech tags to a token sequence.
pub trait PosTagger: Send + Sync {
    /// Tags `tokens`, one output per input, in order. `None` means the
    /// tagger's native tagset.
    fn tag(&self, tokens: Vec<String>, tagset: Option<Tagset>) -> Vec<TaggedToken>;
}

#[rustfmt::skip]
const LEXICON: &[(&str, &str)] = &[
    // determiners
    ("the", "DT"), ("a", "DT"), ("an", "DT"), ("this", "DT"), ("that", "DT"),
    ("these", "DT"), ("those", "DT"), ("every", "DT"), ("each", "DT"), ("some", "DT"),
    ("any", "DT"), ("no", "DT"), ("another", "DT"), ("all", "DT"), ("both", "DT"),
    ("either", "DT"), ("neither", "DT"),
    // prepositions and subordinators
    ("of", "IN"), ("in", "IN"), ("on", "IN"), ("at", "IN"), ("by", "IN"), ("for", "IN"),
    ("with", "IN"), ("about", "IN"), ("against", "IN"), ("between", "IN"), ("into", "IN"),
    ("through", "IN"), ("during", "IN"), ("before", "IN"), ("after", "IN"), ("above", "IN"),
    ("below", "IN"), ("from", "IN"), ("over", "IN"), ("under", "IN"), ("since", "IN"),
    ("until", "IN"), ("while", "IN"), ("because", "IN"), ("if", "IN"), ("than", "IN"),
    ("as", "IN"), ("upon", "IN"), ("within", "IN"), ("without", "IN"), ("across", "IN"),
    ("toward", "IN"), ("towards", "IN"), ("whether", "IN"), ("although", "IN"),
    ("though", "IN"),
    // coordinators
    ("and", "CC"), ("but", "CC"), ("or", "CC"), ("nor", "CC"), ("yet", "CC"),
    // pronouns
    ("i", "PRP"), ("me", "PRP"), ("you", "PRP"), ("he", "PRP"), ("him", "PRP"),
    ("she", "PRP"), ("it", "PRP"), ("we", "PRP"), ("us", "PRP"), ("they", "PRP"),
    ("them", "PRP"), ("myself", "PRP"), ("yourself", "PRP"), ("himself", "PRP"),
    ("herself", "PRP"), ("itself", "PRP"), ("ourselves", "PRP"), ("themselves", "PRP"),
    ("my", "PRP$"), ("your", "PRP$"), ("his", "PRP$"), ("her", "PRP$"), ("its", "PRP$"),
    ("our", "PRP$"), ("their", "PRP$"),
    ("who", "WP"), ("whom", "WP"), ("what", "WP"), ("whose", "WP$"), ("which", "WDT"),
    ("when", "WRB"), ("where", "WRB"), ("why", "WRB"), ("how", "WRB"),
    ("there", "EX"), ("to", "TO"),
    // auxiliaries and modals
    ("can", "MD"), ("could", "MD"), ("will", "MD"), ("would", "MD"), ("shall", "MD"),
    ("should", "MD"), ("may", "MD"), ("might", "MD"), ("must", "MD"), ("'ll", "MD"),
    ("'d", "MD"), ("be", "VB"), ("is", "VBZ"), ("has", "VBZ"), ("does", "VBZ"),
    ("are", "VBP"), ("am", "VBP"), ("have", "VBP"), ("do", "VBP"), ("'m", "VBP"),
    ("'re", "VBP"), ("'ve", "VBP"), ("was", "VBD"), ("were", "VBD"), ("had", "VBD"),
    ("did", "VBD"), ("been", "VBN"), ("being", "VBG"), ("having", "VBG"),
    // frequent irregular past forms
    ("saw", "VBD"), ("went", "VBD"), ("said", "VBD"), ("made", "VBD"), ("got", "VBD"),
    ("took", "VBD"), ("came", "VBD"), ("knew", "VBD"), ("thought", "VBD"),
    // adverbs and particles
    ("not", "RB"), ("n't", "RB"), ("very", "RB"), ("too", "RB"), ("so", "RB"),
    ("also", "RB"), ("just", "RB"), ("only", "RB"), ("then", "RB"), ("now", "RB"),
    ("here", "RB"), ("again", "RB"), ("never", "RB"), ("always", "RB"), ("often", "RB"),
    ("already", "RB"), ("still", "RB"), ("even", "RB"), ("ever", "RB"), ("quite", "RB"),
    ("rather", "RB"), ("fast", "RB"), ("'s", "POS"),
    // numbers
    ("one", "CD"), ("two", "CD"), ("three", "CD"), ("four", "CD"), ("five", "CD"),
    ("six", "CD"), ("seven", "CD"), ("eight", "CD"), ("nine", "CD"), ("ten", "CD"),
    ("hundred", "CD"), ("thousand", "CD"), ("million", "CD"),
    // frequent adjectives
    ("good", "JJ"), ("new", "JJ"), ("great", "JJ"), ("big", "JJ"), ("small", "JJ"),
    ("old", "JJ"), ("high", "JJ"), ("little", "JJ"), ("large", "JJ"), ("long", "JJ"),
    ("other", "JJ"), ("same", "JJ"), ("few", "JJ"), ("own", "JJ"), ("better", "JJR"),
    ("best", "JJS"), ("more", "JJR"), ("most", "JJS"),
    ("people", "NNS"), ("oh", "UH"), ("yes", "UH"),
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ish", "ical"];

/// Lexicon and suffix driven tagger.
#[derive(Debug, Clone)]
pub struct RuleTagger {
    lexicon: FxHashMap<&'static str, &'static str>,
}

impl Default for RuleTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTagger {
    /// Creates the tagger with its built-in English lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
        }
    }

    /// Tags `tokens` with Penn Treebank tags.
    pub fn penn_tags(&self, tokens: &[String]) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = Vec::with_capacity(tokens.len());
        let mut guessed: Vec<bool> = Vec::with_capacity(tokens.len());

        for token in tokens {
            let sentence_start = matches!(tags.last(), None | Some(&"."));
            let (tag, heuristic) = self.initial_tag(token, sentence_start);
            tags.push(tag);
            guessed.push(heuristic);
        }

        for i in 1..tags.len() {
            if !guessed[i] {
                continue;
            }
            tags[i] = match (tags[i - 1], tags[i]) {
                ("TO" | "MD", "NN" | "VBD") => "VB",
                ("DT" | "JJ" | "PRP$", "VBG") => "NN",
                ("PRP", "NNS") => "VBZ",
                ("PRP", "NN") => "VBP",
                (_, tag) => tag,
            };
        }
        tags
    }

    /// Returns the tag for one token and whether it was guessed from its suffix.
    fn initial_tag(&self, token: &str, sentence_start: bool) -> (&'static str, bool) {
        if let Some(tag) = punctuation_tag(token) {
            return (tag, false);
        }
        if is_number(token) {
            return ("CD", false);
        }

        let lower = token.to_lowercase();
        if let Some(&tag) = self.lexicon.get(lower.as_str()) {
            return (tag, false);
        }
        if !sentence_start && token.chars().next().is_some_and(char::is_uppercase) {
            return ("NNP", false);
        }
        (suffix_tag(&lower), true)
    }
}

impl PosTagger for RuleTagger {
    fn tag(&self, tokens: Vec<String>, tagset: Option<Tagset>) -> Vec<TaggedToken> {
        let tags = self.penn_tags(&tokens);
        tokens
            .into_iter()
            .zip(tags)
            .map(|(text, tag)| TaggedToken {
                text,
                tag: convert_tag(tag, tagset).to_owned(),
            })
            .collect()
    }
}

fn punctuation_tag(token: &str) -> Option<&'static str> {
    let tag = match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "..." | "-" | "--" => ":",
        "``" => "``",
        "''" | "'" | "\"" => "''",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "$" => "$",
        "#" => "#",
        "%" => "NN",
        _ if !token.is_empty() && !token.chars().any(char::is_alphanumeric) => "SYM",
        _ => return None,
    };
    Some(tag)
}

fn is_number(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-' | '/'))
}

fn suffix_tag(lower: &str) -> &'static str {
    let n = lower.chars().count();
    if n > 4 && lower.ends_with("ing") {
        return "VBG";
    }
    if n > 3 && lower.ends_with("ed") {
        return "VBD";
    }
    if n > 3 && lower.ends_with("ly") {
        return "RB";
    }
    if ADJECTIVE_SUFFIXES
        .iter()
        .any(|s| n > s.len() + 2 && lower.ends_with(s))
    {
        return "JJ";
    }
    if n > 3 && lower.ends_with('s') && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s)) {
        return "NNS";
    }
    "NN"
}

/// Converts a Penn Treebank tag to `tagset`. `None` and `Wsj` keep Penn tags.
pub fn convert_tag(penn: &'static str, tagset: Option<Tagset>) -> &'static str {
    match tagset {
        None | Some(Tagset::Wsj) => penn,
        Some(Tagset::Universal) => penn_to_universal(penn),
        Some(Tagset::Brown) => penn_to_brown(penn),
    }
}

fn penn_to_universal(penn: &str) -> &'static str {
    match penn {
        "NN" | "NNS" | "NNP" | "NNPS" => "NOUN",
        "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" | "MD" => "VERB",
        "JJ" | "JJR" | "JJS" => "ADJ",
        "RB" | "RBR" | "RBS" | "WRB" => "ADV",
        "PRP" | "PRP$" | "WP" | "WP$" => "PRON",
        "DT" | "PDT" | "WDT" | "EX" => "DET",
        "IN" => "ADP",
        "CD" => "NUM",
        "CC" => "CONJ",
        "RP" | "TO" | "POS" => "PRT",
        "." | "," | ":" | "``" | "''" | "(" | ")" | "$" | "#" => ".",
        _ => "X",
    }
}

fn penn_to_brown(penn: &'static str) -> &'static str {
    match penn {
        "NNP" => "NP",
        "NNPS" => "NPS",
        "VBP" => "VB",
        "JJS" => "JJT",
        "RBS" => "RBT",
        "DT" => "AT",
        "PRP" => "PPS",
        "PRP$" => "PP$",
        "WP" => "WPS",
        "POS" => "$",
        "SYM" => "NIL",
        other => other,
    }
}

/// Maps a tag to the lemmatizer hint: adjective, verb, noun or adverb.
///
/// Universal tags map by name; Penn and Brown tags by their first letter.
/// Anything else is a noun.
pub fn wordnet_pos(tag: &str, tagset: Option<Tagset>) -> PartOfSpeech {
    if tagset == Some(Tagset::Universal) {
        return match tag {
            "ADJ" => PartOfSpeech::Adjective,
            "VERB" => PartOfSpeech::Verb,
            "ADV" => PartOfSpeech::Adverb,
            _ => PartOfSpeech::Noun,
        };
    }
    match tag.as_bytes().first() {
        Some(b'J') => PartOfSpeech::Adjective,
        Some(b'V') => PartOfSpeech::Verb,
        Some(b'R') => PartOfSpeech::Adverb,
        _ => PartOfSpeech::Noun,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn tags(s: &str, tagset: Option<Tagset>) -> Vec<String> {
        RuleTagger::new()
            .tag(tokens(s), tagset)
            .into_iter()
            .map(|t| t.tag)
            .collect()
    }

    const SENTENCE: &str = "The striped bats were hanging on their feet";

    #[test]
    fn penn_sentence() {
        assert_eq!(
            tags(SENTENCE, None),
            ["DT", "VBD", "NNS", "VBD", "VBG", "IN", "PRP$", "NN"]
        );
        assert_eq!(tags(SENTENCE, Some(Tagset::Wsj)), tags(SENTENCE, None));
    }

    #[test]
    fn universal_sentence() {
        assert_eq!(
            tags(SENTENCE, Some(Tagset::Universal)),
            ["DET", "VERB", "NOUN", "VERB", "VERB", "ADP", "PRON", "NOUN"]
        );
    }

    #[test]
    fn brown_sentence() {
        assert_eq!(
            tags(SENTENCE, Some(Tagset::Brown)),
            ["AT", "VBD", "NNS", "VBD", "VBG", "IN", "PP$", "NN"]
        );
    }

    #[test]
    fn keeps_token_text_and_length() {
        let out = RuleTagger::new().tag(tokens("Do n't stop ."), None);
        let texts: Vec<&str> = out.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Do", "n't", "stop", "."]);
        assert_eq!(out[1].tag, "RB");
        assert_eq!(out[3].tag, ".");
    }

    #[test]
    fn shapes() {
        assert_eq!(tags("1,000 people paid $ 5 .", None), ["CD", "NNS", "NN", "$", "CD", "."]);
        assert_eq!(tags("`` hi '' ( x ) ;", None)[0], "``");
        assert_eq!(tags("@@", None), ["SYM"]);
    }

    #[test]
    fn proper_nouns_away_from_sentence_start() {
        assert_eq!(tags("I saw Paris", None), ["PRP", "VBD", "NNP"]);
        assert_eq!(tags("Paris . Rome", None), ["NN", ".", "NN"]);
    }

    #[test]
    fn contextual_rules() {
        assert_eq!(tags("I will run", None), ["PRP", "MD", "VB"]);
        assert_eq!(tags("to walk", None), ["TO", "VB"]);
        assert_eq!(tags("the running", None), ["DT", "NN"]);
        assert_eq!(tags("he runs", None), ["PRP", "VBZ"]);
        assert_eq!(tags("they walk", None), ["PRP", "VBP"]);
    }

    #[test]
    fn suffix_heuristics() {
        assert_eq!(
            tags("dangerous quickly cats glass", None),
            ["JJ", "RB", "NNS", "NN"]
        );
    }

    #[test]
    fn empty_input() {
        assert!(RuleTagger::new().tag(Vec::new(), None).is_empty());
    }

    #[test]
    fn wordnet_pos_penn_prefixes() {
        assert_eq!(wordnet_pos("JJR", None), PartOfSpeech::Adjective);
        assert_eq!(wordnet_pos("VBG", None), PartOfSpeech::Verb);
        assert_eq!(wordnet_pos("NNS", None), PartOfSpeech::Noun);
        assert_eq!(wordnet_pos("RB", Some(Tagset::Wsj)), PartOfSpeech::Adverb);
        assert_eq!(wordnet_pos("DT", None), PartOfSpeech::Noun);
        assert_eq!(wordnet_pos("JJT", Some(Tagset::Brown)), PartOfSpeech::Adjective);
    }

    #[test]
    fn wordnet_pos_universal_names() {
        let u = Some(Tagset::Universal);
        assert_eq!(wordnet_pos("VERB", u), PartOfSpeech::Verb);
        assert_eq!(wordnet_pos("ADJ", u), PartOfSpeech::Adjective);
        assert_eq!(wordnet_pos("ADV", u), PartOfSpeech::Adverb);
        assert_eq!(wordnet_pos("NOUN", u), PartOfSpeech::Noun);
        // "ADP" would read as adjective by prefix.
        assert_eq!(wordnet_pos("ADP", u), PartOfSpeech::Noun);
    }
}
