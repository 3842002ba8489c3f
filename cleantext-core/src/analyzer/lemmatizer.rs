//! Lemmatization.
//!
//! [`RuleLemmatizer`] follows the shape of WordNet's morphy:
//!
//! 1. Irregular forms come from a per part-of-speech exception table
//!    (`mice` -> `mouse`, `went` -> `go`).
//! 2. Words already known as base forms are returned as they are.
//! 3. Suffix substitution rules produce candidates; a candidate that is a
//!    known base form wins, the shortest one if several are.
//! 4. Otherwise orthographic heuristics pick the base: undouble a final
//!    consonant (`running` -> `run`), restore a silent `e` after a short
//!    stem (`making` -> `make`), `-ies` -> `-y`, and so on.
//!
//! The known base forms start from a small built-in list and grow with
//! every lexicon entry loaded. Words containing uppercase letters are only
//! mapped through the exception tables.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use cleantext_types::ResourceError;
use rustc_hash::{FxHashMap, FxHashSet};

/// Coarse part of speech used as a lemmatizer hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PartOfSpeech {
    /// Noun, the default hint.
    Noun = 0,
    /// Verb.
    Verb = 1,
    /// Adjective.
    Adjective = 2,
    /// Adverb.
    Adverb = 3,
}

impl PartOfSpeech {
    /// All parts of speech, in table order.
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    #[inline(always)]
    const fn index(self) -> usize {
        self as usize
    }

    /// Parses a WordNet part-of-speech code (`n`, `v`, `a`, `s`, `r`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "n" => Some(PartOfSpeech::Noun),
            "v" => Some(PartOfSpeech::Verb),
            "a" | "s" => Some(PartOfSpeech::Adjective),
            "r" => Some(PartOfSpeech::Adverb),
            _ => None,
        }
    }
}

/// Reduces a word to its dictionary base form.
pub trait Lemmatizer: Send + Sync {
    /// Lemmatizes `word` using `pos` as a hint. Empty input gives empty output.
    fn lemmatize<'w>(&self, word: &'w str, pos: PartOfSpeech) -> Cow<'w, str>;
}

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("people", "person"),
    ("oxen", "ox"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("data", "datum"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("alumni", "alumnus"),
];

const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("doing", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("ran", "run"),
    ("saw", "see"),
    ("seen", "see"),
    ("came", "come"),
    ("took", "take"),
    ("taken", "take"),
    ("made", "make"),
    ("got", "get"),
    ("gotten", "get"),
    ("said", "say"),
    ("told", "tell"),
    ("thought", "think"),
    ("brought", "bring"),
    ("bought", "buy"),
    ("caught", "catch"),
    ("taught", "teach"),
    ("began", "begin"),
    ("begun", "begin"),
    ("knew", "know"),
    ("known", "know"),
    ("gave", "give"),
    ("given", "give"),
    ("wrote", "write"),
    ("written", "write"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("broke", "break"),
    ("broken", "break"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("felt", "feel"),
    ("kept", "keep"),
    ("left", "leave"),
    ("lost", "lose"),
    ("met", "meet"),
    ("paid", "pay"),
    ("sat", "sit"),
    ("slept", "sleep"),
    ("stood", "stand"),
    ("understood", "understand"),
    ("won", "win"),
    ("sang", "sing"),
    ("sung", "sing"),
    ("swam", "swim"),
    ("flew", "fly"),
    ("flown", "fly"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("threw", "throw"),
    ("thrown", "throw"),
    ("found", "find"),
    ("held", "hold"),
    ("led", "lead"),
    ("meant", "mean"),
    ("sent", "send"),
    ("spent", "spend"),
    ("built", "build"),
    ("used", "use"),
    ("died", "die"),
    ("lying", "lie"),
    ("dying", "die"),
    ("tying", "tie"),
    ("agreed", "agree"),
    ("freed", "free"),
    ("guaranteed", "guarantee"),
];

const ADJECTIVE_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("further", "far"),
    ("furthest", "far"),
    ("farther", "far"),
    ("farthest", "far"),
    ("elder", "old"),
    ("eldest", "old"),
];

const ADVERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "well"),
    ("best", "well"),
    ("further", "far"),
    ("farther", "far"),
    ("harder", "hard"),
    ("hardest", "hard"),
    ("deeper", "deeply"),
];

/// Words that look inflected but are base forms.
#[rustfmt::skip]
const BASE_FORMS: &[&str] = &[
    // -s nouns and function words
    "news", "series", "species", "physics", "mathematics", "economics", "politics", "always",
    "perhaps", "sometimes", "towards", "afterwards", "besides", "does", "goes", "yes", "this",
    "thus", "bus", "gas", "lens", "its", "his", "hers", "ours", "yours", "theirs",
    // -ie nouns that the -ies rule would mangle
    "movie", "cookie", "zombie", "calorie", "rookie", "hippie", "pie", "tie",
    // -er / -est words that are not comparatives
    "other", "proper", "eager", "clever", "tender", "bitter", "upper", "inner", "outer",
    "former", "latter", "super", "sheer", "sober", "slender", "silver", "utter", "over", "under",
    "after", "ever", "never", "whether", "together", "either", "neither", "honest", "modest",
    "earnest", "forest",
    // -ed verbs
    "embed",
];

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

const SIBILANT_PLURALS: &[&str] = &["sses", "xes", "zzes", "ches", "shes"];

/// Rule-based lemmatizer with exception tables and an extensible lexicon.
#[derive(Debug, Clone)]
pub struct RuleLemmatizer {
    exceptions: [FxHashMap<String, String>; 4],
    base_forms: FxHashSet<String>,
}

impl Default for RuleLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleLemmatizer {
    /// Creates a lemmatizer with the built-in English tables.
    pub fn new() -> Self {
        let table = |pairs: &[(&str, &str)]| -> FxHashMap<String, String> {
            pairs
                .iter()
                .map(|&(w, l)| (w.to_owned(), l.to_owned()))
                .collect()
        };
        let exceptions = [
            table(NOUN_EXCEPTIONS),
            table(VERB_EXCEPTIONS),
            table(ADJECTIVE_EXCEPTIONS),
            table(ADVERB_EXCEPTIONS),
        ];

        let mut base_forms: FxHashSet<String> = BASE_FORMS.iter().map(|&w| w.to_owned()).collect();
        for map in &exceptions {
            base_forms.extend(map.values().cloned());
        }

        Self {
            exceptions,
            base_forms,
        }
    }

    /// Creates a lemmatizer and loads the lexicon at `path` on top.
    ///
    /// # Errors
    ///
    /// See [`RuleLemmatizer::load_lexicon`].
    pub fn with_lexicon(path: &Path) -> Result<Self, ResourceError> {
        let mut lemmatizer = Self::new();
        lemmatizer.load_lexicon(path)?;
        Ok(lemmatizer)
    }

    /// Adds one entry. Without `pos` the entry applies to every part of speech.
    pub fn insert(&mut self, word: &str, lemma: &str, pos: Option<PartOfSpeech>) {
        match pos {
            Some(pos) => {
                self.exceptions[pos.index()].insert(word.to_owned(), lemma.to_owned());
            }
            None => {
                for pos in PartOfSpeech::ALL {
                    self.exceptions[pos.index()].insert(word.to_owned(), lemma.to_owned());
                }
            }
        }
        self.base_forms.insert(lemma.to_owned());
    }

    /// Loads `word<TAB>lemma[<TAB>pos]` lines; blank lines and `#` comments are skipped.
    ///
    /// `pos` is a WordNet code: `n`, `v`, `a`/`s` or `r`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::Read` if the file cannot be read,
    /// `ResourceError::Malformed` for a bad line and `ResourceError::Empty`
    /// if the file has no entries.
    pub fn load_lexicon(&mut self, path: &Path) -> Result<usize, ResourceError> {
        let data = fs::read_to_string(path).map_err(|source| ResourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let malformed = |line: usize, reason: &'static str| ResourceError::Malformed {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let mut loaded = 0usize;
        for (idx, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut cols = line.split('\t').map(str::trim);
            let (Some(word), Some(lemma)) = (cols.next(), cols.next()) else {
                return Err(malformed(idx + 1, "expected word<TAB>lemma[<TAB>pos]"));
            };
            if word.is_empty() || lemma.is_empty() {
                return Err(malformed(idx + 1, "expected word<TAB>lemma[<TAB>pos]"));
            }
            let pos = match cols.next() {
                None | Some("") => None,
                Some(code) => Some(
                    PartOfSpeech::from_code(code)
                        .ok_or_else(|| malformed(idx + 1, "unknown part-of-speech code"))?,
                ),
            };
            if cols.next().is_some() {
                return Err(malformed(idx + 1, "too many columns"));
            }

            self.insert(word, lemma, pos);
            loaded += 1;
        }

        if loaded == 0 {
            return Err(ResourceError::Empty {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(path = %path.display(), entries = loaded, "lexicon loaded");
        Ok(loaded)
    }

    fn known_candidate(&self, word: &str, pos: PartOfSpeech) -> Option<String> {
        let rules = match pos {
            PartOfSpeech::Noun => NOUN_RULES,
            PartOfSpeech::Verb => VERB_RULES,
            PartOfSpeech::Adjective => ADJECTIVE_RULES,
            PartOfSpeech::Adverb => return None,
        };

        rules
            .iter()
            .filter_map(|&(suffix, ending)| {
                let stem = word.strip_suffix(suffix)?;
                if stem.is_empty() {
                    return None;
                }
                let candidate = format!("{stem}{ending}");
                self.base_forms.contains(&candidate).then_some(candidate)
            })
            .min_by_key(String::len)
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize<'w>(&self, word: &'w str, pos: PartOfSpeech) -> Cow<'w, str> {
        if word.is_empty() {
            return Cow::Borrowed(word);
        }
        if let Some(lemma) = self.exceptions[pos.index()].get(word) {
            return Cow::Owned(lemma.clone());
        }
        if self.base_forms.contains(word) || word.chars().any(char::is_uppercase) {
            return Cow::Borrowed(word);
        }
        if let Some(lemma) = self.known_candidate(word, pos) {
            return Cow::Owned(lemma);
        }

        let guessed = match pos {
            PartOfSpeech::Noun => noun_base(word),
            PartOfSpeech::Verb => verb_base(word),
            PartOfSpeech::Adjective => adjective_base(word),
            PartOfSpeech::Adverb => None,
        };
        guessed.map_or(Cow::Borrowed(word), Cow::Owned)
    }
}

#[inline]
fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[inline]
fn is_consonant(c: char) -> bool {
    c.is_alphabetic() && !is_vowel(c)
}

fn strip_sibilant_plural(word: &str) -> Option<String> {
    SIBILANT_PLURALS
        .iter()
        .any(|s| word.ends_with(s))
        .then(|| word[..word.len() - 2].to_owned())
}

fn with_suffix(stem: &str, suffix: &str) -> String {
    let mut out = String::with_capacity(stem.len() + suffix.len());
    out.push_str(stem);
    out.push_str(suffix);
    out
}

fn noun_base(word: &str) -> Option<String> {
    if word.chars().count() <= 3 {
        return None;
    }
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.chars().count() >= 3 {
            return Some(with_suffix(stem, "y"));
        }
    }
    if let Some(base) = strip_sibilant_plural(word) {
        return Some(base);
    }
    if ["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return None;
    }
    word.strip_suffix('s')
        .filter(|stem| !stem.ends_with('\''))
        .map(str::to_owned)
}

fn verb_base(word: &str) -> Option<String> {
    if word.chars().count() <= 3 {
        return None;
    }
    for (suffix, ending) in [("ies", "y"), ("ied", "y")] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.chars().count() >= 2 {
                return Some(with_suffix(stem, ending));
            }
        }
    }
    if let Some(stem) = word.strip_suffix("ing") {
        return restore_stem(stem);
    }
    if word.ends_with("eed") {
        return None;
    }
    if let Some(stem) = word.strip_suffix("ed") {
        return restore_stem(stem);
    }
    if let Some(base) = strip_sibilant_plural(word) {
        return Some(base);
    }
    if ["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return None;
    }
    word.strip_suffix('s').map(str::to_owned)
}

fn adjective_base(word: &str) -> Option<String> {
    let n = word.chars().count();
    let stem = match (word.strip_suffix("est"), word.strip_suffix("er")) {
        (Some(stem), _) if n > 5 => stem,
        (_, Some(stem)) if n > 4 => stem,
        _ => return None,
    };

    if let Some(head) = stem.strip_suffix('i') {
        return Some(with_suffix(head, "y"));
    }
    let chars: Vec<char> = stem.chars().collect();
    if let Some(base) = undouble(stem, &chars) {
        return Some(base);
    }
    if is_short_cvc(&chars) {
        return Some(with_suffix(stem, "e"));
    }
    Some(stem.to_owned())
}

/// Rebuilds a verb base from what is left after `-ing` / `-ed`.
fn restore_stem(stem: &str) -> Option<String> {
    let chars: Vec<char> = stem.chars().collect();
    if !chars.iter().copied().any(is_vowel) {
        return None;
    }
    if let Some(base) = undouble(stem, &chars) {
        return Some(base);
    }

    let n = chars.len();
    let last = chars[n - 1];
    let needs_e = match n {
        2 => is_vowel(chars[0]) && is_consonant(last),
        _ => {
            last == 'v'
                || (matches!(last, 'c' | 'z') && is_vowel(chars[n - 2]))
                || is_short_cvc(&chars)
        }
    };

    if needs_e {
        Some(with_suffix(stem, "e"))
    } else {
        Some(stem.to_owned())
    }
}

/// `runn` -> `run`, but `fall`, `miss` and `buzz` keep their double letter.
fn undouble(stem: &str, chars: &[char]) -> Option<String> {
    let n = chars.len();
    if n < 3 {
        return None;
    }
    let (prev, last) = (chars[n - 2], chars[n - 1]);
    if prev == last && is_consonant(last) && !matches!(last, 'l' | 's' | 'z') {
        return Some(stem[..stem.len() - last.len_utf8()].to_owned());
    }
    None
}

/// Three letters, consonant-vowel-consonant, last one not `w`, `x` or `y`.
fn is_short_cvc(chars: &[char]) -> bool {
    matches!(chars, [a, b, c]
        if is_consonant(*a) && is_vowel(*b) && is_consonant(*c) && !matches!(c, 'w' | 'x' | 'y'))
}
