//! Penn Treebank word tokenizer.
//!
//! Slower than the split tokenizers but linguistically aware: quotes become
//! `` `` `` / `''`, punctuation and brackets are split off, the final period
//! of each sentence becomes its own token and clitics are separated
//! (`don't` -> `do n't`, `I'm` -> `I 'm`, `cannot` -> `can not`).
//!
//! Text is first split into sentences so that every sentence-final period
//! is detached, not only the last one of the text.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Tokenizer producing owned word tokens.
pub trait WordTokenizer: Send + Sync {
    /// Splits `text` into tokens, left to right.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    #[inline]
    fn apply(&self, text: String) -> String {
        let replaced = match self.pattern.replace_all(&text, self.replacement) {
            Cow::Owned(replaced) => Some(replaced),
            Cow::Borrowed(_) => None,
        };
        replaced.unwrap_or(text)
    }
}

static STARTING_QUOTES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r#"^""#, "``"),
        Rule::new(r"(``)", " ${1} "),
        Rule::new(r#"([ (\[{<])("|'')"#, "${1} `` "),
    ]
});

static PUNCTUATION: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"([:,])([^\d])", " ${1} ${2}"),
        Rule::new(r"([:,])$", " ${1} "),
        Rule::new(r"\.\.\.", " ... "),
        Rule::new(r"[;@#$%&]", " ${0} "),
        Rule::new(r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2}${3} "),
        Rule::new(r"[?!]", " ${0} "),
        Rule::new(r"([^'])' ", "${1} ' "),
    ]
});

static BRACKETS: Lazy<Rule> = Lazy::new(|| Rule::new(r"[\]\[(){}<>]", " ${0} "));

static DOUBLE_DASHES: Lazy<Rule> = Lazy::new(|| Rule::new(r"--", " -- "));

static ENDING_QUOTES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r#"""#, " '' "),
        Rule::new(r"(\S)('')", "${1} ${2} "),
        Rule::new(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
        Rule::new(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
    ]
});

static CONTRACTIONS: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"(?i)\b(can)(not)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(more)('n)\b", " ${1} ${2} "),
        Rule::new(r"(?i)\b(wan)(na)\b", " ${1} ${2} "),
        Rule::new(r"(?i) ('t)(is)\b", " ${1} ${2} "),
        Rule::new(r"(?i) ('t)(was)\b", " ${1} ${2} "),
    ]
});

/// Abbreviations whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co", "corp",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "e.g",
    "i.e", "u.s", "no", "fig",
];

/// Treebank-style tokenizer with sentence splitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreebankTokenizer;

impl TreebankTokenizer {
    /// Creates the tokenizer. Patterns compile once per process.
    pub fn new() -> Self {
        Self
    }

    /// Tokenizes a single sentence.
    pub fn tokenize_sentence(&self, sentence: &str) -> Vec<String> {
        let mut text = sentence.to_owned();
        for rule in STARTING_QUOTES.iter() {
            text = rule.apply(text);
        }
        for rule in PUNCTUATION.iter() {
            text = rule.apply(text);
        }
        text = BRACKETS.apply(text);
        text = DOUBLE_DASHES.apply(text);

        let mut padded = String::with_capacity(text.len() + 2);
        padded.push(' ');
        padded.push_str(&text);
        padded.push(' ');
        text = padded;

        for rule in ENDING_QUOTES.iter() {
            text = rule.apply(text);
        }
        for rule in CONTRACTIONS.iter() {
            text = rule.apply(text);
        }

        text.split_whitespace().map(str::to_owned).collect()
    }
}

impl WordTokenizer for TreebankTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        sentences(text)
            .into_iter()
            .flat_map(|s| self.tokenize_sentence(s))
            .collect()
    }
}

/// Splits `text` after `.`, `!` or `?` (plus closing quotes/brackets) that
/// are followed by whitespace, unless the period closes an abbreviation or
/// a single-letter initial.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if matches!(next, '.' | '!' | '?' | '"' | '\'' | ')' | ']' | '}') {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let at_boundary = matches!(chars.peek(), Some(&(_, next)) if next.is_whitespace());
        if !at_boundary {
            continue;
        }
        if c == '.' && ends_with_abbreviation(&text[start..i]) {
            continue;
        }

        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            out.push(sentence);
        }
        start = end;
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

fn ends_with_abbreviation(before: &str) -> bool {
    let word = before
        .rsplit(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default();
    let mut letters = word.chars();
    if let (Some(first), None) = (letters.next(), letters.next()) {
        return first.is_alphabetic();
    }
    ABBREVIATIONS
        .iter()
        .any(|abbr| word.eq_ignore_ascii_case(abbr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(s: &str) -> Vec<String> {
        TreebankTokenizer::new().tokenize(s)
    }

    #[test]
    fn splits_contraction_and_final_period() {
        assert_eq!(tok("Don't stop."), ["Do", "n't", "stop", "."]);
    }

    #[test]
    fn plain_sentence() {
        assert_eq!(
            tok("The striped bats were hanging on their feet"),
            ["The", "striped", "bats", "were", "hanging", "on", "their", "feet"]
        );
    }

    #[test]
    fn clitics() {
        assert_eq!(tok("I'm sure they'll go"), ["I", "'m", "sure", "they", "'ll", "go"]);
        assert_eq!(tok("John's car"), ["John", "'s", "car"]);
    }

    #[test]
    fn multiword_contractions() {
        assert_eq!(tok("I cannot go"), ["I", "can", "not", "go"]);
        assert_eq!(tok("gonna win"), ["gon", "na", "win"]);
    }

    #[test]
    fn quotes_are_converted() {
        assert_eq!(
            tok(r#""Hello," she said."#),
            ["``", "Hello", ",", "''", "she", "said", "."]
        );
    }

    #[test]
    fn punctuation_and_brackets() {
        assert_eq!(
            tok("Wait (really)? Yes; 50% off!"),
            ["Wait", "(", "really", ")", "?", "Yes", ";", "50", "%", "off", "!"]
        );
    }

    #[test]
    fn numbers_keep_their_commas() {
        assert_eq!(tok("1,000 people"), ["1,000", "people"]);
    }

    #[test]
    fn every_sentence_period_split() {
        assert_eq!(tok("It works. Ship it."), ["It", "works", ".", "Ship", "it", "."]);
    }

    #[test]
    fn abbreviations_do_not_end_sentences() {
        assert_eq!(sentences("Mr. Smith left. Bye."), ["Mr. Smith left.", "Bye."]);
        assert_eq!(sentences("J. Doe wrote it."), ["J. Doe wrote it."]);
    }

    #[test]
    fn sentence_split_keeps_closing_quotes() {
        assert_eq!(
            sentences(r#"He said "go!" Then left."#),
            [r#"He said "go!""#, "Then left."]
        );
    }

    #[test]
    fn empty_input() {
        assert!(tok("").is_empty());
        assert!(tok("   ").is_empty());
        assert!(sentences("").is_empty());
    }
}
