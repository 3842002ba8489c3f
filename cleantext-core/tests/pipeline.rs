use std::io::Write;
use std::path::Path;

use cleantext_core::analyzer::{RuleLemmatizer, StopwordSet};
use cleantext_core::{
    load_config, BaseType, BuildError, CleanConfig, ConfigError, ErrorPolicy, FieldValue,
    NormalizeError, Normalizer, Record, ResourceError, Resources, Shaped, Tagset,
};

fn normalizer(config: CleanConfig) -> Normalizer {
    Normalizer::new(config).expect("normalizer")
}

fn tokens(n: &Normalizer, text: &str) -> Vec<String> {
    n.normalize_str(text)
        .unwrap()
        .tokens
        .as_multi()
        .expect("multivalue output")
        .to_vec()
}

fn record(id: &str, text: &str) -> Record {
    [("id", id), ("text", text)].into_iter().collect()
}

fn temp_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn multi(values: &[&str]) -> FieldValue {
    FieldValue::Multi(values.iter().map(|s| s.to_string()).collect())
}

// --- end to end ---

#[test]
fn defaults_strip_link_stopwords_and_inflection() {
    let n = normalizer(CleanConfig::new("text"));
    let mut out = n
        .process(record("1", "Check this out http://x.co/a great site!!"))
        .unwrap();
    out.drop_empty_values();
    assert_eq!(out.get("text"), Some(&multi(&["check", "great", "site"])));
    assert_eq!(out.get_text("id"), Some("1"));
}

#[test]
fn clean_only_joined() {
    let n = normalizer(CleanConfig {
        base_word: false,
        remove_stopwords: false,
        default_clean: true,
        multivalue: false,
        ..CleanConfig::new("text")
    });
    let out = n.process(record("2", "Cats are running FAST")).unwrap();
    assert_eq!(out.get_text("text"), Some("cats are running fast"));
}

#[test]
fn stemming_is_deterministic() {
    let n = normalizer(CleanConfig {
        base_type: BaseType::Stem,
        remove_stopwords: false,
        default_clean: false,
        ..CleanConfig::new("text")
    });
    let first = tokens(&n, "running runner runs");
    assert_eq!(first, ["run", "runner", "run"]);
    assert_eq!(tokens(&n, "running runner runs"), first);
}

#[test]
fn lemma_pos_record_gets_parallel_tags() {
    let n = normalizer(CleanConfig {
        base_type: BaseType::LemmaPos,
        pos_tagset: Some(Tagset::Brown),
        ..CleanConfig::new("text")
    });
    let out = n
        .process(record("3", "The striped bats were hanging on their feet"))
        .unwrap();
    assert_eq!(out.get("text"), Some(&multi(&["strip", "bat", "hang", "foot"])));
    assert_eq!(out.get("pos_tag"), Some(&multi(&["VBD", "NNS", "VBG", "NN"])));
    let names: Vec<&str> = out.iter().map(|(k, _)| k).collect();
    assert_eq!(names, ["id", "text", "pos_tag"]);
}

#[test]
fn lemma_pos_ignores_stopword_flag_when_clean_is_off() {
    let n = normalizer(CleanConfig {
        base_type: BaseType::LemmaPos,
        default_clean: false,
        ..CleanConfig::new("text")
    });
    let out = n.normalize_str("The bats").unwrap();
    assert_eq!(out.tokens.as_multi().unwrap(), ["The", "bat"]);
    assert_eq!(out.tags.unwrap().as_multi().unwrap(), ["DT", "NNS"]);
}

#[test]
fn forced_tokenizer_without_other_stages() {
    let n = normalizer(CleanConfig {
        force_tokenizer: true,
        default_clean: false,
        remove_stopwords: false,
        base_word: false,
        ..CleanConfig::new("text")
    });
    assert_eq!(tokens(&n, "Don't stop."), ["Do", "n't", "stop", "."]);
}

#[test]
fn whitespace_split_without_cleaning() {
    let n = normalizer(CleanConfig {
        default_clean: false,
        remove_stopwords: false,
        base_word: false,
        ..CleanConfig::new("text")
    });
    assert_eq!(tokens(&n, "  Hello, World! "), ["Hello,", "World!"]);
}

#[test]
fn links_survive_when_removal_is_off() {
    let n = normalizer(CleanConfig {
        remove_urls: false,
        ..CleanConfig::minimal("text")
    });
    let out = tokens(&n, "visit https://example.org today");
    assert!(out.contains(&"https".to_string()));
    assert!(out.contains(&"example".to_string()));
}

#[test]
fn empty_text_yields_one_empty_token() {
    let n = normalizer(CleanConfig::new("text"));
    assert_eq!(tokens(&n, ""), [""]);

    let mut out = n.process(record("4", "")).unwrap();
    out.drop_empty_values();
    assert_eq!(out.get("text"), Some(&FieldValue::Multi(Vec::new())));
}

#[test]
fn joined_and_multi_agree() {
    let text = "Striped bats hang from old wooden beams";
    let multi_out = tokens(&normalizer(CleanConfig::new("text")), text);
    let joined = normalizer(CleanConfig {
        multivalue: false,
        ..CleanConfig::new("text")
    })
    .normalize_str(text)
    .unwrap();
    assert_eq!(joined.tokens, Shaped::Joined(multi_out.join(" ")));
}

// --- streams ---

#[test]
fn stream_policies() {
    let input = || {
        vec![
            record("1", "first cats"),
            [("id", "2")].into_iter().collect::<Record>(),
            record("3", "third dogs"),
        ]
    };

    let n = normalizer(CleanConfig::new("text"));
    let results: Vec<_> = n.stream(input()).collect();
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[1],
        Err(NormalizeError::MissingField("text".into()))
    );

    let mut skip = n.stream(input()).with_policy(ErrorPolicy::Skip);
    let ids: Vec<String> = skip
        .by_ref()
        .map(|r| r.unwrap().get_text("id").unwrap().to_owned())
        .collect();
    assert_eq!(ids, ["1", "3"]);
    assert_eq!(skip.stats().skipped, 1);
    assert_eq!(skip.stats().errors(), 1);

    let passed: Vec<Record> = n
        .stream(input())
        .with_policy(ErrorPolicy::PassThrough)
        .map(Result::unwrap)
        .collect();
    assert_eq!(passed.len(), 3);
    assert_eq!(passed[1].get("text"), None);
}

#[test]
fn stream_stats_display() {
    let n = normalizer(CleanConfig::new("text"));
    let mut stream = n.stream(vec![record("1", "cats"), record("2", "dogs barking")]);
    for result in stream.by_ref() {
        result.unwrap();
    }
    assert_eq!(
        stream.stats().to_string(),
        "2 records in, 2 emitted, 3 tokens (1.5/record)"
    );
}

// --- resources ---

#[test]
fn stopword_file_replaces_builtin_list() {
    let file = temp_file("# custom\ncats\n\nsleep\n");
    let n = normalizer(CleanConfig {
        base_word: false,
        stopwords_path: Some(file.path().to_path_buf()),
        ..CleanConfig::new("text")
    });
    assert_eq!(tokens(&n, "the cats sleep dogs"), ["the", "dogs"]);
    assert_eq!(n.resources().stopwords().len(), 2);
}

#[test]
fn lexicon_file_extends_lemmatizer() {
    let file = temp_file("foos\tfoozle\tn\n");
    let n = normalizer(CleanConfig {
        lexicon_path: Some(file.path().to_path_buf()),
        ..CleanConfig::new("text")
    });
    assert_eq!(tokens(&n, "foos"), ["foozle"]);
}

#[test]
fn resources_can_be_supplied_directly() {
    let mut lemmatizer = RuleLemmatizer::new();
    lemmatizer.insert("gizmos", "gadget", None);
    let resources = Resources::builtin()
        .with_lemmatizer(lemmatizer)
        .with_stopwords(StopwordSet::from_words(["widget"]));
    let n = Normalizer::with_resources(CleanConfig::new("text"), resources).unwrap();
    assert_eq!(tokens(&n, "widget gizmos"), ["gadget"]);
}

#[test]
fn missing_resource_fails_build() {
    let err = Normalizer::new(CleanConfig {
        stopwords_path: Some("/no/such/stopwords.txt".into()),
        ..CleanConfig::new("text")
    })
    .unwrap_err();
    assert!(matches!(
        err,
        BuildError::Resource(ResourceError::Read { .. })
    ));
}

#[test]
fn malformed_lexicon_fails_build() {
    let file = temp_file("good\tgood\nbroken\n");
    let err = Normalizer::new(CleanConfig {
        lexicon_path: Some(file.path().to_path_buf()),
        ..CleanConfig::new("text")
    })
    .unwrap_err();
    assert!(matches!(
        err,
        BuildError::Resource(ResourceError::Malformed { line: 2, .. })
    ));
}

// --- configuration ---

#[test]
fn config_file_drives_normalizer() {
    let file = temp_file(
        "textfield = \"body\"\nbase_type = \"stem\"\nremove_stopwords = false\nmv = false\n",
    );
    let n = normalizer(load_config(file.path()).unwrap());
    let mut r: Record = [("body", "Connections running")].into_iter().collect();
    n.process_in_place(&mut r).unwrap();
    assert_eq!(r.get_text("body"), Some("connect run"));
}

#[test]
fn config_without_textfield_fails_build() {
    let file = temp_file("mv = true\n");
    let config = load_config(file.path()).unwrap();
    assert!(matches!(
        Normalizer::new(config),
        Err(BuildError::Config(ConfigError::MissingTextField))
    ));
}

#[test]
fn config_errors() {
    assert!(matches!(
        load_config(Path::new("/no/such/config.toml")),
        Err(ConfigError::Read { .. })
    ));
    let file = temp_file("textfield = [\n");
    assert!(matches!(
        load_config(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}
