//! cleantext: normalize the text field of JSON-lines records.
//!
//! Reads one JSON object per line from a file or stdin, normalizes the
//! configured text field and writes the records to stdout, one per line.
//! Logs, including the closing summary, go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! # Defaults: strip links, clean, drop stopwords, lemmatize, multivalue output
//! cleantext --textfield body < records.jsonl
//!
//! # Part-of-speech aware lemmas with universal tags, joined output
//! cleantext --textfield body --base-type lemma_pos --pos-tagset universal --mv f records.jsonl
//!
//! # Options from a TOML file, one of them overridden
//! cleantext --config cleantext.toml --remove-stopwords no records.jsonl
//! ```
//!
//! Boolean options take `true/false`, `t/f`, `yes/no`, `y/n` or `1/0`.
//! Empty values are left out of multivalue fields on output.
//!
//! Set `RUST_LOG=cleantext_core=debug` for per-record logging.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cleantext_core::{
    load_config, BaseType, CleanConfig, ErrorPolicy, Normalizer, Record, StreamStats, Tagset,
};
use cleantext_types::{parse_bool, ConfigError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cleantext", version, about = "Normalize a text field of JSON-lines records")]
struct Cli {
    /// JSON-lines input; stdin when omitted.
    input: Option<PathBuf>,
    /// TOML file with options; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Field to normalize.
    #[arg(long)]
    textfield: Option<String>,
    /// Lowercase and strip punctuation and digits.
    #[arg(long, value_parser = flag)]
    default_clean: Option<bool>,
    /// Delete http(s) links.
    #[arg(long, value_parser = flag)]
    remove_urls: Option<bool>,
    /// Drop stopwords.
    #[arg(long, value_parser = flag)]
    remove_stopwords: Option<bool>,
    /// Reduce words to a base form.
    #[arg(long, value_parser = flag)]
    base_word: Option<bool>,
    /// Base form mode: lemma, lemma_pos or stem.
    #[arg(long)]
    base_type: Option<BaseType>,
    /// Multivalue output instead of space-joined strings.
    #[arg(long, alias = "multivalue", value_parser = flag)]
    mv: Option<bool>,
    /// Use the treebank tokenizer.
    #[arg(long, alias = "force-nltk-tokenize", value_parser = flag)]
    force_tokenizer: Option<bool>,
    /// Tagset for lemma_pos: universal, wsj or brown.
    #[arg(long)]
    pos_tagset: Option<Tagset>,
    /// Field receiving part-of-speech tags.
    #[arg(long)]
    tag_field: Option<String>,
    /// Stopword list replacing the built-in one.
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Extra lemmatizer entries.
    #[arg(long)]
    lexicon: Option<PathBuf>,
    /// Per-record errors: fail, skip or passthrough.
    #[arg(long)]
    on_error: Option<ErrorPolicy>,
}

fn flag(value: &str) -> Result<bool, ConfigError> {
    parse_bool("flag", value)
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl Cli {
    /// Splits off the input path and resolves the configuration.
    fn into_parts(self) -> Result<(Option<PathBuf>, CleanConfig)> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => CleanConfig::default(),
        };

        set(&mut config.textfield, self.textfield);
        set(&mut config.default_clean, self.default_clean);
        set(&mut config.remove_urls, self.remove_urls);
        set(&mut config.remove_stopwords, self.remove_stopwords);
        set(&mut config.base_word, self.base_word);
        set(&mut config.base_type, self.base_type);
        set(&mut config.multivalue, self.mv);
        set(&mut config.force_tokenizer, self.force_tokenizer);
        set(&mut config.tag_field, self.tag_field);
        set(&mut config.on_error, self.on_error);
        if self.pos_tagset.is_some() {
            config.pos_tagset = self.pos_tagset;
        }
        if self.stopwords.is_some() {
            config.stopwords_path = self.stopwords;
        }
        if self.lexicon.is_some() {
            config.lexicon_path = self.lexicon;
        }

        Ok((self.input, config))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("cleantext=info".parse()?)
                .add_directive("cleantext_core=info".parse()?),
        )
        .init();

    let (input, config) = Cli::parse().into_parts()?;
    let normalizer = Normalizer::new(config).context("cannot build normalizer")?;

    let reader: Box<dyn BufRead> = match &input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let mut out = BufWriter::new(io::stdout().lock());

    let stats = run(&normalizer, reader, &mut out)?;
    out.flush().context("cannot flush stdout")?;

    tracing::info!(%stats, "done");
    Ok(())
}

/// Streams records from `reader` through `normalizer` into `out`.
fn run<R: BufRead, W: Write>(normalizer: &Normalizer, reader: R, out: &mut W) -> Result<StreamStats> {
    let mut input_error: Option<anyhow::Error> = None;

    let records = reader
        .lines()
        .enumerate()
        .filter(|(_, line)| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map_while(|(idx, line)| {
            let parsed = line
                .with_context(|| format!("cannot read line {}", idx + 1))
                .and_then(|l| {
                    serde_json::from_str::<Record>(&l)
                        .with_context(|| format!("line {} is not a JSON record", idx + 1))
                });
            match parsed {
                Ok(record) => Some(record),
                Err(err) => {
                    input_error = Some(err);
                    None
                }
            }
        });

    let mut stream = normalizer.stream(records);
    while let Some(result) = stream.next() {
        let mut record = match result {
            Ok(record) => record,
            Err(err) => {
                tracing::info!(stats = %stream.stats(), "aborted");
                return Err(err).context("record failed to normalize");
            }
        };
        record.drop_empty_values();
        serde_json::to_writer(&mut *out, &record).context("cannot write record")?;
        out.write_all(b"\n").context("cannot write record")?;
    }
    let stats = *stream.stats();
    drop(stream);

    match input_error {
        Some(err) => {
            tracing::info!(%stats, "aborted");
            Err(err)
        }
        None => Ok(stats),
    }
}
