//! The staged record normalizer.
//!
//! A [`Normalizer`] turns its configuration into a short list of
//! [`Stage`]s once, at build time. Every text then runs through that list
//! in a fixed order:
//!
//! ```text
//! strip-urls? > tokenize(path) > clean? > reduce | stopwords?
//! ```
//!
//! The tokenize stage carries the strategy ([`TokenizePath`]) and the reduce
//! stage its mode ([`BaseMode`]), so per-record execution never re-reads
//! configuration flags.
//!
//! Threading:
//! - [`Normalizer`] is `Send + Sync`; resources are immutable and shared
//!   through `Arc`. Records can be processed from several threads, callers
//!   keep their own ordering.

mod api;
mod stages;
mod stats;
mod stream;
mod types;

pub use stats::StreamStats;
pub use stream::NormalizeStream;
pub use types::{BaseMode, InlineFilter, Normalizer, Stage, TokenizePath, MAX_STAGES};
