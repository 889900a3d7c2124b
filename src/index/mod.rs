//! Index module - builds and emits the article index

mod builder;
pub mod emit;

pub use builder::{
    article_entry, build_index, ArticleEntry, ArticleIndex, BuildReport, SkipReason,
    SkippedDocument,
};
