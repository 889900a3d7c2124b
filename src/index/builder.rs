//! Article index builder
//!
//! Turns markdown documents into the sorted list of article summaries shown
//! on the home page. Documents with incomplete front-matter are skipped and
//! reported, never fatal.

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::config::FieldDefaults;
use crate::content::{FrontMatter, MarkdownDocument};
use crate::helpers::is_iso_date;

pub const TITLE_KEY: &str = "title";
pub const DESCRIPTION_KEY: &str = "description";
pub const DATE_KEY: &str = "date";
pub const AUTHOR_KEY: &str = "author";
pub const TAGS_KEY: &str = "tags";

/// Summary of one publishable post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleEntry {
    /// Route of the post page
    #[serde(rename = "path")]
    pub route: String,
    pub author: String,
    /// Front-matter date, verbatim
    pub date: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Why a document produced no entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` has {count} values, expected exactly one")]
    NotSingleValued { field: &'static str, count: usize },
}

/// A document left out of the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub route: String,
    pub reason: SkipReason,
}

/// Articles sorted newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ArticleIndex {
    entries: Vec<ArticleEntry>,
}

impl ArticleIndex {
    pub fn entries(&self) -> &[ArticleEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArticleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ArticleIndex {
    type Item = &'a ArticleEntry;
    type IntoIter = std::slice::Iter<'a, ArticleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Result of one index build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub index: ArticleIndex,
    pub skipped: Vec<SkippedDocument>,
}

/// Build the article index from a set of documents.
///
/// Entries are ordered by `date` descending using plain string comparison,
/// then by route. Dates are never parsed; non-ISO dates are only reported.
pub fn build_index(documents: &[MarkdownDocument], defaults: &FieldDefaults) -> BuildReport {
    let mut entries = Vec::with_capacity(documents.len());
    let mut skipped = Vec::new();

    for document in documents {
        match article_entry(document, defaults) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                tracing::warn!("Skipping {}: {}", document.route, reason);
                skipped.push(SkippedDocument {
                    route: document.route.clone(),
                    reason,
                });
            }
        }
    }

    report_suspicious_entries(&entries);

    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.route.cmp(&b.route)));

    BuildReport {
        index: ArticleIndex { entries },
        skipped,
    }
}

/// Derive the entry for one document
pub fn article_entry(
    document: &MarkdownDocument,
    defaults: &FieldDefaults,
) -> Result<ArticleEntry, SkipReason> {
    let fm = &document.front_matter;

    let title = required(fm, TITLE_KEY)?;
    let description = required(fm, DESCRIPTION_KEY)?;
    let date = required(fm, DATE_KEY)?;

    let author = match fm.single(AUTHOR_KEY) {
        Some(author) => author.to_string(),
        None => {
            if let Some(values) = fm.get(AUTHOR_KEY) {
                tracing::debug!(
                    "{}: `{}` has {} values, using default author",
                    document.route,
                    AUTHOR_KEY,
                    values.len()
                );
            }
            defaults.author.clone()
        }
    };

    let tags = fm
        .get(TAGS_KEY)
        .map(<[String]>::to_vec)
        .unwrap_or_else(|| defaults.tags.clone());

    Ok(ArticleEntry {
        route: document.route.clone(),
        author,
        date: date.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        tags,
    })
}

fn required<'a>(fm: &'a FrontMatter, field: &'static str) -> Result<&'a str, SkipReason> {
    match fm.get(field) {
        None => Err(SkipReason::MissingField(field)),
        Some([value]) => Ok(value.as_str()),
        Some(values) => Err(SkipReason::NotSingleValued {
            field,
            count: values.len(),
        }),
    }
}

/// Warn about entries that are kept but likely wrong
fn report_suspicious_entries(entries: &[ArticleEntry]) {
    let mut routes = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !is_iso_date(&entry.date) {
            tracing::warn!(
                "{}: date {:?} is not ISO-8601, ordering may be wrong",
                entry.route,
                entry.date
            );
        }
        if !routes.insert(entry.route.as_str()) {
            tracing::warn!("Duplicate route {}", entry.route);
        }
    }
}
