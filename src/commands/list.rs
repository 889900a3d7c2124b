//! List the article index

use anyhow::Result;

use crate::index::ArticleIndex;
use crate::BlogIndex;

/// Print the articles the home page would list
pub fn run(site: &BlogIndex) -> Result<()> {
    let report = site.build()?;
    print!("{}", format_listing(&report.index));

    if !report.skipped.is_empty() {
        println!();
        println!("Skipped ({}):", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {} - {}", skipped.route, skipped.reason);
        }
    }

    Ok(())
}

/// Plain-text rendition of the article list
pub fn format_listing(index: &ArticleIndex) -> String {
    if index.is_empty() {
        return "No posts available yet.\n".to_string();
    }

    let mut out = format!("Posts ({}):\n", index.len());
    for entry in index {
        out.push_str(&format!(
            "  {} • {}  {} [{}]\n",
            entry.date, entry.author, entry.title, entry.route
        ));
        out.push_str(&format!("      {}\n", entry.description));
        if !entry.tags.is_empty() {
            let tags: Vec<String> = entry.tags.iter().map(|t| format!("#{}", t)).collect();
            out.push_str(&format!("      {}\n", tags.join(" ")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldDefaults;
    use crate::content::{FrontMatter, MarkdownDocument};
    use crate::index::build_index;

    #[test]
    fn test_empty_listing() {
        assert_eq!(
            format_listing(&ArticleIndex::default()),
            "No posts available yet.\n"
        );
    }

    #[test]
    fn test_listing() {
        let mut tagged = FrontMatter::default();
        tagged.insert("title", vec!["Compose tips".to_string()]);
        tagged.insert("description", vec!["Small things".to_string()]);
        tagged.insert("date", vec!["2024-01-20".to_string()]);
        tagged.insert("tags", vec!["kotlin".to_string(), "compose".to_string()]);

        let mut plain = FrontMatter::default();
        plain.insert("title", vec!["Hello".to_string()]);
        plain.insert("description", vec!["First post".to_string()]);
        plain.insert("date", vec!["2024-01-15".to_string()]);
        plain.insert("author", vec!["Guest".to_string()]);

        let documents = [
            MarkdownDocument::new("/blog/hello", plain, ""),
            MarkdownDocument::new("/blog/compose-tips", tagged, ""),
        ];
        let index = build_index(&documents, &FieldDefaults::default()).index;

        assert_eq!(
            format_listing(&index),
            "Posts (2):\n\
             \x20 2024-01-20 • Preetam  Compose tips [/blog/compose-tips]\n\
             \x20     Small things\n\
             \x20     #kotlin #compose\n\
             \x20 2024-01-15 • Guest  Hello [/blog/hello]\n\
             \x20     First post\n"
        );
    }
}
