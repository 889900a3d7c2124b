//! Markdown documents and their routes

use heck::ToKebabCase;
use std::path::{Component, Path};

use super::FrontMatter;

/// Front-matter key that replaces the route derived from the file path
pub const ROUTE_OVERRIDE_KEY: &str = "routeOverride";

/// A markdown source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocument {
    /// Canonical route of the rendered page
    pub route: String,
    /// Parsed front-matter
    pub front_matter: FrontMatter,
    /// Raw markdown body
    pub body: String,
}

impl MarkdownDocument {
    pub fn new(route: impl Into<String>, front_matter: FrontMatter, body: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            front_matter,
            body: body.into(),
        }
    }
}

/// Derive the route of a markdown file from its path relative to the posts dir.
///
/// Directories are lowercased, the file stem is kebab-cased and an `index`
/// stem stands for its directory.
pub fn route_for(relative: &Path, prefix: &str) -> String {
    let mut segments: Vec<String> = Vec::new();

    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            if let Component::Normal(dir) = component {
                segments.push(dir.to_string_lossy().to_lowercase());
            }
        }
    }

    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().to_kebab_case())
        .unwrap_or_default();
    if !stem.is_empty() && stem != "index" {
        segments.push(stem);
    }

    join_route(prefix, &segments)
}

/// Apply a `routeOverride` value to a derived route.
///
/// An absolute override replaces the route; a relative one replaces its last
/// segment.
pub fn apply_route_override(route: &str, route_override: &str) -> String {
    let route_override = route_override.trim();
    if route_override.starts_with('/') {
        return normalize_prefix(route_override);
    }

    let parent = match route.rfind('/') {
        Some(pos) => &route[..pos],
        None => "",
    };
    let segment = route_override.trim_end_matches('/');
    join_route(parent, &[segment.to_string()])
}

fn join_route(prefix: &str, segments: &[String]) -> String {
    let mut route = normalize_prefix(prefix);
    for segment in segments.iter().filter(|s| !s.is_empty()) {
        if !route.ends_with('/') {
            route.push('/');
        }
        route.push_str(segment);
    }
    route
}

/// `blog/` -> `/blog`, empty -> `/`
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_for_simple_file() {
        assert_eq!(route_for(Path::new("hello-world.md"), "/blog"), "/blog/hello-world");
        assert_eq!(route_for(Path::new("hello-world.md"), ""), "/hello-world");
    }

    #[test]
    fn test_route_for_kebab_cases_stem() {
        assert_eq!(route_for(Path::new("AboutMe.md"), "/"), "/about-me");
        assert_eq!(route_for(Path::new("my_first_post.md"), "/blog"), "/blog/my-first-post");
    }

    #[test]
    fn test_route_for_nested_and_index() {
        assert_eq!(
            route_for(Path::new("Kotlin/Compose-Tips.md"), "blog/"),
            "/blog/kotlin/compose-tips"
        );
        assert_eq!(route_for(Path::new("kotlin/index.md"), "/blog"), "/blog/kotlin");
        assert_eq!(route_for(Path::new("index.md"), ""), "/");
    }

    #[test]
    fn test_route_override() {
        assert_eq!(apply_route_override("/blog/old-name", "new-name"), "/blog/new-name");
        assert_eq!(apply_route_override("/blog/old-name", "/elsewhere/"), "/elsewhere");
        assert_eq!(apply_route_override("/old-name", "renamed"), "/renamed");
    }
}
