//! Generate the article index artifact

use anyhow::Result;
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::index::emit;
use crate::BlogIndex;

/// Build the index and write the artifact, returning its path
pub fn run(site: &BlogIndex) -> Result<PathBuf> {
    let start = Instant::now();

    let report = site.build()?;
    let contents = emit::render(&report.index, site.config.format)?;
    let path = site.artifact_path();
    emit::write_artifact(&path, &contents)?;

    tracing::info!(
        "Generated {} article entries ({} skipped) to {:?}",
        report.index.len(),
        report.skipped.len(),
        path
    );
    tracing::info!("Completed in {:.2}s", start.elapsed().as_secs_f64());

    Ok(path)
}

/// Watch the posts and config for changes and regenerate
pub fn watch(site: &BlogIndex) -> Result<()> {
    let (tx, rx) = channel();
    let _debouncer = start_watcher(site, tx)?;

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    regenerate_on_changes(site, rx);

    Ok(())
}

/// Start a debounced watcher over the posts directory and config file.
///
/// Events are batched until paths have been quiet for 500ms. Watching stops
/// when the returned debouncer is dropped.
pub fn start_watcher(
    site: &BlogIndex,
    tx: Sender<DebounceEventResult>,
) -> Result<Debouncer<RecommendedWatcher>> {
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.posts_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.posts_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.posts_dir);
    } else {
        tracing::warn!("Posts directory {:?} does not exist", site.posts_dir);
    }

    let config_path = site.config_path();
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    Ok(debouncer)
}

/// Regenerate once per batch of changes until the watcher goes away.
///
/// Config is reloaded before each run. Failures are logged and the loop
/// keeps going.
pub fn regenerate_on_changes(site: &BlogIndex, rx: Receiver<DebounceEventResult>) {
    let mut site = site.clone();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                // Our own artifact may live under the posts directory
                let artifact = site.artifact_path();
                if events.iter().all(|e| e.path == artifact) {
                    continue;
                }

                for event in &events {
                    tracing::debug!("File changed: {:?}", event.path);
                }
                tracing::info!("File changed, regenerating...");

                match BlogIndex::new(&site.base_dir) {
                    Ok(reloaded) => site = reloaded,
                    Err(e) => tracing::error!("Failed to reload config: {:#}", e),
                }
                if let Err(e) = run(&site) {
                    tracing::error!("Generation failed: {:#}", e);
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArtifactFormat, IndexConfig};
    use std::fs;
    use std::path::Path;

    fn site_with_posts(posts: &[(&str, &str)]) -> (tempfile::TempDir, BlogIndex) {
        let dir = tempfile::tempdir().unwrap();
        let site = BlogIndex::new(dir.path()).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        for (name, content) in posts {
            fs::write(site.posts_dir.join(name), content).unwrap();
        }
        (dir, site)
    }

    #[test]
    fn test_generate_writes_sorted_artifact() {
        let (_dir, site) = site_with_posts(&[
            (
                "a.md",
                "---\ntitle: T1\ndescription: D1\ndate: 2024-01-15\n---\nBody A",
            ),
            (
                "b.md",
                "---\ntitle: T2\ndescription: D2\ndate: 2024-01-20\ntags: [x, y]\n---\nBody B",
            ),
            ("c.md", "---\ndescription: D3\ndate: 2024-02-01\n---\nNo title"),
        ]);

        let path = run(&site).unwrap();
        assert_eq!(path, site.artifact_path());
        assert!(path.ends_with("generated/pages/blog/generated_blog_data.rs"));

        let artifact = fs::read_to_string(&path).unwrap();
        let b = artifact.find("path: \"/blog/b\"").unwrap();
        let a = artifact.find("path: \"/blog/a\"").unwrap();
        assert!(b < a);
        assert!(!artifact.contains("/blog/c"));
        assert!(artifact.contains("tags: &[\"x\", \"y\"]"));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let (_dir, site) = site_with_posts(&[
            ("one.md", "---\ntitle: One\ndescription: D\ndate: 2024-03-01\n---\n"),
            ("two.md", "---\ntitle: Two\ndescription: D\ndate: 2024-03-01\n---\n"),
        ]);

        let first = fs::read(run(&site).unwrap()).unwrap();
        let second = fs::read(run(&site).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_json() {
        let dir = tempfile::tempdir().unwrap();
        let config = IndexConfig {
            format: ArtifactFormat::Json,
            route_prefix: String::new(),
            ..IndexConfig::default()
        };
        let site = BlogIndex::with_config(dir.path(), config);
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(
            site.posts_dir.join("post.md"),
            "---\ntitle: Post\ndescription: D\ndate: 2024-04-04\n---\n",
        )
        .unwrap();

        let path = run(&site).unwrap();
        assert_eq!(path.extension().unwrap(), "json");
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value[0]["path"], "/post");
        assert_eq!(value[0]["tags"], serde_json::json!([]));
    }

    #[test]
    fn test_generate_without_posts() {
        let dir = tempfile::tempdir().unwrap();
        let site = BlogIndex::new(dir.path()).unwrap();

        let artifact = fs::read_to_string(run(&site).unwrap()).unwrap();
        assert!(artifact.contains("pub static ENTRIES: &[ArticleEntry] = &[];"));
    }

    fn wait_for(path: &Path, expected: &str) -> bool {
        for _ in 0..50 {
            if fs::read_to_string(path).is_ok_and(|text| text.contains(expected)) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(100));
        }
        false
    }

    fn spawn_regenerator(site: &BlogIndex) -> Debouncer<RecommendedWatcher> {
        let (tx, rx) = channel();
        let debouncer = start_watcher(site, tx).unwrap();
        let site = site.clone();
        std::thread::spawn(move || regenerate_on_changes(&site, rx));
        debouncer
    }

    #[test]
    fn test_watch_picks_up_last_edit() {
        let (_dir, site) = site_with_posts(&[(
            "draft.md",
            "---\ntitle: First\ndescription: D\ndate: 2024-05-01\n---\n",
        )]);
        run(&site).unwrap();
        let debouncer = spawn_regenerator(&site);

        let draft = site.posts_dir.join("draft.md");
        fs::write(&draft, "---\ntitle: Second\ndescription: D\ndate: 2024-05-01\n---\n")
            .unwrap();
        // Lands inside the debounce window of the previous write
        std::thread::sleep(Duration::from_millis(150));
        fs::write(&draft, "---\ntitle: Final\ndescription: D\ndate: 2024-05-01\n---\n")
            .unwrap();

        let regenerated = wait_for(&site.artifact_path(), "title: \"Final\"");
        drop(debouncer);
        assert!(regenerated);
    }

    #[test]
    fn test_watch_reloads_config() {
        let (dir, site) = site_with_posts(&[(
            "post.md",
            "---\ntitle: Post\ndescription: D\ndate: 2024-06-01\n---\n",
        )]);
        let config_path = site.config_path();
        fs::write(&config_path, "format: rust\n").unwrap();
        let debouncer = spawn_regenerator(&site);

        // A broken config is logged and watching carries on
        fs::write(&config_path, "format: [oops\n").unwrap();
        std::thread::sleep(Duration::from_millis(1000));
        fs::write(&config_path, "format: json\nroute_prefix: \"\"\n").unwrap();

        let json = BlogIndex::new(dir.path()).unwrap().artifact_path();
        assert_eq!(json.extension().unwrap(), "json");
        let regenerated = wait_for(&json, "\"path\": \"/post\"");
        drop(debouncer);
        assert!(regenerated);
    }
}
