//! Remove the generated artifact

use anyhow::Result;
use std::fs;

use crate::BlogIndex;

/// Delete the generated artifact if it exists
pub fn run(site: &BlogIndex) -> Result<()> {
    let path = site.artifact_path();
    if path.exists() {
        fs::remove_file(&path)?;
        tracing::info!("Deleted: {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        let dir = tempfile::tempdir().unwrap();
        let site = BlogIndex::new(dir.path()).unwrap();

        // Nothing to delete yet
        run(&site).unwrap();

        let path = site.generate().unwrap();
        assert!(path.exists());
        run(&site).unwrap();
        assert!(!path.exists());
    }
}
