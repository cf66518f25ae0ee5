use std::path::{Path, PathBuf};
use tower_http::services::{ServeDir, ServeFile};

const BUILD_DIR_CANDIDATES: [&str; 2] = ["../frontend/build", "frontend/build"];
const INDEX_HTML: &str = "index.html";

/// Picks the directory holding the built single-page app.
///
/// An explicitly configured directory always wins. Otherwise the first
/// candidate that contains `index.html` is used, falling back to the first
/// candidate so the server still starts without a frontend build.
pub fn resolve_build_dir(configured: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = configured {
        return dir;
    }

    find_build_dir(BUILD_DIR_CANDIDATES.iter().map(Path::new)).unwrap_or_else(|| {
        let fallback = PathBuf::from(BUILD_DIR_CANDIDATES[0]);
        tracing::warn!(
            dir = %fallback.display(),
            "could not find {INDEX_HTML} in any frontend build directory"
        );
        fallback
    })
}

fn find_build_dir<'a>(candidates: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    candidates
        .into_iter()
        .find(|dir| dir.join(INDEX_HTML).is_file())
        .map(Path::to_path_buf)
}

/// Serves files from the build directory; any path that is not a file gets
/// `index.html` so the client-side router can take over.
pub fn spa_service(build_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(build_dir).fallback(ServeFile::new(build_dir.join(INDEX_HTML)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_dir_is_used_verbatim() {
        let dir = resolve_build_dir(Some("/srv/app".into()));
        assert_eq!(dir, PathBuf::from("/srv/app"));
    }

    #[test]
    fn first_candidate_with_index_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let empty = tmp.path().join("empty");
        let built = tmp.path().join("built");
        std::fs::create_dir_all(&empty).unwrap();
        std::fs::create_dir_all(&built).unwrap();
        std::fs::write(built.join(INDEX_HTML), "<html></html>").unwrap();

        let found = find_build_dir([empty.as_path(), built.as_path()]);
        assert_eq!(found, Some(built));
        assert_eq!(find_build_dir([empty.as_path()]), None);
    }
}
