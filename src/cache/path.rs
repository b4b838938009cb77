// ABOUTME: Maps cache identifiers to paths confined under the cache root.
// ABOUTME: Neutralizes traversal segments and absolute components before any filesystem access.

use std::path::{Component, Path, PathBuf};

use crate::types::ImageRef;

/// Join `identifier` beneath `root`, keeping the result inside `root`.
///
/// Root and prefix components and `.` are dropped. `..` removes the previously
/// joined component but never climbs above `root`. On Windows `:` is replaced
/// by `_` so digests like `sha256:...` do not read as drive letters.
pub fn sanitize_cache_path(root: &Path, identifier: &str) -> PathBuf {
    let mut parts: Vec<String> = Vec::new();

    for component in Path::new(identifier).components() {
        match component {
            Component::Normal(part) => parts.push(sanitize_component(&part.to_string_lossy())),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    let mut path = root.to_path_buf();
    path.extend(parts);
    path
}

#[cfg(windows)]
fn sanitize_component(part: &str) -> String {
    part.replace(':', "_")
}

#[cfg(not(windows))]
fn sanitize_component(part: &str) -> String {
    part.to_string()
}

/// Identifier under which a saved copy of `image` is stored.
///
/// `docker.io/library/nginx:1.25` is stored as `docker.io/library/nginx_1.25`.
pub fn cache_identifier(image: &ImageRef) -> String {
    image.name().replace([':', '@'], "_")
}
