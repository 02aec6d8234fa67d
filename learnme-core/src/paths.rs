//! Config-relative path resolution.

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Get the directory that contains a config file.
pub fn config_dir(config_location: &Path) -> PathBuf {
    config_location
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Resolve `segments` relative to the directory containing `config_location`.
///
/// The optional `path_prefix` is joined first, then each segment left to
/// right. Every segment is treated as relative, so a leading `/` does not
/// reset the path. `.` and `..` are collapsed lexically; nothing touches the
/// file system.
pub fn resolve<S: AsRef<str>>(
    config_location: &Path,
    path_prefix: Option<&str>,
    segments: &[S],
) -> PathBuf {
    let mut path = config_dir(config_location);
    if let Some(prefix) = path_prefix {
        push_relative(&mut path, prefix);
    }
    for segment in segments {
        push_relative(&mut path, segment.as_ref());
    }
    path.clean()
}

fn push_relative(path: &mut PathBuf, segment: &str) {
    for component in Path::new(segment).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::ParentDir => path.push(".."),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
}
