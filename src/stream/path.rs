use crate::err::StreamError;
use std::path::{Component, Path, PathBuf};

/// Joins `song` onto `root`, refusing anything that could leave it.
///
/// Only plain file and directory names are accepted; `..`, `.`, a leading `/`
/// or a drive prefix make the whole song invalid rather than being normalized away.
/// A trailing separator names a directory, which is never a song.
pub fn resolve(root: &Path, song: &str) -> Result<PathBuf, StreamError> {
    let mut path = root.to_path_buf();
    let mut pushed = false;
    for component in Path::new(song).components() {
        match component {
            Component::Normal(part) => {
                path.push(part);
                pushed = true;
            }
            Component::CurDir
            | Component::ParentDir
            | Component::RootDir
            | Component::Prefix(_) => {
                return Err(StreamError::PathTraversal(song.to_owned()));
            }
        }
    }
    if !pushed {
        return Err(StreamError::PathTraversal(song.to_owned()));
    }
    if song.ends_with(std::path::is_separator) {
        return Err(StreamError::NotAFile(path));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_traversal(res: Result<PathBuf, StreamError>) -> bool {
        matches!(res, Err(StreamError::PathTraversal(_)))
    }

    #[test]
    fn plain_name() {
        let path = resolve(Path::new("music"), "track1.mp3").unwrap();
        assert_eq!(path, Path::new("music").join("track1.mp3"));
    }

    #[test]
    fn subdirectory() {
        let path = resolve(Path::new("music"), "album/01.mp3").unwrap();
        assert_eq!(path, Path::new("music").join("album").join("01.mp3"));
    }

    #[test]
    fn parent_dir_rejected() {
        assert!(is_traversal(resolve(Path::new("music"), "../secret.txt")));
        assert!(is_traversal(resolve(Path::new("music"), "album/../../secret.txt")));
        assert!(is_traversal(resolve(Path::new("music"), "..")));
    }

    #[test]
    fn absolute_rejected() {
        assert!(is_traversal(resolve(Path::new("music"), "/etc/passwd")));
    }

    #[test]
    fn trailing_separator_rejected() {
        let res = resolve(Path::new("music"), "track1.mp3/");
        assert!(matches!(res, Err(StreamError::NotAFile(_))));
        let res = resolve(Path::new("music"), "album/");
        assert!(matches!(res, Err(StreamError::NotAFile(_))));
    }

    #[test]
    fn current_dir_rejected() {
        assert!(is_traversal(resolve(Path::new("music"), "./track1.mp3")));
        assert!(is_traversal(resolve(Path::new("music"), ".")));
    }
}
