use std::path::{Component, Path, PathBuf};

/// Anchor `input` to `base` and fold away `.` and `..` segments.
///
/// Purely lexical: nothing is checked against the filesystem, so this never
/// fails. An absolute `input` ignores `base`. `..` at the root stays at the root.
pub fn resolve(base: &Path, input: &str) -> PathBuf {
    let input = Path::new(input);
    let joined = if input.is_absolute() {
        input.to_path_buf()
    } else {
        base.join(input)
    };
    normalize(&joined)
}

pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // pop() refuses to remove the root, which is what we want
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_relative_joins_base() {
        assert_eq!(resolve(Path::new("/home/u"), "docs"), PathBuf::from("/home/u/docs"));
        assert_eq!(
            resolve(Path::new("/home/u"), "docs/a.txt"),
            PathBuf::from("/home/u/docs/a.txt")
        );
    }

    #[test]
    fn test_absolute_ignores_base() {
        assert_eq!(resolve(Path::new("/home/u"), "/etc/hosts"), PathBuf::from("/etc/hosts"));
        assert_eq!(resolve(Path::new("/home/u"), "/var/../tmp"), PathBuf::from("/tmp"));
    }

    #[test]
    fn test_dot_segments_folded() {
        let base = Path::new("/home/u/projects");
        assert_eq!(resolve(base, ".."), PathBuf::from("/home/u"));
        assert_eq!(resolve(base, "./a/./b/../c"), PathBuf::from("/home/u/projects/a/c"));
        assert_eq!(resolve(base, "."), PathBuf::from("/home/u/projects"));
        assert_eq!(resolve(base, "a/"), PathBuf::from("/home/u/projects/a"));
    }

    #[test]
    fn test_parent_of_root_is_root() {
        assert_eq!(resolve(Path::new("/"), "../../.."), PathBuf::from("/"));
        assert_eq!(resolve(Path::new("/a"), "../../b"), PathBuf::from("/b"));
    }

    #[test]
    fn test_empty_input_is_base() {
        assert_eq!(resolve(Path::new("/srv/data"), ""), PathBuf::from("/srv/data"));
    }
}
