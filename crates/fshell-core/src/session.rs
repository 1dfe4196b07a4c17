use std::path::{Path, PathBuf};

use fshell_platform::{parse_mode, EntryKind, FileEntry, FileSystem, FsError, Result, Role};
use tracing::{debug, info};

use crate::path;

/// Live shell state: the working directory plus the filesystem it acts on.
///
/// `current_dir` is always absolute and only changes through
/// [`Session::change_directory`].
pub struct Session {
    current_dir: PathBuf,
    fs: Box<dyn FileSystem>,
}

impl Session {
    /// Start a session in `start_dir`, which must be an existing directory
    pub fn open(start_dir: &Path, fs: Box<dyn FileSystem>) -> Result<Self> {
        let start_dir = path::normalize(start_dir);
        let meta = fs.metadata(&start_dir)?;
        if !meta.is_dir {
            return Err(FsError::NotADirectory { path: start_dir });
        }
        Ok(Self {
            current_dir: start_dir,
            fs,
        })
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn resolve(&self, input: &str) -> PathBuf {
        path::resolve(&self.current_dir, input)
    }

    pub fn list(&self) -> Result<Vec<FileEntry>> {
        self.fs.list_dir(&self.current_dir)
    }

    pub fn change_directory(&mut self, input: &str) -> Result<&Path> {
        let target = self.resolve(input);
        debug!("cd {} -> {}", input, target.display());

        let meta = self.fs.metadata(&target)?;
        if !meta.is_dir {
            return Err(FsError::NotADirectory { path: target });
        }

        info!("working directory now {}", target.display());
        self.current_dir = target;
        Ok(&self.current_dir)
    }

    pub fn copy(&self, source: &str, destination: &str) -> Result<EntryKind> {
        let (src, dst) = (self.resolve(source), self.resolve(destination));
        let kind = self.fs.copy(&src, &dst)?;
        info!("copied {} -> {}", src.display(), dst.display());
        Ok(kind)
    }

    pub fn move_item(&self, source: &str, destination: &str) -> Result<()> {
        let (src, dst) = (self.resolve(source), self.resolve(destination));
        self.fs.rename(&src, &dst)?;
        info!("moved {} -> {}", src.display(), dst.display());
        Ok(())
    }

    pub fn delete(&self, target: &str) -> Result<EntryKind> {
        let path = self.resolve(target);
        let kind = self.fs.delete(&path)?;
        info!("deleted {}", path.display());
        Ok(kind)
    }

    /// `mode` is octal text such as `"755"`
    pub fn chmod(&self, target: &str, mode: &str) -> Result<u32> {
        let path = self.resolve(target);
        // A missing target is reported ahead of a malformed mode
        self.fs.ensure_exists(&path, Role::Target)?;
        let bits = parse_mode(mode)?;
        self.fs.chmod(&path, bits)?;
        info!("chmod {:o} {}", bits, path.display());
        Ok(bits)
    }

    pub fn mkdir(&self, name: &str) -> Result<()> {
        let path = self.resolve(name);
        self.fs.create_dir(&path)?;
        info!("created directory {}", path.display());
        Ok(())
    }

    pub fn create_file(&self, name: &str, content: &[u8]) -> Result<()> {
        let path = self.resolve(name);
        self.fs.create_file(&path, content)?;
        info!("created file {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fshell_local::LocalFileSystem;
    use fshell_platform::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn session_in(tmp: &TempDir) -> Session {
        Session::open(tmp.path(), Box::new(LocalFileSystem::new())).unwrap()
    }

    #[test]
    fn test_open_rejects_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f");
        fs::write(&file, b"").unwrap();

        let err = Session::open(&file, Box::new(LocalFileSystem::new()))
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn test_cd_and_back() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        let mut session = session_in(&tmp);

        session.change_directory("sub").unwrap();
        assert_eq!(session.current_dir(), tmp.path().join("sub"));

        session.change_directory("..").unwrap();
        assert_eq!(session.current_dir(), tmp.path());
    }

    #[test]
    fn test_cd_into_file_keeps_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("plain.txt"), b"").unwrap();
        let mut session = session_in(&tmp);

        let err = session.change_directory("plain.txt").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
        assert_eq!(session.current_dir(), tmp.path());
    }

    #[test]
    fn test_cd_missing_keeps_dir() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);

        assert!(session.change_directory("nowhere").is_err());
        assert_eq!(session.current_dir(), tmp.path());
    }

    #[test]
    fn test_relative_ops_anchor_to_current_dir() {
        let tmp = TempDir::new().unwrap();
        let mut session = session_in(&tmp);

        session.mkdir("work/inner").unwrap();
        session.change_directory("work").unwrap();
        session.create_file("a.txt", b"abc").unwrap();
        session.copy("a.txt", "inner/b.txt").unwrap();
        session.move_item("a.txt", "../moved.txt").unwrap();

        assert_eq!(fs::read(tmp.path().join("work/inner/b.txt")).unwrap(), b"abc");
        assert_eq!(fs::read(tmp.path().join("moved.txt")).unwrap(), b"abc");
        assert!(!tmp.path().join("work/a.txt").exists());
    }

    #[test]
    fn test_delete_missing_reports_target() {
        let tmp = TempDir::new().unwrap();
        let session = session_in(&tmp);

        match session.delete("ghost").unwrap_err() {
            FsError::NotFound { role, path } => {
                assert_eq!(role, Role::Target);
                assert_eq!(path, tmp.path().join("ghost"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_chmod_rejects_decimal_digits() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f"), b"").unwrap();
        let session = session_in(&tmp);

        let err = session.chmod("f", "999").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMode);
    }

    #[test]
    fn test_chmod_missing_target_wins_over_bad_mode() {
        let tmp = TempDir::new().unwrap();
        let session = session_in(&tmp);

        match session.chmod("ghost", "999").unwrap_err() {
            FsError::NotFound { role, path } => {
                assert_eq!(role, Role::Target);
                assert_eq!(path, tmp.path().join("ghost"));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_chmod_parses_octal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("f"), b"").unwrap();
        let session = session_in(&tmp);

        assert_eq!(session.chmod("f", "640").unwrap(), 0o640);
        let entries = session.list().unwrap();
        assert_eq!(entries[0].mode & 0o777, 0o640);
    }
}
