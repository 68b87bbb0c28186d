use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::core::errors::HistoryError;
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::Path;

/// Repository handle: a path plus its object database and refs
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
}

impl Repository {
    /// Open an existing repository
    ///
    /// Fails with a [`HistoryError::Repository`] when the path does not
    /// contain a git directory.
    pub fn open(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path)
            .canonicalize()
            .map_err(|source| HistoryError::Repository {
                path: Path::new(path).to_path_buf(),
                reason: source.to_string(),
            })?;

        let git_path = path.join(".git");
        if !git_path.join("objects").is_dir() {
            return Err(HistoryError::Repository {
                path,
                reason: "not a git repository (missing .git/objects)".to_string(),
            }
            .into());
        }

        Ok(Repository {
            database: Database::new(git_path.join("objects").into_boxed_path()),
            refs: Refs::new(git_path.into_boxed_path()),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
        })
    }

    /// Initialize a git directory at the given path and open it
    pub fn init(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }

        let git_path = path.join(".git");
        std::fs::create_dir_all(git_path.join("objects"))?;
        std::fs::create_dir_all(git_path.join("refs").join("heads"))?;

        let head_path = git_path.join("HEAD");
        if !head_path.exists() {
            std::fs::write(&head_path, "ref: refs/heads/main\n")?;
        }

        let repository = Self::open(&path.to_string_lossy(), writer)?;
        writeln!(
            repository.writer(),
            "Initialized git directory at {}",
            repository.path().display()
        )?;

        Ok(repository)
    }

    /// Whether the repository has no commits at all
    pub fn is_empty(&self) -> anyhow::Result<bool> {
        Ok(self.refs.read_head()?.is_none())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
