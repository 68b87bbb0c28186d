use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list;
use crate::artifacts::log::rev_walk::SortMode;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use std::io::Write;

/// Options for the log command
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub sort: SortMode,
    pub max_count: i64,
    pub path: Option<String>,
}

impl Default for LogOptions {
    fn default() -> Self {
        LogOptions {
            sort: SortMode::empty(),
            max_count: -1,
            path: None,
        }
    }
}

impl Repository {
    /// Show the commit history in git's medium format
    pub fn log(&self, options: &LogOptions) -> anyhow::Result<()> {
        let commits = match &options.path {
            Some(path) => rev_list::list_touching(self, path)?,
            None => rev_list::list(self, options.sort, options.max_count)?,
        };

        for commit in &commits {
            self.show_commit_medium(commit)?;
        }

        Ok(())
    }

    fn show_commit_medium(&self, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "commit {}", commit.object_id()?)?;

        if commit.parent_count() > 1 {
            let merge_line = commit
                .parents()
                .iter()
                .map(|parent| parent.to_short_oid())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer(), "Merge: {}", merge_line)?;
        }

        writeln!(self.writer(), "Author: {}", commit.author().display_name())?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().readable_timestamp()
        )?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
