use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list;
use crate::artifacts::log::rev_walk::SortMode;
use std::io::Write;

impl Repository {
    /// Print one line per commit: timestamp, author name and email
    pub fn contributions(&self, sort: SortMode) -> anyhow::Result<()> {
        let contributions = rev_list::contributions(self, sort)?;

        for index in 0..contributions.len() {
            writeln!(
                self.writer(),
                "{:.0} {} <{}>",
                contributions.when[index],
                contributions.author[index],
                contributions.email[index]
            )?;
        }

        Ok(())
    }
}
