//! Graph cursor over the commit DAG
//!
//! A [`RevWalk`] is configured with starting commits and a [`SortMode`],
//! then iterated. The full reachable set is discovered and ordered lazily on
//! the first `next()` call; changing the configuration afterwards discards
//! the prepared order and the next iteration starts over.

use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::core::errors::HistoryError;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

bitflags! {
    /// Ordering applied to the walk output
    ///
    /// With no flags set, commits come out in discovery order (breadth-first
    /// from the starting commits). `TOPOLOGICAL` guarantees children before
    /// parents; combined with `TIME` it breaks ties by author timestamp,
    /// newest first. `REVERSE` reverses whatever the other flags produced.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SortMode: u32 {
        const TOPOLOGICAL = 1 << 0;
        const TIME = 1 << 1;
        const REVERSE = 1 << 2;
    }
}

impl SortMode {
    pub fn from_flags(topological: bool, time: bool, reverse: bool) -> Self {
        let mut sort = SortMode::empty();
        sort.set(SortMode::TOPOLOGICAL, topological);
        sort.set(SortMode::TIME, time);
        sort.set(SortMode::REVERSE, reverse);
        sort
    }
}

/// Resumable cursor over the commits reachable from the pushed roots
pub struct RevWalk<'r> {
    repository: &'r Repository,
    sort: SortMode,
    roots: Vec<ObjectId>,
    prepared: Option<VecDeque<ObjectId>>,
}

impl<'r> RevWalk<'r> {
    pub fn new(repository: &'r Repository) -> Self {
        RevWalk {
            repository,
            sort: SortMode::empty(),
            roots: Vec::new(),
            prepared: None,
        }
    }

    /// Add a starting commit; the walk covers the union of everything
    /// reachable from all pushed commits
    pub fn push(&mut self, start_oid: ObjectId) {
        self.roots.push(start_oid);
        self.prepared = None;
    }

    /// Start the walk from the commit HEAD points to
    ///
    /// Fails with a [`HistoryError::Reference`] when HEAD does not resolve
    /// to a commit (an empty repository).
    pub fn push_head(&mut self) -> anyhow::Result<()> {
        match self.repository.refs().read_head()? {
            Some(oid) => {
                self.push(oid);
                Ok(())
            }
            None => Err(HistoryError::Reference {
                name: HEAD_REF_NAME.to_string(),
                reason: "reference does not resolve to a commit".to_string(),
            }
            .into()),
        }
    }

    pub fn set_sorting(&mut self, sort: SortMode) {
        self.sort = sort;
        self.prepared = None;
    }

    /// Forget the starting commits and any prepared order; the sort mode is
    /// kept
    pub fn reset(&mut self) {
        self.roots.clear();
        self.prepared = None;
    }

    /// Discover every reachable commit and order the whole set
    fn prepare(&self) -> anyhow::Result<VecDeque<ObjectId>> {
        let mut discovered: Vec<SlimCommit> = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut frontier: VecDeque<ObjectId> = self.roots.iter().cloned().collect();

        while let Some(oid) = frontier.pop_front() {
            if !seen.insert(oid.clone()) {
                continue;
            }

            let commit = self.repository.database().load_slim_commit(&oid)?;
            for parent in &commit.parents {
                if !seen.contains(parent) {
                    frontier.push_back(parent.clone());
                }
            }
            discovered.push(commit);
        }

        let mut order: Vec<ObjectId> = if self.sort.contains(SortMode::TOPOLOGICAL) {
            Self::topological_order(&discovered, self.sort.contains(SortMode::TIME))?
        } else if self.sort.contains(SortMode::TIME) {
            let mut by_time: Vec<&SlimCommit> = discovered.iter().collect();
            by_time.sort_by(|left, right| right.cmp(left));
            by_time.into_iter().map(|commit| commit.oid.clone()).collect()
        } else {
            discovered.into_iter().map(|commit| commit.oid).collect()
        };

        if self.sort.contains(SortMode::REVERSE) {
            order.reverse();
        }

        Ok(order.into())
    }

    /// Kahn's algorithm over the reverse edges: a commit becomes ready once
    /// every reachable child has been emitted
    fn topological_order(commits: &[SlimCommit], by_time: bool) -> anyhow::Result<Vec<ObjectId>> {
        let index: HashMap<&ObjectId, &SlimCommit> =
            commits.iter().map(|commit| (&commit.oid, commit)).collect();
        let mut pending_children: HashMap<&ObjectId, usize> =
            commits.iter().map(|commit| (&commit.oid, 0)).collect();

        for commit in commits {
            for parent in &commit.parents {
                if let Some(count) = pending_children.get_mut(parent) {
                    *count += 1;
                }
            }
        }

        let mut order = Vec::with_capacity(commits.len());
        if by_time {
            let mut ready: BinaryHeap<&SlimCommit> = commits
                .iter()
                .filter(|commit| pending_children[&commit.oid] == 0)
                .collect();

            while let Some(commit) = ready.pop() {
                order.push(commit.oid.clone());
                for parent in &commit.parents {
                    if let Some(count) = pending_children.get_mut(parent) {
                        *count -= 1;
                        if *count == 0 {
                            ready.push(index[parent]);
                        }
                    }
                }
            }
        } else {
            let mut ready: VecDeque<&SlimCommit> = commits
                .iter()
                .filter(|commit| pending_children[&commit.oid] == 0)
                .collect();

            while let Some(commit) = ready.pop_front() {
                order.push(commit.oid.clone());
                for parent in &commit.parents {
                    if let Some(count) = pending_children.get_mut(parent) {
                        *count -= 1;
                        if *count == 0 {
                            ready.push_back(index[parent]);
                        }
                    }
                }
            }
        }

        if order.len() != commits.len() {
            anyhow::bail!("commit graph contains a cycle");
        }

        Ok(order)
    }
}

impl Iterator for RevWalk<'_> {
    type Item = anyhow::Result<ObjectId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.prepared.is_none() {
            match self.prepare() {
                Ok(order) => self.prepared = Some(order),
                Err(error) => {
                    // a failed preparation is reported once, then the walk
                    // is exhausted
                    self.prepared = Some(VecDeque::new());
                    return Some(Err(error));
                }
            }
        }

        self.prepared.as_mut()?.pop_front().map(Ok)
    }
}
