//! Lazy backtracking over finite value domains.
//!
//! Neither traversal asks the domain for successor lists. Candidates are
//! proposed in order and kept only if the domain accepts the transition, so
//! the whole search state is one chosen position per level:
//!
//! - [`FiniteSetTraversal`]: every level draws from the same value set and a
//!   value appears at most once on a path.
//! - [`LevelTraversal`]: each level computes its own candidates from the path
//!   above it; depth may be unbounded.
//!
//! A cursor at the domain's maximal path length is terminal. A level without
//! an acceptable candidate is a dead end: the cursor moves to the next
//! acceptable sibling, popping exhausted levels on the way up.

use std::rc::Rc;

use thicket_kernel::functor::{FiniteSetGenerator, LevelGenerator, Path};
use tracing::trace;

use crate::error::TraversalError;
use crate::traversal::{Copyable, TreeTraversal};

/// Depth-first search over paths of distinct values from one set.
pub struct FiniteSetTraversal<T, G> {
    generator: Rc<G>,
    values: Rc<[T]>,
    max_len: usize,
    /// Indices into `values`, root first.
    chosen: Vec<usize>,
    used: Vec<bool>,
}

impl<T, G: FiniteSetGenerator<T>> FiniteSetTraversal<T, G> {
    /// Start at the first acceptable root value. Empty if there is none.
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self::from_shared(Rc::new(generator))
    }

    /// Like [`Self::new`], with a generator shared with other traversals.
    #[must_use]
    pub fn from_shared(generator: Rc<G>) -> Self {
        let values: Rc<[T]> = G::values(&generator).into();
        let max_len = G::max_path_len(&generator).min(values.len());
        let mut traversal = Self {
            generator,
            used: vec![false; values.len()],
            values,
            max_len,
            chosen: Vec::new(),
        };
        if max_len > 0 {
            if let Some(first) = traversal.next_valid(0) {
                traversal.choose(first);
            }
        }
        traversal
    }

    /// The shared generator.
    #[must_use]
    pub fn generator(&self) -> &Rc<G> {
        &self.generator
    }

    fn prefix(&self, len: usize) -> Option<Path<'_, T>> {
        Path::from_root_first(self.chosen[..len].iter().map(|&i| &self.values[i]).collect())
    }

    /// First unused value at or after `from` that may extend the current
    /// path.
    fn next_valid(&self, from: usize) -> Option<usize> {
        let parent = self.prefix(self.chosen.len());
        (from..self.values.len()).find(|&i| {
            !self.used[i]
                && G::is_valid_transition(&self.generator, &self.values[i], parent.as_ref())
        })
    }

    fn choose(&mut self, index: usize) {
        self.used[index] = true;
        self.chosen.push(index);
    }

    /// Replace the cursor by its next acceptable sibling, popping exhausted
    /// levels. Returns the number of nodes discarded.
    fn advance(&mut self) -> usize {
        let mut discarded = 0;
        while let Some(current) = self.chosen.pop() {
            self.used[current] = false;
            discarded += 1;
            if let Some(next) = self.next_valid(current + 1) {
                self.choose(next);
                break;
            }
        }
        discarded
    }
}

impl<T, G: FiniteSetGenerator<T>> TreeTraversal for FiniteSetTraversal<T, G> {
    type Node = T;

    fn move_forward(&mut self) -> Result<bool, TraversalError> {
        if self.chosen.is_empty() {
            return Err(TraversalError::Empty);
        }
        if self.chosen.len() >= self.max_len {
            return Ok(false);
        }
        match self.next_valid(0) {
            Some(child) => {
                self.choose(child);
                trace!(depth = self.chosen.len() - 1, "expanded");
            }
            None => {
                let pruned = self.advance();
                trace!(pruned, "dead end");
            }
        }
        Ok(true)
    }

    fn backtrack(&mut self) -> Result<(), TraversalError> {
        if self.chosen.is_empty() {
            return Err(TraversalError::Empty);
        }
        let pruned = self.advance();
        trace!(pruned, "backtrack");
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    fn cursor(&self) -> Result<&T, TraversalError> {
        self.chosen
            .last()
            .map(|&i| &self.values[i])
            .ok_or(TraversalError::Empty)
    }

    fn path(&self) -> Result<Path<'_, T>, TraversalError> {
        self.prefix(self.chosen.len()).ok_or(TraversalError::Empty)
    }

    fn depth(&self) -> Option<usize> {
        self.chosen.len().checked_sub(1)
    }

    fn is_goal(&self) -> Result<bool, TraversalError> {
        Ok(G::is_goal(&self.generator, &self.path()?))
    }

    /// The cursor, then the untried acceptable siblings of every node on the
    /// path, deepest level first.
    fn leaves(&self) -> Vec<&T> {
        let Some(&cursor) = self.chosen.last() else {
            return Vec::new();
        };
        let mut leaves = vec![&self.values[cursor]];
        for level in (0..self.chosen.len()).rev() {
            let taken = &self.chosen[..level];
            let parent = self.prefix(level);
            leaves.extend(
                (self.chosen[level] + 1..self.values.len())
                    .filter(|i| !taken.contains(i))
                    .map(|i| &self.values[i])
                    .filter(|v| G::is_valid_transition(&self.generator, v, parent.as_ref())),
            );
        }
        leaves
    }
}

impl<T, G> Clone for FiniteSetTraversal<T, G> {
    fn clone(&self) -> Self {
        Self {
            generator: Rc::clone(&self.generator),
            values: Rc::clone(&self.values),
            max_len: self.max_len,
            chosen: self.chosen.clone(),
            used: self.used.clone(),
        }
    }
}

impl<T, G> Copyable for FiniteSetTraversal<T, G> {
    fn copy_of(&self) -> Self {
        self.clone()
    }
}

#[derive(Debug, Clone)]
struct Level<T> {
    candidates: Vec<T>,
    at: usize,
}

/// Depth-first search where each level proposes its own candidates.
pub struct LevelTraversal<T, G> {
    generator: Rc<G>,
    levels: Vec<Level<T>>,
}

impl<T, G: LevelGenerator<T>> LevelTraversal<T, G> {
    /// Start at the first acceptable root candidate. Empty if there is none.
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self::from_shared(Rc::new(generator))
    }

    /// Like [`Self::new`], with a generator shared with other traversals.
    #[must_use]
    pub fn from_shared(generator: Rc<G>) -> Self {
        let mut traversal = Self {
            generator,
            levels: Vec::new(),
        };
        if G::max_path_len(&traversal.generator) != Some(0) {
            traversal.open_level();
        }
        traversal
    }

    /// The shared generator.
    #[must_use]
    pub fn generator(&self) -> &Rc<G> {
        &self.generator
    }

    fn prefix(&self, len: usize) -> Option<Path<'_, T>> {
        Path::from_root_first(
            self.levels[..len]
                .iter()
                .map(|l| &l.candidates[l.at])
                .collect(),
        )
    }

    /// First acceptable position in `candidates` at or after `from`, below
    /// the current path.
    fn first_valid(&self, candidates: &[T], from: usize) -> Option<usize> {
        let parent = self.prefix(self.levels.len());
        let stop = G::stop_at_first_invalid(&self.generator);
        for (i, value) in candidates.iter().enumerate().skip(from) {
            if G::is_valid_transition(&self.generator, value, parent.as_ref()) {
                return Some(i);
            }
            if stop {
                return None;
            }
        }
        None
    }

    /// Push a new level below the cursor. Returns `false` when it has no
    /// acceptable candidate.
    fn open_level(&mut self) -> bool {
        let candidates = {
            let parent = self.prefix(self.levels.len());
            G::level_values(&self.generator, parent.as_ref())
        };
        match self.first_valid(&candidates, 0) {
            Some(at) => {
                self.levels.push(Level { candidates, at });
                true
            }
            None => false,
        }
    }

    /// Move the cursor to its next acceptable sibling, popping exhausted
    /// levels. Returns the number of nodes discarded.
    fn advance(&mut self) -> usize {
        let mut discarded = 0;
        while let Some(level) = self.levels.pop() {
            discarded += 1;
            if let Some(at) = self.first_valid(&level.candidates, level.at + 1) {
                self.levels.push(Level {
                    candidates: level.candidates,
                    at,
                });
                break;
            }
        }
        discarded
    }
}

impl<T, G: LevelGenerator<T>> TreeTraversal for LevelTraversal<T, G> {
    type Node = T;

    fn move_forward(&mut self) -> Result<bool, TraversalError> {
        if self.levels.is_empty() {
            return Err(TraversalError::Empty);
        }
        if G::max_path_len(&self.generator).is_some_and(|max| self.levels.len() >= max)
        {
            return Ok(false);
        }
        if self.open_level() {
            trace!(depth = self.levels.len() - 1, "expanded");
        } else {
            let pruned = self.advance();
            trace!(pruned, "dead end");
        }
        Ok(true)
    }

    fn backtrack(&mut self) -> Result<(), TraversalError> {
        if self.levels.is_empty() {
            return Err(TraversalError::Empty);
        }
        let pruned = self.advance();
        trace!(pruned, "backtrack");
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn cursor(&self) -> Result<&T, TraversalError> {
        self.levels
            .last()
            .map(|l| &l.candidates[l.at])
            .ok_or(TraversalError::Empty)
    }

    fn path(&self) -> Result<Path<'_, T>, TraversalError> {
        self.prefix(self.levels.len()).ok_or(TraversalError::Empty)
    }

    fn depth(&self) -> Option<usize> {
        self.levels.len().checked_sub(1)
    }

    fn is_goal(&self) -> Result<bool, TraversalError> {
        Ok(G::is_goal(&self.generator, &self.path()?))
    }

    /// The cursor, then the untried acceptable siblings of every node on the
    /// path, deepest level first.
    fn leaves(&self) -> Vec<&T> {
        let Some(last) = self.levels.last() else {
            return Vec::new();
        };
        let stop = G::stop_at_first_invalid(&self.generator);
        let mut leaves = vec![&last.candidates[last.at]];
        for (depth, level) in self.levels.iter().enumerate().rev() {
            let parent = self.prefix(depth);
            for value in &level.candidates[level.at + 1..] {
                if G::is_valid_transition(&self.generator, value, parent.as_ref()) {
                    leaves.push(value);
                } else if stop {
                    break;
                }
            }
        }
        leaves
    }
}

impl<T: Clone, G> Clone for LevelTraversal<T, G> {
    fn clone(&self) -> Self {
        Self {
            generator: Rc::clone(&self.generator),
            levels: self.levels.clone(),
        }
    }
}

impl<T: Clone, G> Copyable for LevelTraversal<T, G> {
    fn copy_of(&self) -> Self {
        self.clone()
    }
}
