//! FIFO queue built from two stacks.

/// Amortized O(1) FIFO queue.
///
/// Invariant: the queue is non-empty iff `outbox` is non-empty, so the front
/// element is always `outbox.last()` and peeking needs no mutation.
#[derive(Debug, Clone)]
pub struct TwoStackQueue<E> {
    inbox: Vec<E>,
    /// Front of the queue at the end.
    outbox: Vec<E>,
}

impl<E> TwoStackQueue<E> {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inbox: Vec::new(),
            outbox: Vec::new(),
        }
    }

    /// Append at the back.
    pub fn push(&mut self, element: E) {
        if self.outbox.is_empty() {
            self.outbox.push(element);
        } else {
            self.inbox.push(element);
        }
    }

    /// Remove from the front.
    pub fn pop(&mut self) -> Option<E> {
        let front = self.outbox.pop()?;
        if self.outbox.is_empty() {
            std::mem::swap(&mut self.inbox, &mut self.outbox);
            self.outbox.reverse();
        }
        Some(front)
    }

    /// The front element.
    #[must_use]
    pub fn peek(&self) -> Option<&E> {
        self.outbox.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inbox.len() + self.outbox.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outbox.is_empty()
    }

    /// Iterate front to back.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.outbox.iter().rev().chain(self.inbox.iter())
    }
}

impl<E> Default for TwoStackQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
