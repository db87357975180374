//! Bounded last-in-first-out stack.
//!
//! `BoundedStack` is the container behind the jump stack. It keeps items in
//! insertion order, hands them back most-recent-first, and optionally refuses
//! to grow past a fixed capacity.
//!
//! # Example
//!
//! ```
//! use jumpstack::stack::BoundedStack;
//!
//! let mut stack = BoundedStack::with_capacity(2);
//! stack.push(1).unwrap();
//! stack.push(2).unwrap();
//! assert!(stack.push(3).is_err());
//!
//! assert_eq!(stack.pop(), Some(2));
//! assert_eq!(stack.peek(), Some(&1));
//! ```

use thiserror::Error;

/// Errors raised by [`BoundedStack`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    #[error("stack has reached max capacity of {capacity}, cannot add more items")]
    CapacityExceeded { capacity: usize },
}

/// LIFO container with an optional capacity ceiling.
///
/// Traversal through [`for_each_mut`](Self::for_each_mut) and
/// [`filter`](Self::filter) visits items in insertion order (oldest first),
/// not in pop order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedStack<T> {
    items: Vec<T>,
    /// `None` means unbounded
    capacity: Option<usize>,
}

impl<T> BoundedStack<T> {
    /// Creates an unbounded stack.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            capacity: None,
        }
    }

    /// Creates a stack that holds at most `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity: Some(capacity),
        }
    }

    /// Creates a stack from an optional capacity, `None` being unbounded.
    pub fn bounded_by(capacity: Option<usize>) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Pushes an item on top of the stack.
    ///
    /// Fails with [`StackError::CapacityExceeded`] if the stack is already
    /// full; the stack is left untouched in that case.
    pub fn push(&mut self, item: T) -> Result<(), StackError> {
        if let Some(capacity) = self.capacity {
            if self.items.len() >= capacity {
                return Err(StackError::CapacityExceeded { capacity });
            }
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes and returns the most recently pushed item.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns the most recently pushed item without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns the number of items on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the stack holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the configured capacity, `None` when unbounded.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Applies `visitor` to every item in insertion order, in place.
    pub fn for_each_mut<F>(&mut self, visitor: F)
    where
        F: FnMut(&mut T),
    {
        self.items.iter_mut().for_each(visitor);
    }

    /// Returns the items matching `predicate`, in insertion order.
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).collect()
    }

    /// Iterates over the items from bottom (oldest) to top (newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for BoundedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}
