//! Identifier allocation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues strictly increasing ids starting at 1. Ids are never handed out
/// twice, even after the entity that held one is deleted.
#[derive(Debug, Default)]
pub struct IdAllocator {
  last: AtomicU64,
}

impl IdAllocator {
  pub fn new() -> Self { Self::default() }

  pub fn next(&self) -> u64 { self.last.fetch_add(1, Ordering::Relaxed) + 1 }
}

#[cfg(test)]
mod tests {
  use std::{collections::HashSet, thread};

  use super::*;

  #[test]
  fn starts_at_one_and_increases() {
    let ids = IdAllocator::new();
    assert_eq!(ids.next(), 1);
    assert_eq!(ids.next(), 2);
    assert_eq!(ids.next(), 3);
  }

  #[test]
  fn concurrent_allocation_never_repeats() {
    let ids = IdAllocator::new();
    let issued: Vec<u64> = thread::scope(|s| {
      let workers: Vec<_> = (0..8)
        .map(|_| s.spawn(|| (0..500).map(|_| ids.next()).collect::<Vec<_>>()))
        .collect();
      workers
        .into_iter()
        .flat_map(|w| w.join().unwrap())
        .collect()
    });

    let unique: HashSet<u64> = issued.iter().copied().collect();
    assert_eq!(unique.len(), 4000);
    assert_eq!(unique.iter().max(), Some(&4000));
  }
}
