//! Phase-epoch timers for discrete beats.
//!
//! Every scheduled effect is tagged with the epoch active when it was
//! scheduled. Entering a new phase bumps the epoch, so effects left over
//! from an abandoned phase are discarded at fire time instead of mutating
//! state. This is the only cancellation primitive the session relies on.

#[derive(Debug)]
struct Entry<E> {
    remaining_ms: u32,
    epoch: u32,
    effect: E,
}

#[derive(Debug)]
pub struct PhaseTimers<E> {
    epoch: u32,
    entries: Vec<Entry<E>>,
}

impl<E> Default for PhaseTimers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> PhaseTimers<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: 0,
            entries: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Invalidate everything scheduled so far.
    pub fn bump(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Schedule an effect under the current epoch.
    pub fn schedule(&mut self, delay_ms: u32, effect: E) {
        self.entries.push(Entry {
            remaining_ms: delay_ms,
            epoch: self.epoch,
            effect,
        });
    }

    /// Count down all pending entries.
    pub fn advance(&mut self, dt_ms: u32) {
        for e in &mut self.entries {
            e.remaining_ms = e.remaining_ms.saturating_sub(dt_ms);
        }
    }

    /// Remove and return the next due effect whose epoch is still current.
    /// Due-but-stale entries are dropped silently. Re-reads the epoch on
    /// every call, so an applied effect that bumps the epoch invalidates the
    /// rest of the due set.
    pub fn pop_due(&mut self) -> Option<E> {
        while let Some(i) = self.entries.iter().position(|e| e.remaining_ms == 0) {
            let e = self.entries.remove(i);
            if e.epoch == self.epoch {
                return Some(e.effect);
            }
        }
        None
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}
