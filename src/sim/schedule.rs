//! Tick-counted deferred actions
//!
//! Delayed effects are queued against the session's own frame counter rather
//! than a host timer, so they pause with the game and die with the session.

/// Something to do a number of frames from now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Bring the ship back after it was destroyed
    Respawn,
}

#[derive(Debug, Clone)]
struct Pending {
    due: u64,
    generation: u32,
    action: DeferredAction,
}

/// Queue of deferred actions owned by one session
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire `delay` frames after `now`
    pub fn schedule(&mut self, now: u64, delay: u32, generation: u32, action: DeferredAction) {
        self.pending.push(Pending {
            due: now + delay as u64,
            generation,
            action,
        });
    }

    /// Remove and return every action due at `now`, in due order (ties keep
    /// insertion order). Actions stamped with another generation are dropped.
    pub fn take_due(&mut self, now: u64, generation: u32) -> Vec<DeferredAction> {
        let mut due: Vec<Pending> = Vec::new();
        self.pending.retain(|p| {
            if p.due <= now {
                due.push(p.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| p.due);
        due.into_iter()
            .filter(|p| {
                let current = p.generation == generation;
                if !current {
                    log::debug!("Dropped stale {:?} from generation {}", p.action, p.generation);
                }
                current
            })
            .map(|p| p.action)
            .collect()
    }

    /// Drop everything queued
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_when_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10, 60, 0, DeferredAction::Respawn);
        assert!(scheduler.take_due(69, 0).is_empty());
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.take_due(70, 0), vec![DeferredAction::Respawn]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_stale_generation_dropped() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0, 5, 1, DeferredAction::Respawn);
        assert!(scheduler.take_due(5, 2).is_empty());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0, 5, 0, DeferredAction::Respawn);
        scheduler.schedule(0, 9, 0, DeferredAction::Respawn);
        scheduler.cancel_all();
        assert!(scheduler.take_due(100, 0).is_empty());
    }

    #[test]
    fn test_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(0, 9, 0, DeferredAction::Respawn);
        scheduler.schedule(0, 3, 0, DeferredAction::Respawn);
        assert_eq!(scheduler.take_due(4, 0).len(), 1);
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.take_due(9, 0).len(), 1);
    }
}
