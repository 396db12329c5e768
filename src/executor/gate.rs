//! Bounded admission gate for instance probes

use crate::error::{AppError, Result};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting gate limiting how many instance probes run at once.
///
/// A probe holds its permit for its whole lifetime, across every query and
/// politeness delay.
#[derive(Debug)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl AdmissionGate {
    /// Create a gate admitting at most `capacity` probes
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(AppError::config("Admission gate capacity must be greater than 0"));
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        })
    }

    /// Wait for a free slot
    pub async fn admit(self: &Arc<Self>) -> Result<AdmissionPermit> {
        let permit = self.semaphore.clone().acquire_owned().await?;

        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now_active, Ordering::SeqCst);

        Ok(AdmissionPermit {
            _permit: permit,
            gate: Arc::clone(self),
        })
    }

    /// Maximum number of concurrent probes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Probes currently holding a permit
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously active probes seen so far
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Free slots
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

/// Slot in an [`AdmissionGate`]; released on drop
#[derive(Debug)]
pub struct AdmissionPermit {
    _permit: OwnedSemaphorePermit,
    gate: Arc<AdmissionGate>,
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        self.gate.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_zero_capacity_rejected() {
        let result = AdmissionGate::new(0);
        assert!(matches!(result.unwrap_err(), AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_permit_accounting() {
        let gate = Arc::new(AdmissionGate::new(2).unwrap());
        assert_eq!(gate.capacity(), 2);
        assert_eq!(gate.available(), 2);

        let first = gate.admit().await.unwrap();
        let second = gate.admit().await.unwrap();
        assert_eq!(gate.active(), 2);
        assert_eq!(gate.available(), 0);
        assert_eq!(gate.peak(), 2);

        drop(first);
        assert_eq!(gate.active(), 1);
        assert_eq!(gate.available(), 1);

        drop(second);
        assert_eq!(gate.active(), 0);
        assert_eq!(gate.peak(), 2);
    }

    #[tokio::test]
    async fn test_admit_waits_for_release() {
        let gate = Arc::new(AdmissionGate::new(1).unwrap());
        let held = gate.admit().await.unwrap();

        let waiting = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.admit().await.map(|_| ()) })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(held);
        waiting.await.unwrap().unwrap();
        assert_eq!(gate.peak(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_peak_never_exceeds_capacity() {
        let gate = Arc::new(AdmissionGate::new(3).unwrap());

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let gate = gate.clone();
                tokio::spawn(async move {
                    let _permit = gate.admit().await.unwrap();
                    tokio::time::sleep(Duration::from_millis(10 + i)).await;
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(gate.peak(), 3);
        assert_eq!(gate.active(), 0);
    }
}
