use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Weak};

/// A desktop notification as delivered to the OS notification center.
///
/// The record stays mutable after scheduling: the icon arrives from an
/// asynchronous fetch and is attached in place, so the scheduling call
/// and the fetch completion share one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopNotification {
    pub title: String,
    pub body: String,
    /// Raw icon image bytes, attached when (and if) the fetch succeeds.
    pub icon: Option<Vec<u8>>,
}

impl DesktopNotification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            icon: None,
        }
    }
}

/// Shared handle to a delivered notification record.
pub type SharedNotification = Arc<Mutex<DesktopNotification>>;

/// Bounded queue of recently delivered notifications.
///
/// Retention exists so that an in-flight icon fetch still has a live
/// record to mutate; a completion whose record was already evicted
/// upgrades to `None` and is dropped.
#[derive(Debug)]
pub struct DeliveredQueue {
    items: VecDeque<SharedNotification>,
    capacity: usize,
}

impl DeliveredQueue {
    /// Creates a new queue with the given maximum capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a delivered notification, evicting the oldest entry when
    /// at capacity. Returns a weak back-reference for async completions.
    pub fn push(&mut self, notification: DesktopNotification) -> Weak<Mutex<DesktopNotification>> {
        if self.items.len() >= self.capacity {
            self.items.pop_front();
        }
        let shared: SharedNotification = Arc::new(Mutex::new(notification));
        let weak = Arc::downgrade(&shared);
        self.items.push_back(shared);
        weak
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Most recently delivered notification, if any.
    pub fn latest(&self) -> Option<&SharedNotification> {
        self.items.back()
    }
}

impl Default for DeliveredQueue {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_live_back_reference() {
        let mut queue = DeliveredQueue::new(4);
        let weak = queue.push(DesktopNotification::new("Build done", "3 warnings"));

        let shared = weak.upgrade().expect("record should be retained");
        shared.lock().unwrap().icon = Some(vec![1, 2, 3]);

        let latest = queue.latest().unwrap().lock().unwrap();
        assert_eq!(latest.title, "Build done");
        assert_eq!(latest.icon.as_deref(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn eviction_invalidates_back_reference() {
        let mut queue = DeliveredQueue::new(2);
        let first = queue.push(DesktopNotification::new("one", ""));
        queue.push(DesktopNotification::new("two", ""));
        queue.push(DesktopNotification::new("three", ""));

        assert_eq!(queue.len(), 2);
        assert!(first.upgrade().is_none(), "evicted record must be dropped");
    }

    #[test]
    fn default_capacity_is_sixteen() {
        let mut queue = DeliveredQueue::default();
        for i in 0..20 {
            queue.push(DesktopNotification::new(format!("n{i}"), ""));
        }
        assert_eq!(queue.len(), 16);
    }
}
