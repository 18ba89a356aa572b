//! Dual-queue patient triage.
//!
//! A FIFO queue for regular admissions and a priority structure for
//! emergencies, fed by one shared admission counter. Emergencies always
//! drain completely before any regular patient is called, earliest
//! admission first within each class.
//!
//! Tickets live only in this queue; their numbers come from the local
//! counter and have nothing to do with store-assigned appointment ids.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use serde::Serialize;

use crate::models::{QueueTicket, TicketNumber};

/// Heap entry ordered so the earliest admission is the heap maximum.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Arrival(QueueTicket);

impl Ord for Arrival {
    fn cmp(&self, other: &Self) -> Ordering {
        // lowest ticket number wins
        other.0.number.cmp(&self.0.number)
    }
}

impl PartialOrd for Arrival {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Non-destructive view of both queues for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QueueStatus {
    /// Regular admissions in FIFO order
    pub regular: Vec<QueueTicket>,
    /// Emergency admissions in ascending admission order
    pub emergency: Vec<QueueTicket>,
}

/// The live triage queue.
#[derive(Debug, Default)]
pub struct TriageQueue {
    regular: VecDeque<QueueTicket>,
    emergency: BinaryHeap<Arrival>,
    admitted: TicketNumber,
}

impl TriageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a patient, minting a ticket and routing it by class.
    pub fn admit(&mut self, name: impl Into<String>, is_emergency: bool) -> QueueTicket {
        self.admitted += 1;
        let ticket = QueueTicket {
            number: self.admitted,
            name: name.into(),
        };
        if is_emergency {
            self.emergency.push(Arrival(ticket.clone()));
        } else {
            self.regular.push_back(ticket.clone());
        }
        ticket
    }

    /// Call the next patient: the oldest waiting emergency if any exist,
    /// otherwise the head of the regular queue.
    pub fn call_next(&mut self) -> Option<QueueTicket> {
        if let Some(Arrival(ticket)) = self.emergency.pop() {
            return Some(ticket);
        }
        self.regular.pop_front()
    }

    /// Total patients waiting across both classes.
    pub fn len(&self) -> usize {
        self.regular.len() + self.emergency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot both queues for display, leaving them untouched.
    pub fn status(&self) -> QueueStatus {
        let mut emergency: Vec<QueueTicket> =
            self.emergency.iter().map(|a| a.0.clone()).collect();
        emergency.sort_by_key(|t| t.number);

        QueueStatus {
            regular: self.regular.iter().cloned().collect(),
            emergency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_count_up_across_classes() {
        let mut queue = TriageQueue::new();
        let a = queue.admit("A", false);
        let b = queue.admit("B", true);
        let c = queue.admit("C", false);

        assert_eq!(a.number, 1);
        assert_eq!(b.number, 2);
        assert_eq!(c.number, 3);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn test_emergencies_first_then_arrival_order() {
        let mut queue = TriageQueue::new();
        queue.admit("A", false);
        queue.admit("B", true);
        queue.admit("C", false);
        queue.admit("D", true);

        let served: Vec<String> = std::iter::from_fn(|| queue.call_next())
            .map(|t| t.name)
            .collect();
        assert_eq!(served, vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_late_emergency_overtakes_waiting_regulars() {
        let mut queue = TriageQueue::new();
        for name in ["A", "B", "C"] {
            queue.admit(name, false);
        }
        queue.admit("E", true);

        assert_eq!(queue.call_next().unwrap().name, "E");
        assert_eq!(queue.call_next().unwrap().name, "A");
    }

    #[test]
    fn test_regulars_fifo() {
        let mut queue = TriageQueue::new();
        for name in ["A", "B", "C"] {
            queue.admit(name, false);
        }

        assert_eq!(queue.call_next().unwrap().name, "A");
        assert_eq!(queue.call_next().unwrap().name, "B");
        assert_eq!(queue.call_next().unwrap().name, "C");
    }

    #[test]
    fn test_empty_queue_returns_none() {
        let mut queue = TriageQueue::new();
        assert!(queue.call_next().is_none());

        queue.admit("A", true);
        queue.call_next();
        assert!(queue.call_next().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_status_is_ordered_and_non_destructive() {
        let mut queue = TriageQueue::new();
        queue.admit("A", false);
        queue.admit("B", true);
        queue.admit("C", false);
        queue.admit("D", true);

        let status = queue.status();
        let regular: Vec<_> = status.regular.iter().map(|t| t.name.as_str()).collect();
        let emergency: Vec<_> = status.emergency.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(regular, vec!["A", "C"]);
        assert_eq!(emergency, vec!["B", "D"]);

        // Snapshotting drained nothing.
        assert_eq!(queue.len(), 4);
        assert_eq!(queue.call_next().unwrap().name, "B");
    }
}
