//! Statistics derived from the loaded collections

use chrono::{DateTime, Utc};
use shared::models::{
    BookingStatus, Complaint, ComplaintPriority, ComplaintStatus, LabBooking, Plant, PlantStatus,
};
use shared::util::within_days;

/// Recent-activity window
pub const RECENT_DAYS: i64 = 7;

/// Count items per key, in the order of `known`; anything else is tallied last
fn count_by<T, K, F>(items: &[T], known: &[K], key: F) -> (Vec<(K, usize)>, usize)
where
    K: Copy + PartialEq,
    F: Fn(&T) -> K,
{
    let mut counts: Vec<(K, usize)> = known.iter().map(|k| (*k, 0)).collect();
    let mut other = 0;
    for item in items {
        let k = key(item);
        match counts.iter_mut().find(|(known, _)| *known == k) {
            Some((_, n)) => *n += 1,
            None => other += 1,
        }
    }
    (counts, other)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplaintStats {
    pub total: usize,
    pub open: usize,
    /// Resolved or closed
    pub resolved: usize,
    pub urgent: usize,
    /// Filed within the last [`RECENT_DAYS`] days
    pub recent: usize,
    pub by_status: Vec<(ComplaintStatus, usize)>,
    /// Statuses outside the known set
    pub unrecognized: usize,
}

impl ComplaintStats {
    pub fn compute(complaints: &[Complaint], now: DateTime<Utc>) -> Self {
        let (by_status, unrecognized) =
            count_by(complaints, &ComplaintStatus::KNOWN, |c| c.status);
        Self {
            total: complaints.len(),
            open: complaints.iter().filter(|c| c.status.is_open()).count(),
            resolved: complaints
                .iter()
                .filter(|c| matches!(c.status, ComplaintStatus::Resolved | ComplaintStatus::Closed))
                .count(),
            urgent: complaints
                .iter()
                .filter(|c| c.priority == ComplaintPriority::Urgent && c.status.is_open())
                .count(),
            recent: complaints
                .iter()
                .filter(|c| within_days(c.created_at, now, RECENT_DAYS))
                .count(),
            by_status,
            unrecognized,
        }
    }

    pub fn count(&self, status: ComplaintStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantStats {
    pub total: usize,
    pub recent: usize,
    pub by_status: Vec<(PlantStatus, usize)>,
    pub unrecognized: usize,
}

impl PlantStats {
    pub fn compute(plants: &[Plant], now: DateTime<Utc>) -> Self {
        let (by_status, unrecognized) = count_by(plants, &PlantStatus::KNOWN, |p| p.status);
        Self {
            total: plants.len(),
            recent: plants
                .iter()
                .filter(|p| within_days(p.created_at, now, RECENT_DAYS))
                .count(),
            by_status,
            unrecognized,
        }
    }

    pub fn count(&self, status: PlantStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }

    pub fn pending(&self) -> usize {
        self.count(PlantStatus::Pending)
    }

    pub fn active(&self) -> usize {
        self.count(PlantStatus::Active)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabStats {
    pub total: usize,
    pub by_status: Vec<(BookingStatus, usize)>,
    /// Scheduled within the next [`RECENT_DAYS`] days
    pub upcoming: usize,
}

impl LabStats {
    pub fn compute(bookings: &[LabBooking], now: DateTime<Utc>) -> Self {
        let (by_status, _) = count_by(bookings, &BookingStatus::KNOWN, |b| b.status);
        let horizon = now + chrono::Duration::days(RECENT_DAYS);
        Self {
            total: bookings.len(),
            by_status,
            upcoming: bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Scheduled)
                .filter(|b| b.scheduled_date.is_some_and(|d| d >= now && d <= horizon))
                .count(),
        }
    }

    pub fn count(&self, status: BookingStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}
