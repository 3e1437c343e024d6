//! Delivery time slots.

use crate::error::CommerceError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A delivery or pickup time window within a day.
///
/// The set is closed; slots travel as their `"HH:MM-HH:MM"` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "08:00-12:00")]
    Morning,
    #[serde(rename = "12:00-16:00")]
    Midday,
    #[serde(rename = "16:00-20:00")]
    Afternoon,
    #[serde(rename = "20:00-22:00")]
    Evening,
}

impl TimeSlot {
    /// Every slot, in day order.
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Midday,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "08:00-12:00",
            TimeSlot::Midday => "12:00-16:00",
            TimeSlot::Afternoon => "16:00-20:00",
            TimeSlot::Evening => "20:00-22:00",
        }
    }

    /// Parse a slot label.
    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s.trim())
            .ok_or_else(|| CommerceError::InvalidTimeSlot(s.to_string()))
    }

    /// Start time, `"HH:MM"`.
    pub fn start(&self) -> &'static str {
        &self.as_str()[..5]
    }

    /// End time, `"HH:MM"`.
    pub fn end(&self) -> &'static str {
        &self.as_str()[6..]
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A slot on a specific day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryWindow {
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

impl DeliveryWindow {
    pub fn new(date: NaiveDate, slot: TimeSlot) -> Self {
        Self { date, slot }
    }

    /// Human-readable label, e.g. `2026-10-20 08:00-12:00`.
    pub fn label(&self) -> String {
        format!("{} {}", self.date.format("%Y-%m-%d"), self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_slot() {
        for slot in TimeSlot::ALL {
            assert_eq!(TimeSlot::parse(slot.as_str()).unwrap(), slot);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_slot() {
        assert!(matches!(
            TimeSlot::parse("09:00-11:00"),
            Err(CommerceError::InvalidTimeSlot(_))
        ));
        assert!(TimeSlot::parse("").is_err());
    }

    #[test]
    fn test_start_and_end() {
        assert_eq!(TimeSlot::Morning.start(), "08:00");
        assert_eq!(TimeSlot::Morning.end(), "12:00");
        assert_eq!(TimeSlot::Evening.start(), "20:00");
        assert_eq!(TimeSlot::Evening.end(), "22:00");
    }

    #[test]
    fn test_serde_uses_label() {
        assert_eq!(
            serde_json::to_string(&TimeSlot::Afternoon).unwrap(),
            r#""16:00-20:00""#
        );
        let slot: TimeSlot = serde_json::from_str(r#""12:00-16:00""#).unwrap();
        assert_eq!(slot, TimeSlot::Midday);
    }

    #[test]
    fn test_window_label() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let window = DeliveryWindow::new(date, TimeSlot::Midday);
        assert_eq!(window.label(), "2026-10-20 12:00-16:00");
    }
}
