use serde::{Deserialize, Serialize};

/// Lifecycle of a bulk send, as reported by the delivery side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignState {
    Scheduled,
    InProgress,
    Completed,
    Failed,
}

impl CampaignState {
    pub fn label(&self) -> &'static str {
        match self {
            CampaignState::Scheduled => "Scheduled",
            CampaignState::InProgress => "In Progress",
            CampaignState::Completed => "Completed",
            CampaignState::Failed => "Failed",
        }
    }
}

/// A row of the campaign history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    /// Display name of the template that was sent.
    pub template: String,
    pub sent: u32,
    pub delivered: u32,
    pub read: u32,
    pub failed: u32,
    pub state: CampaignState,
    pub created_at: String,
}

impl Campaign {
    /// Delivered messages as a percentage of sent ones, `0.0` before anything
    /// was sent.
    pub fn delivery_rate(&self) -> f64 {
        percentage(self.delivered.into(), self.sent.into())
    }

    pub fn read_rate(&self) -> f64 {
        percentage(self.read.into(), self.sent.into())
    }
}

pub(crate) fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(sent: u32, delivered: u32, read: u32) -> Campaign {
        Campaign {
            id: "1".into(),
            name: "Welcome Campaign".into(),
            template: "Welcome Message".into(),
            sent,
            delivered,
            read,
            failed: sent - delivered,
            state: CampaignState::Completed,
            created_at: "2025-05-15".into(),
        }
    }

    #[test]
    fn rates_are_percentages_of_sent() {
        let c = campaign(500, 485, 350);
        assert!((c.delivery_rate() - 97.0).abs() < f64::EPSILON);
        assert!((c.read_rate() - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn nothing_sent_means_zero_rates() {
        let c = campaign(0, 0, 0);
        assert_eq!(c.delivery_rate(), 0.0);
        assert_eq!(c.read_rate(), 0.0);
    }
}
