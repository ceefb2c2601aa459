//! Figures for the overview page shown after sign-in.

use crate::model::campaign::{percentage, Campaign};
use crate::model::template::{Template, TemplateStatus};

/// Templates shown in the "Recent Templates" card.
pub const RECENT_TEMPLATES: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub draft: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn get(&self, status: TemplateStatus) -> usize {
        match status {
            TemplateStatus::Draft => self.draft,
            TemplateStatus::Pending => self.pending,
            TemplateStatus::Approved => self.approved,
            TemplateStatus::Rejected => self.rejected,
        }
    }

    pub fn total(&self) -> usize {
        self.draft + self.pending + self.approved + self.rejected
    }
}

/// Totals over every template and campaign the dashboard knows about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub templates: StatusCounts,
    pub campaigns: usize,
    pub sent: u64,
    pub delivered: u64,
    pub read: u64,
    pub failed: u64,
    /// Submitted templates, newest first, drafts left out.
    pub recent_templates: Vec<Template>,
}

impl DashboardSummary {
    pub fn collect(templates: &[Template], campaigns: &[Campaign]) -> Self {
        let mut summary = DashboardSummary {
            campaigns: campaigns.len(),
            ..Default::default()
        };

        for template in templates {
            let counts = &mut summary.templates;
            match template.status {
                TemplateStatus::Draft => counts.draft += 1,
                TemplateStatus::Pending => counts.pending += 1,
                TemplateStatus::Approved => counts.approved += 1,
                TemplateStatus::Rejected => counts.rejected += 1,
            }
        }

        for campaign in campaigns {
            summary.sent += u64::from(campaign.sent);
            summary.delivered += u64::from(campaign.delivered);
            summary.read += u64::from(campaign.read);
            summary.failed += u64::from(campaign.failed);
        }

        let mut recent: Vec<Template> = templates
            .iter()
            .filter(|t| t.status != TemplateStatus::Draft)
            .cloned()
            .collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(RECENT_TEMPLATES);
        summary.recent_templates = recent;

        summary
    }

    /// Delivered messages over sent ones, across every campaign.
    pub fn delivery_rate(&self) -> f64 {
        percentage(self.delivered, self.sent)
    }

    pub fn read_rate(&self) -> f64 {
        percentage(self.read, self.sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{mock_campaigns, mock_templates};

    #[test]
    fn counts_seed_templates_per_status() {
        let summary = DashboardSummary::collect(&mock_templates(), &[]);
        assert_eq!(
            summary.templates,
            StatusCounts {
                draft: 0,
                pending: 2,
                approved: 4,
                rejected: 1,
            }
        );
        assert_eq!(summary.templates.total(), 7);
        assert_eq!(summary.templates.get(TemplateStatus::Approved), 4);
    }

    #[test]
    fn totals_campaign_figures() {
        let summary = DashboardSummary::collect(&[], &mock_campaigns());
        assert_eq!(summary.campaigns, 3);
        assert_eq!(summary.sent, 850);
        assert_eq!(summary.delivered, 753);
        assert_eq!(summary.read, 560);
        assert_eq!(summary.failed, 17);
        assert!((summary.delivery_rate() - 753.0 * 100.0 / 850.0).abs() < 1e-9);
        assert!((summary.read_rate() - 560.0 * 100.0 / 850.0).abs() < 1e-9);
    }

    #[test]
    fn rates_weight_campaigns_by_volume() {
        let campaigns = mock_campaigns();
        let summary = DashboardSummary::collect(&[], &campaigns);
        let averaged =
            campaigns.iter().map(Campaign::delivery_rate).sum::<f64>() / campaigns.len() as f64;
        assert!(summary.delivery_rate() > averaged);
    }

    #[test]
    fn recent_templates_skip_drafts_and_sort_newest_first() {
        let mut templates = mock_templates();
        let mut draft = Template::new_draft();
        draft.created_at = "2030-01-01".into();
        templates.push(draft);

        let summary = DashboardSummary::collect(&templates, &[]);
        let names: Vec<&str> = summary
            .recent_templates
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Special Promotion",
                "Shipping Update",
                "Welcome Message",
                "Order Confirmation",
            ]
        );
        assert_eq!(summary.templates.draft, 1);
    }

    #[test]
    fn empty_inputs_give_zero_rates() {
        let summary = DashboardSummary::collect(&[], &[]);
        assert_eq!(summary, DashboardSummary::default());
        assert_eq!(summary.delivery_rate(), 0.0);
    }
}
