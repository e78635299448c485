use crate::core::{Completion, EnergyLevel};

use super::types::{Alert, AlertKind, AlertSeverity};

const LOW_ENERGY_RUN: usize = 3;
const IDLE_RUN: usize = 2;

/// Rule-based care-team alerts over oldest-first histories.
pub fn detect_alerts(name: &str, energy: &[EnergyLevel], completion: &[Completion]) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if energy.len() >= LOW_ENERGY_RUN
        && energy[energy.len() - LOW_ENERGY_RUN..]
            .iter()
            .all(|e| *e == EnergyLevel::Low)
    {
        alerts.push(Alert {
            severity: AlertSeverity::Medium,
            kind: AlertKind::EnergyDecline,
            message: format!("{} has reported low energy for 3+ consecutive days", name),
            recommendation: "Consider scheduling a check-in call".to_string(),
        });
    }

    if completion.len() >= IDLE_RUN
        && completion[completion.len() - IDLE_RUN..]
            .iter()
            .all(Completion::is_untouched)
    {
        alerts.push(Alert {
            severity: AlertSeverity::High,
            kind: AlertKind::EngagementDrop,
            message: format!("{} has not completed any tasks in 2+ days", name),
            recommendation: "Patient may need additional support or plan adjustment".to_string(),
        });
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn done(all: bool) -> Completion {
        Completion {
            diet: all,
            exercise: all,
            mentality: all,
        }
    }

    #[test]
    fn test_low_energy_run() {
        let alerts = detect_alerts("Sam", &[EnergyLevel::Low; 3], &[done(true)]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::EnergyDecline);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);
        assert_eq!(
            alerts[0].message,
            "Sam has reported low energy for 3+ consecutive days"
        );
    }

    #[test]
    fn test_short_history_raises_nothing() {
        assert!(detect_alerts("Sam", &[EnergyLevel::Low; 2], &[done(false)]).is_empty());
        assert!(detect_alerts("Sam", &[], &[]).is_empty());
    }

    #[test]
    fn test_engagement_drop() {
        let alerts = detect_alerts(
            "Sam",
            &[EnergyLevel::Medium, EnergyLevel::Low],
            &[done(true), done(false), done(false)],
        );
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::EngagementDrop);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
    }

    #[test]
    fn test_partial_day_counts_as_engaged() {
        let mut partial = done(false);
        partial.mentality = true;
        assert!(detect_alerts("Sam", &[], &[done(false), partial]).is_empty());
    }

    #[test]
    fn test_both_alerts() {
        let alerts = detect_alerts("Sam", &[EnergyLevel::Low; 3], &[done(false); 3]);
        let kinds: Vec<_> = alerts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::EnergyDecline, AlertKind::EngagementDrop]);
    }
}
