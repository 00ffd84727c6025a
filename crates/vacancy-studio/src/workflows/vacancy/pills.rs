use super::domain::{VacancyRecord, MAX_CUSTOM_PILLS, PILL_MAX_CHARS};

/// Reason a pill was not added; the pill sequence is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PillRejection {
    #[error("pill text is empty")]
    Empty,
    #[error("pill text must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
    #[error("pill '{0}' is already present")]
    Duplicate(String),
    #[error("at most {} pills are allowed", MAX_CUSTOM_PILLS)]
    Full,
}

impl VacancyRecord {
    /// Trim and append a custom pill.
    pub fn add_pill(&mut self, raw: &str) -> Result<(), PillRejection> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PillRejection::Empty);
        }
        let chars = trimmed.chars().count();
        if chars > PILL_MAX_CHARS {
            return Err(PillRejection::TooLong {
                max: PILL_MAX_CHARS,
                actual: chars,
            });
        }
        if self.custom_pills.iter().any(|pill| pill == trimmed) {
            return Err(PillRejection::Duplicate(trimmed.to_string()));
        }
        if self.custom_pills.len() >= MAX_CUSTOM_PILLS {
            return Err(PillRejection::Full);
        }

        self.custom_pills.push(trimmed.to_string());
        Ok(())
    }

    /// Remove the pill with exactly this text. Returns whether anything was removed.
    pub fn remove_pill(&mut self, pill: &str) -> bool {
        let before = self.custom_pills.len();
        self.custom_pills.retain(|existing| existing != pill);
        self.custom_pills.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(pills: &[&str]) -> VacancyRecord {
        VacancyRecord {
            custom_pills: pills.iter().map(|pill| pill.to_string()).collect(),
            ..VacancyRecord::default()
        }
    }

    #[test]
    fn add_pill_trims_input() {
        let mut record = VacancyRecord::default();
        record.add_pill("  Static Role ").expect("pill accepted");
        assert_eq!(record.custom_pills, vec!["Static Role".to_string()]);
    }

    #[test]
    fn blank_pill_is_rejected() {
        let mut record = record_with(&["Days"]);
        assert_eq!(record.add_pill("   "), Err(PillRejection::Empty));
        assert_eq!(record.custom_pills, vec!["Days".to_string()]);
    }

    #[test]
    fn duplicate_pill_is_rejected_after_trimming() {
        let mut record = record_with(&["Days", "On-call"]);
        assert_eq!(
            record.add_pill(" Days"),
            Err(PillRejection::Duplicate("Days".to_string()))
        );
        assert_eq!(record.custom_pills.len(), 2);
    }

    #[test]
    fn pill_length_is_capped_after_trimming() {
        let mut record = VacancyRecord::default();
        record
            .add_pill(&format!(" {} ", "x".repeat(50)))
            .expect("fifty characters fit");

        assert_eq!(
            record.add_pill(&"y".repeat(51)),
            Err(PillRejection::TooLong {
                max: 50,
                actual: 51
            })
        );
        assert_eq!(record.custom_pills, vec!["x".repeat(50)]);
    }

    #[test]
    fn sixth_pill_is_rejected() {
        let mut record = record_with(&["A", "B", "C", "D", "E"]);
        assert_eq!(record.add_pill("F"), Err(PillRejection::Full));
        assert_eq!(record.custom_pills, record_with(&["A", "B", "C", "D", "E"]).custom_pills);
    }

    #[test]
    fn remove_pill_keeps_remaining_order() {
        let mut record = record_with(&["A", "B", "C"]);
        assert!(record.remove_pill("B"));
        assert!(!record.remove_pill("missing"));
        assert_eq!(record.custom_pills, vec!["A".to_string(), "C".to_string()]);
    }
}
