use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Leader, Populated, ProfileSection};

/// Boolean-per-section view of a leader profile. Always carries exactly
/// the seven fixed sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMap {
    sections: BTreeMap<ProfileSection, bool>,
}

impl CompletionMap {
    pub fn is_complete(&self, section: ProfileSection) -> bool {
        self.sections.get(&section).copied().unwrap_or(false)
    }

    pub fn sections(&self) -> &BTreeMap<ProfileSection, bool> {
        &self.sections
    }

    /// Whole percentage of complete sections, rounded to nearest.
    pub fn overall_percent(&self) -> u8 {
        let complete = self.sections.values().filter(|flag| **flag).count();
        ((complete as f64 / ProfileSection::ALL.len() as f64) * 100.0).round() as u8
    }
}

/// Evaluate each of the seven profile sections independently against its
/// required-field rule. Total and deterministic: malformed or absent
/// sub-records count as empty, never as an error.
pub fn evaluate_completeness(leader: &Leader) -> CompletionMap {
    let sections = ProfileSection::ALL
        .into_iter()
        .map(|section| (section, section_complete(leader, section)))
        .collect();

    CompletionMap { sections }
}

fn section_complete(leader: &Leader, section: ProfileSection) -> bool {
    match section {
        ProfileSection::BasicInfo => {
            leader.full_name.is_populated()
                && leader.office_held.is_populated()
                && leader.level.is_populated()
                && leader.state.is_populated()
        }
        ProfileSection::ContactInfo => leader.contact.is_populated(),
        ProfileSection::Ideology => leader.ideology.is_populated(),
        ProfileSection::Manifesto => leader.manifesto.is_populated(),
        ProfileSection::CorruptionCases => leader.corruption_cases.is_populated(),
        ProfileSection::PolicyDecisions => leader.policy_decisions.is_populated(),
        ProfileSection::PerformanceTracking => leader.performance_tracking.is_populated(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::domain::{
        AttendanceRecord, ContactInfo, LeaderRegistration, LeaderSlug, ManifestoItem,
        PerformanceTracking,
    };
    use super::*;

    fn bare_leader() -> Leader {
        Leader::register(LeaderRegistration {
            slug: LeaderSlug("chidi-okafor".to_string()),
            full_name: "Chidi Okafor".to_string(),
            office_held: "Governor".to_string(),
            level: "state".to_string(),
            state: "Enugu".to_string(),
        })
    }

    #[test]
    fn basic_info_only_profile_maps_to_one_of_seven() {
        let map = evaluate_completeness(&bare_leader());

        assert!(map.is_complete(ProfileSection::BasicInfo));
        for section in ProfileSection::ALL.into_iter().skip(1) {
            assert!(!map.is_complete(section), "{} unexpectedly complete", section.label());
        }
        assert_eq!(map.overall_percent(), 14);
    }

    #[test]
    fn empty_contact_record_stays_incomplete() {
        let mut leader = bare_leader();
        leader.contact = Some(ContactInfo::default());

        let map = evaluate_completeness(&leader);
        assert!(!map.is_complete(ProfileSection::ContactInfo));
    }

    #[test]
    fn absent_and_empty_manifesto_are_equivalent() {
        let absent = bare_leader();
        let mut explicit_empty = bare_leader();
        explicit_empty.manifesto = Vec::new();

        let from_absent = evaluate_completeness(&absent);
        let from_empty = evaluate_completeness(&explicit_empty);

        assert_eq!(from_absent, from_empty);
        assert!(!from_absent.is_complete(ProfileSection::Manifesto));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut leader = bare_leader();
        leader.manifesto.push(ManifestoItem {
            title: "Rural electrification".to_string(),
            detail: None,
        });
        leader.performance_tracking = Some(PerformanceTracking {
            attendance: Some(AttendanceRecord {
                sessions_held: Some(90),
                sessions_attended: Some(71),
            }),
            bills: None,
        });

        let first = evaluate_completeness(&leader);
        let second = evaluate_completeness(&leader);

        assert_eq!(first, second);
        assert!(first.is_complete(ProfileSection::Manifesto));
        assert!(first.is_complete(ProfileSection::PerformanceTracking));
        assert_eq!(first.overall_percent(), 43);
    }

    #[test]
    fn blank_basic_info_field_blocks_the_section() {
        let mut leader = bare_leader();
        leader.state = "   ".to_string();

        let map = evaluate_completeness(&leader);
        assert!(!map.is_complete(ProfileSection::BasicInfo));
        assert_eq!(map.overall_percent(), 0);
    }
}
