use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier for a leader; the slug survives every profile edit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeaderSlug(pub String);

/// The seven fixed profile sections tracked by the completeness evaluator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSection {
    BasicInfo,
    ContactInfo,
    Ideology,
    Manifesto,
    CorruptionCases,
    PolicyDecisions,
    PerformanceTracking,
}

impl ProfileSection {
    pub const ALL: [ProfileSection; 7] = [
        ProfileSection::BasicInfo,
        ProfileSection::ContactInfo,
        ProfileSection::Ideology,
        ProfileSection::Manifesto,
        ProfileSection::CorruptionCases,
        ProfileSection::PolicyDecisions,
        ProfileSection::PerformanceTracking,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ProfileSection::BasicInfo => "basic_info",
            ProfileSection::ContactInfo => "contact_info",
            ProfileSection::Ideology => "ideology",
            ProfileSection::Manifesto => "manifesto",
            ProfileSection::CorruptionCases => "corruption_cases",
            ProfileSection::PolicyDecisions => "policy_decisions",
            ProfileSection::PerformanceTracking => "performance_tracking",
        }
    }
}

/// The accountability subject. Derived attributes (`disputed_fields`,
/// `completion_status`, `accountability_score`) are only ever written by
/// the composer; end users edit source data and the engine recomputes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub slug: LeaderSlug,
    pub full_name: String,
    pub office_held: String,
    pub level: String,
    pub state: String,
    #[serde(default)]
    pub contact: Option<ContactInfo>,
    #[serde(default)]
    pub ideology: Option<IdeologyProfile>,
    #[serde(default)]
    pub manifesto: Vec<ManifestoItem>,
    #[serde(default)]
    pub corruption_cases: Vec<CorruptionCase>,
    #[serde(default)]
    pub policy_decisions: Vec<PolicyAction>,
    #[serde(default)]
    pub performance_tracking: Option<PerformanceTracking>,
    #[serde(default)]
    pub disputed_fields: BTreeSet<String>,
    #[serde(default)]
    pub completion_status: BTreeMap<ProfileSection, bool>,
    #[serde(default)]
    pub accountability_score: Option<f64>,
}

impl Leader {
    /// Attribute names a corruption-case dispute may legitimately contest.
    /// The composer drops anything outside this list so no dangling dispute
    /// is ever published.
    pub const FIELD_NAMES: [&'static str; 10] = [
        "full_name",
        "office_held",
        "level",
        "state",
        "contact",
        "ideology",
        "manifesto",
        "corruption_cases",
        "policy_decisions",
        "performance_tracking",
    ];

    /// A freshly registered leader: every completion flag false, no score.
    pub fn register(registration: LeaderRegistration) -> Self {
        let LeaderRegistration {
            slug,
            full_name,
            office_held,
            level,
            state,
        } = registration;

        let completion_status = ProfileSection::ALL
            .into_iter()
            .map(|section| (section, false))
            .collect();

        Self {
            slug,
            full_name,
            office_held,
            level,
            state,
            contact: None,
            ideology: None,
            manifesto: Vec::new(),
            corruption_cases: Vec::new(),
            policy_decisions: Vec::new(),
            performance_tracking: None,
            disputed_fields: BTreeSet::new(),
            completion_status,
            accountability_score: None,
        }
    }

    /// Overall completion as a whole percentage of the seven sections.
    pub fn completion_percent(&self) -> u8 {
        let complete = self
            .completion_status
            .values()
            .filter(|populated| **populated)
            .count();
        ((complete as f64 / ProfileSection::ALL.len() as f64) * 100.0).round() as u8
    }
}

/// Intake payload for registering a leader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderRegistration {
    pub slug: LeaderSlug,
    pub full_name: String,
    pub office_held: String,
    pub level: String,
    pub state: String,
}

/// Citizen-facing contact channels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
}

/// Declared political leanings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdeologyProfile {
    #[serde(default)]
    pub alignment: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// One manifesto pledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestoItem {
    pub title: String,
    #[serde(default)]
    pub detail: Option<String>,
}

/// A corruption-case record. A dispute is active while a sourced claim has
/// a public response contesting a named leader attribute and nobody has
/// marked the case resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptionCase {
    pub title: String,
    pub allegation: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub public_response: Option<String>,
    #[serde(default)]
    pub contested_field: Option<String>,
    #[serde(default)]
    pub resolved: bool,
    #[serde(default)]
    pub opened_on: Option<NaiveDate>,
}

impl CorruptionCase {
    pub fn has_active_dispute(&self) -> bool {
        !self.resolved
            && !self.sources.is_empty()
            && self.public_response.is_populated()
            && self.contested_field.is_populated()
    }
}

/// A logged policy decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyAction {
    pub title: String,
    pub decided_on: NaiveDate,
    pub stance: PolicyStance,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStance {
    Sponsored,
    VotedFor,
    VotedAgainst,
    Abstained,
}

impl PolicyStance {
    pub const fn label(self) -> &'static str {
        match self {
            PolicyStance::Sponsored => "sponsored",
            PolicyStance::VotedFor => "voted_for",
            PolicyStance::VotedAgainst => "voted_against",
            PolicyStance::Abstained => "abstained",
        }
    }
}

/// Legislative performance counters; every field optional because feeds
/// arrive piecemeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerformanceTracking {
    #[serde(default)]
    pub attendance: Option<AttendanceRecord>,
    #[serde(default)]
    pub bills: Option<BillRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub sessions_held: Option<u32>,
    #[serde(default)]
    pub sessions_attended: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BillRecord {
    #[serde(default)]
    pub sponsored: Option<u32>,
    #[serde(default)]
    pub passed: Option<u32>,
}

/// Uniform emptiness rule shared by the completeness evaluator and the
/// composer: absent is empty, a string is empty when its trimmed length is
/// zero, a sequence is empty with zero elements.
pub trait Populated {
    fn is_populated(&self) -> bool;
}

impl Populated for String {
    fn is_populated(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl<T: Populated> Populated for Option<T> {
    fn is_populated(&self) -> bool {
        self.as_ref().is_some_and(Populated::is_populated)
    }
}

impl<T> Populated for Vec<T> {
    fn is_populated(&self) -> bool {
        !self.is_empty()
    }
}

impl Populated for u32 {
    fn is_populated(&self) -> bool {
        true
    }
}

impl Populated for ContactInfo {
    fn is_populated(&self) -> bool {
        self.email.is_populated() || self.whatsapp.is_populated()
    }
}

impl Populated for IdeologyProfile {
    fn is_populated(&self) -> bool {
        self.alignment.is_populated() || self.summary.is_populated()
    }
}

impl Populated for AttendanceRecord {
    fn is_populated(&self) -> bool {
        self.sessions_held.is_populated() || self.sessions_attended.is_populated()
    }
}

impl Populated for BillRecord {
    fn is_populated(&self) -> bool {
        self.sponsored.is_populated() || self.passed.is_populated()
    }
}

impl Populated for PerformanceTracking {
    fn is_populated(&self) -> bool {
        self.attendance.is_populated() || self.bills.is_populated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> LeaderRegistration {
        LeaderRegistration {
            slug: LeaderSlug("amina-yusuf".to_string()),
            full_name: "Amina Yusuf".to_string(),
            office_held: "Senator".to_string(),
            level: "federal".to_string(),
            state: "Kano".to_string(),
        }
    }

    #[test]
    fn registered_leader_starts_with_all_flags_false_and_no_score() {
        let leader = Leader::register(registration());
        assert_eq!(leader.completion_status.len(), ProfileSection::ALL.len());
        assert!(leader.completion_status.values().all(|flag| !flag));
        assert!(leader.accountability_score.is_none());
        assert!(leader.disputed_fields.is_empty());
        assert_eq!(leader.completion_percent(), 0);
    }

    #[test]
    fn whitespace_only_strings_are_not_populated() {
        assert!(!"   ".to_string().is_populated());
        assert!("Amina".to_string().is_populated());
        assert!(!Option::<String>::None.is_populated());
        assert!(!Some("  ".to_string()).is_populated());
    }

    #[test]
    fn contact_requires_at_least_one_channel() {
        let empty = ContactInfo::default();
        assert!(!empty.is_populated());

        let with_whatsapp = ContactInfo {
            whatsapp: Some("+2348012345678".to_string()),
            ..ContactInfo::default()
        };
        assert!(with_whatsapp.is_populated());
    }

    #[test]
    fn dispute_requires_sources_response_and_named_field() {
        let mut case = CorruptionCase {
            title: "Contract inflation".to_string(),
            allegation: "Road contract inflated".to_string(),
            sources: vec!["https://example.org/audit-2025".to_string()],
            public_response: Some("The audit misstates the award value".to_string()),
            contested_field: Some("office_held".to_string()),
            resolved: false,
            opened_on: None,
        };
        assert!(case.has_active_dispute());

        case.resolved = true;
        assert!(!case.has_active_dispute());

        case.resolved = false;
        case.sources.clear();
        assert!(!case.has_active_dispute());
    }

    #[test]
    fn performance_tracking_counts_any_populated_counter() {
        let empty = PerformanceTracking::default();
        assert!(!empty.is_populated());

        let with_attendance = PerformanceTracking {
            attendance: Some(AttendanceRecord {
                sessions_held: Some(120),
                sessions_attended: None,
            }),
            bills: None,
        };
        assert!(with_attendance.is_populated());

        let hollow = PerformanceTracking {
            attendance: Some(AttendanceRecord::default()),
            bills: Some(BillRecord::default()),
        };
        assert!(!hollow.is_populated());
    }
}
