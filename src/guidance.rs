//! Guidance resolver: self-care bundles per severity and care timelines per duration.

use crate::models::{CareTimeline, DurationLevel, GuidanceBundle, Severity};

/// Static guidance data, one bundle per severity and one timeline per duration.
#[derive(Debug, Clone)]
pub struct GuidanceResolver {
    mild: GuidanceBundle,
    moderate: GuidanceBundle,
    high: GuidanceBundle,
    short: CareTimeline,
    medium: CareTimeline,
    long: CareTimeline,
}

impl Default for GuidanceResolver {
    fn default() -> Self {
        Self::standard()
    }
}

impl GuidanceResolver {
    pub fn standard() -> Self {
        Self {
            mild: bundle(
                &[
                    "Hydrate: 250ml water every 2 hours",
                    "Gargle warm salt water",
                    "Room temp at 24-26°C",
                ],
                &["Caffeine & Sugary drinks", "Academic overexertion", "Cold air conditioning"],
                &[
                    "Paracetamol (500mg) - Only if fever > 38°C",
                    "Vitamin C (1000mg) Daily",
                    "Herbal lozenges",
                ],
                &["Fever above 39°C", "Sore throat preventing swallowing", "Symptoms > 5 days"],
            ),
            moderate: bundle(
                &[
                    "Bed rest for 24-48 hours",
                    "Isolate from roommates",
                    "Monitor temperature every 4h",
                ],
                &["Driving/Heavy machinery", "Attending physical classes", "Smoking/Vaping"],
                &["Ibuprofen (if no allergies)", "Oral rehydration salts", "Cough suppressant"],
                &["Painful breathing", "Persistent vomiting", "Signs of dehydration"],
            ),
            high: bundle(
                &[
                    "Contact University Clinic immediately",
                    "Prepare emergency contact info",
                    "Minimize physical movement",
                ],
                &[
                    "All forms of activity",
                    "Self-prescribing antibiotics",
                    "Waiting for symptoms to pass",
                ],
                &["Only follow advice from a medical professional"],
                &[
                    "Difficulty breathing",
                    "Chest pressure",
                    "Confusion/Disorientation",
                    "Bluish lips",
                ],
            ),
            short: timeline(
                "Phase 1: Acute Management",
                &[
                    "Strict rest cycle for 12 hours.",
                    "Document symptom progression hourly.",
                    "Switch to soft/warm liquid diet.",
                ],
                None,
            ),
            medium: timeline(
                "Phase 2: Monitoring & Recovery",
                &[
                    "Slowly reintroduce nutrition.",
                    "Light breathing exercises (4-7-8 method).",
                    "Check in with Care4U Chat if no improvement.",
                ],
                None,
            ),
            long: timeline(
                "Phase 3: Clinical Intervention",
                &[
                    "Escalate to in-person clinic visit.",
                    "Prepare history log for doctor review.",
                    "Consider academic leave if fatigue persists.",
                ],
                Some("Chronic symptoms beyond 72h require professional laboratory diagnosis."),
            ),
        }
    }

    /// Self-care bundle for a severity. Total over `Severity`.
    pub fn resolve(&self, severity: Severity) -> &GuidanceBundle {
        match severity {
            Severity::Mild => &self.mild,
            Severity::Moderate => &self.moderate,
            Severity::High => &self.high,
        }
    }

    pub fn timeline(&self, duration: DurationLevel) -> &CareTimeline {
        match duration {
            DurationLevel::Short => &self.short,
            DurationLevel::Medium => &self.medium,
            DurationLevel::Long => &self.long,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn bundle(now: &[&str], avoid: &[&str], meds: &[&str], warnings: &[&str]) -> GuidanceBundle {
    GuidanceBundle {
        now: to_strings(now),
        avoid: to_strings(avoid),
        meds: to_strings(meds),
        warnings: to_strings(warnings),
    }
}

fn timeline(title: &str, steps: &[&str], warning: Option<&str>) -> CareTimeline {
    CareTimeline {
        title: title.to_string(),
        steps: to_strings(steps),
        warning: warning.map(str::to_string),
    }
}
