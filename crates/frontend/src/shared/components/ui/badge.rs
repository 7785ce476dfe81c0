use leptos::prelude::*;
use thaw::*;

/// Colour family of a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
    Accent,
}

impl BadgeTone {
    fn color(&self) -> BadgeColor {
        match self {
            BadgeTone::Neutral => BadgeColor::Subtle,
            BadgeTone::Info => BadgeColor::Informative,
            BadgeTone::Success => BadgeColor::Success,
            BadgeTone::Warning => BadgeColor::Warning,
            BadgeTone::Danger => BadgeColor::Danger,
            BadgeTone::Accent => BadgeColor::Brand,
        }
    }
}

/// Tinted pill used for statuses and severities
#[component]
pub fn ToneBadge(tone: BadgeTone, #[prop(into)] label: String) -> impl IntoView {
    view! {
        <Badge appearance=BadgeAppearance::Tint color=tone.color()>
            {label}
        </Badge>
    }
}

/// Tone for a status label as rendered on the dashboard
pub fn status_tone(status: &str) -> BadgeTone {
    match status {
        "new" => BadgeTone::Info,
        "investigating" => BadgeTone::Accent,
        "in_progress" | "pending" => BadgeTone::Warning,
        "resolved" | "fixed" => BadgeTone::Success,
        "spam" => BadgeTone::Danger,
        "read" => BadgeTone::Info,
        _ => BadgeTone::Neutral,
    }
}

/// Tone and capitalised label for a free-text severity
pub fn severity_badge(severity: &str) -> (BadgeTone, String) {
    let normalized = severity.trim().to_lowercase();
    let tone = match normalized.as_str() {
        "critical" => BadgeTone::Danger,
        "high" => BadgeTone::Warning,
        "medium" => BadgeTone::Accent,
        _ => BadgeTone::Success,
    };
    let mut chars = normalized.chars();
    let label = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    (tone, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_label_is_capitalised() {
        assert_eq!(severity_badge("HIGH"), (BadgeTone::Warning, "High".to_string()));
        assert_eq!(severity_badge("critical").0, BadgeTone::Danger);
        assert_eq!(severity_badge("low"), (BadgeTone::Success, "Low".to_string()));
    }

    #[test]
    fn closed_out_statuses_have_distinct_tones() {
        assert_eq!(status_tone("fixed"), BadgeTone::Success);
        assert_eq!(status_tone("spam"), BadgeTone::Danger);
        assert_eq!(status_tone("closed"), BadgeTone::Neutral);
    }
}
