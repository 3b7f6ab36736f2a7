//! Civic process guidance: step lists for common government paperwork.

use crate::constants::NO_STEPS_FOUND;

/// Known processes, in lookup priority order.
const STEP_DB: &[(&str, &[&str])] = &[
    (
        "birth_certificate",
        &[
            "Open eGov portal",
            "Fill applicant form",
            "Upload ID scan",
            "Pay fee",
            "Track status in dashboard",
        ],
    ),
    (
        "marriage_certificate",
        &[
            "Schedule appointment",
            "Bring IDs & witnesses",
            "Sign registry",
            "Receive digital copy",
        ],
    ),
    (
        "id_card",
        &[
            "Submit online request",
            "Photo & fingerprint at office",
            "Pay fee",
            "Pickup or receive by mail",
        ],
    ),
];

/// Steps for a topic, echoing the topic as asked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepsAnswer {
    pub topic: String,
    pub steps: Vec<String>,
}

/// Looks up the steps for `topic`.
///
/// The topic is lowercased with spaces turned into underscores. An exact key match wins;
/// otherwise the first process whose key contains every word of the topic is used.
pub fn lookup(topic: &str) -> StepsAnswer {
    let topic = topic.trim();
    let key = topic.to_lowercase().replace(' ', "_");

    let steps = find_steps(&key)
        .map(|steps| steps.iter().map(|s| s.to_string()).collect())
        .unwrap_or_else(|| {
            tracing::debug!("no civic steps for topic {topic:?}");
            vec![NO_STEPS_FOUND.to_string()]
        });

    StepsAnswer {
        topic: topic.to_string(),
        steps,
    }
}

fn find_steps(key: &str) -> Option<&'static [&'static str]> {
    if let Some((_, steps)) = STEP_DB.iter().find(|(k, _)| *k == key) {
        return Some(*steps);
    }

    // A blank topic has no words, so it matches the first process.
    let words: Vec<&str> = key.split('_').filter(|w| !w.is_empty()).collect();
    STEP_DB
        .iter()
        .find(|(k, _)| words.iter().all(|w| k.contains(w)))
        .map(|(_, steps)| *steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_topic() {
        let answer = lookup("id_card");
        assert_eq!(answer.topic, "id_card");
        assert_eq!(answer.steps.len(), 4);
        assert_eq!(answer.steps[0], "Submit online request");
    }

    #[test]
    fn test_spaces_and_case_normalised() {
        let answer = lookup("  Marriage Certificate ");
        assert_eq!(answer.topic, "Marriage Certificate");
        assert_eq!(answer.steps[2], "Sign registry");
    }

    #[test]
    fn test_partial_words_match_first_entry() {
        // "certificate" appears in both birth and marriage; birth comes first.
        assert_eq!(lookup("certificate").steps[0], "Open eGov portal");
        assert_eq!(lookup("marriage").steps[0], "Schedule appointment");
        assert_eq!(lookup("card id").steps[0], "Submit online request");
    }

    #[test]
    fn test_unknown_topic() {
        assert_eq!(lookup("passport").steps, vec![NO_STEPS_FOUND.to_string()]);
        assert_eq!(lookup("id passport").steps, vec![NO_STEPS_FOUND.to_string()]);
    }

    #[test]
    fn test_blank_topic_falls_through_to_first_process() {
        for topic in ["", "   ", " _ "] {
            let answer = lookup(topic);
            assert_eq!(answer.steps[0], "Open eGov portal", "{topic:?}");
            assert_eq!(answer.steps.len(), 5);
        }
        assert_eq!(lookup("  ").topic, "");
    }
}
