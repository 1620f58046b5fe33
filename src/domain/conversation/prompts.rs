//! Prompt templates for preference collection and itinerary generation.

use super::preferences::SUGGESTED_PREFERENCE_KEYS;
use super::PreferenceSet;

/// Persona used for the standalone itinerary request.
pub const ITINERARY_SYSTEM_PROMPT: &str = "You are a master travel experience architect.";

/// System prompt for the preference-collection dialogue.
///
/// Instructs the model to ask one question per turn, never draft an
/// itinerary, and close every reply with a JSON object of newly learned
/// preferences.
pub fn collector_system_prompt() -> String {
    let suggested_keys = SUGGESTED_PREFERENCE_KEYS
        .iter()
        .map(|key| format!("- {key}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a travel preference collector. Your role is to gather travel preferences through natural conversation.

REQUIREMENTS:
1. ALWAYS end your response with a JSON object containing newly learned preferences
2. Keep responses conversational but focused on gathering information
3. Ask only ONE question at a time
4. Do not generate itineraries or detailed plans

JSON FORMAT:
- Must be the last part of your response
- Must be a valid JSON object
- Only include newly learned information
- Use clear, consistent keys

Example response:
"I see you're interested in visiting Bali! When are you planning to travel?
{{"destination": "Bali"}}"

Common preference keys:
{suggested_keys}"#
    )
}

/// Second system message: what is already known, so it is not asked again.
pub fn known_preferences_prompt(preferences: &PreferenceSet) -> String {
    format!("Current preferences: {}", preferences.to_pretty_json())
}

/// Standalone itinerary request embedding every collected preference.
pub fn itinerary_prompt(preferences: &PreferenceSet) -> String {
    format!(
        r#"COMPREHENSIVE TRAVEL EXPERIENCE DESIGN

Traveler Preferences:
{preferences}

ITINERARY GENERATION PROTOCOL:
1. Craft a narrative-driven, immersive travel experience
2. Balance structured activities with flexible exploration
3. Integrate local cultural insights
4. Provide logistical and experiential details

DETAILED REQUIREMENTS:
- Hour-by-hour activity breakdown
- Cultural context for each experience
- Hidden local recommendations
- Practical travel tips
- Estimated costs and time allocations
- Alternative activity options
- Transportation and mobility considerations

OUTPUT FORMAT:
- Day-by-day narrative
- Thematic experience progression
- Insider local knowledge
- Personalized recommendations"#,
        preferences = preferences.to_pretty_json()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_prompt_lists_every_suggested_key() {
        let prompt = collector_system_prompt();
        for key in SUGGESTED_PREFERENCE_KEYS {
            assert!(prompt.contains(&format!("- {key}")), "missing {key}");
        }
    }

    #[test]
    fn collector_prompt_states_turn_rules() {
        let prompt = collector_system_prompt();
        assert!(prompt.contains("Ask only ONE question at a time"));
        assert!(prompt.contains("Do not generate itineraries"));
        assert!(prompt.contains(r#"{"destination": "Bali"}"#));
    }

    #[test]
    fn known_preferences_prompt_embeds_json() {
        let mut prefs = PreferenceSet::new();
        prefs.insert("destination", "Bali");
        assert_eq!(
            known_preferences_prompt(&prefs),
            "Current preferences: {\n  \"destination\": \"Bali\"\n}"
        );
    }

    #[test]
    fn itinerary_prompt_embeds_preferences_and_protocol() {
        let mut prefs = PreferenceSet::new();
        prefs.insert("budget", "mid-range");
        let prompt = itinerary_prompt(&prefs);
        assert!(prompt.contains("\"budget\": \"mid-range\""));
        assert!(prompt.contains("Hour-by-hour activity breakdown"));
        assert!(prompt.contains("Transportation and mobility considerations"));
    }
}
