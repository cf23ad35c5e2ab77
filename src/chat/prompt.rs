//! Prompt construction for the health assistant
//!
//! Combines the assistant persona, the user's current profile and their question.

use crate::models::UserProfile;

/// Assistant persona and response rules
pub const SYSTEM_PROMPT: &str = "You are HealthStat AI, a friendly and encouraging health and \
fitness assistant built into a personal health dashboard. Give concise, accurate and actionable \
advice about health, nutrition and fitness. Format answers with markdown (**bold**, *italics*, \
- lists, `inline code`). Keep replies brief unless the user asks for detail, and address the user \
directly (for example \"Based on your goal...\"). Do not give medical advice; recommend consulting \
a healthcare professional for medical concerns or before making significant changes.";

/// Context used when the user has not submitted the form yet
pub const NO_PROFILE_CONTEXT: &str = "\nThe user has not provided their biometric data yet. If \
their question needs personal data, gently suggest filling out the dashboard form for \
personalized advice.";

const CONTEXT_INSTRUCTION: &str = "\n**Instruction:** Base your response directly on the user \
context above whenever the question concerns their health, diet or fitness plan, and refer to \
their specific goal and calorie needs.";

/// Render the user-context block for a profile, or the reminder when there is none
pub fn format_user_context(profile: Option<&UserProfile>) -> String {
    let Some(profile) = profile else {
        return NO_PROFILE_CONTEXT.to_string();
    };

    let input = &profile.input;
    let metrics = &profile.metrics;
    let nutrients = &metrics.micronutrients;

    let mut context = String::from("\n\n--- USER CONTEXT (use this data to personalize your response) ---\n");
    context.push_str(&format!("- Name: {}\n", input.name));
    context.push_str(&format!("- Age: {} years\n", input.age_years));
    context.push_str(&format!("- Gender: {}\n", input.gender.as_str()));
    context.push_str(&format!("- Height: {:.0} cm\n", input.height_cm));
    context.push_str(&format!("- Weight: {:.1} kg\n", input.weight_kg));
    context.push_str(&format!(
        "- Activity Level: Factor {} ({})\n",
        input.activity_level.factor(),
        input.activity_level.description()
    ));
    context.push_str(&format!("- Stated Goal: {}\n", input.goal.as_str()));
    context.push_str(&format!(
        "- Calculated BMI: {} ({})\n",
        metrics.bmi_display(),
        metrics.bmi_category.display_name()
    ));
    context.push_str(&format!(
        "- Estimated Daily Calories Needed (for Goal): {} kcal\n",
        metrics.calories
    ));
    context.push_str(&format!("- Estimated Body Fat: {}\n", metrics.body_fat_display()));
    context.push_str(&format!("- Estimated Water Intake: {} L/day\n", metrics.water_display()));
    context.push_str("- Estimated Micronutrient Needs (RDAs):\n");
    context.push_str(&format!("    - Zinc: {} mg\n", nutrients.zinc));
    context.push_str(&format!("    - Iron: {} mg\n", nutrients.iron));
    context.push_str(&format!("    - Magnesium: {} mg\n", nutrients.magnesium));
    context.push_str(&format!("    - Calcium: {} mg\n", nutrients.calcium));
    context.push_str("--- END USER CONTEXT ---\n");
    context.push_str(CONTEXT_INSTRUCTION);
    context
}

/// Full prompt sent to the language model
pub fn build_prompt(message: &str, profile: Option<&UserProfile>) -> String {
    format!(
        "{}{}\n\n--- User's Question ---\n{}",
        SYSTEM_PROMPT,
        format_user_context(profile),
        message
    )
}
