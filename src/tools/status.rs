//! HealthStat Status Tool
//!
//! Provides runtime status information about the HealthStat service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::models::ProfileStore;

/// Usage instructions for AI assistants
pub const HEALTHSTAT_INSTRUCTIONS: &str = r#"
# HealthStat Instructions

HealthStat turns a person's basic biometrics into health estimates and answers
questions about them through a health assistant.

## Workflow

1. `calculate_health_metrics` with the user's details
2. `get_current_profile` to re-read the latest results
3. `render_health_charts` to draw the dashboard as a PNG
4. `health_chat` to ask the assistant a question about the profile

Each successful `calculate_health_metrics` call replaces the current profile. A
rejected submission leaves the previous profile in place.

---

## Submitting Biometrics

| Field | Metric | Imperial |
|-------|--------|----------|
| unit | `"metric"` (default) | `"imperial"` |
| age | 10-120 years | 10-120 years |
| height | `height_cm` 100-250 | `height_ft` 3-8 and `height_in` 0-11.99 |
| weight | `weight_kg` 30-300 | `weight_lbs` 66-660 |

Also required:
- **gender**: `"male"` or `"female"`
- **activity_level**: factor or name
  - 1.2 `sedentary` (little or no exercise)
  - 1.375 `light` (1-3 days/week)
  - 1.55 `moderate` (3-5 days/week)
  - 1.725 `very_active` (6-7 days/week)
  - 1.9 `extreme` (physical job or twice-daily training)
- **goal**: `"lose"`, `"maintain"` or `"gain"`

`name` is optional and defaults to "User". Age is truncated to whole years.

Validation stops at the first problem and returns `{"error": ..., "field": ...}`.
Fields are checked in the order age, height, weight, gender, activity level, goal.

**Example (imperial):**
```
calculate_health_metrics(unit: "imperial", age: 30, height_ft: 5, height_in: 10,
                         weight_lbs: 160, gender: "male", activity_level: 1.55,
                         goal: "lose")
```

---

## What Gets Calculated

- **BMI** = weight / height² (kg/m²), categorized at 18.5 / 25 / 30
- **BMR** via Mifflin-St Jeor
- **TDEE** = BMR × activity factor
- **Daily calories** = TDEE -500 (lose), +0 (maintain), +300 (gain), never below 1200
- **Body fat %** via the Deurenberg BMI formula, clamped to 3-60
- **Water** = 35 ml per kg, in liters to one decimal
- **Micronutrients**: zinc, iron, magnesium and calcium RDAs by gender and age

All values are estimates. They are not medical advice.

---

## Charts

`render_health_charts` writes a PNG with four panels:
- BMI gauge colored by category
- Estimated body fat
- Macronutrient split of the daily calories (30% protein, 40% carbs, 30% fat)
- BMR, maintenance and goal calorie levels

File names are kept inside the configured chart directory. Width and height default
to 1200×900 and must each be 200-4000 pixels.

---

## Health Assistant

`health_chat(message)` sends the question together with the current profile. Pass
`metrics` to ask about a different profile. Replies use markdown.

The assistant needs an API key (`HEALTHSTAT_GEMINI_API_KEY` or `GEMINI_API_KEY`).
Without one every chat returns `Server configuration error. API key missing.`
Check `healthstat_status` for `chat_configured`.
"#;

/// Runtime status of the HealthStat service
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Profile information
    pub profile_loaded: bool,
    pub profile_computed_at: Option<String>,

    /// Chat and chart configuration
    pub chat_configured: bool,
    pub gemini_model: String,
    pub chart_dir: String,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    chat_configured: bool,
    gemini_model: String,
    chart_dir: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(chat_configured: bool, gemini_model: String, chart_dir: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            chat_configured,
            gemini_model,
            chart_dir,
        }
    }

    /// Get the current status
    pub fn get_status(&self, store: &ProfileStore) -> HealthStatStatus {
        let build_info = BuildInfo::current();
        let profile = store.current();

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        HealthStatStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            profile_loaded: profile.is_some(),
            profile_computed_at: profile.map(|p| p.computed_at.to_rfc3339()),
            chat_configured: self.chat_configured,
            gemini_model: self.gemini_model.clone(),
            chart_dir: self.chart_dir.display().to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_without_profile() {
        let tracker = StatusTracker::new(false, "gemini-1.5-flash".to_string(), PathBuf::from("./charts"));
        let status = tracker.get_status(&ProfileStore::new());
        assert!(!status.profile_loaded);
        assert!(status.profile_computed_at.is_none());
        assert!(!status.chat_configured);
        assert_eq!(status.process_id, std::process::id());
        assert_eq!(status.version, crate::build_info::VERSION);
    }

    #[test]
    fn test_instructions_cover_tools() {
        for tool in [
            "calculate_health_metrics",
            "get_current_profile",
            "render_health_charts",
            "health_chat",
            "healthstat_status",
        ] {
            assert!(HEALTHSTAT_INSTRUCTIONS.contains(tool), "missing {}", tool);
        }
    }
}
