//! Chat tool
//!
//! Relays a question to the health assistant, falling back to the live profile when
//! the caller does not supply one.

use crate::chat::{ChatRelay, ChatRequest, ChatResponse};
use crate::models::{ProfileStore, UserProfile};

pub async fn health_chat(
    relay: &ChatRelay,
    store: &ProfileStore,
    message: String,
    metrics: Option<UserProfile>,
) -> ChatResponse {
    let metrics = metrics.or_else(|| store.current().map(|p| (*p).clone()));
    relay.handle(&ChatRequest { message, metrics }).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::relay::MISSING_KEY_ERROR;
    use crate::chat::{ChatError, Generation, LanguageModel};
    use crate::metrics::calculate_all_metrics;
    use crate::models::{ActivityLevel, BiometricInput, Gender, Goal, UnitSystem};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        async fn generate(&self, prompt: &str) -> Result<Generation, ChatError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(Generation::Text("ok".to_string()))
        }
    }

    fn profile(name: &str) -> UserProfile {
        let input = BiometricInput {
            name: name.to_string(),
            height_cm: 170.0,
            weight_kg: 65.0,
            age_years: 35,
            gender: Gender::Female,
            activity_level: ActivityLevel::Light,
            goal: Goal::Maintain,
            unit: UnitSystem::Metric,
        };
        let metrics = calculate_all_metrics(&input);
        UserProfile::new(input, metrics)
    }

    fn recording_relay() -> (Arc<RecordingModel>, ChatRelay) {
        let model = Arc::new(RecordingModel::default());
        let relay = ChatRelay::new(Some(model.clone() as Arc<dyn LanguageModel>));
        (model, relay)
    }

    #[tokio::test]
    async fn test_unconfigured_relay() {
        let response = health_chat(
            &ChatRelay::unconfigured(),
            &ProfileStore::new(),
            "What should I eat?".to_string(),
            None,
        )
        .await;
        assert_eq!(response, ChatResponse::error(MISSING_KEY_ERROR));
    }

    #[tokio::test]
    async fn test_uses_current_profile() {
        let (model, relay) = recording_relay();
        let store = ProfileStore::new();
        store.publish(profile("Robin"));

        let response = health_chat(&relay, &store, "Am I on track?".to_string(), None).await;
        assert_eq!(response, ChatResponse::reply("ok"));

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("- Name: Robin\n"));
    }

    #[tokio::test]
    async fn test_supplied_metrics_win() {
        let (model, relay) = recording_relay();
        let store = ProfileStore::new();
        store.publish(profile("Robin"));

        health_chat(&relay, &store, "And now?".to_string(), Some(profile("Casey"))).await;

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("- Name: Casey\n"));
        assert!(!prompts[0].contains("Robin"));
    }

    #[tokio::test]
    async fn test_no_profile_anywhere() {
        let (model, relay) = recording_relay();
        health_chat(&relay, &ProfileStore::new(), "Hi".to_string(), None).await;

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("has not provided their biometric data yet"));
    }
}
