//! Top-level state machine definition plus the lookup helpers callers use
//! to inspect a built graph without pattern-matching on every state type.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::state::{BaseState, State};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateMachineDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,

    /// Name of the first state to execute.
    pub start_at: String,

    /// All states keyed by state name.
    pub states: HashMap<String, State>,
}

impl StateMachineDefinition {
    /// By state name, return `(&State, &BaseState)` so callers can read the
    /// common fields without matching on the state type.
    pub fn get_state_and_base(&self, name: &str) -> Option<(&State, &BaseState)> {
        let state = self.states.get(name)?;
        Some((state, state.base()))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseState, PassState, State};
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_definition_serde_roundtrip() {
        let mut states = HashMap::new();
        states.insert(
            "Step1".to_string(),
            State::Pass(PassState {
                base: BaseState {
                    comment: Some("first step".to_string()),
                    end: Some(true),
                    ..Default::default()
                },
                ..Default::default()
            }),
        );
        let definition = StateMachineDefinition {
            comment: Some("test".to_string()),
            version: Some("1.0".to_string()),
            timeout_seconds: None,
            start_at: "Step1".to_string(),
            states,
        };
        let wire = serde_json::to_string(&definition).unwrap();
        let de: StateMachineDefinition = serde_json::from_str(&wire).unwrap();
        assert_eq!(de, definition);
        assert_eq!(de.start_at, "Step1");
        assert!(de.states.contains_key("Step1"));
    }

    #[test]
    fn test_definition_wire_casing() {
        let definition = StateMachineDefinition {
            comment: None,
            version: None,
            timeout_seconds: Some(300),
            start_at: "Only".to_string(),
            states: HashMap::from([(
                "Only".to_string(),
                State::Succeed(Default::default()),
            )]),
        };
        let wire = serde_json::to_value(&definition).unwrap();
        assert_eq!(
            wire,
            json!({
                "TimeoutSeconds": 300,
                "StartAt": "Only",
                "States": { "Only": { "Type": "Succeed" } }
            })
        );
    }

    #[test]
    fn test_get_state_and_base() {
        let definition = StateMachineDefinition {
            comment: None,
            version: None,
            timeout_seconds: None,
            start_at: "Only".to_string(),
            states: HashMap::from([(
                "Only".to_string(),
                State::Pass(PassState {
                    base: BaseState {
                        next: Some("Elsewhere".to_string()),
                        ..Default::default()
                    },
                    ..Default::default()
                }),
            )]),
        };
        let (state, base) = definition.get_state_and_base("Only").unwrap();
        assert!(matches!(state, State::Pass(_)));
        assert_eq!(base.next.as_deref(), Some("Elsewhere"));
        assert!(definition.get_state_and_base("Missing").is_none());
    }

    #[test]
    fn test_state_enum_all_variants_roundtrip() {
        use crate::branch::Branch;
        use crate::state::*;
        let variants: Vec<State> = vec![
            State::Task(TaskState {
                base: BaseState::default(),
                resource: "jitter-calculator".to_string(),
                parameters: None,
                timeout_seconds: None,
                heartbeat_seconds: None,
            }),
            State::Pass(PassState::default()),
            State::Wait(WaitState {
                seconds: Some(10),
                ..Default::default()
            }),
            State::Choice(ChoiceState::default()),
            State::Succeed(SucceedState::default()),
            State::Fail(FailState::default()),
            State::Parallel(ParallelState {
                base: BaseState::default(),
                branches: vec![],
                parameters: None,
            }),
            State::Map(MapState {
                base: BaseState::default(),
                items_path: "$.items".to_string(),
                iterator: Branch {
                    start_at: "Step".to_string(),
                    states: HashMap::new(),
                },
                max_concurrency: None,
            }),
        ];
        for state in variants {
            let wire = serde_json::to_string(&state).unwrap();
            let de: State = serde_json::from_str(&wire).unwrap();
            assert_eq!(de, state);
        }
    }
}
