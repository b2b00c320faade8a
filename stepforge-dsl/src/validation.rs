use std::collections::HashMap;

use thiserror::Error;

use crate::branch::Branch;
use crate::definition::StateMachineDefinition;
use crate::state::State;

/// Longest state name the orchestration engine accepts.
pub const MAX_STATE_NAME_LEN: usize = 80;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("start state '{0}' not found in states")]
    StartStateNotFound(String),

    #[error("state '{0}' referenced as a transition target not found")]
    NextStateNotFound(String),

    #[error("state '{0}' has both 'Next' and 'End' set")]
    NextAndEndConflict(String),

    #[error("state '{0}' is a Choice and cannot carry 'Next' or 'End'")]
    ChoiceWithNextOrEnd(String),

    #[error("no terminal state found in graph")]
    NoTerminalState,

    #[error("missing required field in state '{0}': {1}")]
    MissingRequiredField(String, String),

    #[error("state '{0}' must set exactly one of: {1}")]
    ConflictingFields(String, String),

    #[error("state name '{0}' exceeds the 80-character limit")]
    StateNameTooLong(String),
}

impl StateMachineDefinition {
    /// Validates the graph structure, recursing into Parallel branches and
    /// Map iterators.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_graph(&self.start_at, &self.states)
    }
}

impl Branch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_graph(&self.start_at, &self.states)
    }
}

fn validate_graph(start_at: &str, states: &HashMap<String, State>) -> Result<(), ValidationError> {
    if !states.contains_key(start_at) {
        return Err(ValidationError::StartStateNotFound(start_at.to_string()));
    }

    let mut has_terminal = false;
    for (name, state) in states {
        validate_state(name, state, states, &mut has_terminal)?;
    }

    if !has_terminal {
        return Err(ValidationError::NoTerminalState);
    }

    Ok(())
}

fn resolve(target: &str, states: &HashMap<String, State>) -> Result<(), ValidationError> {
    if states.contains_key(target) {
        Ok(())
    } else {
        Err(ValidationError::NextStateNotFound(target.to_string()))
    }
}

fn validate_state(
    name: &str,
    state: &State,
    states: &HashMap<String, State>,
    has_terminal: &mut bool,
) -> Result<(), ValidationError> {
    if name.chars().count() > MAX_STATE_NAME_LEN {
        return Err(ValidationError::StateNameTooLong(name.to_string()));
    }

    let base = state.base();

    if let Some(next) = &base.next {
        resolve(next, states)?;
    }
    if base.next.is_some() && base.is_end() {
        return Err(ValidationError::NextAndEndConflict(name.to_string()));
    }
    if let Some(catches) = &base.catch {
        for policy in catches {
            resolve(&policy.next, states)?;
        }
    }

    if base.is_end() || state.is_terminal() {
        *has_terminal = true;
    }

    match state {
        State::Task(task) => {
            if task.resource.is_empty() {
                return Err(ValidationError::MissingRequiredField(
                    name.to_string(),
                    "Resource".to_string(),
                ));
            }
        }
        State::Choice(choice) => {
            if base.next.is_some() || base.is_end() {
                return Err(ValidationError::ChoiceWithNextOrEnd(name.to_string()));
            }
            if choice.choices.is_empty() && choice.default.is_none() {
                return Err(ValidationError::MissingRequiredField(
                    name.to_string(),
                    "Choices or Default".to_string(),
                ));
            }
            for rule in &choice.choices {
                resolve(&rule.next, states)?;
            }
            if let Some(default) = &choice.default {
                resolve(default, states)?;
            }
        }
        State::Wait(wait) => {
            let timing_fields = [
                wait.seconds.is_some(),
                wait.seconds_path.is_some(),
                wait.timestamp.is_some(),
            ];
            if timing_fields.iter().filter(|set| **set).count() != 1 {
                return Err(ValidationError::ConflictingFields(
                    name.to_string(),
                    "Seconds, SecondsPath, Timestamp".to_string(),
                ));
            }
        }
        State::Parallel(parallel) => {
            if parallel.branches.is_empty() {
                return Err(ValidationError::MissingRequiredField(
                    name.to_string(),
                    "Branches".to_string(),
                ));
            }
            for branch in &parallel.branches {
                branch.validate()?;
            }
        }
        State::Map(map) => {
            if map.items_path.is_empty() {
                return Err(ValidationError::MissingRequiredField(
                    name.to_string(),
                    "ItemsPath".to_string(),
                ));
            }
            map.iterator.validate()?;
        }
        _ => {}
    }

    Ok(())
}
