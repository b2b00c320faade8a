use std::collections::HashMap;

use stepforge_dsl::{Branch, CatchPolicy, JsonPath, State, StateMachineDefinition};
use stepforge_exception::{validate_catch_list, validate_retry_list, STATES_ALL};

use crate::error::ConstructError;

/// Options for [`Fragment::add_catch`]. An empty `errors` list catches
/// everything (`States.ALL`).
#[derive(Debug, Clone, Default)]
pub struct CatchProps {
    pub errors: Vec<String>,
    pub result_path: Option<JsonPath>,
}

/// A composable sub-graph of states: one entry state, a set of open exit
/// states for chaining, and the invocation steps that failure handlers
/// attach to.
///
/// Exits stay open until the fragment is rendered; `into_branch` and
/// `into_definition` close every remaining open state with `End: true`.
#[derive(Debug, Clone)]
pub struct Fragment {
    start_at: String,
    states: HashMap<String, State>,
    exits: Vec<String>,
    catch_targets: Vec<String>,
}

impl Fragment {
    /// A fragment holding a single state. Terminal states and Choice
    /// states expose no open exit (a Choice routes through its rules).
    pub fn state(name: impl Into<String>, state: State) -> Self {
        let name = name.into();
        let exits = if state.is_terminal() || matches!(state, State::Choice(_)) {
            vec![]
        } else {
            vec![name.clone()]
        };
        let catch_targets = match state {
            State::Task(_) => vec![name.clone()],
            _ => vec![],
        };
        Fragment {
            start_at: name.clone(),
            states: HashMap::from([(name, state)]),
            exits,
            catch_targets,
        }
    }

    pub(crate) fn from_parts(
        start_at: String,
        states: HashMap<String, State>,
        exits: Vec<String>,
        catch_targets: Vec<String>,
    ) -> Self {
        Fragment {
            start_at,
            states,
            exits,
            catch_targets,
        }
    }

    pub(crate) fn into_parts(self) -> (String, HashMap<String, State>) {
        (self.start_at, self.states)
    }

    pub fn start_at(&self) -> &str {
        &self.start_at
    }

    pub fn states(&self) -> &HashMap<String, State> {
        &self.states
    }

    /// States whose `Next` is still unset; chaining targets.
    pub fn exits(&self) -> &[String] {
        &self.exits
    }

    /// States that receive catch policies from [`Fragment::add_catch`].
    pub fn catch_targets(&self) -> &[String] {
        &self.catch_targets
    }

    fn merge_states(&mut self, other: HashMap<String, State>) -> Result<(), ConstructError> {
        for (name, state) in other {
            if self.states.contains_key(&name) {
                return Err(ConstructError::DuplicateStateName(name));
            }
            self.states.insert(name, state);
        }
        Ok(())
    }

    /// Chains `successor` after this fragment: every open exit transitions
    /// to the successor's entry, and the successor's exits become the
    /// combined fragment's exits.
    pub fn next(mut self, successor: Fragment) -> Result<Fragment, ConstructError> {
        for exit in std::mem::take(&mut self.exits) {
            if let Some(state) = self.states.get_mut(&exit) {
                state.base_mut().next = Some(successor.start_at.clone());
            }
        }
        self.merge_states(successor.states)?;
        self.exits = successor.exits;
        self.catch_targets.extend(successor.catch_targets);
        tracing::debug!(
            start = %self.start_at,
            states = self.states.len(),
            "chained fragment"
        );
        Ok(self)
    }

    /// Registers `handler` as the failure handler for every catch target
    /// in this fragment. The handler's states join the graph; errors
    /// matching `props.errors` route to its entry state.
    pub fn add_catch(mut self, handler: Fragment, props: CatchProps) -> Result<Self, ConstructError> {
        let errors = if props.errors.is_empty() {
            vec![STATES_ALL.to_string()]
        } else {
            props.errors
        };
        let policy = CatchPolicy {
            error_equals: errors,
            next: handler.start_at.clone(),
            result_path: props.result_path,
        };
        if self.catch_targets.is_empty() {
            tracing::warn!(start = %self.start_at, "add_catch on a fragment with no catch targets");
        }
        self.merge_states(handler.states)?;
        for target in &self.catch_targets {
            if let Some(state) = self.states.get_mut(target) {
                state
                    .base_mut()
                    .catch
                    .get_or_insert_with(Vec::new)
                    .push(policy.clone());
            }
        }
        Ok(self)
    }

    fn close_open_states(&mut self) {
        for state in self.states.values_mut() {
            if state.is_terminal() || matches!(state, State::Choice(_)) {
                continue;
            }
            let base = state.base_mut();
            if base.next.is_none() && !base.is_end() {
                base.end = Some(true);
            }
        }
    }

    /// Closes the fragment into a Parallel/Map branch. Open exits become
    /// terminal.
    pub fn into_branch(mut self) -> Result<Branch, ConstructError> {
        if self.states.is_empty() {
            return Err(ConstructError::EmptyFragment);
        }
        self.close_open_states();
        let branch = Branch {
            start_at: self.start_at,
            states: self.states,
        };
        branch.validate()?;
        Ok(branch)
    }

    /// Closes the fragment into a complete state machine definition,
    /// validating the graph structure and every retry/catch error class.
    pub fn into_definition(
        mut self,
        comment: Option<String>,
    ) -> Result<StateMachineDefinition, ConstructError> {
        if self.states.is_empty() {
            return Err(ConstructError::EmptyFragment);
        }
        self.close_open_states();
        validate_policies(&self.states)?;
        let definition = StateMachineDefinition {
            comment,
            version: None,
            timeout_seconds: None,
            start_at: self.start_at,
            states: self.states,
        };
        definition.validate()?;
        tracing::debug!(
            start = %definition.start_at,
            states = definition.states.len(),
            "rendered state machine definition"
        );
        Ok(definition)
    }
}

pub(crate) fn insert_unique(
    states: &mut HashMap<String, State>,
    name: String,
    state: State,
) -> Result<(), ConstructError> {
    if states.contains_key(&name) {
        return Err(ConstructError::DuplicateStateName(name));
    }
    states.insert(name, state);
    Ok(())
}

fn validate_policies(states: &HashMap<String, State>) -> Result<(), ConstructError> {
    for state in states.values() {
        let base = state.base();
        if let Some(retry) = &base.retry {
            validate_retry_list(retry)?;
        }
        if let Some(catch) = &base.catch {
            validate_catch_list(catch)?;
        }
        match state {
            State::Parallel(parallel) => {
                for branch in &parallel.branches {
                    validate_policies(&branch.states)?;
                }
            }
            State::Map(map) => {
                validate_policies(&map.iterator.states)?;
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepforge_dsl::{BaseState, PassState, SucceedState, TaskState};

    fn pass(name: &str) -> Fragment {
        Fragment::state(name, State::Pass(PassState::default()))
    }

    fn task(name: &str) -> Fragment {
        Fragment::state(
            name,
            State::Task(TaskState {
                base: BaseState::default(),
                resource: "some-function".to_string(),
                parameters: None,
                timeout_seconds: None,
                heartbeat_seconds: None,
            }),
        )
    }

    #[test]
    fn test_next_wires_exit_to_successor_entry() {
        let chained = pass("A").next(pass("B")).unwrap();
        assert_eq!(chained.start_at(), "A");
        assert_eq!(chained.exits(), ["B"]);
        assert_eq!(chained.states()["A"].base().next.as_deref(), Some("B"));
    }

    #[test]
    fn test_duplicate_state_names_are_rejected() {
        match pass("A").next(pass("A")) {
            Err(ConstructError::DuplicateStateName(name)) => assert_eq!(name, "A"),
            other => panic!("expected DuplicateStateName, got {:?}", other),
        }
    }

    #[test]
    fn test_terminal_state_has_no_exit() {
        let fragment = Fragment::state("Done", State::Succeed(SucceedState::default()));
        assert!(fragment.exits().is_empty());
    }

    #[test]
    fn test_into_definition_closes_open_exits() {
        let definition = pass("A").next(pass("B")).unwrap().into_definition(None).unwrap();
        assert_eq!(definition.states["B"].base().end, Some(true));
        assert!(definition.validate().is_ok());
    }

    #[test]
    fn test_add_catch_reaches_every_task() {
        let fragment = task("First")
            .next(task("Second"))
            .unwrap()
            .add_catch(pass("OnFailure"), CatchProps::default())
            .unwrap();
        for target in ["First", "Second"] {
            let catch = fragment.states()[target].base().catch.as_ref().unwrap();
            assert_eq!(catch[0].error_equals, ["States.ALL"]);
            assert_eq!(catch[0].next, "OnFailure");
        }
        assert!(fragment.states()["OnFailure"].base().catch.is_none());
        let definition = fragment.into_definition(None).unwrap();
        assert!(definition.validate().is_ok());
    }

    #[test]
    fn test_empty_fragment_is_rejected() {
        let fragment = Fragment::from_parts("X".to_string(), HashMap::new(), vec![], vec![]);
        assert!(matches!(
            fragment.into_definition(None),
            Err(ConstructError::EmptyFragment)
        ));
    }
}
