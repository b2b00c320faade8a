pub mod base;
pub mod choice;
pub mod fail;
pub mod map;
pub mod parallel;
pub mod pass;
pub mod succeed;
pub mod task;
pub mod wait;

use serde::{Deserialize, Serialize};

pub use base::BaseState;
pub use choice::ChoiceState;
pub use fail::FailState;
pub use map::MapState;
pub use parallel::ParallelState;
pub use pass::PassState;
pub use succeed::SucceedState;
pub use task::TaskState;
pub use wait::WaitState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum State {
    Task(TaskState),
    Pass(PassState),
    Wait(WaitState),
    Choice(ChoiceState),
    Succeed(SucceedState),
    Fail(FailState),
    Parallel(ParallelState),
    Map(MapState),
}

impl State {
    /// Common fields shared by every state type.
    pub fn base(&self) -> &BaseState {
        match self {
            State::Task(s) => &s.base,
            State::Pass(s) => &s.base,
            State::Wait(s) => &s.base,
            State::Choice(s) => &s.base,
            State::Succeed(s) => &s.base,
            State::Fail(s) => &s.base,
            State::Parallel(s) => &s.base,
            State::Map(s) => &s.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseState {
        match self {
            State::Task(s) => &mut s.base,
            State::Pass(s) => &mut s.base,
            State::Wait(s) => &mut s.base,
            State::Choice(s) => &mut s.base,
            State::Succeed(s) => &mut s.base,
            State::Fail(s) => &mut s.base,
            State::Parallel(s) => &mut s.base,
            State::Map(s) => &mut s.base,
        }
    }

    /// Succeed and Fail end an execution on their own, with no `Next`/`End`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Succeed(_) | State::Fail(_))
    }
}
