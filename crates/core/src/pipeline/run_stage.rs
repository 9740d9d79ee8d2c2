/// Lifecycle of one invocation. `Done` is terminal after success or failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStage {
    Configuring,
    Processing,
    Done,
}
