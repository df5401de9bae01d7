//! Process action descriptors and dispatch
//!
//! The session never talks to the OS directly: it produces
//! [`ProcessAction`] values describing what should happen (spawn this
//! argv, kill this named process), and this module carries them out.
//! All execution is fire-and-forget: nothing observes exit codes or
//! confirms termination, matching the optimistic session flags.
//!
//! # Components
//!
//! - [`ProcessAction`] / [`SpawnSpec`] - What to run, as plain data
//! - [`command`] - Argument-list builders for play/record/filter/kill
//! - [`ProcessLauncher`] - Trait the executing side implements
//! - [`DetachedLauncher`] - `std::process` implementation
//! - [`LaunchBridge`] - Channel pair that moves execution off the
//!   controller thread
//!
//! # Example
//!
//! ```ignore
//! use bagpilot::launch::{DetachedLauncher, LaunchBridge};
//!
//! let (handle, worker) = LaunchBridge::new(Box::new(DetachedLauncher::new()));
//! std::thread::spawn(move || worker.run());
//!
//! for action in session.open("/data/run.bag")? {
//!     handle.dispatch(action);
//! }
//! handle.shutdown();
//! ```

pub mod command;

pub use command::{ROSBAG_PROGRAM, ROSNODE_PROGRAM};

use crossbeam_channel::{bounded, Receiver, Sender};
use std::process::{Command, Stdio};

use crate::error::Result;
use crate::types::ProcessToken;

/// Capacity of the launch command channel
const LAUNCH_CHANNEL_SIZE: usize = 256;

/// A spawn request: program plus argument list, nothing else
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnSpec {
    /// Executable name, resolved through `PATH`
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
}

impl SpawnSpec {
    /// Create a spawn spec
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl std::fmt::Display for SpawnSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.program, self.args.join(" "))
    }
}

/// An OS-level request emitted by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessAction {
    /// Start an external process
    Spawn(SpawnSpec),
    /// Terminate the process registered under `target`
    Kill { target: ProcessToken },
}

impl ProcessAction {
    /// Lower the action to a concrete `(program, args)` invocation
    ///
    /// Kills are themselves spawns: terminating a named process means
    /// running `rosnode kill /<token>` and letting it do the work.
    pub fn to_command(&self) -> (String, Vec<String>) {
        match self {
            ProcessAction::Spawn(spec) => (spec.program.clone(), spec.args.clone()),
            ProcessAction::Kill { target } => {
                (ROSNODE_PROGRAM.to_string(), command::kill_args(target))
            }
        }
    }

    /// The spawn spec, if this is a spawn
    pub fn as_spawn(&self) -> Option<&SpawnSpec> {
        match self {
            ProcessAction::Spawn(spec) => Some(spec),
            ProcessAction::Kill { .. } => None,
        }
    }

    /// The kill target, if this is a kill
    pub fn kill_target(&self) -> Option<&ProcessToken> {
        match self {
            ProcessAction::Kill { target } => Some(target),
            ProcessAction::Spawn(_) => None,
        }
    }
}

impl std::fmt::Display for ProcessAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (program, args) = self.to_command();
        write!(f, "{} {}", program, args.join(" "))
    }
}

/// Executes process actions, fire-and-forget
///
/// `Send` so the executing side can live on a worker thread.
pub trait ProcessLauncher: Send {
    /// Carry out one action; must not block on the spawned process
    fn launch(&mut self, action: &ProcessAction) -> Result<()>;
}

/// Launcher backed by `std::process`
///
/// Children are spawned with null stdio and their handles dropped; the
/// session holds only the generated name, never the pid. Exit status is
/// never observed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedLauncher;

impl DetachedLauncher {
    /// Create a detached launcher
    pub fn new() -> Self {
        Self
    }
}

impl ProcessLauncher for DetachedLauncher {
    fn launch(&mut self, action: &ProcessAction) -> Result<()> {
        let (program, args) = action.to_command();
        tracing::debug!(%program, ?args, "spawning detached process");

        Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(())
    }
}

/// Message on the launch channel
#[derive(Debug, Clone)]
pub enum LaunchCommand {
    /// Execute an action
    Execute(ProcessAction),
    /// Stop the worker loop
    Shutdown,
}

/// Controller-side handle to the launch worker
#[derive(Debug, Clone)]
pub struct LaunchHandle {
    sender: Sender<LaunchCommand>,
}

impl LaunchHandle {
    /// Queue an action for execution; returns false if the worker is gone
    pub fn dispatch(&self, action: ProcessAction) -> bool {
        self.sender.send(LaunchCommand::Execute(action)).is_ok()
    }

    /// Queue every action in order
    pub fn dispatch_all(&self, actions: impl IntoIterator<Item = ProcessAction>) -> bool {
        actions.into_iter().all(|action| self.dispatch(action))
    }

    /// Ask the worker loop to exit
    pub fn shutdown(&self) {
        let _ = self.sender.send(LaunchCommand::Shutdown);
    }
}

/// Worker that drains the launch channel on its own thread
pub struct LaunchWorker {
    receiver: Receiver<LaunchCommand>,
    launcher: Box<dyn ProcessLauncher>,
}

impl LaunchWorker {
    /// Run until shutdown or until every handle is dropped
    ///
    /// Launch failures (executable missing, spawn refused) are logged and
    /// swallowed; the session has already moved on.
    pub fn run(mut self) {
        while let Ok(cmd) = self.receiver.recv() {
            match cmd {
                LaunchCommand::Execute(action) => {
                    if let Err(e) = self.launcher.launch(&action) {
                        tracing::warn!(%action, error = %e, "launch failed");
                    }
                }
                LaunchCommand::Shutdown => break,
            }
        }
        tracing::debug!("launch worker exiting");
    }
}

/// Bridge between the controller thread and a launch worker
pub struct LaunchBridge;

impl LaunchBridge {
    /// Create the handle/worker pair over a bounded channel
    pub fn new(launcher: Box<dyn ProcessLauncher>) -> (LaunchHandle, LaunchWorker) {
        let (tx, rx) = bounded(LAUNCH_CHANNEL_SIZE);
        (
            LaunchHandle { sender: tx },
            LaunchWorker {
                receiver: rx,
                launcher,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    /// Launcher that reports every action it executes over a channel
    struct RecordingLauncher {
        executed: mpsc::Sender<ProcessAction>,
    }

    impl ProcessLauncher for RecordingLauncher {
        fn launch(&mut self, action: &ProcessAction) -> Result<()> {
            self.executed.send(action.clone()).unwrap();
            Ok(())
        }
    }

    fn kill(token: &str) -> ProcessAction {
        ProcessAction::Kill {
            target: ProcessToken::new(token),
        }
    }

    #[test]
    fn test_kill_lowers_to_rosnode() {
        let (program, args) = kill("play_5").to_command();
        assert_eq!(program, "rosnode");
        assert_eq!(args, vec!["kill", "/play_5"]);
    }

    #[test]
    fn test_action_accessors() {
        let spawn = ProcessAction::Spawn(SpawnSpec::new("rosbag", vec!["play".to_string()]));
        assert!(spawn.as_spawn().is_some());
        assert!(spawn.kill_target().is_none());

        let action = kill("record_5");
        assert_eq!(action.kill_target().unwrap().as_str(), "record_5");
        assert!(action.as_spawn().is_none());
    }

    #[test]
    fn test_action_display() {
        assert_eq!(kill("play_5").to_string(), "rosnode kill /play_5");
    }

    #[test]
    fn test_bridge_executes_in_order() {
        let (executed_tx, executed_rx) = mpsc::channel();
        let (handle, worker) = LaunchBridge::new(Box::new(RecordingLauncher {
            executed: executed_tx,
        }));

        let join = std::thread::spawn(move || worker.run());

        assert!(handle.dispatch_all([kill("record_1"), kill("play_1")]));
        handle.shutdown();
        join.join().unwrap();

        let seen: Vec<ProcessAction> = executed_rx.try_iter().collect();
        assert_eq!(seen, vec![kill("record_1"), kill("play_1")]);
    }

    #[test]
    fn test_dispatch_after_worker_gone() {
        let (handle, worker) = LaunchBridge::new(Box::new(DetachedLauncher::new()));
        drop(worker);
        assert!(!handle.dispatch(kill("play_2")));
    }
}
