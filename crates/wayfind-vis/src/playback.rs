//! Playback controls for recorded search traces.
//!
//! A [`Playback`] owns one trace at a time and a cursor into it. The
//! trace is materialized eagerly when a search starts, so advancing is
//! pure bookkeeping: apply the step under the cursor to the observable
//! highlight/table/log state and move on. Drivers fire
//! [`Playback::advance_step`] either from a repeating timer or from a
//! manual trigger; the controller itself never schedules anything.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use wayfind_graph::{Graph, Node, NodeId};
use wayfind_search::{Algorithm, QueueEntry, Step, TableRow};

use crate::error::{Error, Result};
use crate::frame::{Highlight, HighlightEdge};

/// User-facing animation speed. Higher is faster.
///
/// The value maps linearly onto the inter-step delay as
/// `1000 - speed` milliseconds, so the default of 400 paces steps
/// 600ms apart and the maximum of 800 paces them 200ms apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnimationSpeed(u16);

impl AnimationSpeed {
    pub const MIN: u16 = 50;
    pub const MAX: u16 = 800;
    pub const DEFAULT: u16 = 400;

    /// Clamp an arbitrary value into the supported range.
    pub fn new(value: u16) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// The raw speed value.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Delay between automatic advancements.
    pub fn step_delay(self) -> Duration {
        Duration::from_millis(u64::from(1000 - self.0))
    }
}

impl Default for AnimationSpeed {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No trace loaded
    Idle,
    /// Advancing, automatically or under manual stepping
    Running,
    /// Halted mid-trace with the cursor preserved
    Paused,
    /// The cursor reached the end of the trace
    Completed,
}

/// How advancement is driven after a start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveMode {
    /// A scheduling loop fires advancements at the configured cadence
    Automatic,
    /// The user triggers each advancement
    Manual,
}

/// Playback controller for one search trace.
///
/// State machine: Idle → Running ⇄ Paused → Completed, with restart
/// allowed from anywhere and reset returning to Idle from anywhere.
/// Every control transition bumps an epoch counter; a scheduling loop
/// records the epoch it was spawned under and stops the moment the
/// controller's epoch moves past it, so a superseded loop can never
/// touch state it no longer owns.
pub struct Playback {
    steps: Vec<Step>,
    path: Option<Vec<NodeId>>,
    distance: Option<f64>,
    algorithm: Option<Algorithm>,
    cursor: usize,
    state: PlaybackState,
    mode: DriveMode,
    speed: AnimationSpeed,
    epoch: u64,
    log: Vec<String>,
    seen_queue: BTreeMap<NodeId, QueueEntry>,
    table: Vec<TableRow>,
    queue: Vec<QueueEntry>,
    highlight: Option<Highlight>,
    blink: bool,
}

impl Playback {
    /// Create an idle controller with the default speed.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            path: None,
            distance: None,
            algorithm: None,
            cursor: 0,
            state: PlaybackState::Idle,
            mode: DriveMode::Automatic,
            speed: AnimationSpeed::default(),
            epoch: 0,
            log: Vec::new(),
            seen_queue: BTreeMap::new(),
            table: Vec::new(),
            queue: Vec::new(),
            highlight: None,
            blink: false,
        }
    }

    /// Run a search and load its trace for playback.
    ///
    /// Both endpoints must be chosen and distinct; on rejection nothing
    /// is mutated and any previous trace stays playable. The search
    /// runs to completion here, so the whole trace exists before the
    /// first advancement. In [`DriveMode::Manual`] the first step is
    /// applied immediately and the rest wait for manual triggers; in
    /// [`DriveMode::Automatic`] the driver is expected to spawn a
    /// scheduling loop against the new epoch.
    pub fn start(
        &mut self,
        graph: &Graph,
        nodes: &[Node],
        algorithm: Algorithm,
        source: Option<NodeId>,
        target: Option<NodeId>,
        mode: DriveMode,
    ) -> Result<()> {
        let (source, target) = match (source, target) {
            (Some(source), Some(target)) if source == target => {
                return Err(Error::EndpointsIdentical)
            }
            (Some(source), Some(target)) => (source, target),
            _ => return Err(Error::EndpointsMissing),
        };

        let result = algorithm.run(graph, source, target, nodes);
        info!(
            algorithm = %algorithm,
            %source,
            %target,
            steps = result.steps.len(),
            found = result.path.is_some(),
            "search trace materialized"
        );

        self.epoch += 1;
        self.steps = result.steps;
        self.path = result.path;
        self.distance = result.distance;
        self.algorithm = Some(algorithm);
        self.mode = mode;
        self.cursor = 0;
        self.log.clear();
        self.seen_queue.clear();
        self.table.clear();
        self.queue.clear();
        self.highlight = None;
        self.blink = false;
        self.state = PlaybackState::Running;

        if mode == DriveMode::Manual {
            self.advance_step();
        }
        Ok(())
    }

    /// Apply the step under the cursor and move past it.
    ///
    /// Returns `true` while a step was applied. Once the cursor passes
    /// the last step the controller settles into Completed, and the
    /// next call drops the transient highlight and returns `false`,
    /// telling a scheduling loop to stop. The accumulated log, table,
    /// and result stay visible after completion. Calls on an idle
    /// controller do nothing.
    pub fn advance_step(&mut self) -> bool {
        if self.state == PlaybackState::Idle {
            return false;
        }
        let Some(step) = self.steps.get(self.cursor) else {
            self.state = PlaybackState::Completed;
            self.highlight = None;
            return false;
        };

        self.blink = !self.blink;
        self.table = step.table.clone();
        self.queue = step.queue.clone();
        self.highlight = Some(Highlight {
            node: step.current,
            edge: step.previous.map(|from| HighlightEdge {
                from,
                to: step.current,
            }),
            neighbors: step.neighbors.clone(),
            blink: self.blink,
        });
        for entry in &step.queue {
            self.seen_queue
                .entry(entry.node)
                .or_insert_with(|| entry.clone());
        }
        self.log.push(step.log.clone());

        self.cursor += 1;
        if self.cursor == self.steps.len() {
            self.state = PlaybackState::Completed;
        }
        true
    }

    /// Halt automatic advancement. Only meaningful while running; any
    /// other state is left untouched.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Running {
            self.epoch += 1;
            self.state = PlaybackState::Paused;
            debug!(cursor = self.cursor, "playback paused");
        }
    }

    /// Return to running from a pause. Reports whether the transition
    /// happened, so the driver knows to restart its scheduling loop.
    pub fn resume(&mut self) -> bool {
        if self.state == PlaybackState::Paused {
            self.epoch += 1;
            self.state = PlaybackState::Running;
            debug!(cursor = self.cursor, "playback resumed");
            true
        } else {
            false
        }
    }

    /// Discard the trace and every derived observable, back to Idle.
    /// The configured speed survives a reset.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.steps.clear();
        self.path = None;
        self.distance = None;
        self.algorithm = None;
        self.cursor = 0;
        self.log.clear();
        self.seen_queue.clear();
        self.table.clear();
        self.queue.clear();
        self.highlight = None;
        self.blink = false;
        self.state = PlaybackState::Idle;
        debug!("playback reset");
    }

    /// Change the cadence for the next scheduling loop. A loop already
    /// in flight keeps the delay it started with.
    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.speed = speed;
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Drive mode of the loaded trace.
    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Steps applied so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the loaded trace.
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Configured speed.
    pub fn speed(&self) -> AnimationSpeed {
        self.speed
    }

    /// Delay a scheduling loop should sleep between advancements.
    pub fn delay(&self) -> Duration {
        self.speed.step_delay()
    }

    /// Epoch of the current control generation.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Algorithm behind the loaded trace.
    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    /// Highlight of the most recently applied step.
    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Bookkeeping table as of the most recently applied step.
    pub fn table(&self) -> &[TableRow] {
        &self.table
    }

    /// Frontier snapshot as of the most recently applied step.
    pub fn queue(&self) -> &[QueueEntry] {
        &self.queue
    }

    /// Every frontier entry seen so far, keyed by node with the first
    /// appearance winning, in ascending node order.
    pub fn queue_history(&self) -> Vec<QueueEntry> {
        self.seen_queue.values().cloned().collect()
    }

    /// Accumulated log lines.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// The found path, if the search reached the target.
    pub fn path(&self) -> Option<&[NodeId]> {
        self.path.as_deref()
    }

    /// Total cost of the found path.
    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    /// Fraction of the trace applied, 0.0 through 1.0.
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            0.0
        } else {
            self.cursor as f64 / self.steps.len() as f64
        }
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

/// Playback status for sending to clients.
#[derive(Debug, Clone, Serialize)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    pub mode: DriveMode,
    pub cursor: usize,
    pub total_steps: usize,
    pub speed: AnimationSpeed,
    pub progress: f64,
}

impl From<&Playback> for PlaybackStatus {
    fn from(playback: &Playback) -> Self {
        Self {
            state: playback.state,
            mode: playback.mode,
            cursor: playback.cursor,
            total_steps: playback.steps.len(),
            speed: playback.speed,
            progress: playback.progress(),
        }
    }
}
