use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace};

use super::apparatus::Apparatus;
use super::movement::shift_all;
use super::neighborhood::expand;
use super::sampler::random_dir;
use super::types::{Direction, PartId};

/// Parameters of one assembly run.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblySettings {
    /// Total frames in a run, idle window included.
    pub shuffle_frames: usize,
    /// Leading frames during which nothing moves.
    pub final_frame_duration: usize,
    /// Probability of continuing the previous pivot and direction.
    pub movement_length: f64,
    /// Whether a run starts in symmetric mode.
    pub symmetric: bool,
}

impl Default for AssemblySettings {
    fn default() -> Self {
        Self {
            shuffle_frames: 200,
            final_frame_duration: 25,
            movement_length: 0.8,
            symmetric: true,
        }
    }
}

impl AssemblySettings {
    /// Number of frames on which parts may move.
    pub fn movement_steps(&self) -> usize {
        self.shuffle_frames.saturating_sub(self.final_frame_duration)
    }

    /// Frame at which symmetric assembly switches to asymmetric. An odd run has no exact
    /// midpoint and never switches.
    pub fn midpoint(&self) -> Option<usize> {
        (self.shuffle_frames % 2 == 0).then_some(self.shuffle_frames / 2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    IdleFill,
    Moving,
    Done,
}

/// Everything the scheduler carries from one step to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerState {
    pub phase: Phase,
    /// Frame the next step writes.
    pub frame: usize,
    pub symmetric: bool,
    pub pivot: PartId,
    pub direction: Direction,
}

/// One group shifted as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub direction: Direction,
    pub members: Vec<PartId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub frame: usize,
    pub symmetric: bool,
    /// Whether the previous pivot and direction were continued.
    pub kept: bool,
    pub pivot: PartId,
    pub direction: Direction,
    pub movements: Vec<Movement>,
}

impl StepReport {
    pub fn is_noop(&self) -> bool {
        self.movements.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub steps: usize,
    pub symmetric_steps: usize,
    pub asymmetric_steps: usize,
    pub noop_steps: usize,
    /// Sum over steps of parts shifted.
    pub shifted_parts: usize,
}

impl RunSummary {
    fn record(&mut self, report: &StepReport) {
        self.steps += 1;
        if report.symmetric {
            self.symmetric_steps += 1;
        } else {
            self.asymmetric_steps += 1;
        }
        if report.is_noop() {
            self.noop_steps += 1;
        }
        self.shifted_parts += report
            .movements
            .iter()
            .map(|m| m.members.len())
            .sum::<usize>();
    }
}

/// Frame-by-frame driver that shuffles an apparatus apart while recording every position.
#[derive(Debug, Clone)]
pub struct Scheduler {
    settings: AssemblySettings,
    state: SchedulerState,
}

impl Scheduler {
    /// Pad every history with the idle window and pick the opening pivot and direction.
    pub fn start<R: Rng + ?Sized>(
        settings: AssemblySettings,
        apparatus: &mut Apparatus,
        rng: &mut R,
    ) -> Self {
        assert!(
            settings.final_frame_duration <= settings.shuffle_frames,
            "idle window ({}) longer than the run ({})",
            settings.final_frame_duration,
            settings.shuffle_frames
        );

        let symmetric = settings.symmetric;
        let pivot = apparatus.random_pivot(rng);
        let direction = random_dir(if symmetric { 3 } else { 4 }, rng);
        let mut scheduler = Self {
            state: SchedulerState {
                phase: Phase::IdleFill,
                frame: 0,
                symmetric,
                pivot,
                direction,
            },
            settings,
        };
        scheduler.idle_fill(apparatus);
        scheduler
    }

    fn idle_fill(&mut self, apparatus: &mut Apparatus) {
        debug_assert_eq!(self.state.phase, Phase::IdleFill);
        apparatus.populate(self.settings.final_frame_duration);
        self.state.frame = self.settings.final_frame_duration;
        self.state.phase = if self.settings.movement_steps() == 0 {
            Phase::Done
        } else {
            Phase::Moving
        };
    }

    pub fn settings(&self) -> &AssemblySettings {
        &self.settings
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    pub fn is_done(&self) -> bool {
        self.state.phase == Phase::Done
    }

    /// Advance one frame. Returns `None` once the run is over.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        apparatus: &mut Apparatus,
        rng: &mut R,
    ) -> Option<StepReport> {
        if self.state.phase != Phase::Moving {
            return None;
        }
        let frame = self.state.frame;

        if self.settings.midpoint() == Some(frame) {
            self.state.symmetric = false;
        }
        let symmetric = self.state.symmetric;

        for part in apparatus.parts_mut() {
            part.carry_forward();
        }

        let kept = rng.random::<f64>() < self.settings.movement_length;
        if !kept {
            let pivot = apparatus.random_pivot(rng);
            let paired = apparatus.pair_of(pivot).len() > 1;
            self.state.pivot = pivot;
            self.state.direction = if symmetric && !paired {
                random_dir(2, rng)
            } else {
                random_dir(if symmetric { 3 } else { 4 }, rng)
            };
        }

        let movements = plan_moves(apparatus, self.state.pivot, self.state.direction, symmetric);
        for movement in &movements {
            shift_all(apparatus, &movement.members, movement.direction, frame);
        }

        let report = StepReport {
            frame,
            symmetric,
            kept,
            pivot: self.state.pivot,
            direction: self.state.direction,
            movements,
        };
        trace!(
            frame,
            symmetric,
            kept,
            pivot = report.pivot.0,
            direction = %report.direction,
            groups = report.movements.len(),
            "assembly step"
        );

        self.state.frame += 1;
        if self.state.frame >= self.settings.shuffle_frames {
            self.state.phase = Phase::Done;
        }
        Some(report)
    }

    /// Step until the run is over.
    pub fn run<R: Rng + ?Sized>(&mut self, apparatus: &mut Apparatus, rng: &mut R) -> RunSummary {
        let mut summary = RunSummary::default();
        while !self.is_done() {
            if let Some(report) = self.step(apparatus, rng) {
                summary.record(&report);
            }
        }
        debug!(
            parts = apparatus.len(),
            steps = summary.steps,
            symmetric_steps = summary.symmetric_steps,
            noop_steps = summary.noop_steps,
            "assembly run complete"
        );
        summary
    }
}

/// Work out which groups move when `pivot` is pushed towards `dir`.
///
/// In symmetric mode a self-mirrored direction moves the neighborhood of the whole pair;
/// a horizontal direction expands each partner on its own, the first towards the mirrored
/// direction and the second towards `dir`. An unpaired pivot cannot move horizontally
/// without breaking symmetry, so that case yields no movement. Every neighborhood is
/// computed before anything is shifted.
pub fn plan_moves(
    apparatus: &Apparatus,
    pivot: PartId,
    dir: Direction,
    symmetric: bool,
) -> Vec<Movement> {
    if !symmetric {
        return vec![Movement {
            direction: dir,
            members: expand(&[pivot], apparatus, dir),
        }];
    }

    let pair = apparatus.pair_of(pivot);
    if dir.is_self_mirrored() {
        vec![Movement {
            direction: dir,
            members: expand(pair, apparatus, dir),
        }]
    } else if pair.len() > 1 {
        let mirrored = dir.mirror();
        vec![
            Movement {
                direction: mirrored,
                members: expand(&[pair[0]], apparatus, mirrored),
            },
            Movement {
                direction: dir,
                members: expand(&[pair[1]], apparatus, dir),
            },
        ]
    } else {
        Vec::new()
    }
}

/// Run a whole assembly on `apparatus` in one go.
pub fn assemble<R: Rng + ?Sized>(
    apparatus: &mut Apparatus,
    settings: &AssemblySettings,
    rng: &mut R,
) -> RunSummary {
    Scheduler::start(settings.clone(), apparatus, rng).run(apparatus, rng)
}
