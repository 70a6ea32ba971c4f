use rand::Rng;
use tracing::info;

use crate::assembly::{Apparatus, AssemblySettings, RunSummary, assemble};
use crate::generator::LayoutGenerator;

/// Owns the current run and decides which recorded frame is on screen.
///
/// History is played back from the last frame to the first, so a shuffled apparatus appears
/// to put itself together. When playback reaches the start a new layout is generated.
pub struct Session<G, R> {
    generator: G,
    rng: R,
    settings: AssemblySettings,
    apparatus: Apparatus,
    summary: RunSummary,
    tick: usize,
    frame: usize,
    runs: usize,
}

impl<G: LayoutGenerator, R: Rng> Session<G, R> {
    pub fn new(generator: G, mut rng: R, settings: AssemblySettings) -> Self {
        let (apparatus, summary) = build_run(&generator, &mut rng, &settings);
        let frame = settings.shuffle_frames.saturating_sub(1);
        Self {
            generator,
            rng,
            settings,
            apparatus,
            summary,
            tick: 0,
            frame,
            runs: 1,
        }
    }

    /// Move playback on by one display tick and return the frame to draw.
    pub fn advance(&mut self) -> usize {
        if self.tick >= self.settings.shuffle_frames {
            self.regenerate();
        }
        self.frame = self.settings.shuffle_frames - self.tick - 1;
        self.tick += 1;
        self.frame
    }

    /// Throw the current apparatus away and assemble a new one.
    pub fn regenerate(&mut self) {
        let (apparatus, summary) = build_run(&self.generator, &mut self.rng, &self.settings);
        self.apparatus = apparatus;
        self.summary = summary;
        self.tick = 0;
        self.runs += 1;
    }

    /// Flip whether runs start symmetric. Applies from the next run and replaces the usual
    /// reset to symmetric at the start of every run.
    pub fn toggle_symmetry(&mut self) -> bool {
        self.settings.symmetric = !self.settings.symmetric;
        info!(symmetric = self.settings.symmetric, "symmetric assembly toggled");
        self.settings.symmetric
    }

    pub fn apparatus(&self) -> &Apparatus {
        &self.apparatus
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn settings(&self) -> &AssemblySettings {
        &self.settings
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Frame returned by the latest [`advance`](Self::advance).
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Number of runs generated so far, the current one included.
    pub fn runs(&self) -> usize {
        self.runs
    }
}

fn build_run<G: LayoutGenerator, R: Rng>(
    generator: &G,
    rng: &mut R,
    settings: &AssemblySettings,
) -> (Apparatus, RunSummary) {
    let mut apparatus = Apparatus::new(generator.generate(rng));
    if apparatus.is_empty() {
        // Nothing to pick a pivot from; playback shows an empty canvas for this run.
        tracing::warn!("generator produced an empty layout");
        return (apparatus, RunSummary::default());
    }
    let summary = assemble(&mut apparatus, settings, rng);
    (apparatus, summary)
}
