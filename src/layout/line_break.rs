//! Knuth–Plass total-fit line breaking
//!
//! The paragraph is scanned once, left to right. Every position where a line
//! may end is a feasible breakpoint; for each one the breaker looks back at
//! the active candidates (earlier breakpoints that can still start a line
//! reaching this far), scores the line each of them would produce, and keeps
//! the cheapest predecessor per fitness class. Candidates whose line has
//! become overfull beyond the maximum shrink are dropped for good, since the
//! line can only get longer. At the forced break at the end, the cheapest
//! surviving candidate is traced back to recover the breakpoints.
//!
//! Candidates live in an arena and point to their predecessor by index.

use crate::error::{LayoutError, Result};
use crate::layout::config::{BreakConfig, LineWidths};
use crate::layout::element::{Breakable, Glue, ParagraphElement};
use serde::Serialize;

/// Ratio of a line whose glue is shrunk to its limit
pub const MAXIMUM_SHRINK_RATIO: f64 = -1.0;

/// How tight or loose a line is set
///
/// The order matters: a penalty applies when adjacent lines are more than
/// one class apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FitnessClass {
    Tight = 0,
    Normal = 1,
    Loose = 2,
    VeryLoose = 3,
}

impl FitnessClass {
    pub const ALL: [FitnessClass; 4] = [
        FitnessClass::Tight,
        FitnessClass::Normal,
        FitnessClass::Loose,
        FitnessClass::VeryLoose,
    ];

    /// Classify an adjustment ratio
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < -0.5 {
            FitnessClass::Tight
        } else if ratio <= 0.5 {
            FitnessClass::Normal
        } else if ratio <= 1.0 {
            FitnessClass::Loose
        } else {
            FitnessClass::VeryLoose
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether a line of this class may follow a line of class `other`
    /// without the fitness jump demerits
    pub fn is_compatible(self, other: FitnessClass) -> bool {
        self.index().abs_diff(other.index()) <= 1
    }
}

/// A chosen place to end a line
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    /// Index of the glue or penalty element the line ends at
    pub position: usize,
    /// 1-based number of the line ending here
    pub line: usize,
    pub fitness: FitnessClass,
    /// Adjustment ratio of the line ending here
    pub ratio: f64,
    /// Demerits of the paragraph up to and including this line
    pub total_demerits: f64,
    pub flagged: bool,
}

/// Running sums of the material seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Totals {
    width: f64,
    stretch: f64,
    shrink: f64,
}

impl Totals {
    fn add_glue(&mut self, glue: &Glue) {
        self.width += glue.width;
        self.stretch += glue.stretch;
        self.shrink += glue.shrink;
    }
}

/// Active node: one way of having broken the paragraph so far
#[derive(Debug, Clone)]
struct Candidate {
    position: usize,
    line: usize,
    fitness: FitnessClass,
    /// Sums at the start of the next line
    totals: Totals,
    total_demerits: f64,
    ratio: f64,
    flagged: bool,
    previous: Option<usize>,
}

impl Candidate {
    fn root() -> Self {
        Self {
            position: 0,
            line: 0,
            fitness: FitnessClass::Normal,
            totals: Totals::default(),
            total_demerits: 0.0,
            ratio: 0.0,
            flagged: false,
            previous: None,
        }
    }

    fn breakpoint(&self) -> Breakpoint {
        Breakpoint {
            position: self.position,
            line: self.line,
            fitness: self.fitness,
            ratio: self.ratio,
            total_demerits: self.total_demerits,
            flagged: self.flagged,
        }
    }
}

/// Cheapest way found to reach the current breakpoint in one fitness class
#[derive(Debug, Clone, Copy)]
struct Best {
    demerits: f64,
    ratio: f64,
    from: usize,
}

/// Optimal line breaker
#[derive(Debug, Clone, Default)]
pub struct LineBreaker {
    config: BreakConfig,
}

impl LineBreaker {
    pub fn new(config: BreakConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BreakConfig {
        &self.config
    }

    /// Find the least-demerit breakpoints for `elements`.
    ///
    /// The sequence must end with a forced break. Fails with
    /// [`LayoutError::UnbreakableParagraph`] when no layout satisfies the
    /// widths and the maximum ratio.
    pub fn break_points(
        &self,
        elements: &[ParagraphElement],
        widths: &LineWidths,
    ) -> Result<Vec<Breakpoint>> {
        self.config.validate()?;
        widths.validate()?;
        match elements.last() {
            Some(ParagraphElement::Penalty(p)) if p.is_mandatory() => {}
            _ => {
                return Err(LayoutError::InvalidConfig(
                    "element sequence must end with a forced break".to_string(),
                ))
            }
        }

        let mut run = BreakRun::new(&self.config, elements, widths);
        run.process()?;
        run.finish()
    }
}

/// State of one `break_points` call
struct BreakRun<'a> {
    config: &'a BreakConfig,
    elements: &'a [ParagraphElement],
    widths: &'a LineWidths,
    arena: Vec<Candidate>,
    active: Vec<usize>,
    totals: Totals,
}

impl<'a> BreakRun<'a> {
    fn new(config: &'a BreakConfig, elements: &'a [ParagraphElement], widths: &'a LineWidths) -> Self {
        Self {
            config,
            elements,
            widths,
            arena: vec![Candidate::root()],
            active: vec![0],
            totals: Totals::default(),
        }
    }

    fn process(&mut self) -> Result<()> {
        let elements = self.elements;
        for (b, element) in elements.iter().enumerate() {
            match element {
                ParagraphElement::Box(word) => self.totals.width += word.width,
                ParagraphElement::Glue(glue) => {
                    if b > 0 && elements[b - 1].is_box() {
                        self.try_break(b, glue)?;
                    }
                    self.totals.add_glue(glue);
                }
                ParagraphElement::Penalty(penalty) => {
                    if !penalty.is_prohibited() {
                        self.try_break(b, penalty)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Score every active candidate against the breakpoint at `b`
    fn try_break(&mut self, b: usize, element: &dyn Breakable) -> Result<()> {
        let mut best: [Option<Best>; 4] = [None; 4];

        let mut idx = 0;
        while idx < self.active.len() {
            let from = self.active[idx];
            let candidate = &self.arena[from];
            let ratio = self.adjustment_ratio(candidate, element);

            let feasible = (MAXIMUM_SHRINK_RATIO..=self.config.max_ratio).contains(&ratio)
                || ratio == f64::INFINITY;
            if feasible {
                let (demerits, fitness) = self.demerits(candidate, element, ratio);
                let slot = &mut best[fitness.index()];
                if slot.map_or(true, |current| demerits < current.demerits) {
                    *slot = Some(Best { demerits, ratio, from });
                }
            }

            if ratio < MAXIMUM_SHRINK_RATIO || element.is_mandatory() {
                log::trace!("deactivate candidate at {} (ratio {})", self.arena[from].position, ratio);
                self.active.remove(idx);
            } else {
                idx += 1;
            }
        }

        if best.iter().any(Option::is_some) {
            let totals = self.totals_after(b);
            for (class, slot) in FitnessClass::ALL.into_iter().zip(best) {
                let Some(best) = slot else {
                    continue;
                };
                let line = self.arena[best.from].line + 1;
                log::trace!(
                    "candidate at {}: line {}, {:?}, ratio {:.3}, demerits {:.1}",
                    b,
                    line,
                    class,
                    best.ratio,
                    best.demerits
                );
                self.arena.push(Candidate {
                    position: b,
                    line,
                    fitness: class,
                    totals,
                    total_demerits: best.demerits,
                    ratio: best.ratio,
                    flagged: element.is_flagged(),
                    previous: Some(best.from),
                });
                self.active.push(self.arena.len() - 1);
            }
        }

        if self.active.is_empty() {
            log::debug!("no feasible line reaches element {}", b);
            return Err(LayoutError::UnbreakableParagraph { position: b });
        }
        Ok(())
    }

    /// How much the glue of the line from `candidate` to here must stretch
    /// (positive) or shrink (negative) to fill the target width
    fn adjustment_ratio(&self, candidate: &Candidate, element: &dyn Breakable) -> f64 {
        let length = self.totals.width - candidate.totals.width + element.penalty_width();
        let target = self.widths.get(candidate.line + 1);

        if length < target {
            let stretch = self.totals.stretch - candidate.totals.stretch;
            if stretch > 0.0 {
                (target - length) / stretch
            } else {
                f64::INFINITY
            }
        } else if length > target {
            let shrink = self.totals.shrink - candidate.totals.shrink;
            if shrink > 0.0 {
                (target - length) / shrink
            } else {
                f64::NEG_INFINITY
            }
        } else {
            0.0
        }
    }

    /// Total demerits of the paragraph when the line from `candidate` ends
    /// here, and the fitness class of that line
    fn demerits(&self, candidate: &Candidate, element: &dyn Breakable, ratio: f64) -> (f64, FitnessClass) {
        let badness = if ratio.is_infinite() {
            self.config.infinite_badness
        } else {
            100.0 * ratio.abs().powi(3)
        };
        let base = 1.0 + badness;
        let penalty = element.penalty();

        let mut demerits = if penalty >= 0.0 {
            (base + penalty).powi(2)
        } else if !element.is_mandatory() {
            base.powi(2) - penalty.powi(2)
        } else {
            base.powi(2)
        };

        if candidate.flagged && element.is_flagged() {
            demerits += self.config.consecutive_flagged_demerits;
        }

        let fitness = FitnessClass::from_ratio(ratio);
        if !fitness.is_compatible(candidate.fitness) {
            demerits += self.config.fitness_jump_demerits;
        }

        (candidate.total_demerits + demerits, fitness)
    }

    /// Sums at the start of the line after a break at `b`: glue and
    /// penalties up to the next box are discarded with the break
    fn totals_after(&self, b: usize) -> Totals {
        let mut totals = self.totals;
        for (i, element) in self.elements.iter().enumerate().skip(b) {
            match element {
                ParagraphElement::Box(_) => break,
                ParagraphElement::Glue(glue) => totals.add_glue(glue),
                ParagraphElement::Penalty(penalty) => {
                    if penalty.is_mandatory() && i > b {
                        break;
                    }
                }
            }
        }
        totals
    }

    /// Trace the cheapest surviving candidate back to the start
    fn finish(self) -> Result<Vec<Breakpoint>> {
        let mut cheapest: Option<usize> = None;
        for &idx in &self.active {
            let better = match cheapest {
                Some(current) => self.arena[idx].total_demerits < self.arena[current].total_demerits,
                None => true,
            };
            if better {
                cheapest = Some(idx);
            }
        }

        let Some(mut current) = cheapest else {
            return Err(LayoutError::UnbreakableParagraph {
                position: self.elements.len().saturating_sub(1),
            });
        };

        let mut breaks = Vec::new();
        while let Some(previous) = self.arena[current].previous {
            breaks.push(self.arena[current].breakpoint());
            current = previous;
        }
        breaks.reverse();

        log::debug!(
            "{} lines from {} candidates, demerits {:.1}",
            breaks.len(),
            self.arena.len(),
            breaks.last().map_or(0.0, |b| b.total_demerits)
        );
        Ok(breaks)
    }
}
