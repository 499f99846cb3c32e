//! Navigation Path Planner
//!
//! Maps `(current, target, available primitives)` to the shortest ordered
//! list of primitive calls, without touching the UI.
//!
//! With a bulk stride `s` and distance `d` two plans compete:
//!
//! ```text
//! floor plan      floor(d/s) bulk  + (d mod s) single steps toward target
//! overshoot plan  ceil(d/s)  bulk  + (ceil(d/s)*s - d) single steps back
//! ```
//!
//! The cheaper plan wins; on a tie the floor plan is kept. The overshoot plan
//! is only a candidate when a single step in the opposite direction exists.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One primitive invocation (or a run of identical invocations)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavStep {
    /// Jump straight to a position
    GoToPage(usize),
    /// `n` single forward steps
    Next(usize),
    /// `n` forward bulk steps
    NextBulk(usize),
    /// `n` single backward steps
    Previous(usize),
    /// `n` backward bulk steps
    PreviousBulk(usize),
}

impl NavStep {
    /// Name of the primitive this step invokes
    #[must_use]
    pub const fn primitive_name(&self) -> &'static str {
        match self {
            Self::GoToPage(_) => "goToPage",
            Self::Next(_) => "goNext",
            Self::NextBulk(_) => "goNextBulk",
            Self::Previous(_) => "goPrevious",
            Self::PreviousBulk(_) => "goPreviousBulk",
        }
    }

    /// Number of primitive calls this step issues
    #[must_use]
    pub const fn primitive_calls(&self) -> usize {
        match self {
            Self::GoToPage(_) => 1,
            Self::Next(n) | Self::NextBulk(n) | Self::Previous(n) | Self::PreviousBulk(n) => *n,
        }
    }
}

impl fmt::Display for NavStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoToPage(target) => write!(f, "goToPage({target})"),
            Self::Next(n) | Self::NextBulk(n) | Self::Previous(n) | Self::PreviousBulk(n) => {
                write!(f, "{}({n})", self.primitive_name())
            }
        }
    }
}

/// Ordered sequence of navigation steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavPath(Vec<NavStep>);

impl NavPath {
    /// The empty path
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Steps in execution order
    #[must_use]
    pub fn steps(&self) -> &[NavStep] {
        &self.0
    }

    /// Whether the path has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Total primitive calls over all steps
    #[must_use]
    pub fn primitive_calls(&self) -> usize {
        self.0.iter().map(NavStep::primitive_calls).sum()
    }

    /// Position reached from `start` if every primitive moves by its nominal
    /// amount
    #[must_use]
    pub fn destination(&self, start: usize, next_stride: usize, previous_stride: usize) -> usize {
        self.0.iter().fold(start, |position, step| match *step {
            NavStep::GoToPage(target) => target,
            NavStep::Next(n) => position + n,
            NavStep::NextBulk(n) => position + n * next_stride,
            NavStep::Previous(n) => position.saturating_sub(n),
            NavStep::PreviousBulk(n) => position.saturating_sub(n * previous_stride),
        })
    }
}

impl From<Vec<NavStep>> for NavPath {
    fn from(steps: Vec<NavStep>) -> Self {
        Self(steps)
    }
}

impl IntoIterator for NavPath {
    type Item = NavStep;
    type IntoIter = std::vec::IntoIter<NavStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NavPath {
    type Item = &'a NavStep;
    type IntoIter = std::slice::Iter<'a, NavStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for NavPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{step}")?;
        }
        f.write_str("]")
    }
}

/// Which primitives exist, and the nominal bulk strides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveSet {
    /// `goNext` is available
    pub go_next: bool,
    /// `goPrevious` is available
    pub go_previous: bool,
    /// Stride of `goNextBulk`, `None` when absent
    pub go_next_bulk: Option<usize>,
    /// Stride of `goPreviousBulk`, `None` when absent
    pub go_previous_bulk: Option<usize>,
    /// `goToPage` is available
    pub go_to_page: bool,
}

impl PrimitiveSet {
    /// No primitives at all
    #[must_use]
    pub const fn none() -> Self {
        Self {
            go_next: false,
            go_previous: false,
            go_next_bulk: None,
            go_previous_bulk: None,
            go_to_page: false,
        }
    }

    /// Add `goNext`
    #[must_use]
    pub const fn with_next(mut self) -> Self {
        self.go_next = true;
        self
    }

    /// Add `goPrevious`
    #[must_use]
    pub const fn with_previous(mut self) -> Self {
        self.go_previous = true;
        self
    }

    /// Add `goNextBulk` with the given stride
    #[must_use]
    pub const fn with_next_bulk(mut self, stride: usize) -> Self {
        self.go_next_bulk = Some(stride);
        self
    }

    /// Add `goPreviousBulk` with the given stride
    #[must_use]
    pub const fn with_previous_bulk(mut self, stride: usize) -> Self {
        self.go_previous_bulk = Some(stride);
        self
    }

    /// Add `goToPage`
    #[must_use]
    pub const fn with_go_to_page(mut self) -> Self {
        self.go_to_page = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    bulks: usize,
    toward: usize,
    back: usize,
}

impl Candidate {
    const fn cost(&self) -> usize {
        self.bulks + self.toward + self.back
    }

    fn into_path(self, direction: Direction) -> NavPath {
        let (bulk, toward, back): (fn(usize) -> NavStep, fn(usize) -> NavStep, fn(usize) -> NavStep) =
            match direction {
                Direction::Forward => (NavStep::NextBulk, NavStep::Next, NavStep::Previous),
                Direction::Backward => (NavStep::PreviousBulk, NavStep::Previous, NavStep::Next),
            };
        let mut steps = Vec::with_capacity(2);
        if self.bulks > 0 {
            steps.push(bulk(self.bulks));
        }
        if self.toward > 0 {
            steps.push(toward(self.toward));
        }
        if self.back > 0 {
            steps.push(back(self.back));
        }
        NavPath(steps)
    }
}

/// Plan the primitive calls that move `current` to `target`.
///
/// Pure and deterministic. Returns an empty path when `current == target`,
/// and also when no available primitive can move in the required direction;
/// callers must treat the latter as a configuration defect.
#[must_use]
pub fn plan_path(current: usize, target: usize, available: &PrimitiveSet) -> NavPath {
    if current == target {
        return NavPath::empty();
    }
    if available.go_to_page {
        return NavPath(vec![NavStep::GoToPage(target)]);
    }
    if target > current {
        plan_direction(target - current, target, Direction::Forward, available)
    } else {
        plan_direction(current - target, target, Direction::Backward, available)
    }
}

fn plan_direction(
    distance: usize,
    target: usize,
    direction: Direction,
    available: &PrimitiveSet,
) -> NavPath {
    let (bulk_stride, toward, back) = match direction {
        Direction::Forward => (available.go_next_bulk, available.go_next, available.go_previous),
        Direction::Backward => (
            available.go_previous_bulk,
            available.go_previous,
            available.go_next,
        ),
    };

    let Some(stride) = bulk_stride.filter(|s| *s > 0) else {
        if !toward {
            return NavPath::empty();
        }
        return Candidate {
            bulks: 0,
            toward: distance,
            back: 0,
        }
        .into_path(direction);
    };

    let remainder = distance % stride;
    let floor_plan = (remainder == 0 || toward).then_some(Candidate {
        bulks: distance / stride,
        toward: remainder,
        back: 0,
    });

    let ceil_bulks = distance.div_ceil(stride);
    let overshoot = ceil_bulks * stride - distance;
    // Backward overshoot must not run below position 0.
    let overshoot_fits = direction == Direction::Forward || overshoot <= target;
    let overshoot_plan = (overshoot > 0 && back && overshoot_fits).then_some(Candidate {
        bulks: ceil_bulks,
        toward: 0,
        back: overshoot,
    });

    let chosen = match (floor_plan, overshoot_plan) {
        (Some(floor), Some(over)) if over.cost() < floor.cost() => over,
        (Some(floor), _) => floor,
        (None, Some(over)) => over,
        (None, None) => Candidate {
            bulks: distance / stride,
            toward: 0,
            back: 0,
        },
    };
    chosen.into_path(direction)
}
