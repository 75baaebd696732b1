use crate::foundation::error::{WindowsillError, WindowsillResult};

/// Anything that carries the global clock value an actor is evaluated at.
pub trait Timed {
    /// Global clock time in seconds.
    fn time(&self) -> f64;
}

/// Bracket-local time handed to a bracket formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Local {
    /// Seconds since the bracket started.
    pub elapsed: f64,
    /// `elapsed / duration`, clamped to `[0, 1]`. Always `0` for the unbounded final bracket.
    pub progress: f64,
}

/// Formula evaluated while a bracket is active: rig (static actor data), per-frame input and
/// bracket-local time in, pose out.
pub type BracketFn<R, X, P> = fn(&R, &X, Local) -> P;

/// A time interval of the global clock governed by one formula.
///
/// The interval is `[start, end)`, or `[start, end]` when `end_closed` is set. The final
/// bracket of a timeline has `end = +inf`.
pub struct Bracket<R, X, P> {
    /// Short label used in diagnostics and pose dumps.
    pub name: &'static str,
    pub start: f64,
    pub end: f64,
    pub end_closed: bool,
    pub eval: BracketFn<R, X, P>,
}

impl<R, X, P> Clone for Bracket<R, X, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, X, P> Copy for Bracket<R, X, P> {}

impl<R, X, P> std::fmt::Debug for Bracket<R, X, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bracket")
            .field("name", &self.name)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("end_closed", &self.end_closed)
            .finish()
    }
}

impl<R, X, P> Bracket<R, X, P> {
    /// Half-open bracket `[start, end)`.
    pub fn span(name: &'static str, start: f64, end: f64, eval: BracketFn<R, X, P>) -> Self {
        Self {
            name,
            start,
            end,
            end_closed: false,
            eval,
        }
    }

    /// Closed bracket `[start, end]`; the next bracket takes over strictly after `end`.
    pub fn through(name: &'static str, start: f64, end: f64, eval: BracketFn<R, X, P>) -> Self {
        Self {
            name,
            start,
            end,
            end_closed: true,
            eval,
        }
    }

    /// Unbounded final bracket `[start, +inf)`.
    pub fn forever(name: &'static str, start: f64, eval: BracketFn<R, X, P>) -> Self {
        Self {
            name,
            start,
            end: f64::INFINITY,
            end_closed: false,
            eval,
        }
    }

    /// Return `true` when `time` falls inside this bracket.
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && (time < self.end || (self.end_closed && time <= self.end))
    }

    fn local(&self, time: f64) -> Local {
        let elapsed = time - self.start;
        let duration = self.end - self.start;
        let progress = if duration.is_finite() && duration > 0.0 {
            (elapsed / duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Local { elapsed, progress }
    }
}

/// Ordered, contiguous list of brackets partitioning `[first.start, +inf)`.
pub struct Timeline<R, X, P> {
    brackets: Vec<Bracket<R, X, P>>,
}

impl<R, X, P> std::fmt::Debug for Timeline<R, X, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.brackets.iter()).finish()
    }
}

impl<R, X: Timed, P> Timeline<R, X, P> {
    /// Build a timeline, rejecting gaps, overlaps, empty or reversed brackets and a bounded
    /// final bracket.
    pub fn new(brackets: Vec<Bracket<R, X, P>>) -> WindowsillResult<Self> {
        let Some(last) = brackets.last() else {
            return Err(WindowsillError::timeline("timeline has no brackets"));
        };
        if last.end != f64::INFINITY {
            return Err(WindowsillError::timeline(format!(
                "final bracket '{}' must be unbounded",
                last.name
            )));
        }

        for b in &brackets {
            if !b.start.is_finite() {
                return Err(WindowsillError::timeline(format!(
                    "bracket '{}' has a non-finite start",
                    b.name
                )));
            }
            if b.end.is_nan() || b.end <= b.start {
                return Err(WindowsillError::timeline(format!(
                    "bracket '{}' is empty or reversed ({}..{})",
                    b.name, b.start, b.end
                )));
            }
        }

        for pair in brackets.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.end < b.start {
                return Err(WindowsillError::timeline(format!(
                    "gap between '{}' (ends {}) and '{}' (starts {})",
                    a.name, a.end, b.name, b.start
                )));
            }
            if a.end > b.start {
                return Err(WindowsillError::timeline(format!(
                    "'{}' (ends {}) overlaps '{}' (starts {})",
                    a.name, a.end, b.name, b.start
                )));
            }
        }

        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[Bracket<R, X, P>] {
        &self.brackets
    }

    /// Clock time at which the first bracket begins.
    pub fn start(&self) -> f64 {
        self.brackets[0].start
    }

    /// Bracket active at `time`, or `None` before the timeline starts.
    pub fn find(&self, time: f64) -> Option<&Bracket<R, X, P>> {
        if time.is_nan() {
            return None;
        }
        // Index of the last bracket starting at or before `time`.
        let idx = self.brackets.partition_point(|b| b.start <= time);
        if idx == 0 {
            return None;
        }
        let mut idx = idx - 1;
        if idx > 0 {
            let prev = &self.brackets[idx - 1];
            if prev.end_closed && time == prev.end {
                idx -= 1;
            }
        }
        Some(&self.brackets[idx])
    }

    /// Evaluate the pose at `input.time()`, or `None` before the timeline starts.
    pub fn eval(&self, rig: &R, input: &X) -> Option<P> {
        let time = input.time();
        let bracket = self.find(time)?;
        Some((bracket.eval)(rig, input, bracket.local(time)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
