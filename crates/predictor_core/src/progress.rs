/// Number of step indicators shown above the form.
pub const STEP_COUNT: usize = 3;

/// Completion of the required fields. Emptiness, not validity, counts here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormProgress {
    pub filled: usize,
    pub total: usize,
}

impl FormProgress {
    /// Counts the non-empty trimmed values among `values`.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        values
            .into_iter()
            .fold(Self::default(), |mut progress, value| {
                progress.total += 1;
                if !value.trim().is_empty() {
                    progress.filled += 1;
                }
                progress
            })
    }

    /// Percentage in `[0, 100]`. A form with nothing to fill is complete.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.filled as f64 / self.total as f64) * 100.0
    }

    /// The advisory submit gate.
    pub fn is_complete(&self) -> bool {
        self.filled >= self.total
    }

    /// Index of the current step bucket, `floor(percent / 100 * STEP_COUNT)`.
    ///
    /// Evaluated in floating point on the unrounded percentage, so one field of
    /// three (33.33...%) still sits in the first bucket.
    pub fn current_step(&self) -> usize {
        let bucket = (self.percent() / 100.0 * STEP_COUNT as f64).floor();
        (bucket as usize).min(STEP_COUNT)
    }

    pub fn steps(&self) -> [StepState; STEP_COUNT] {
        let current = self.current_step();
        let started = self.percent() > 0.0;
        std::array::from_fn(|index| {
            if index < current {
                StepState::Completed
            } else if index == current && started {
                StepState::Active
            } else {
                StepState::Inactive
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepState {
    #[default]
    Inactive,
    Active,
    Completed,
}

impl StepState {
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            StepState::Inactive => None,
            StepState::Active => Some("active"),
            StepState::Completed => Some("completed"),
        }
    }
}
