use scopa_core::sampler::ADVISORY_TRIALS;

const TRIALS_ENV: &str = "SCOPA_ADVISOR_TRIALS";

/// Tunable advisor parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisorParams {
    /// Simulated opponent hands per candidate card (default: 1000)
    pub trials: usize,
}

impl Default for AdvisorParams {
    fn default() -> Self {
        Self {
            trials: ADVISORY_TRIALS,
        }
    }
}

impl AdvisorParams {
    pub const fn with_trials(trials: usize) -> Self {
        Self { trials }
    }

    /// Defaults, with `SCOPA_ADVISOR_TRIALS` overriding the trial budget when it
    /// holds a positive integer.
    pub fn from_env() -> Self {
        Self::from_override(std::env::var(TRIALS_ENV).ok().as_deref())
    }

    fn from_override(raw: Option<&str>) -> Self {
        match raw.and_then(|value| value.trim().parse::<usize>().ok()) {
            Some(trials) if trials > 0 => Self::with_trials(trials),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AdvisorParams;
    use scopa_core::sampler::ADVISORY_TRIALS;

    #[test]
    fn default_uses_advisory_budget() {
        assert_eq!(AdvisorParams::default().trials, ADVISORY_TRIALS);
    }

    #[test]
    fn override_accepts_positive_integers_only() {
        assert_eq!(AdvisorParams::from_override(Some(" 250 ")).trials, 250);
        assert_eq!(AdvisorParams::from_override(Some("0")).trials, ADVISORY_TRIALS);
        assert_eq!(AdvisorParams::from_override(Some("lots")).trials, ADVISORY_TRIALS);
        assert_eq!(AdvisorParams::from_override(None).trials, ADVISORY_TRIALS);
    }
}
