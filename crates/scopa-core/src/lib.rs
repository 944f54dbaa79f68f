#![deny(warnings)]
pub mod combination;
pub mod error;
pub mod estimate;
pub mod model;
pub mod sampler;

pub use error::{AnalysisError, CardParseError};

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "scopa"
    }

    pub const fn codename() -> &'static str {
        "Monte Carlo Scopa"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "scopa");
        assert_eq!(AppInfo::codename(), "Monte Carlo Scopa");
        assert!(!AppInfo::version().is_empty());
    }
}
