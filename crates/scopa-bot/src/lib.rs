pub mod advisor;
pub mod params;

pub use advisor::{CardRisk, PlayAdvisor, Recommendation};
pub use params::AdvisorParams;
