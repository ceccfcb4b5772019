//! Record policies: thresholds that turn raw record values into categories,
//! and the risk score computed for unscored data sets.
mod risk_score_policy;
mod score_policy;
mod staleness_policy;

pub use risk_score_policy::RiskScorePolicy;
pub use score_policy::{ScoreCategory, ScorePolicy};
pub use staleness_policy::{
    parse_release_date, ReleaseAssessment, Staleness, StalenessPolicy, NO_RELEASE_LABEL,
};
