pub mod engine;

pub use engine::{MembershipRules, TEAM_ELIGIBLE};
