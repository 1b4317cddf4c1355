pub mod team;

pub use team::{Team, TeamMember, TEAM_CAPACITY};
