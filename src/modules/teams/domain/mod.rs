pub mod entities;

pub use entities::{Team, TeamMember, TEAM_CAPACITY};
