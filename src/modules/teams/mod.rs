pub mod application;
pub mod domain;

// Re-exports for easy external access
pub use application::service::TeamService;
pub use domain::{Team, TeamMember, TEAM_CAPACITY};
