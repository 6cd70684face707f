//! Forge API service implementations.

mod repositories;
mod issues;
mod milestones;
mod pull_requests;
mod organizations;
mod teams;
mod projects;
mod actions;
mod activity;
mod hooks;
mod authorizations;
mod users;

pub use repositories::*;
pub use issues::*;
pub use milestones::*;
pub use pull_requests::*;
pub use organizations::*;
pub use teams::*;
pub use projects::*;
pub use actions::*;
pub use activity::*;
pub use hooks::*;
pub use authorizations::*;
pub use users::*;
