//! Sea-ORM entities served by the API.
//!
//! Each entity implements [`CRUDResource`](crate::core::CRUDResource) on its
//! `Model` and provides an input struct shared by create and update requests.

pub mod agent;
pub mod user;

pub use agent::{Agent, AgentInput};
pub use user::{User, UserInput};
