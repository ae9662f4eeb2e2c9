//! Records the core consumes: cars and agents, as listed by the backend.
//!
//! Both decode from loosely typed JSON. Field synonyms are resolved here,
//! once, so nothing downstream has to guess which key a value came under.

mod agent;
mod car;
mod fields;

pub use agent::Agent;
pub use car::Car;
