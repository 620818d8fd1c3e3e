pub mod candidate;
pub mod session;
pub mod vote;
