//! The provider boundary: subprocess execution, session settings, identity.

pub mod command;
pub mod identity;
pub mod session;

pub use session::AwsSession;
