pub mod dispatcher;
pub mod escalation;
pub mod render;
pub mod resolver;
pub mod types;
