pub mod diagnostic;
pub mod lesson;
pub mod progress;
pub mod recommendation;
pub mod user;
