pub mod classify;
pub mod node;
pub mod substitute;

pub use classify::*;
pub use node::*;
