pub mod state;

pub use state::{build_state, StateBuilder};
