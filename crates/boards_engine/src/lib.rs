//! Boards engine: action bus, effect interpreter and the root process.
mod api;
mod bus;
mod engine;
mod interpreter;
mod memory;
mod store;

pub use api::BoardsApi;
pub use bus::{ActionBus, Subscription};
pub use engine::{Engine, EngineError, EngineHandle};
pub use interpreter::BusInterpreter;
pub use memory::MemoryBoardsApi;
pub use store::{SharedStore, StateStore};
