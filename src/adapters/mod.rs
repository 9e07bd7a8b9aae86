// Adapters layer: concrete implementations of the domain ports.
// Storage here lives only as long as the process; durable backends plug in through the same traits.

pub mod clock;
pub mod memory;

pub use clock::{FixedClock, SystemClock};
pub use memory::{InMemoryCardRepository, InMemorySessionRepository};
