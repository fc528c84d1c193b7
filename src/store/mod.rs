//! In-memory record stores.
//!
//! Each entity type lives in its own [`RecordStore`]. A store is a thin
//! wrapper around a pure [`StoreState`] transition function: mutations are
//! [`StoreAction`]s, and a failed action leaves the store as it was.

mod clock;
mod memory;
mod record;
mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use memory::RecordStore;
pub use record::{Record, RecordId, Stored};
pub use state::{StoreAction, StoreState};
