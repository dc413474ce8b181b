//! Application state stores.
//!
//! Two single-owner stores: the session store (auth flag, loading flag,
//! transient notices) and the resource store (the most recent fetch result
//! per feature). Any component may read; only the declared actions write.

mod resources;
mod session;

pub use resources::{ResourceStore, Slice, Ticket};
pub use session::{Notice, NoticeKind, NoticeStyle, SessionState};
