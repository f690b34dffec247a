//! # reposim-view
//!
//! Everything the UI needs except pixels: the Idle/Loading/Success/Error
//! machine, the cosmetic progress ticker, per-directory collapse state and
//! the background worker that runs one analysis per ticket.
//!
//! A frontend drives it like this:
//!
//! ```text
//! key Enter ─► session.submit(url) ─► Started(ticket) ─► worker.dispatch(ticket)
//! tick      ─► session.tick(now)
//!           ─► worker.try_recv() ─► session.complete(seq, result)
//! key Esc   ─► session.cancel()
//! ```

pub mod progress;
pub mod session;
pub mod status;
pub mod tree;
pub mod worker;

pub use progress::{ProgressTicker, LOADING_STEPS};
pub use session::{AnalysisSession, SubmitOutcome, Ticket};
pub use status::AppStatus;
pub use tree::{NodePath, TreeRow, TreeState};
pub use worker::{AnalysisWorker, Completion};
