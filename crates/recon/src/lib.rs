//! `rollcall-recon`: Roster/forum membership reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded roster and forum records, returns
//! classified results and deletion candidates. The only IO is the CSV
//! snapshot codec in [`snapshot`].

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod retention;
pub mod snapshot;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use matcher::Matcher;
pub use model::{
    ClassifiedRecord, DeleteFlag, DeletionCandidate, ForumRecord, MatchReason, MatchStatus,
    MatchStrategy, ReconInput, ReconResult, RecordId, RosterRecord,
};
pub use normalize::normalize;
pub use retention::RetentionPolicy;
