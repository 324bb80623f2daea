//! The semantic template resolution pipeline.
//!
//! Ties the domain logic to the external collaborators: extract an intent
//! from the command, embed it, look for an equivalent cached template,
//! and fall back to generate-then-persist on a miss. Collaborators enter
//! through capability traits ([`traits`]) so the pipeline can run against
//! the real service client and database or against in-process fakes.

pub mod clients;
pub mod error;
pub mod intent;
pub mod prompt;
pub mod recorder;
pub mod resolver;
pub mod storage;
pub mod traits;

pub use error::{IndexError, ResolveError, StoreError, UpstreamError};
pub use recorder::UserEditRecorder;
pub use resolver::{Resolution, Resolver};
