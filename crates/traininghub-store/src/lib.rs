//! TrainingHub Storage Boundary
//!
//! Trait definitions for the collaborators the platform core consumes but
//! does not own:
//!
//! - [`UserStore`]: credential store holding identity records
//! - [`ContentStore`]: page field groups, menus, content entries, subscribers
//! - [`Mailer`]: outbound email dispatch
//! - [`Clock`]: time source, injectable for tests
//!
//! The crate also ships [`memory::MemoryStore`], an in-memory reference
//! implementation used by the server binary and by tests. A SQL-backed store
//! implements the same traits without touching the core.
//!
//! # Atomicity contract
//!
//! The core relies on the store for cross-request ordering:
//!
//! - `create` must be an atomic check-then-create on the normalized email
//!   (no duplicate identities under concurrent registration)
//! - `set_verification_code` / `mark_email_verified` must be atomic
//!   read-modify-writes on the code fields (no double consumption)
//!
//! [`memory::MemoryStore`] honors both by holding its write lock for the
//! whole operation.

pub mod error;
pub mod memory;
pub mod models;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{CapturingMailer, LogMailer, MemoryStore, SystemClock};
pub use models::*;
pub use traits::{Clock, ContentStore, Mailer, UserStore};
