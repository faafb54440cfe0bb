//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.
//!
//! - **session_file**: session record kept as a JSON file on disk.

pub mod session_file;

pub use session_file::FileSessionRecordStore;
