mod fs_store;
mod memory_store;
mod record;
mod store;

pub use fs_store::FsProfileStore;
pub use memory_store::MemoryProfileStore;
pub use record::ProfileRecord;
pub use store::{ProfileStore, sanitize_name};
