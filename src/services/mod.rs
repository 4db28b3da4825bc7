// Service exports
pub mod fallback;
pub mod local;
pub mod memory;
pub mod store;
pub mod supabase;

pub use fallback::FallbackCalculationStore;
pub use local::LocalCalculationStore;
pub use memory::MemoryStore;
pub use store::{CalculationStore, MatchResultStore, StoreError, SubmissionStore};
pub use supabase::{SupabaseClient, SupabaseTables};
