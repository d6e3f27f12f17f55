pub mod advisor_llm;
pub mod memory_store;

pub use advisor_llm::OpenAiAdvisorAdapter;
pub use memory_store::MemoryStore;
