pub mod command_handler;
pub mod ielts_service;
pub mod proofread_service;
pub mod service_container;
pub mod toeic_service;
pub mod traits;
pub mod word_service;

pub use command_handler::CommandHandler;
pub use ielts_service::{IeltsService, SyncOutcome};
pub use proofread_service::ProofreadService;
pub use service_container::ServiceContainer;
pub use toeic_service::ToeicService;
pub use word_service::{DEFAULT_PAGE_SIZE, FULL_LIST_MAX_RECORDS, WordService};
