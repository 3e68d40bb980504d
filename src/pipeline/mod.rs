pub mod job_runner;
pub mod layout;
pub mod orchestrator;
pub mod page_processor;
