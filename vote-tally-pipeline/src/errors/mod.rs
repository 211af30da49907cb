mod processor;
mod loader;
mod rescore;

pub use processor::ProcessorError;
pub use loader::LoaderError;
pub use rescore::RescoreError;
