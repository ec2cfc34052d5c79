pub mod discovery;
pub mod document;
pub mod incremental;
pub mod long_form;
pub mod parallel_processing;
pub mod reader;
pub mod resolver;
pub mod tokenizer;

// Re-export the resolution core
pub use resolver::{
    AbbreviationMap, AbbreviationResolver, ProgressObserver, Resolution, ResolvePhase,
    ResolveError, ResolvedAbbreviation, ResolverConfig, Token,
};

// Re-export collaborators shipped with the crate
pub use long_form::{LongFormDetector, NoLongForms, ParentheticalDetector};
pub use tokenizer::{TokenSource, WhitespaceTokenizer};

// Re-export host utilities
pub use document::TextDocument;
pub use incremental::{generate_output_path, output_exists, should_process_document};
pub use parallel_processing::{
    process_document, process_documents_parallel, DocumentOutcome, DocumentStats,
    ProcessingOptions, ResolutionPipeline, RunStats,
};
