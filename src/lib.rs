pub mod derive;
pub mod error;
pub mod ingest;
pub mod merge;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod schema;
pub mod summary;
pub mod validate;
