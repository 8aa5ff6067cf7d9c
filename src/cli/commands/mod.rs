pub mod forget;
pub mod ignore;
pub mod ingest;
pub mod reset;
pub mod stats;
pub mod users;
