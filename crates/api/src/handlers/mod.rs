pub mod instances;
pub mod issues;
pub mod jobs;
pub mod overview;
pub mod settings;
