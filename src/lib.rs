pub mod bundle;
pub mod error;
pub mod logger;
pub mod model;
pub mod options;
pub mod report;
pub mod sort;
pub mod xccov;
