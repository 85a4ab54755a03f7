// Import/export of budget data (CSV and JSON).

pub mod export;
pub mod import;

pub use export::*;
pub use import::*;
