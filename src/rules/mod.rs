//! Rule table shared between training and scoring

pub mod store;

pub use store::RuleStore;
