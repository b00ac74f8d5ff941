//! Business state and its flat-file persistence.

mod persist;
mod state;

pub use persist::BusinessStore;
pub use state::{BusinessState, Customer, SaleSource, Stats};
