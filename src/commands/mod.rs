pub mod extract;
pub mod inventory;
pub mod query;
pub mod serve;
pub mod status;
