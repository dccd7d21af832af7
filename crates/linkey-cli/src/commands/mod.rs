pub mod open;
pub mod paths;
pub mod profiles;
pub mod serve;
pub mod toggle;
