pub mod cli;
pub mod errors;
pub mod instrument;
pub mod orderbook;
pub mod orders;
pub mod quote;
pub mod time;
