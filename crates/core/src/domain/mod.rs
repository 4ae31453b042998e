pub mod company;
pub mod contract;
pub mod score;
pub mod ticker;
