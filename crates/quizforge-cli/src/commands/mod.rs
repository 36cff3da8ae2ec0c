pub mod add;
pub mod generate;
pub mod list;
pub mod manage;
pub mod practice;
pub mod stats;
pub mod test;
