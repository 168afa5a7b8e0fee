pub mod board;
pub mod input;
pub mod setup;
pub mod ui;
