#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod pages;
pub mod tasks;
pub mod widgets;

pub use app::{ErpDeskApp, Page};
pub use tasks::TaskRunner;
