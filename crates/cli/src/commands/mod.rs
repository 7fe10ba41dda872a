pub mod build;
pub mod onboard;
pub mod pages;
pub mod show;
