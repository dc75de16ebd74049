pub mod export;
pub mod navigation;
pub mod opportunity;
