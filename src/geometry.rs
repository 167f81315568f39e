pub mod bezier;
pub mod petal;
