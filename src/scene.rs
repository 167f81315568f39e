pub mod bouquet;
pub mod rose;
