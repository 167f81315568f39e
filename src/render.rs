pub mod backend;
pub mod cpu;
pub mod display_list;
pub mod pipeline;
pub mod surface;
