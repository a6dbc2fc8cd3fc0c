pub mod constants;
pub mod dom;
pub mod layout;
pub mod render;
