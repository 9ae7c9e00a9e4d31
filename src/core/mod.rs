pub mod assets;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod text;
