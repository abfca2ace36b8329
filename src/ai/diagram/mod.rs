pub mod generate;
pub mod prompt;

pub use generate::{generate_diagram, DiagramResult};
pub use prompt::build_diagram_prompt;
