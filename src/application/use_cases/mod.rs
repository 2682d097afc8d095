mod create_dictionary;
mod generate_dictionary;
mod process_library;
mod read_requirements;
mod write_dictionary;

pub use create_dictionary::*;
pub use generate_dictionary::*;
pub use process_library::*;
pub use read_requirements::*;
pub use write_dictionary::*;
