mod dictionary_writer;
mod package_locator;
mod term_extractor;

pub use dictionary_writer::*;
pub use package_locator::*;
pub use term_extractor::*;
