mod file_dictionary_writer;
mod site_packages_locator;
mod treesitter_term_extractor;

pub use file_dictionary_writer::*;
pub use site_packages_locator::*;
pub use treesitter_term_extractor::*;
