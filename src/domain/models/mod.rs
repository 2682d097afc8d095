mod dictionary;
mod package_source;
mod requirement;
mod term;

pub use dictionary::*;
pub use package_source::*;
pub use requirement::*;
pub use term::*;
