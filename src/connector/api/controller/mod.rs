mod generate_controller;
mod inspect_controller;
mod libraries_controller;
mod settings_controller;

pub use generate_controller::*;
pub use inspect_controller::*;
pub use libraries_controller::*;
pub use settings_controller::*;
