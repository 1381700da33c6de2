#[macro_use]
extern crate tracing;

mod app;
mod errors;
pub mod logging;

pub use app::App;
pub use champ_reveal_config::Args;
pub use errors::init_errors;
