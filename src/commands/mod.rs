mod check;
mod common;
mod compile;
mod convert;
mod init;
mod render;
mod validate;

pub use check::{CheckArgs, check_criteria};
pub use compile::{CompileArgs, compile_criteria};
pub use convert::{ConvertArgs, convert_config};
pub use init::{InitArgs, init_config};
pub use render::{RenderArgs, render_criteria};
pub use validate::{ValidateArgs, validate_config};
