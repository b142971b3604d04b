// 公共API暴露
mod cli;
mod config;
mod eclipse;
mod error;
mod makefile;
mod models;
mod renderer;
mod utils;

pub use cli::{CliArgs, parse_args};
pub use config::{ExporterConfig, ToolchainKind};
pub use eclipse::{EclipseExporter, ProjectContext, extract_defines};
pub use error::ExportError;
pub use makefile::{BuildGenerator, MakefileGenerator, ObjectRule, object_name};
pub use models::{ProjectDescriptor, Resources, Toolchain};
pub use renderer::TemplateRenderer;
pub use utils::{
    compute_absolute_path, directory_portion, get_clean_absolute_path, is_debug_mode, rebase_include_path,
    set_debug_mode, strip_current_dir,
};
