use std::path::PathBuf;
use thiserror::Error;

/// 导出过程中的所有错误，一律向上传播，不做重试
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse project descriptor {}: {source}", .path.display())]
    Descriptor {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("toolchain command `{0}` is empty (expected the executable path first)")]
    EmptyCommand(&'static str),

    #[error("unknown exporter `{0}` (available: {available})", available = crate::config::ExporterConfig::ids().join(", "))]
    UnknownExporter(String),
}

impl ExportError {
    /// 带路径的 IO 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = ExportError::io(
            "out/eclipse-extras",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        );
        assert!(matches!(err, ExportError::Io { .. }));
        let message = err.to_string();
        assert!(message.contains("out/eclipse-extras"));
        assert!(message.contains("read-only"));
    }
}
