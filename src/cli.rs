use clap::Parser;
use std::path::PathBuf;

/// 命令行参数结构
#[derive(Parser, Debug)]
#[command(name = "cdt-export")]
#[command(version, about = "Export an embedded project as an Eclipse CDT project", long_about = None)]
pub struct CliArgs {
    /// 项目描述文件 (JSON)
    #[arg(required_unless_present = "list")]
    pub descriptor: Option<PathBuf>,

    /// 导出目录，默认为描述文件所在目录
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// 导出器 ID
    #[arg(short = 'i', long, default_value = "eclipse_gcc_arm")]
    pub ide: String,

    /// 列出可用的导出器
    #[arg(long)]
    pub list: bool,

    /// 打印调试信息
    #[arg(short, long)]
    pub debug: bool,
}

impl CliArgs {
    /// 导出目录：未指定时使用描述文件所在目录
    pub fn export_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        self.descriptor
            .as_deref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// 解析命令行参数
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
