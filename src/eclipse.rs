use crate::config::ExporterConfig;
use crate::debug_println;
use crate::error::ExportError;
use crate::makefile::{BuildGenerator, MakefileGenerator};
use crate::models::ProjectDescriptor;
use crate::renderer::TemplateRenderer;
use crate::utils::{directory_portion, rebase_include_path, strip_current_dir};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 存放调试配置与软件清单的子目录
pub const EXTRAS_DIR: &str = "eclipse-extras";

/// Eclipse 模板上下文
///
/// `files` 和 `gnu_inc` 只在渲染 `.cproject`/`.project` 之前才填充，
/// 之前渲染的模板若引用它们会在严格模式下报错。
#[derive(Debug, Clone, Serialize)]
pub struct ProjectContext {
    pub name: String,
    pub elf_location: String,
    pub c_symbols: Vec<String>,
    pub asm_symbols: Vec<String>,
    pub target: String,
    pub include_paths: Vec<String>,
    pub load_exe: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gnu_inc: Option<String>,
}

/// 提取参数列表中的 -D 宏定义，跳过第一个元素（可执行文件路径）
pub fn extract_defines(args: &[String]) -> Vec<String> {
    args.iter()
        .skip(1)
        .filter_map(|flag| flag.strip_prefix("-D"))
        .map(str::to_string)
        .collect()
}

/// Eclipse CDT 工程导出器，组合一个基础构建文件生成器
pub struct EclipseExporter {
    config: ExporterConfig,
    project_name: String,
    target: String,
    export_dir: PathBuf,
    generator: Box<dyn BuildGenerator>,
    renderer: TemplateRenderer,
    generated_files: Vec<PathBuf>,
}

impl EclipseExporter {
    pub fn new(
        config: ExporterConfig,
        project_name: &str,
        target: &str,
        export_dir: &Path,
        generator: Box<dyn BuildGenerator>,
    ) -> Result<Self, ExportError> {
        Ok(Self {
            config,
            project_name: project_name.to_string(),
            target: target.to_string(),
            export_dir: export_dir.to_path_buf(),
            generator,
            renderer: TemplateRenderer::new()?,
            generated_files: Vec::new(),
        })
    }

    /// 根据项目描述创建导出器，基础构建文件使用变体对应的 Makefile
    pub fn from_descriptor(
        config: ExporterConfig,
        descriptor: &ProjectDescriptor,
        export_dir: &Path,
    ) -> Result<Self, ExportError> {
        let generator = MakefileGenerator::new(
            config.toolchain_kind,
            &descriptor.name,
            &descriptor.target,
            descriptor.resources.clone(),
            descriptor.toolchain.clone(),
        );
        Self::new(
            config,
            &descriptor.name,
            &descriptor.target,
            export_dir,
            Box::new(generator),
        )
    }

    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    pub fn generated_files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    /// 调试配置文件名：<target>_pyocd_<project>_settings.launch
    pub fn launch_file_name(&self) -> String {
        format!("{}_pyocd_{}_settings.launch", self.target, self.project_name)
    }

    fn base_context(&self) -> ProjectContext {
        let toolchain = self.generator.toolchain();
        let resources = self.generator.resources();

        let mut c_symbols = toolchain.get_symbols(false);
        c_symbols.extend(self.config.global_symbols());
        let mut asm_symbols = toolchain.get_symbols(true);
        asm_symbols.extend(self.config.global_symbols());

        let include_paths = resources
            .inc_dirs
            .iter()
            .map(|inc| {
                let rebased = rebase_include_path(inc);
                debug_println!("[DEBUG eclipse] Include path: {} -> {}", inc, rebased);
                rebased
            })
            .collect();

        ProjectContext {
            name: self.project_name.clone(),
            elf_location: format!("BUILD/{}.elf", self.project_name),
            c_symbols,
            asm_symbols,
            target: self.target.clone(),
            include_paths,
            load_exe: self.config.load_exe.to_string(),
            files: None,
            gnu_inc: None,
        }
    }

    /// 补全源文件列表、命令行中的宏定义以及工具链头文件目录
    fn complete_context(&self, ctx: &mut ProjectContext) -> Result<(), ExportError> {
        let toolchain = self.generator.toolchain();
        let resources = self.generator.resources();

        let files = resources
            .c_sources
            .iter()
            .chain(&resources.cpp_sources)
            .chain(&resources.s_sources)
            .map(|file| strip_current_dir(file).to_string())
            .collect::<Vec<_>>();
        debug_println!("[DEBUG eclipse] {} source files", files.len());
        ctx.files = Some(files);

        ctx.asm_symbols.extend(extract_defines(&toolchain.asm));
        ctx.c_symbols.extend(extract_defines(&toolchain.cc));
        ctx.c_symbols.extend(extract_defines(&toolchain.cppc));

        let compiler = toolchain.cc.first().ok_or(ExportError::EmptyCommand("cc"))?;
        let gnu_inc = directory_portion(compiler).to_string();
        debug_println!("[DEBUG eclipse] Toolchain include dir: {}", gnu_inc);
        ctx.gnu_inc = Some(gnu_inc);
        Ok(())
    }

    /// 完整的模板上下文（渲染 `.cproject`/`.project` 时使用的版本）
    pub fn project_context(&self) -> Result<ProjectContext, ExportError> {
        let mut ctx = self.base_context();
        self.complete_context(&mut ctx)?;
        Ok(ctx)
    }

    /// 生成 Makefile、.cproject、.project、pyOCD 调试配置和 .p2f 软件清单
    pub fn generate(&mut self) -> Result<(), ExportError> {
        debug_println!(
            "[DEBUG eclipse] Exporting {} for {} with {}",
            self.project_name,
            self.target,
            self.config.name
        );

        let base_files = self.generator.generate(&self.renderer, &self.export_dir)?;
        self.generated_files.extend(base_files);

        let mut ctx = self.base_context();

        let extras_dir = self.export_dir.join(EXTRAS_DIR);
        fs::create_dir_all(&extras_dir).map_err(|e| ExportError::io(&extras_dir, e))?;

        let launch_file = Path::new(EXTRAS_DIR).join(self.launch_file_name());
        let path = self
            .renderer
            .gen_file("cdt/pyocd_settings.tmpl", &ctx, &self.export_dir, &launch_file)?;
        self.generated_files.push(path);

        let p2f_file = Path::new(EXTRAS_DIR).join("necessary_software.p2f");
        let path = self
            .renderer
            .gen_file("cdt/necessary_software.tmpl", &ctx, &self.export_dir, &p2f_file)?;
        self.generated_files.push(path);

        self.complete_context(&mut ctx)?;

        let path = self
            .renderer
            .gen_file("cdt/.cproject.tmpl", &ctx, &self.export_dir, Path::new(".cproject"))?;
        self.generated_files.push(path);
        let path = self
            .renderer
            .gen_file("cdt/.project.tmpl", &ctx, &self.export_dir, Path::new(".project"))?;
        self.generated_files.push(path);

        debug_println!(
            "[DEBUG eclipse] Export finished, {} files written",
            self.generated_files.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_defines_skips_executable() {
        let cc = args(&["-DNOT_A_FLAG", "-DFOO", "-O2", "-DBAR=1", "-I./inc"]);
        assert_eq!(extract_defines(&cc), vec!["FOO", "BAR=1"]);
        assert!(extract_defines(&[]).is_empty());
    }

    #[test]
    fn test_extract_defines_keeps_duplicates() {
        let cc = args(&["gcc", "-DFOO", "-DFOO"]);
        assert_eq!(extract_defines(&cc), vec!["FOO", "FOO"]);
    }

    #[test]
    fn test_context_serializes_without_late_keys() {
        let ctx = ProjectContext {
            name: "demo".to_string(),
            elf_location: "BUILD/demo.elf".to_string(),
            c_symbols: vec![],
            asm_symbols: vec![],
            target: "K64F".to_string(),
            include_paths: vec![],
            load_exe: "true".to_string(),
            files: None,
            gnu_inc: None,
        };
        let value = serde_json::to_value(&ctx).unwrap();
        assert!(value.get("files").is_none());
        assert!(value.get("gnu_inc").is_none());
        assert_eq!(value["load_exe"], "true");
    }
}
