use crate::config::ToolchainKind;
use crate::debug_println;
use crate::error::ExportError;
use crate::models::{Resources, Toolchain};
use crate::renderer::TemplateRenderer;
use crate::utils::strip_current_dir;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 基础构建文件生成器需要提供的能力
pub trait BuildGenerator {
    /// 生成基础构建文件，返回写入的文件路径
    fn generate(
        &self,
        renderer: &TemplateRenderer,
        export_dir: &Path,
    ) -> Result<Vec<PathBuf>, ExportError>;

    fn toolchain(&self) -> &Toolchain;

    fn resources(&self) -> &Resources;
}

#[derive(Serialize)]
struct MakefileContext<'a> {
    name: &'a str,
    target: &'a str,
    toolchain: &'static str,
    cc: String,
    cppc: String,
    asm: String,
    ld: String,
    elf2bin: &'a str,
    elf2bin_recipe: &'static str,
    include_paths: &'a [String],
    c_symbols: Vec<String>,
    asm_symbols: Vec<String>,
    lib_dirs: Vec<String>,
    libraries: Vec<String>,
    linker_script: &'a str,
    linker_script_flags: String,
    objects: Vec<String>,
    rules: Vec<ObjectRule>,
    elf_location: String,
    bin_location: String,
}

/// 单个目标文件的显式编译规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectRule {
    pub object: String,
    pub source: String,
    pub recipe: &'static str,
}

const C_RECIPE: &str = "$(CC) $(C_SYMBOLS) $(INCLUDE_PATHS) -o $@ $<";
const CPP_RECIPE: &str = "$(CPP) $(C_SYMBOLS) $(INCLUDE_PATHS) -o $@ $<";
const ASM_RECIPE: &str = "$(AS) $(ASM_SYMBOLS) $(INCLUDE_PATHS) -o $@ $<";

/// 目标文件名（相对 BUILD 目录）：保留源文件扩展名，".." 改写为 "__"，
/// 保证所有目标文件都落在 BUILD 目录内且 main.c / main.cpp 不冲突
pub fn object_name(source: &str) -> String {
    let name = strip_current_dir(source)
        .split(['/', '\\'])
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .map(|seg| if seg == ".." { "__" } else { seg })
        .collect::<Vec<_>>()
        .join("/");
    format!("{}.o", name)
}

/// 按工具链系列生成 Makefile
pub struct MakefileGenerator {
    pub kind: ToolchainKind,
    pub project_name: String,
    pub target: String,
    pub resources: Resources,
    pub toolchain: Toolchain,
}

impl MakefileGenerator {
    pub fn new(
        kind: ToolchainKind,
        project_name: &str,
        target: &str,
        resources: Resources,
        toolchain: Toolchain,
    ) -> Self {
        Self {
            kind,
            project_name: project_name.to_string(),
            target: target.to_string(),
            resources,
            toolchain,
        }
    }

    /// 每个源文件的编译规则，顺序为 C、C++、汇编
    pub fn object_rules(&self) -> Vec<ObjectRule> {
        let res = &self.resources;
        let rule = |recipe: &'static str| {
            move |src: &String| ObjectRule {
                object: object_name(src),
                source: strip_current_dir(src).to_string(),
                recipe,
            }
        };
        res.c_sources
            .iter()
            .map(rule(C_RECIPE))
            .chain(res.cpp_sources.iter().map(rule(CPP_RECIPE)))
            .chain(res.s_sources.iter().map(rule(ASM_RECIPE)))
            .collect()
    }

    /// 源文件对应的目标文件（相对 BUILD 目录）
    pub fn object_files(&self) -> Vec<String> {
        self.object_rules().into_iter().map(|r| r.object).collect()
    }

    /// 链接库参数：GCC 使用 -l<name>，其他工具链直接传库文件
    pub fn library_flags(&self) -> Vec<String> {
        self.resources
            .libraries
            .iter()
            .map(|lib| match self.kind.user_library_flag() {
                Some(flag) => {
                    let stem = Path::new(lib)
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| lib.clone());
                    let name = stem.strip_prefix("lib").unwrap_or(&stem);
                    format!("{}{}", flag, name)
                }
                None => lib.clone(),
            })
            .collect()
    }

    fn build_context(&self) -> Result<MakefileContext<'_>, ExportError> {
        if self.toolchain.cc.is_empty() {
            return Err(ExportError::EmptyCommand("cc"));
        }

        let linker_script = self.resources.linker_script.as_deref().unwrap_or("");
        let linker_script_flags = if linker_script.is_empty() {
            String::new()
        } else {
            format!("{} {}", self.kind.link_script_option(), linker_script)
        };

        let lib_dirs = self
            .resources
            .lib_dirs
            .iter()
            .map(|dir| format!("{}{}", self.kind.library_dir_option(), dir))
            .collect();

        Ok(MakefileContext {
            name: &self.project_name,
            target: &self.target,
            toolchain: self.kind.name(),
            cc: self.toolchain.cc.join(" "),
            cppc: self.toolchain.cppc.join(" "),
            asm: self.toolchain.asm.join(" "),
            ld: self.toolchain.ld.join(" "),
            elf2bin: &self.toolchain.elf2bin,
            elf2bin_recipe: self.kind.elf2bin_recipe(),
            include_paths: &self.resources.inc_dirs,
            c_symbols: self.toolchain.get_symbols(false),
            asm_symbols: self.toolchain.get_symbols(true),
            lib_dirs,
            libraries: self.library_flags(),
            linker_script,
            linker_script_flags,
            objects: self.object_files(),
            rules: self.object_rules(),
            elf_location: format!("BUILD/{}.elf", self.project_name),
            bin_location: format!("BUILD/{}.bin", self.project_name),
        })
    }
}

impl BuildGenerator for MakefileGenerator {
    fn generate(
        &self,
        renderer: &TemplateRenderer,
        export_dir: &Path,
    ) -> Result<Vec<PathBuf>, ExportError> {
        debug_println!(
            "[DEBUG makefile] Generating {} Makefile for {}",
            self.kind.name(),
            self.project_name
        );
        let ctx = self.build_context()?;
        debug_println!("[DEBUG makefile] Objects: {:?}", ctx.objects);
        let path = renderer.gen_file("makefile/Makefile.tmpl", &ctx, export_dir, Path::new("Makefile"))?;
        Ok(vec![path])
    }

    fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    fn resources(&self) -> &Resources {
        &self.resources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: ToolchainKind) -> MakefileGenerator {
        let resources = Resources {
            c_sources: vec!["./main.c".to_string()],
            cpp_sources: vec!["src/app.cpp".to_string()],
            s_sources: vec!["./startup/startup.S".to_string()],
            libraries: vec!["lib/libnet.a".to_string()],
            ..Default::default()
        };
        MakefileGenerator::new(kind, "demo", "K64F", resources, Toolchain::default())
    }

    #[test]
    fn test_object_files() {
        let generator = sample(ToolchainKind::GccArm);
        assert_eq!(
            generator.object_files(),
            vec!["main.c.o", "src/app.cpp.o", "startup/startup.S.o"]
        );
    }

    #[test]
    fn test_object_names_stay_inside_build_dir() {
        assert_eq!(object_name("../lib/x.c"), "__/lib/x.c.o");
        assert_eq!(object_name("./../../shared/util.cpp"), "__/__/shared/util.cpp.o");
        assert_eq!(object_name("src/./drv.c"), "src/drv.c.o");
        assert_ne!(object_name("main.c"), object_name("main.cpp"));
    }

    #[test]
    fn test_object_rules_pick_recipe_by_source_kind() {
        let rules = sample(ToolchainKind::GccArm).object_rules();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].source, "main.c");
        assert_eq!(rules[0].recipe, C_RECIPE);
        assert_eq!(rules[1].recipe, CPP_RECIPE);
        assert_eq!(rules[2].source, "startup/startup.S");
        assert_eq!(rules[2].recipe, ASM_RECIPE);
    }

    #[test]
    fn test_library_flags_per_toolchain() {
        assert_eq!(sample(ToolchainKind::GccArm).library_flags(), vec!["-lnet"]);
        assert_eq!(sample(ToolchainKind::Armc5).library_flags(), vec!["lib/libnet.a"]);
    }

    #[test]
    fn test_empty_compiler_command_is_rejected() {
        let generator = sample(ToolchainKind::Iar);
        assert!(matches!(
            generator.build_context(),
            Err(ExportError::EmptyCommand("cc"))
        ));
    }
}
