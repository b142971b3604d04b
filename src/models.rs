use crate::debug_println;
use crate::error::ExportError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 构建资源：已扫描好的源文件与头文件目录
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub c_sources: Vec<String>,
    pub cpp_sources: Vec<String>,
    pub s_sources: Vec<String>,
    pub inc_dirs: Vec<String>,
    pub linker_script: Option<String>,
    pub libraries: Vec<String>,
    pub lib_dirs: Vec<String>,
}

/// 工具链命令描述，argv 第一个元素是可执行文件路径
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    pub cc: Vec<String>,
    pub cppc: Vec<String>,
    pub asm: Vec<String>,
    pub ld: Vec<String>,
    pub elf2bin: String,
    pub symbols: Vec<String>,
    pub asm_symbols: Option<Vec<String>>,
}

impl Toolchain {
    /// 获取预定义宏列表；汇编器没有单独配置时沿用 C 的宏
    pub fn get_symbols(&self, for_asm: bool) -> Vec<String> {
        match (&self.asm_symbols, for_asm) {
            (Some(asm), true) => asm.clone(),
            _ => self.symbols.clone(),
        }
    }
}

/// 项目描述文件 (JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDescriptor {
    pub name: String,
    pub target: String,
    #[serde(default)]
    pub resources: Resources,
    #[serde(default)]
    pub toolchain: Toolchain,
}

impl ProjectDescriptor {
    pub fn from_json(path: &Path, content: &str) -> Result<Self, ExportError> {
        serde_json::from_str(content).map_err(|source| ExportError::Descriptor {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ExportError> {
        debug_println!("[DEBUG models] Loading project descriptor: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        let descriptor = Self::from_json(path, &content)?;
        debug_println!(
            "[DEBUG models] Project '{}' for target '{}': {} C, {} C++, {} ASM sources",
            descriptor.name,
            descriptor.target,
            descriptor.resources.c_sources.len(),
            descriptor.resources.cpp_sources.len(),
            descriptor.resources.s_sources.len()
        );
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asm_symbols_fall_back_to_c_symbols() {
        let mut toolchain = Toolchain {
            symbols: vec!["TARGET_K64F".to_string()],
            ..Default::default()
        };
        assert_eq!(toolchain.get_symbols(true), vec!["TARGET_K64F"]);

        toolchain.asm_symbols = Some(vec!["__ASSEMBLY__".to_string()]);
        assert_eq!(toolchain.get_symbols(true), vec!["__ASSEMBLY__"]);
        assert_eq!(toolchain.get_symbols(false), vec!["TARGET_K64F"]);
    }

    #[test]
    fn test_descriptor_defaults_missing_lists() {
        let json = r#"{ "name": "demo", "target": "K64F", "resources": { "c_sources": ["main.c"] } }"#;
        let descriptor = ProjectDescriptor::from_json(Path::new("demo.json"), json).unwrap();
        assert_eq!(descriptor.resources.c_sources, vec!["main.c"]);
        assert!(descriptor.resources.inc_dirs.is_empty());
        assert!(descriptor.toolchain.cc.is_empty());
    }

    #[test]
    fn test_malformed_descriptor_names_path() {
        let err = ProjectDescriptor::from_json(Path::new("broken.json"), "{ \"name\": ").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
