use crate::debug_println;

/// Makefile 所属的工具链系列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainKind {
    GccArm,
    Armc5,
    Iar,
}

impl ToolchainKind {
    /// 链接脚本选项
    pub fn link_script_option(&self) -> &'static str {
        match self {
            ToolchainKind::GccArm => "-T",
            ToolchainKind::Armc5 => "--scatter",
            ToolchainKind::Iar => "--config",
        }
    }

    /// 链接库前缀，None 表示直接传入库文件路径
    pub fn user_library_flag(&self) -> Option<&'static str> {
        match self {
            ToolchainKind::GccArm => Some("-l"),
            ToolchainKind::Armc5 | ToolchainKind::Iar => None,
        }
    }

    /// 链接目录选项
    pub fn library_dir_option(&self) -> &'static str {
        match self {
            ToolchainKind::GccArm => "-L",
            ToolchainKind::Armc5 => "--userlibpath=",
            ToolchainKind::Iar => "-L",
        }
    }

    /// ELF 转 BIN 的 make 规则命令
    pub fn elf2bin_recipe(&self) -> &'static str {
        match self {
            ToolchainKind::GccArm => "$(ELF2BIN) -O binary $< $@",
            ToolchainKind::Armc5 => "$(ELF2BIN) --bin -o $@ $<",
            ToolchainKind::Iar => "$(ELF2BIN) --bin $< $@",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolchainKind::GccArm => "GCC_ARM",
            ToolchainKind::Armc5 => "ARM",
            ToolchainKind::Iar => "IAR",
        }
    }
}

/// Eclipse 导出器变体配置
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub toolchain_kind: ToolchainKind,
    pub load_exe: bool,
    pub global_symbols: &'static [&'static str],
}

const EXPORTERS: &[ExporterConfig] = &[
    ExporterConfig {
        id: "eclipse_gcc_arm",
        name: "Eclipse-GCC-ARM",
        toolchain_kind: ToolchainKind::GccArm,
        load_exe: true,
        global_symbols: &[
            "__GNUC__",
            "___int8_t_defined",
            "___int16_t_defined",
            "___int32_t_defined",
            "___int64_t_defined",
            "NULL=0",
        ],
    },
    ExporterConfig {
        id: "eclipse_armc5",
        name: "Eclipse-Armc5",
        toolchain_kind: ToolchainKind::Armc5,
        load_exe: false,
        global_symbols: &["__CC_ARM"],
    },
    ExporterConfig {
        id: "eclipse_iar",
        name: "Eclipse-IAR",
        toolchain_kind: ToolchainKind::Iar,
        load_exe: true,
        global_symbols: &["__ICCARM__"],
    },
];

impl ExporterConfig {
    pub fn from_name(id: &str) -> Option<Self> {
        debug_println!("[DEBUG config] Looking up exporter: {}", id);
        let config = EXPORTERS.iter().find(|e| e.id == id).cloned();
        if config.is_none() {
            debug_println!("[DEBUG config] Unknown exporter: {}", id);
        }
        config
    }

    pub fn all() -> &'static [ExporterConfig] {
        EXPORTERS
    }

    pub fn ids() -> Vec<&'static str> {
        EXPORTERS.iter().map(|e| e.id).collect()
    }

    pub fn global_symbols(&self) -> Vec<String> {
        self.global_symbols.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_variants() {
        let gcc = ExporterConfig::from_name("eclipse_gcc_arm").unwrap();
        assert_eq!(gcc.name, "Eclipse-GCC-ARM");
        assert!(gcc.load_exe);
        assert_eq!(gcc.global_symbols.len(), 6);
        assert!(gcc.global_symbols().contains(&"NULL=0".to_string()));

        let armc5 = ExporterConfig::from_name("eclipse_armc5").unwrap();
        assert!(!armc5.load_exe);
        assert_eq!(armc5.toolchain_kind, ToolchainKind::Armc5);
        assert_eq!(armc5.global_symbols, &["__CC_ARM"]);

        let iar = ExporterConfig::from_name("eclipse_iar").unwrap();
        assert!(iar.load_exe);
        assert_eq!(iar.toolchain_kind.link_script_option(), "--config");
    }

    #[test]
    fn test_unknown_variant() {
        assert!(ExporterConfig::from_name("eclipse_keil").is_none());
        assert_eq!(ExporterConfig::ids().len(), 3);
    }
}
