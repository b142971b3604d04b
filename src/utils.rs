use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// IDE 工程文件相对构建根目录多出的三层嵌套
pub const PROJECT_FILE_REBASE: &str = "../../../";

// 全局调试控制标志，默认关闭
static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// 设置调试模式
pub fn set_debug_mode(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::Relaxed);
}

/// 获取当前调试模式状态
pub fn is_debug_mode() -> bool {
    DEBUG_MODE.load(Ordering::Relaxed)
}

/// 创建一个条件打印宏，只有在调试模式下才会打印
#[macro_export]
macro_rules! debug_println {
    ($($arg:tt)*) => {
        if $crate::is_debug_mode() {
            println!($($arg)*);
        }
    };
}

/// 将以 "." / ".." 开头的 include 路径改写为相对 IDE 工程文件位置的路径
///
/// `./inc` -> `../../../inc`，`.` -> `../../../`，`../lib` -> `../../../../lib`，
/// 其余路径（包括绝对路径）保持不变。
pub fn rebase_include_path(inc: &str) -> String {
    if inc == "." {
        PROJECT_FILE_REBASE.to_string()
    } else if let Some(rest) = inc.strip_prefix("./") {
        format!("{}{}", PROJECT_FILE_REBASE, rest)
    } else if inc == ".." || inc.starts_with("../") {
        format!("{}{}", PROJECT_FILE_REBASE, inc)
    } else {
        inc.to_string()
    }
}

/// 去掉路径开头的 "./"（可重复出现）
pub fn strip_current_dir(path: &str) -> &str {
    let mut rest = path;
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    rest
}

/// 路径中最后一个分隔符之前的目录部分
///
/// 与 `Path::parent` 不同，`/usr/bin/` 的目录部分是 `/usr/bin`；
/// 不含分隔符的裸命令名返回空串，根目录下的文件返回 `/`。
pub fn directory_portion(path: &str) -> &str {
    let Some(idx) = path.rfind(['/', '\\']) else {
        return "";
    };
    let head = &path[..=idx];
    let trimmed = head.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() || trimmed.ends_with(':') {
        // 根目录（"/" 或 "C:\\"）保留分隔符
        head
    } else {
        trimmed
    }
}

/// 逻辑上计算绝对路径（不解析符号链接或映射驱动器，保留盘符）
pub fn compute_absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let clean_path = get_clean_absolute_path(Path::new(""), &absolute);

    // 如果结果为空（例如在某些边缘情况下），至少返回 "."
    if clean_path.as_os_str().is_empty() {
        Ok(PathBuf::from("."))
    } else {
        Ok(clean_path)
    }
}

/// 逻辑上解析 base + rel（不依赖文件系统存在性，仅处理路径组件）
pub fn get_clean_absolute_path(base: &Path, rel: &Path) -> PathBuf {
    let mut result = base.to_path_buf();

    let mut components = rel.components();
    while let Some(component) = components.next() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(c) => {
                result.push(c);
            }
            Component::RootDir => {
                // 遇到根目录（Linux 的 / 或 Windows 的 \），重置路径
                result = PathBuf::from(component.as_os_str());
            }
            Component::Prefix(prefix) => {
                // Windows 盘符，后面紧跟的根目录要拼回去
                result = PathBuf::from(prefix.as_os_str());
                if let Some(next_component) = components.next() {
                    result.push(next_component);
                }
            }
            Component::CurDir => {}
        }
    }
    result
}
