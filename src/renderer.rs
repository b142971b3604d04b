use crate::debug_println;
use crate::error::ExportError;
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 编译期嵌入的模板，名字与文件路径一一对应
const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    ("cdt/pyocd_settings.tmpl", include_str!("../templates/cdt/pyocd_settings.tmpl")),
    ("cdt/necessary_software.tmpl", include_str!("../templates/cdt/necessary_software.tmpl")),
    ("cdt/.cproject.tmpl", include_str!("../templates/cdt/.cproject.tmpl")),
    ("cdt/.project.tmpl", include_str!("../templates/cdt/.project.tmpl")),
    ("makefile/Makefile.tmpl", include_str!("../templates/makefile/Makefile.tmpl")),
];

/// 模板渲染器
///
/// 使用严格模式：模板引用了上下文中不存在的变量时直接报错，而不是渲染成空串。
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self, ExportError> {
        let mut renderer = Self::empty();
        for (name, source) in EMBEDDED_TEMPLATES {
            renderer.register(name, source)?;
        }
        Ok(renderer)
    }

    /// 不含内置模板的渲染器
    pub fn empty() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        Self { registry }
    }

    pub fn register(&mut self, name: &str, source: &str) -> Result<(), ExportError> {
        debug_println!("[DEBUG renderer] Registering template: {}", name);
        self.registry.register_template_string(name, source)?;
        Ok(())
    }

    pub fn render<T: Serialize>(&self, template: &str, ctx: &T) -> Result<String, ExportError> {
        debug_println!("[DEBUG renderer] Rendering template: {}", template);
        Ok(self.registry.render(template, ctx)?)
    }

    /// 渲染模板并写入 export_dir/target_file，返回写入的完整路径
    pub fn gen_file<T: Serialize>(
        &self,
        template: &str,
        ctx: &T,
        export_dir: &Path,
        target_file: &Path,
    ) -> Result<PathBuf, ExportError> {
        let content = self.render(template, ctx)?;
        let target_path = export_dir.join(target_file);
        debug_println!("[DEBUG renderer] Generating: {}", target_path.display());
        fs::write(&target_path, content).map_err(|e| ExportError::io(&target_path, e))?;
        Ok(target_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_embedded_templates_register() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let mut renderer = TemplateRenderer::empty();
        renderer.register("inc", "<path>{{gnu_inc}}</path>").unwrap();

        let result = renderer.render("inc", &json!({ "name": "demo" }));
        assert!(matches!(result, Err(ExportError::Render(_))));

        let rendered = renderer.render("inc", &json!({ "gnu_inc": "/usr/bin" })).unwrap();
        assert_eq!(rendered, "<path>/usr/bin</path>");
    }

    #[test]
    fn test_unknown_template_is_fatal() {
        let renderer = TemplateRenderer::empty();
        assert!(renderer.render("cdt/missing.tmpl", &json!({})).is_err());
    }
}
