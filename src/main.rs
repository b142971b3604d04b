use std::fs;

use cdt_export::{
    EclipseExporter, ExportError, ExporterConfig, ProjectDescriptor, compute_absolute_path,
    debug_println, parse_args, set_debug_mode,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args();
    set_debug_mode(args.debug);

    if args.list {
        for exporter in ExporterConfig::all() {
            println!("{:<18} {}", exporter.id, exporter.name);
        }
        return Ok(());
    }

    let config =
        ExporterConfig::from_name(&args.ide).ok_or_else(|| ExportError::UnknownExporter(args.ide.clone()))?;

    let Some(descriptor_path) = args.descriptor.as_deref() else {
        return Err("missing project descriptor".into());
    };
    let descriptor = ProjectDescriptor::load(descriptor_path)?;

    // 逻辑上转换为绝对路径，避免 canonicalize 解析符号链接
    let export_dir = compute_absolute_path(&args.export_dir())?;
    fs::create_dir_all(&export_dir).map_err(|e| ExportError::io(&export_dir, e))?;
    debug_println!("[DEBUG] Export directory: {}", export_dir.display());

    let mut exporter = EclipseExporter::from_descriptor(config, &descriptor, &export_dir)?;
    exporter.generate()?;

    for path in exporter.generated_files() {
        println!("Generated {}", path.display());
    }
    println!(
        "Exported {} for {} ({})",
        descriptor.name,
        descriptor.target,
        exporter.config().name
    );

    Ok(())
}
