//! Writing built parts to disk.

use crate::config::{EnclosureConfig, OutputConfig};
use crate::errors::{Error, Result};
use crate::io::write_stl;
use crate::mesh::Mesh;
use crate::part::Part;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub triangles: usize,
}

/// What was written, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub files: Vec<ExportedFile>,
}

impl ExportReport {
    pub fn total_triangles(&self) -> usize {
        self.files.iter().map(|f| f.triangles).sum()
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            writeln!(f, "  {} ({} triangles)", file.path.display(), file.triangles)?;
        }
        write!(
            f,
            "{} STL files written, {} triangles in total",
            self.files.len(),
            self.total_triangles()
        )
    }
}

/// Write every part, plus the optional preview assembly, into `output.dir`.
///
/// The directory is created if needed.
pub fn export_parts(
    output: &OutputConfig,
    parts: &[Part],
    preview: Option<(&str, &Mesh)>,
) -> Result<ExportReport> {
    std::fs::create_dir_all(&output.dir).map_err(|source| Error::Write {
        path: output.dir.clone(),
        source,
    })?;

    let mut report = ExportReport::default();
    let named = parts
        .iter()
        .map(|part| (part.file_name, part.solid_name(), &part.mesh))
        .chain(preview.map(|(file_name, mesh)| {
            (file_name, file_name.strip_suffix(".stl").unwrap_or(file_name), mesh)
        }));

    for (file_name, solid_name, mesh) in named {
        let path = output.dir.join(file_name);
        let triangles = write_stl(mesh, solid_name, &path, output.format)?;
        log::info!("wrote {} ({triangles} triangles)", path.display());
        report.files.push(ExportedFile { path, triangles });
    }
    Ok(report)
}

/// Build the configured variant and write its files.
pub fn build_and_export(config: &EnclosureConfig) -> Result<ExportReport> {
    let variant = config.variant;
    let parts = variant.build(config)?;
    let preview = if config.output.preview {
        Some(variant.preview(config, &parts)?)
    } else {
        None
    };
    export_parts(
        &config.output,
        &parts,
        preview.as_ref().map(|mesh| (variant.preview_file_name(), mesh)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::StlFormat;
    use crate::part::PartKind;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pidcase-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn writes_parts_and_preview() {
        let dir = scratch_dir("export");
        let output = OutputConfig {
            dir: dir.join("nested"),
            format: StlFormat::Binary,
            ..OutputConfig::default()
        };
        let cube = Mesh::cuboid(1.0, 1.0, 1.0);
        let parts = vec![Part {
            kind: PartKind::Washer,
            file_name: "cube.stl",
            mesh: cube.clone(),
        }];
        let report = export_parts(&output, &parts, Some(("both.stl", &cube.merge(&cube))))
            .expect("export succeeds");

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files[0].triangles, 12);
        assert_eq!(report.total_triangles(), 36);
        let bytes = std::fs::read(dir.join("nested/cube.stl")).expect("file exists");
        assert_eq!(bytes.len(), 84 + 50 * 12);
        assert!(report.to_string().ends_with("2 STL files written, 36 triangles in total"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
