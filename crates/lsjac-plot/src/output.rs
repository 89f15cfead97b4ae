//! Output file handling.

use std::path::Path;

use lsjac_core::Error;

/// Image format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// `.svg` selects SVG; anything else is written as a bitmap.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Png,
        }
    }
}

/// Convert a plotters error into a render error.
pub(crate) fn render_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Render(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("lorentz.svg")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("out/FIG.SVG")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("lorentz.png")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("lorentz")), OutputFormat::Png);
    }
}
