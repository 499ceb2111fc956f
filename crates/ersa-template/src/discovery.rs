use std::path::{Path, PathBuf};

/// File names probed, in order, when no template path is given.
pub const TEMPLATE_NAMES: [&str; 4] = [
    "template.xml",
    "Template.xml",
    "TEMPLATE.xml",
    "ersa_template.xml",
];

/// Finds a template in `dir` by its conventional file name.
pub fn discover_template(dir: &Path) -> Option<PathBuf> {
    TEMPLATE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}
