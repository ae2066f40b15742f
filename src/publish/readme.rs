//! README card section replacement
//!
//! The profile README carries a marked section that the publisher rewrites
//! with an image reference to the committed card. Content outside the
//! markers is never touched.

use std::path::{Path, PathBuf};

use crate::error::{Gl1tchError, Result};

pub const START_MARKER: &str = "<!--START_SECTION:gl1tch-card-->";
pub const END_MARKER: &str = "<!--END_SECTION:gl1tch-card-->";

/// Markdown image reference written between the markers
pub const CARD_IMAGE_MD: &str = "![gl1tch card](assets/gl1tch-card.svg)";

/// README file names probed in the clone root, in order
const README_CANDIDATES: &[&str] = &["README.md", "README", "readme.md", "Readme.md"];

/// Locate the README in a cloned working tree
pub fn find_readme(root: &Path) -> Result<PathBuf> {
    for candidate in README_CANDIDATES {
        let path = root.join(candidate);
        if path.is_file() {
            return Ok(path);
        }
    }
    Err(Gl1tchError::MarkerSectionMissing {
        path: root.join("README.md").display().to_string(),
    })
}

/// Replace the marker section with the card image reference
///
/// The section is rewritten in canonical form (marker, image, marker on
/// separate lines), so applying the replacement twice yields the same bytes.
/// Both markers must be present.
pub fn replace_card_section(readme: &str, readme_path: &str) -> Result<String> {
    let Some(start) = readme.find(START_MARKER) else {
        return Err(Gl1tchError::MarkerSectionMissing {
            path: readme_path.to_string(),
        });
    };
    let after_start = start + START_MARKER.len();
    let Some(end_offset) = readme[after_start..].find(END_MARKER) else {
        return Err(Gl1tchError::MarkerSectionMissing {
            path: readme_path.to_string(),
        });
    };
    let end = after_start + end_offset + END_MARKER.len();

    let mut out = String::with_capacity(readme.len() + CARD_IMAGE_MD.len());
    out.push_str(&readme[..start]);
    out.push_str(START_MARKER);
    out.push('\n');
    out.push_str(CARD_IMAGE_MD);
    out.push('\n');
    out.push_str(END_MARKER);
    out.push_str(&readme[end..]);
    Ok(out)
}
