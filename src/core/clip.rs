use crate::utils::error::{AssessmentError, Result};
use std::path::Path;

/// Clip number encoded at the end of a clip file name, e.g. `foo-fundamentals-m2-07.xmp` -> 7.
///
/// Directory components and the last extension are ignored. Dots inside the course id
/// are kept, and a leftover `.mp4` is dropped so `foo-m1-3.mp4.xmp` also yields 3.
pub fn clip_number_from_file_name(name: &str) -> Result<u32> {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let stem = stem.strip_suffix(".mp4").unwrap_or(stem);
    let segment = stem.rsplit('-').next().unwrap_or_default();

    segment
        .trim()
        .parse::<u32>()
        .map_err(|_| AssessmentError::InvalidClipName {
            name: name.to_string(),
        })
}

/// Video file name a question points back to, e.g. `foo-fundamentals-m1-1.mp4`.
pub fn clip_file_name(course_id: &str, module_number: u32, clip_number: u32) -> String {
    format!("{}-m{}-{}.mp4", course_id, module_number, clip_number)
}
