//! Section slicing between literal boundary markers

use crate::types::{BillError, BillResult};

/// Return the lines strictly between the first line matching `start_marker`
/// and the first following line matching `end_marker`.
///
/// Marker lines are compared after trimming, both markers are exclusive,
/// and the end marker is only searched for after the start. A missing
/// marker means the text is not a recognized statement page and fails with
/// [`BillError::SectionNotFound`]; nothing downstream should run in that
/// case.
pub fn slice_section(
    text: &str,
    start_marker: &str,
    end_marker: &str,
) -> BillResult<Vec<String>> {
    let lines: Vec<&str> = text.lines().collect();

    let start = lines
        .iter()
        .position(|line| line.trim() == start_marker)
        .ok_or_else(|| BillError::SectionNotFound(start_marker.to_string()))?;

    let end = lines[start + 1..]
        .iter()
        .position(|line| line.trim() == end_marker)
        .map(|offset| start + 1 + offset)
        .ok_or_else(|| BillError::SectionNotFound(end_marker.to_string()))?;

    tracing::debug!(start, end, "sliced statement section");

    Ok(lines[start + 1..end]
        .iter()
        .map(|line| line.to_string())
        .collect())
}

/// Extract the issue date as printed: the first three whitespace-delimited
/// fields of the region between `header_marker` and `end_marker`, joined
/// with single spaces.
pub fn extract_issue_date(
    text: &str,
    header_marker: &str,
    end_marker: &str,
) -> BillResult<String> {
    let region = slice_section(text, header_marker, end_marker)?;
    let joined = region.join(" ");

    let fields: Vec<&str> = joined.split_whitespace().take(3).collect();
    if fields.len() < 3 {
        return Err(BillError::MalformedRow(format!(
            "expected an issue date after \"{}\", found \"{}\"",
            header_marker,
            joined.trim()
        )));
    }

    Ok(fields.join(" "))
}
