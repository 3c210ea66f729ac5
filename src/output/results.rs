//! Plain-text rendering of crawl results
//!
//! One line per fetched identifier, `"<identifier> <content>\n"`, in the
//! order given (the crawl report is already sorted).

use std::io::{self, Write};

/// Header printed before the result lines
pub const RESULTS_HEADER: &str = "Found the following URLs:";

/// Formats result pairs, one `"<identifier> <content>"` line each
pub fn format_results(results: &[(String, String)]) -> String {
    results
        .iter()
        .map(|(id, content)| format!("{} {}\n", id, content))
        .collect()
}

/// Writes the header followed by the result lines
pub fn write_results<W: Write>(out: &mut W, results: &[(String, String)]) -> io::Result<()> {
    writeln!(out, "{}", RESULTS_HEADER)?;
    out.write_all(format_results(results).as_bytes())?;
    out.flush()
}
