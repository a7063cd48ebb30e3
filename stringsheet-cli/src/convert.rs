use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::Path,
};

use stringsheet::{ImportSummary, Languages, Workspace, import_csv};
use tracing::info;

use crate::config::CliError;

/// Export every `.strings` file under the root to one CSV sheet.
///
/// The sheet is assembled in memory first, so a parse failure leaves an existing
/// output file untouched.
pub fn run_export_command(workspace: &Workspace, output: Option<&Path>) -> Result<(), CliError> {
    let mut sheet = Vec::new();
    let summary = workspace.export_csv(&mut sheet)?;

    match output {
        Some(path) => fs::write(path, &sheet)
            .map_err(|e| stringsheet::Error::Io(e).in_file(path))?,
        None => io::Write::write_all(&mut io::stdout().lock(), &sheet)
            .map_err(stringsheet::Error::Io)?,
    }

    info!(
        files = summary.files,
        skipped = summary.skipped.len(),
        rows = summary.rows,
        conflicts = summary.merge.conflicts.len(),
        "exported sheet"
    );
    Ok(())
}

/// Import a CSV sheet, writing `.strings` files below `output_dir`.
pub fn run_import_command(
    input: Option<&Path>,
    languages: &Languages,
    output_dir: &Path,
) -> Result<(), CliError> {
    let summary: ImportSummary = match input {
        Some(path) => {
            let file = File::open(path).map_err(|e| stringsheet::Error::Io(e).in_file(path))?;
            // Write errors already name the file they concern.
            import_csv(BufReader::new(file), languages, output_dir).map_err(|e| {
                if e.is_parse_error() {
                    e.in_file(path)
                } else {
                    e
                }
            })?
        }
        None => import_csv(io::stdin().lock(), languages, output_dir)?,
    };

    info!(
        rows = summary.rows,
        files = summary.written.len(),
        output = %output_dir.display(),
        "imported sheet"
    );
    Ok(())
}
