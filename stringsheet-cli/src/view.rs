use std::io;

use stringsheet::Workspace;
use tracing::info;

use crate::config::CliError;

/// Print the path of every `.strings` file under the root.
pub fn run_list_command(workspace: &Workspace) -> Result<(), CliError> {
    let count = workspace.list_files(io::stdout().lock())?;
    info!(files = count, "listed .strings files");
    Ok(())
}

/// Print every decoded entry, one field per line, a blank line after each file.
pub fn run_print_command(workspace: &Workspace) -> Result<(), CliError> {
    let count = workspace.print_entries(io::stdout().lock())?;
    info!(entries = count, "printed entries");
    Ok(())
}
