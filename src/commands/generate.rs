//! `generate` subcommand: shell completions and man pages for `jp`.
use anyhow::{Context, Result};
use clap_complete::Shell;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write completions for `shell` to `writer`.
pub fn generate_completions<W: Write>(
    shell: Shell,
    cmd: &mut clap::Command,
    writer: &mut W,
) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, writer);
}

/// Write man pages for `cmd` and, recursively, each of its subcommands into
/// `output_dir` (default: the current directory). Returns the written paths.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the output directory or a page could not be
/// created.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };

    std::fs::create_dir_all(&output_dir)
        .context("create output Man directories")?;

    let mut written = vec![];
    let main_path = output_dir.join(format!("{}.1", cmd.get_name()));
    clap_mangen::Man::new(cmd.clone())
        .render(&mut create_page(&main_path)?)
        .with_context(|| format!("render {}", main_path.display()))?;
    written.push(main_path);

    generate_subcommand_man_pages(
        cmd,
        &output_dir,
        cmd.get_name(),
        &mut written,
    )?;

    Ok(written)
}

fn create_page(path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))
}

/// Generate subcommand Man pages recursively, named `<prefix>-<sub>.1`.
fn generate_subcommand_man_pages(
    cmd: &clap::Command,
    output_dir: &Path,
    prefix: &str,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    for subcmd in cmd.get_subcommands() {
        let prefixed_name = format!("{prefix}-{}", subcmd.get_name());

        // clap_mangen takes the page title from the command name, which must
        // be `'static`; leaking is fine for one-shot page generation.
        let leaked_name: &'static str =
            Box::leak(prefixed_name.clone().into_boxed_str());
        let renamed = subcmd
            .clone()
            .name(leaked_name)
            .disable_help_subcommand(true);

        let man_path = output_dir.join(format!("{prefixed_name}.1"));
        clap_mangen::Man::new(renamed)
            .render(&mut create_page(&man_path)?)
            .with_context(|| format!("render {}", man_path.display()))?;
        written.push(man_path);

        if subcmd.has_subcommands() {
            generate_subcommand_man_pages(
                subcmd,
                output_dir,
                &prefixed_name,
                written,
            )?;
        }
    }

    Ok(())
}
