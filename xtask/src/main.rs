//! Build tasks: man pages and shell completions for `lexometer`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for lexometer")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages (one per subcommand)
    Man {
        /// Output directory
        #[arg(long, default_value = "target/dist/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/dist/completions")]
        out_dir: PathBuf,
    },
    /// Generate man pages and completions under one directory
    Dist {
        /// Output directory
        #[arg(long, default_value = "target/dist")]
        out_dir: PathBuf,
    },
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => man(&out_dir),
        Task::Completions { out_dir } => completions(&out_dir),
        Task::Dist { out_dir } => {
            man(&out_dir.join("man"))?;
            completions(&out_dir.join("completions"))
        }
    }
}

fn man(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let cmd = lexometer::command();
    clap_mangen::generate_to(cmd, out_dir)?;
    println!("man pages written to {}", out_dir.display());
    Ok(())
}

fn completions(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    for shell in [
        Shell::Bash,
        Shell::Zsh,
        Shell::Fish,
        Shell::PowerShell,
        Shell::Elvish,
    ] {
        let mut cmd = lexometer::command();
        let path = clap_complete::generate_to(shell, &mut cmd, "lexometer", out_dir)?;
        println!("{shell} completions written to {}", path.display());
    }
    Ok(())
}
