use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for famicore")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Quick checks before commit (fmt, clippy)
    Check {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        #[arg(long)]
        doc: bool,
        /// Run only CPU module tests
        #[arg(long)]
        cpu: bool,
        /// Run only PPU module tests
        #[arg(long)]
        ppu: bool,
        /// Run only bus/memory module tests
        #[arg(long)]
        bus: bool,
    },
    /// Run benchmarks
    Bench,
    /// Boot a ROM for a bounded number of frames
    RomTest {
        /// Path to ROM file
        rom_path: String,
        /// Number of frames to run (defaults to 600, ~10 seconds)
        #[arg(short = 'f', long, default_value = "600")]
        frames: u64,
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Pre-commit hook (fmt, clippy, test)
    PreCommit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Check { verbose } => run_check(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test { doc, cpu, ppu, bus } => run_test(doc, cpu, ppu, bus),
        Commands::Bench => run_bench(),
        Commands::RomTest {
            rom_path,
            frames,
            release,
        } => run_rom_test(&rom_path, frames, release),
        Commands::PreCommit => run_pre_commit(),
    }
}

fn run_ci(verbose: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());
    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    run_task("Build", || run_build(false), verbose)?;
    run_task("Test", || run_test(false, false, false, false), verbose)?;

    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_check(verbose: bool) -> Result<()> {
    println!("{}", "=== Running Quick Checks ===".bold().blue());
    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;

    println!(
        "\n{} {}",
        "✓ Checks passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("fmt").arg("--all");
    if check {
        cmd.arg("--").arg("--check");
    }
    execute_command(&mut cmd)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("clippy").arg("--all-targets");
    if fix {
        cmd.arg("--fix");
    } else {
        cmd.arg("--").arg("-D").arg("warnings");
    }
    execute_command(&mut cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("build");
    if release {
        cmd.arg("--release");
    }
    execute_command(&mut cmd)
}

fn run_test(doc: bool, cpu: bool, ppu: bool, bus: bool) -> Result<()> {
    if doc {
        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--doc");
        return execute_command(&mut cmd);
    }

    let modules = [(cpu, "cpu", "CPU"), (ppu, "ppu", "PPU"), (bus, "bus", "Bus")];
    let selected = modules.iter().filter(|(enabled, _, _)| *enabled).count();

    if selected == 0 {
        let mut cmd = Command::new("cargo");
        cmd.arg("test");
        return execute_command(&mut cmd);
    }

    let mut all_success = true;
    for (enabled, module_path, module_name) in modules {
        if !enabled {
            continue;
        }
        println!("{} Running {} tests...", "→".blue(), module_name.bold());

        let mut cmd = Command::new("cargo");
        cmd.arg("test").arg("--lib").arg(module_path);

        match execute_command(&mut cmd) {
            Ok(_) => println!("{} {} tests passed\n", "✓".green(), module_name),
            Err(e) => {
                println!("{} {} tests failed\n", "✗".red(), module_name);
                all_success = false;
                if selected == 1 {
                    return Err(e);
                }
            }
        }
    }

    if all_success {
        Ok(())
    } else {
        anyhow::bail!("Some module tests failed")
    }
}

fn run_bench() -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("bench");
    execute_command(&mut cmd)
}

fn run_rom_test(rom_path: &str, frames: u64, release: bool) -> Result<()> {
    use std::path::Path;

    println!("{}", "=== ROM Test ===".bold().blue());

    if !Path::new(rom_path).exists() {
        println!(
            "{} ROM file not found: {}",
            "✗".red().bold(),
            rom_path.yellow()
        );
        anyhow::bail!("ROM file not found");
    }
    if !rom_path.to_lowercase().ends_with(".nes") {
        println!("{} File does not have .nes extension", "⚠".yellow().bold());
    }

    println!("{} ROM file: {}", "✓".green(), rom_path.cyan());
    println!("{} Frames: {}", "→".blue(), frames.to_string().bold());

    if release {
        println!("{} Building in release mode...", "→".blue());
        run_build(true)?;
    }

    let start = Instant::now();
    let mut cmd = Command::new("cargo");
    cmd.arg("run");
    if release {
        cmd.arg("--release");
    }
    cmd.arg("--")
        .arg(rom_path)
        .arg("--frames")
        .arg(frames.to_string());

    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;
    if !status.success() {
        anyhow::bail!("ROM test failed with exit code: {}", status);
    }

    println!(
        "\n{} ROM test completed in {}",
        "✓".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_pre_commit() -> Result<()> {
    println!("{}", "=== Pre-commit Checks ===".bold().blue());
    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), false)?;
    run_task("Clippy", || run_clippy(false), false)?;
    run_task("Test", || run_test(false, false, false, false), false)?;

    println!(
        "\n{} {}",
        "✓ Pre-commit checks passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);
    let start = Instant::now();

    match task() {
        Ok(_) => {
            println!(
                "{} {}",
                "✓".green().bold(),
                if verbose {
                    format!("({:.2}s)", start.elapsed().as_secs_f64())
                } else {
                    String::new()
                }
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn execute_command(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;
    if !status.success() {
        anyhow::bail!("Command failed with exit code: {}", status);
    }
    Ok(())
}
