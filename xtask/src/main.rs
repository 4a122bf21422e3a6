mod disasm;
mod layout;

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context};
use elf::ElfFile;

use crate::layout::{Layout, SYMBOL};

/// xtask runner for the segments repo.
#[derive(argh::FromArgs)]
struct Args {
    #[argh(subcommand)]
    task: TaskArgs,
}

#[derive(argh::FromArgs)]
#[argh(subcommand)]
enum TaskArgs {
    Build(BuildArgs),
    Verify(VerifyArgs),
}

/// Build the segments fixture.
#[derive(argh::FromArgs)]
#[argh(subcommand, name = "build")]
struct BuildArgs {
    /// build in release mode
    #[argh(switch)]
    release: bool,
    /// binary layout: dyn, exec or shifted (default: dyn)
    #[argh(option, default = "Layout::Dyn")]
    layout: Layout,
}

/// Build the segments fixture and check its binary layout.
#[derive(argh::FromArgs)]
#[argh(subcommand, name = "verify")]
struct VerifyArgs {
    /// build in release mode
    #[argh(switch)]
    release: bool,
    /// layout to check, may be repeated (default: all of them)
    #[argh(option)]
    layout: Vec<Layout>,
    /// objdump used to disassemble the fixture
    #[argh(option, default = "String::from(\"objdump\")")]
    objdump: String,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    let repo_root = get_repo_root();
    env::set_current_dir(repo_root)?;

    match args.task {
        TaskArgs::Build(args) => task_build(args.layout, args.release),
        TaskArgs::Verify(args) => task_verify(&args.layout, args.release, &args.objdump),
    }
}

fn task_build(layout: Layout, release: bool) -> anyhow::Result<()> {
    println!("building segments (layout={layout}, release={release})");
    let bin = build_fixture(layout, release)?;
    println!("built {}", bin.display());

    Ok(())
}

fn task_verify(layouts: &[Layout], release: bool, objdump: &str) -> anyhow::Result<()> {
    let layouts = if layouts.is_empty() {
        &Layout::ALL[..]
    } else {
        layouts
    };

    let mut failed = Vec::new();
    for &layout in layouts {
        println!("building segments (layout={layout}, release={release})");
        let bin = build_fixture(layout, release)?;

        println!("checking {} (layout={layout})", bin.display());
        let problems = check_fixture(&bin, layout, objdump)?;
        if problems.is_empty() {
            println!("layout {layout} ok");
        } else {
            for problem in &problems {
                println!("  FAIL: {problem}");
            }
            failed.push(layout.to_string());
        }
    }

    if !failed.is_empty() {
        bail!("layout checks failed (layouts={})", failed.join(", "));
    }

    Ok(())
}

/// Run every layout check against the binary at `bin`, returning the failures.
fn check_fixture(bin: &Path, layout: Layout, objdump: &str) -> anyhow::Result<Vec<String>> {
    let file = File::open(bin).with_context(|| format!("open {}", bin.display()))?;
    let mut elf = ElfFile::open(BufReader::new(file)).context("read ELF header")?;
    let report = layout::inspect(&mut elf).context("inspect ELF file")?;
    let mut problems = report.violations(layout);

    if let Some(symbol) = &report.symbol {
        println!("  `{SYMBOL}` at {:#x} (size={})", symbol.value, symbol.size);
    }

    let disassembly = disassemble(bin, objdump)?;
    let sites = disasm::call_sites(&disassembly, SYMBOL);
    if !sites.defined {
        problems.push(format!("`{SYMBOL}` is missing from the disassembly"));
    } else if sites.callers.is_empty() {
        problems.push(format!("nothing calls `{SYMBOL}`, it was probably inlined"));
    } else {
        println!("  `{SYMBOL}` called from {}", sites.callers.join(", "));
    }

    for count in ["5", "0"] {
        let status = Command::new(bin)
            .arg(count)
            .status()
            .with_context(|| format!("run {}", bin.display()))?;
        if !status.success() {
            problems.push(format!("`segments {count}` failed ({status})"));
        }
    }

    Ok(problems)
}

fn disassemble(bin: &Path, objdump: &str) -> anyhow::Result<String> {
    let output = Command::new(objdump)
        .args(["-d", "--no-show-raw-insn"])
        .arg(bin)
        .output()
        .context("objdump")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("objdump failed: {}", stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn get_repo_root() -> PathBuf {
    let xtask_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    xtask_dir.parent().unwrap_or(xtask_dir).to_path_buf()
}

fn target_dir() -> PathBuf {
    PathBuf::from("target")
}

/// Build the fixture for `layout`. Each layout gets its own target directory,
/// so switching between them doesn't rebuild everything.
fn build_fixture(layout: Layout, release: bool) -> anyhow::Result<PathBuf> {
    let layout_dir = target_dir().join(format!("segments-{layout}"));

    let mut cmd = Command::new("cargo");
    cmd.args(["build", "--package", "segments", "--bin", "segments"])
        .arg("--target-dir")
        .arg(&layout_dir)
        .env("RUSTFLAGS", layout.rustflags())
        .env_remove("CARGO_ENCODED_RUSTFLAGS");

    if release {
        cmd.arg("--release");
    }

    let status = cmd.status().context("cargo build")?;
    if !status.success() {
        bail!("segments build failed (layout={layout})");
    }

    let profile = if release { "release" } else { "debug" };
    let mut bin_path = layout_dir;
    bin_path.extend([profile, "segments"]);

    Ok(bin_path)
}
