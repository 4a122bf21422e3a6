//! Binary layouts the fixture is built in, and the checks each must pass.

use std::fmt;
use std::io::{Read, Seek};
use std::str::FromStr;

use elf::{ElfFile, ElfType};

/// Section that must hold [`SYMBOL`] and nothing in front of it.
pub const SECTION: &str = ".text.correct";
/// The counter-loop function profilers look for.
pub const SYMBOL: &str = "correct";

const PAGE_SIZE: u64 = 0x1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Position-independent executable.
    Dyn,
    /// Traditional fixed-address executable.
    Exec,
    /// Position-independent executable whose segments are not loaded at their
    /// file offsets.
    Shifted,
}

impl Layout {
    pub const ALL: [Self; 3] = [Self::Dyn, Self::Exec, Self::Shifted];

    /// Flags for the `cargo build` producing this layout. Always set, so flags
    /// from the environment can't leak into the build.
    pub fn rustflags(self) -> &'static str {
        match self {
            Self::Dyn => "",
            Self::Exec => "-C relocation-model=static",
            // Moves the image base, and with it every segment's address, away from the file
            // offsets. rust-lld only knows the flag by this name.
            Self::Shifted => "-C link-arg=-Wl,--image-base=0x10000",
        }
    }

    fn elf_type(self) -> ElfType {
        match self {
            Self::Exec => ElfType::Exec,
            Self::Dyn | Self::Shifted => ElfType::Dyn,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dyn => "dyn",
            Self::Exec => "exec",
            Self::Shifted => "shifted",
        };
        f.write_str(name)
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dyn" => Ok(Self::Dyn),
            "exec" => Ok(Self::Exec),
            "shifted" => Ok(Self::Shifted),
            _ => Err(format!("unknown layout `{s}` (expected dyn, exec or shifted)")),
        }
    }
}

/// What a built fixture looks like, as far as the layout checks care.
#[derive(Debug)]
pub struct Report {
    pub elf_type: ElfType,
    pub section: Option<SectionInfo>,
    pub symbol: Option<SymbolInfo>,
    /// Whether some executable load segment has a virtual address different
    /// from its file offset.
    pub shifted: bool,
}

#[derive(Debug)]
pub struct SectionInfo {
    pub index: usize,
    pub addr: u64,
    pub align: u64,
    pub executable: bool,
}

#[derive(Debug)]
pub struct SymbolInfo {
    pub value: u64,
    pub size: u64,
    pub section_index: usize,
    pub function: bool,
}

pub fn inspect<R: Read + Seek>(elf: &mut ElfFile<R>) -> elf::Result<Report> {
    let section = elf.section_by_name(SECTION)?.map(|(index, sh)| SectionInfo {
        index,
        addr: sh.addr(),
        align: sh.addralign(),
        executable: sh.is_executable(),
    });

    let symbol = elf.find_symbol(SYMBOL)?.map(|sym| SymbolInfo {
        value: sym.value(),
        size: sym.size(),
        section_index: sym.section_index(),
        function: sym.is_function(),
    });

    let shifted = elf
        .program_headers()?
        .iter()
        .any(|ph| ph.is_load() && ph.is_executable() && ph.virtual_address() != ph.offset());

    Ok(Report {
        elf_type: elf.elf_type(),
        section,
        symbol,
        shifted,
    })
}

impl Report {
    /// Describe every way this report breaks the contract of `layout`.
    pub fn violations(&self, layout: Layout) -> Vec<String> {
        let mut problems = Vec::new();

        let expected_type = layout.elf_type();
        if self.elf_type != expected_type {
            problems.push(format!(
                "expected an {expected_type:?} file, found {:?}",
                self.elf_type
            ));
        }

        match &self.section {
            None => problems.push(format!("no `{SECTION}` section")),
            Some(section) => {
                if !section.executable {
                    problems.push(format!("`{SECTION}` is not executable"));
                }
                if section.align < PAGE_SIZE {
                    problems.push(format!(
                        "`{SECTION}` is aligned to {:#x}, expected at least {PAGE_SIZE:#x}",
                        section.align
                    ));
                }
                if section.addr % PAGE_SIZE != 0 {
                    problems.push(format!(
                        "`{SECTION}` starts at {:#x}, which is not page-aligned",
                        section.addr
                    ));
                }
            }
        }

        match &self.symbol {
            None => problems.push(format!("no `{SYMBOL}` symbol")),
            Some(symbol) => {
                if !symbol.function {
                    problems.push(format!("`{SYMBOL}` is not a function"));
                }
                if symbol.size == 0 {
                    problems.push(format!("`{SYMBOL}` has size 0"));
                }
                if symbol.value % PAGE_SIZE != 0 {
                    problems.push(format!(
                        "`{SYMBOL}` starts at {:#x}, which is not page-aligned",
                        symbol.value
                    ));
                }
                if let Some(section) = &self.section {
                    if symbol.section_index != section.index {
                        problems.push(format!("`{SYMBOL}` is not defined in `{SECTION}`"));
                    }
                }
            }
        }

        if layout == Layout::Shifted && !self.shifted {
            problems.push("no executable load segment is shifted from its file offset".into());
        }

        problems
    }
}
