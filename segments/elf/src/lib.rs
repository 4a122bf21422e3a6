//! ELF file parser.
//!
//! Supports 64-bit little-endian files, enough to inspect the headers,
//! sections and symbols of a linked executable.

use std::ffi::CStr;
use std::io::{self, Read, Seek, SeekFrom};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("not an ELF file")]
    BadMagic,
    #[error("unsupported ELF class {0}")]
    UnsupportedClass(u8),
    #[error("unsupported ELF data encoding {0}")]
    UnsupportedEncoding(u8),
    #[error("unexpected {what} entry size {size}")]
    EntrySize { what: &'static str, size: u64 },
    #[error("section index {0} out of range")]
    SectionIndex(usize),
    #[error("string table offset {0} out of range")]
    StringOffset(u32),
    #[error("section {0} is not a string table")]
    NotStrtab(usize),
    #[error("{size} bytes at offset {offset} lie outside the file")]
    OutOfBounds { offset: u64, size: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;

pub struct ElfFile<R> {
    reader: R,
    header: Ehdr,
    /// Length of the underlying stream. Every table read is checked against it.
    len: u64,
}

impl<R: Read + Seek> ElfFile<R> {
    pub fn open(mut reader: R) -> Result<Self> {
        let mut buffer = [0; Ehdr::SIZE];
        reader.seek(SeekFrom::Start(0))?;
        reader.read_exact(&mut buffer)?;
        let header = Ehdr::parse(&buffer)?;
        let len = reader.seek(SeekFrom::End(0))?;

        Ok(Self {
            reader,
            header,
            len,
        })
    }

    pub fn elf_type(&self) -> ElfType {
        match self.header.type_ {
            ET_EXEC => ElfType::Exec,
            ET_DYN => ElfType::Dyn,
            other => ElfType::Other(other),
        }
    }

    pub fn machine(&self) -> u16 {
        self.header.machine
    }

    pub fn entry(&self) -> u64 {
        self.header.entry
    }

    pub fn program_headers(&mut self) -> Result<Vec<Phdr>> {
        let size = table_size(self.header.phnum, Phdr::SIZE);
        self.seek_range(self.header.phoff, size)?;

        let mut buffer = [0; Phdr::SIZE];
        (0..self.header.phnum)
            .map(|_| -> Result<Phdr> {
                self.reader.read_exact(&mut buffer)?;
                Ok(Phdr::parse(&buffer))
            })
            .collect()
    }

    pub fn section_headers(&mut self) -> Result<Vec<Shdr>> {
        let size = table_size(self.header.shnum, Shdr::SIZE);
        self.seek_range(self.header.shoff, size)?;

        let mut buffer = [0; Shdr::SIZE];
        (0..self.header.shnum)
            .map(|_| -> Result<Shdr> {
                self.reader.read_exact(&mut buffer)?;
                Ok(Shdr::parse(&buffer))
            })
            .collect()
    }

    pub fn section_header(&mut self, index: usize) -> Result<Shdr> {
        if index >= usize::from(self.header.shnum) {
            return Err(Error::SectionIndex(index));
        }

        let offset = (index as u64)
            .checked_mul(Shdr::SIZE as u64)
            .and_then(|rel| rel.checked_add(self.header.shoff))
            .ok_or(Error::OutOfBounds {
                offset: self.header.shoff,
                size: Shdr::SIZE as u64,
            })?;
        self.seek_range(offset, Shdr::SIZE as u64)?;

        let mut buffer = [0; Shdr::SIZE];
        self.reader.read_exact(&mut buffer)?;
        Ok(Shdr::parse(&buffer))
    }

    pub fn read_section(&mut self, shdr: &Shdr) -> Result<Vec<u8>> {
        // NOBITS sections occupy no space in the file.
        if shdr.type_ == SHT_NOBITS {
            return Ok(Vec::new());
        }

        self.seek_range(shdr.offset, shdr.size)?;
        let size = usize::try_from(shdr.size).map_err(|_| Error::OutOfBounds {
            offset: shdr.offset,
            size: shdr.size,
        })?;
        let mut buffer = vec![0; size];
        self.reader.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Seek to `offset`, after checking that `size` bytes from there lie
    /// within the file.
    fn seek_range(&mut self, offset: u64, size: u64) -> Result<()> {
        let in_bounds = offset.checked_add(size).is_some_and(|end| end <= self.len);
        if !in_bounds {
            return Err(Error::OutOfBounds { offset, size });
        }

        self.reader.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Read the string table holding the section names.
    pub fn section_names(&mut self) -> Result<Vec<u8>> {
        let sh_strtab = self.section_header(usize::from(self.header.shstrndx))?;
        self.read_section(&sh_strtab)
    }

    /// Find the first section called `name`, along with its index.
    pub fn section_by_name(&mut self, name: &str) -> Result<Option<(usize, Shdr)>> {
        let names = self.section_names()?;
        for (idx, sh) in self.section_headers()?.into_iter().enumerate() {
            if sh.name(&names)?.to_bytes() == name.as_bytes() {
                return Ok(Some((idx, sh)));
            }
        }
        Ok(None)
    }

    pub fn sh_symtab(&mut self) -> Result<Option<Shdr>> {
        let Some(sh) = self.section_headers()?.into_iter().find(Shdr::is_symtab) else {
            return Ok(None);
        };
        if sh.entsize as usize != Sym::SIZE {
            return Err(Error::EntrySize {
                what: "symbol",
                size: sh.entsize,
            });
        }
        Ok(Some(sh))
    }

    /// Read all entries of the symbol table. Stripped files have none.
    pub fn symbols(&mut self) -> Result<Vec<Sym>> {
        let Some(sh_symtab) = self.sh_symtab()? else {
            return Ok(Vec::new());
        };

        let data = self.read_section(&sh_symtab)?;
        let symbols = data.chunks_exact(Sym::SIZE).map(Sym::parse).collect();
        Ok(symbols)
    }

    /// Read the string table holding the symbol names.
    pub fn symbol_strtab(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(sh_symtab) = self.sh_symtab()? else {
            return Ok(None);
        };
        let sh_strtab = self.section_header(sh_symtab.link as usize)?;
        if !sh_strtab.is_strtab() {
            return Err(Error::NotStrtab(sh_symtab.link as usize));
        }

        self.read_section(&sh_strtab).map(Some)
    }

    pub fn find_symbol(&mut self, name: &str) -> Result<Option<Sym>> {
        let Some(strtab) = self.symbol_strtab()? else {
            return Ok(None);
        };
        for sym in self.symbols()? {
            if sym.name(&strtab)?.to_bytes() == name.as_bytes() {
                return Ok(Some(sym));
            }
        }
        Ok(None)
    }
}

fn table_size(count: u16, entry_size: usize) -> u64 {
    u64::from(count) * entry_size as u64
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElfType {
    /// Fixed-address executable.
    Exec,
    /// Shared object, which includes position-independent executables.
    Dyn,
    Other(u16),
}

/// Little-endian field reader over a fixed-size header.
struct Fields<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Fields<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn bytes<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn skip(&mut self, n: usize) {
        self.pos += n;
    }

    fn u8(&mut self) -> u8 {
        u8::from_le_bytes(self.bytes())
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.bytes())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.bytes())
    }

    fn u64(&mut self) -> u64 {
        u64::from_le_bytes(self.bytes())
    }
}

#[derive(Clone, Debug)]
pub struct Ehdr {
    ident: [u8; 16],
    type_: u16,
    machine: u16,
    entry: u64,
    phoff: u64,
    shoff: u64,
    ehsize: u16,
    phentsize: u16,
    phnum: u16,
    shentsize: u16,
    shnum: u16,
    shstrndx: u16,
}

impl Ehdr {
    const SIZE: usize = 64;

    /// Parse the given raw data as a [`Ehdr`].
    ///
    /// Fails if the identification bytes or entry sizes don't describe a
    /// 64-bit little-endian file.
    fn parse(data: &[u8]) -> Result<Self> {
        let mut f = Fields::new(data);
        let ident = f.bytes();
        let type_ = f.u16();
        let machine = f.u16();
        f.skip(4); // e_version
        let entry = f.u64();
        let phoff = f.u64();
        let shoff = f.u64();
        f.skip(4); // e_flags
        let header = Self {
            ident,
            type_,
            machine,
            entry,
            phoff,
            shoff,
            ehsize: f.u16(),
            phentsize: f.u16(),
            phnum: f.u16(),
            shentsize: f.u16(),
            shnum: f.u16(),
            shstrndx: f.u16(),
        };

        if header.ident[..4] != *b"\x7fELF" {
            return Err(Error::BadMagic);
        }
        if header.ident[4] != ELFCLASS64 {
            return Err(Error::UnsupportedClass(header.ident[4]));
        }
        if header.ident[5] != ELFDATA2LSB {
            return Err(Error::UnsupportedEncoding(header.ident[5]));
        }

        let entry_sizes = [
            ("file header", header.ehsize, Self::SIZE, 1),
            ("program header", header.phentsize, Phdr::SIZE, header.phnum),
            ("section header", header.shentsize, Shdr::SIZE, header.shnum),
        ];
        for (what, size, expected, count) in entry_sizes {
            if count > 0 && usize::from(size) != expected {
                return Err(Error::EntrySize {
                    what,
                    size: size.into(),
                });
            }
        }

        Ok(header)
    }
}

const ELFCLASS64: u8 = 2;
const ELFDATA2LSB: u8 = 1;

const ET_EXEC: u16 = 2;
const ET_DYN: u16 = 3;

#[derive(Clone, Debug)]
pub struct Phdr {
    type_: u32,
    flags: u32,
    offset: u64,
    vaddr: u64,
    filesz: u64,
    memsz: u64,
    align: u64,
}

impl Phdr {
    const SIZE: usize = 56;

    fn parse(data: &[u8]) -> Self {
        let mut f = Fields::new(data);
        let type_ = f.u32();
        let flags = f.u32();
        let offset = f.u64();
        let vaddr = f.u64();
        f.skip(8); // p_paddr
        Self {
            type_,
            flags,
            offset,
            vaddr,
            filesz: f.u64(),
            memsz: f.u64(),
            align: f.u64(),
        }
    }

    pub fn is_load(&self) -> bool {
        self.type_ == PT_LOAD
    }

    pub fn is_executable(&self) -> bool {
        self.flags & PF_X != 0
    }

    pub fn is_writable(&self) -> bool {
        self.flags & PF_W != 0
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn virtual_address(&self) -> u64 {
        self.vaddr
    }

    pub fn file_size(&self) -> u64 {
        self.filesz
    }

    pub fn memory_size(&self) -> u64 {
        self.memsz
    }

    pub fn align(&self) -> u64 {
        self.align
    }
}

const PT_LOAD: u32 = 1;

const PF_X: u32 = 0b01;
const PF_W: u32 = 0b10;

#[derive(Clone, Debug)]
pub struct Shdr {
    name: u32,
    type_: u32,
    flags: u64,
    addr: u64,
    offset: u64,
    size: u64,
    link: u32,
    addralign: u64,
    entsize: u64,
}

impl Shdr {
    const SIZE: usize = 64;

    fn parse(data: &[u8]) -> Self {
        let mut f = Fields::new(data);
        let name = f.u32();
        let type_ = f.u32();
        let flags = f.u64();
        let addr = f.u64();
        let offset = f.u64();
        let size = f.u64();
        let link = f.u32();
        f.skip(4); // sh_info
        Self {
            name,
            type_,
            flags,
            addr,
            offset,
            size,
            link,
            addralign: f.u64(),
            entsize: f.u64(),
        }
    }

    /// Extract the section's name from the section name table.
    pub fn name<'a>(&self, names: &'a [u8]) -> Result<&'a CStr> {
        lookup_str(names, self.name)
    }

    pub fn is_symtab(&self) -> bool {
        self.type_ == SHT_SYMTAB
    }

    pub fn is_strtab(&self) -> bool {
        self.type_ == SHT_STRTAB
    }

    pub fn is_executable(&self) -> bool {
        self.flags & SHF_EXECINSTR != 0
    }

    pub fn addr(&self) -> u64 {
        self.addr
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn link(&self) -> u32 {
        self.link
    }

    pub fn addralign(&self) -> u64 {
        self.addralign
    }
}

const SHT_SYMTAB: u32 = 2;
const SHT_STRTAB: u32 = 3;
const SHT_NOBITS: u32 = 8;

const SHF_EXECINSTR: u64 = 0x4;

#[derive(Clone, Debug)]
pub struct Sym {
    name: u32,
    info: u8,
    shndx: u16,
    value: u64,
    size: u64,
}

impl Sym {
    const SIZE: usize = 24;

    fn parse(data: &[u8]) -> Self {
        let mut f = Fields::new(data);
        let name = f.u32();
        let info = f.u8();
        f.skip(1); // st_other
        Self {
            name,
            info,
            shndx: f.u16(),
            value: f.u64(),
            size: f.u64(),
        }
    }

    /// Extract the symbol's name from the given `strtab`.
    pub fn name<'a>(&self, strtab: &'a [u8]) -> Result<&'a CStr> {
        lookup_str(strtab, self.name)
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn section_index(&self) -> usize {
        self.shndx.into()
    }

    pub fn is_function(&self) -> bool {
        self.info & 0xf == STT_FUNC
    }
}

const STT_FUNC: u8 = 2;

fn lookup_str(table: &[u8], offset: u32) -> Result<&CStr> {
    table
        .get(offset as usize..)
        .and_then(|rest| CStr::from_bytes_until_nul(rest).ok())
        .ok_or(Error::StringOffset(offset))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const SHSTRTAB: &[u8] = b"\0.shstrtab\0.text.correct\0.symtab\0.strtab\0";
    const STRTAB: &[u8] = b"\0correct\0";

    const SHSTRTAB_OFF: u64 = 0x100;
    const STRTAB_OFF: u64 = 0x180;
    const SYMTAB_OFF: u64 = 0x1a0;
    const TEXT_OFF: u64 = 0x200;
    const SHDRS_OFF: u64 = 0x240;

    const TEXT_ADDR: u64 = 0x11000;

    fn put(image: &mut Vec<u8>, offset: u64, bytes: &[u8]) {
        let offset = offset as usize;
        if image.len() < offset + bytes.len() {
            image.resize(offset + bytes.len(), 0);
        }
        image[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    #[allow(clippy::too_many_arguments)]
    fn shdr(
        name: u32,
        type_: u32,
        flags: u64,
        addr: u64,
        offset: u64,
        size: u64,
        link: u32,
        info: u32,
        addralign: u64,
        entsize: u64,
    ) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend(name.to_le_bytes());
        out.extend(type_.to_le_bytes());
        out.extend(flags.to_le_bytes());
        out.extend(addr.to_le_bytes());
        out.extend(offset.to_le_bytes());
        out.extend(size.to_le_bytes());
        out.extend(link.to_le_bytes());
        out.extend(info.to_le_bytes());
        out.extend(addralign.to_le_bytes());
        out.extend(entsize.to_le_bytes());
        out
    }

    /// A tiny PIE-like image: one executable load segment whose virtual
    /// address is shifted from its file offset, and a page-aligned
    /// `.text.correct` section with a `correct` symbol at its start.
    fn image() -> Vec<u8> {
        let mut image = Vec::new();

        let mut ehdr = Vec::new();
        ehdr.extend(b"\x7fELF");
        ehdr.extend([ELFCLASS64, ELFDATA2LSB, 1]);
        ehdr.extend([0; 9]);
        ehdr.extend(ET_DYN.to_le_bytes());
        ehdr.extend(62u16.to_le_bytes());
        ehdr.extend(1u32.to_le_bytes());
        ehdr.extend(TEXT_ADDR.to_le_bytes());
        ehdr.extend(64u64.to_le_bytes());
        ehdr.extend(SHDRS_OFF.to_le_bytes());
        ehdr.extend(0u32.to_le_bytes());
        for half in [64u16, 56, 1, 64, 5, 1] {
            ehdr.extend(half.to_le_bytes());
        }
        assert_eq!(ehdr.len(), Ehdr::SIZE);
        put(&mut image, 0, &ehdr);

        let mut phdr = Vec::new();
        phdr.extend(PT_LOAD.to_le_bytes());
        phdr.extend((PF_X | 0b100).to_le_bytes());
        phdr.extend(TEXT_OFF.to_le_bytes());
        phdr.extend(TEXT_ADDR.to_le_bytes());
        phdr.extend(TEXT_ADDR.to_le_bytes());
        phdr.extend(16u64.to_le_bytes());
        phdr.extend(16u64.to_le_bytes());
        phdr.extend(0x1000u64.to_le_bytes());
        assert_eq!(phdr.len(), Phdr::SIZE);
        put(&mut image, 64, &phdr);

        put(&mut image, SHSTRTAB_OFF, SHSTRTAB);
        put(&mut image, STRTAB_OFF, STRTAB);

        let mut sym = vec![0; Sym::SIZE];
        sym.extend(1u32.to_le_bytes());
        sym.push(0x10 | STT_FUNC);
        sym.push(0);
        sym.extend(2u16.to_le_bytes());
        sym.extend(TEXT_ADDR.to_le_bytes());
        sym.extend(16u64.to_le_bytes());
        put(&mut image, SYMTAB_OFF, &sym);

        put(&mut image, TEXT_OFF, &[0xc3; 16]);

        let shdrs = [
            vec![0; Shdr::SIZE],
            shdr(1, SHT_STRTAB, 0, 0, SHSTRTAB_OFF, SHSTRTAB.len() as u64, 0, 0, 1, 0),
            shdr(11, 1, 0x2 | SHF_EXECINSTR, TEXT_ADDR, TEXT_OFF, 16, 0, 0, 0x1000, 0),
            shdr(25, SHT_SYMTAB, 0, 0, SYMTAB_OFF, 2 * Sym::SIZE as u64, 4, 1, 8, Sym::SIZE as u64),
            shdr(33, SHT_STRTAB, 0, 0, STRTAB_OFF, STRTAB.len() as u64, 0, 0, 1, 0),
        ];
        put(&mut image, SHDRS_OFF, &shdrs.concat());

        image
    }

    fn open(image: Vec<u8>) -> ElfFile<Cursor<Vec<u8>>> {
        ElfFile::open(Cursor::new(image)).unwrap()
    }

    #[test]
    fn reads_file_header() {
        let elf = open(image());
        assert_eq!(elf.elf_type(), ElfType::Dyn);
        assert_eq!(elf.machine(), 62);
        assert_eq!(elf.entry(), TEXT_ADDR);
    }

    #[test]
    fn reads_program_headers() {
        let mut elf = open(image());
        let phdrs = elf.program_headers().unwrap();
        assert_eq!(phdrs.len(), 1);

        let ph = &phdrs[0];
        assert!(ph.is_load());
        assert!(ph.is_executable());
        assert!(!ph.is_writable());
        assert_eq!(ph.offset(), TEXT_OFF);
        assert_eq!(ph.virtual_address(), TEXT_ADDR);
        assert_eq!(ph.align(), 0x1000);
    }

    #[test]
    fn finds_sections_by_name() {
        let mut elf = open(image());
        assert_eq!(elf.section_headers().unwrap().len(), 5);

        let (idx, sh) = elf.section_by_name(".text.correct").unwrap().unwrap();
        assert_eq!(idx, 2);
        assert!(sh.is_executable());
        assert_eq!(sh.addr(), TEXT_ADDR);
        assert_eq!(sh.addralign(), 0x1000);
        assert_eq!(elf.read_section(&sh).unwrap(), [0xc3; 16]);

        assert!(elf.section_by_name(".text").unwrap().is_none());
    }

    #[test]
    fn finds_symbols_by_name() {
        let mut elf = open(image());
        assert_eq!(elf.symbols().unwrap().len(), 2);

        let sym = elf.find_symbol("correct").unwrap().unwrap();
        assert!(sym.is_function());
        assert_eq!(sym.value(), TEXT_ADDR);
        assert_eq!(sym.size(), 16);
        assert_eq!(sym.section_index(), 2);

        assert!(elf.find_symbol("main").unwrap().is_none());
    }

    #[test]
    fn stripped_file_has_no_symbols() {
        let mut image = image();
        // Turn `.symtab` into an unremarkable PROGBITS section.
        let type_off = (SHDRS_OFF as usize) + 3 * Shdr::SIZE + 4;
        image[type_off..type_off + 4].copy_from_slice(&1u32.to_le_bytes());

        let mut elf = open(image);
        assert!(elf.symbols().unwrap().is_empty());
        assert!(elf.symbol_strtab().unwrap().is_none());
        assert!(elf.find_symbol("correct").unwrap().is_none());
    }

    #[test]
    fn rejects_short_rubbish() {
        let data = b"6492gbiajng295akgjowj210441".to_vec();
        let err = ElfFile::open(Cursor::new(data)).err().unwrap();
        assert!(matches!(err, Error::Io(_)), "{err}");
    }

    #[test]
    fn rejects_bad_magic() {
        let mut image = image();
        image[..4].copy_from_slice(b"PERF");
        let err = ElfFile::open(Cursor::new(image)).err().unwrap();
        assert!(matches!(err, Error::BadMagic), "{err}");
    }

    #[test]
    fn rejects_32_bit_and_big_endian() {
        let mut image = image();
        image[4] = 1;
        let err = ElfFile::open(Cursor::new(image)).err().unwrap();
        assert!(matches!(err, Error::UnsupportedClass(1)), "{err}");

        let mut image = self::image();
        image[5] = 2;
        let err = ElfFile::open(Cursor::new(image)).err().unwrap();
        assert!(matches!(err, Error::UnsupportedEncoding(2)), "{err}");
    }

    #[test]
    fn rejects_bad_string_offsets() {
        let mut image = image();
        // Point `correct`'s name past the end of `.strtab`.
        let name_off = (SYMTAB_OFF as usize) + Sym::SIZE;
        image[name_off..name_off + 4].copy_from_slice(&100u32.to_le_bytes());

        let mut elf = open(image);
        let err = elf.find_symbol("correct").err().unwrap();
        assert!(matches!(err, Error::StringOffset(100)), "{err}");
    }

    #[test]
    fn rejects_section_larger_than_file() {
        let mut image = image();
        // Claim `.shstrtab` is u64::MAX bytes long.
        let size_off = (SHDRS_OFF as usize) + Shdr::SIZE + 32;
        image[size_off..size_off + 8].copy_from_slice(&u64::MAX.to_le_bytes());

        let mut elf = open(image);
        let err = elf.section_by_name(".text.correct").err().unwrap();
        assert!(
            matches!(err, Error::OutOfBounds { offset: SHSTRTAB_OFF, size: u64::MAX }),
            "{err}"
        );
    }

    #[test]
    fn rejects_section_headers_past_end_of_address_space() {
        let mut image = image();
        image[40..48].copy_from_slice(&(u64::MAX - 10).to_le_bytes());

        let mut elf = open(image);
        let err = elf.section_header(1).err().unwrap();
        assert!(matches!(err, Error::OutOfBounds { .. }), "{err}");
        let err = elf.section_headers().err().unwrap();
        assert!(matches!(err, Error::OutOfBounds { .. }), "{err}");
        let err = elf.find_symbol("correct").err().unwrap();
        assert!(matches!(err, Error::OutOfBounds { .. }), "{err}");
    }

    #[test]
    fn rejects_symbol_names_from_a_non_string_table() {
        let mut image = image();
        // Link `.symtab` to `.text.correct` instead of `.strtab`.
        let link_off = (SHDRS_OFF as usize) + 3 * Shdr::SIZE + 40;
        image[link_off..link_off + 4].copy_from_slice(&2u32.to_le_bytes());

        let mut elf = open(image);
        let err = elf.symbol_strtab().err().unwrap();
        assert!(matches!(err, Error::NotStrtab(2)), "{err}");
    }

    #[test]
    fn rejects_out_of_range_section_index() {
        let mut elf = open(image());
        let err = elf.section_header(5).err().unwrap();
        assert!(matches!(err, Error::SectionIndex(5)), "{err}");
    }
}
