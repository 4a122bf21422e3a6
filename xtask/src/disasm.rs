//! Scanning `objdump -d` output for references to a function.

/// Where a function shows up in a disassembly listing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CallSites {
    /// The function has a label of its own.
    pub defined: bool,
    /// Other functions with an instruction targeting it, in listing order.
    pub callers: Vec<String>,
}

/// Find the functions in `disassembly` that call or jump to `symbol`.
///
/// Branches within `symbol` itself show up as `<symbol+0x..>` and are not
/// counted, and neither are references to other symbols sharing the prefix
/// (`<symbol@plt>`).
pub fn call_sites(disassembly: &str, symbol: &str) -> CallSites {
    let target = format!("<{symbol}>");
    let mut sites = CallSites::default();
    let mut current = None;

    for line in disassembly.lines() {
        if let Some(name) = function_label(line) {
            sites.defined |= name == symbol;
            current = Some(name);
            continue;
        }

        let Some(function) = current else {
            continue;
        };
        if function != symbol
            && line.contains(&target)
            && !sites.callers.iter().any(|c| c == function)
        {
            sites.callers.push(function.to_string());
        }
    }

    sites
}

/// Parse a label line like `0000000000001000 <correct>:`.
fn function_label(line: &str) -> Option<&str> {
    let (addr, rest) = line.split_once(' ')?;
    if addr.is_empty() || !addr.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    rest.strip_prefix('<')?.strip_suffix(">:")
}
