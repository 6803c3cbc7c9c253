//! Simulator configuration.
//!
//! Word width and the enabled extension set are fixed for the lifetime of one
//! simulator instance; they are passed explicitly at construction rather than
//! held as ambient global state.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Default values applied when a field is omitted from a deserialized config.
mod defaults {
    /// Initial stack pointer handed to loaded images (64 MiB).
    pub const STACK_ADDR: u64 = 64 * 1024 * 1024;
}

/// Native integer register width of the simulated machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Xlen {
    /// 32-bit registers and address space.
    Rv32,
    /// 64-bit registers and address space.
    Rv64,
}

impl Xlen {
    /// Mask applied to effective addresses and the PC for this width.
    #[inline(always)]
    pub const fn addr_mask(self) -> u64 {
        match self {
            Self::Rv32 => 0xFFFF_FFFF,
            Self::Rv64 => u64::MAX,
        }
    }

    /// Register width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Rv32 => 32,
            Self::Rv64 => 64,
        }
    }
}

/// The set of enabled ISA extensions.
///
/// The base integer ISA (I) is always enabled. Enabling D implies F, and
/// enabling Zfh implies F, mirroring the dependency rules of the ISA manual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtensionSet {
    /// M: integer multiply/divide.
    pub m: bool,
    /// A: atomics (LR/SC and AMOs).
    pub a: bool,
    /// F: single-precision floating point.
    pub f: bool,
    /// D: double-precision floating point.
    pub d: bool,
    /// C: compressed 16-bit instructions.
    pub c: bool,
    /// Zba: address-generation bitmanip.
    pub zba: bool,
    /// Zbb: basic bitmanip.
    pub zbb: bool,
    /// Zbc: carry-less multiply.
    pub zbc: bool,
    /// Zbs: single-bit instructions.
    pub zbs: bool,
    /// Zfh: half-precision floating point.
    pub zfh: bool,
}

impl ExtensionSet {
    /// Every supported extension enabled.
    pub const fn all() -> Self {
        Self {
            m: true,
            a: true,
            f: true,
            d: true,
            c: true,
            zba: true,
            zbb: true,
            zbc: true,
            zbs: true,
            zfh: true,
        }
    }

    /// Applies implied enables (D ⇒ F, Zfh ⇒ F).
    pub const fn normalized(mut self) -> Self {
        if self.d || self.zfh {
            self.f = true;
        }
        self
    }
}

impl FromStr for ExtensionSet {
    type Err = String;

    /// Parses an ISA suffix such as `imafdc_zba_zbb_zbc_zbs_zfh`.
    ///
    /// Single letters are consumed greedily; multi-letter extensions are
    /// separated by underscores, matching the `-march` convention. `i` is
    /// accepted and ignored (the base ISA is always on), `g` expands to
    /// `imafd`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = Self::default();
        for part in s.split('_') {
            match part {
                "zba" => set.zba = true,
                "zbb" => set.zbb = true,
                "zbc" => set.zbc = true,
                "zbs" => set.zbs = true,
                "zfh" => set.zfh = true,
                letters => {
                    for ch in letters.chars() {
                        match ch {
                            'i' | 'e' => {}
                            'm' => set.m = true,
                            'a' => set.a = true,
                            'f' => set.f = true,
                            'd' => set.d = true,
                            'c' => set.c = true,
                            'g' => {
                                set.m = true;
                                set.a = true;
                                set.f = true;
                                set.d = true;
                            }
                            other => return Err(format!("unknown extension letter '{other}'")),
                        }
                    }
                }
            }
        }
        Ok(set.normalized())
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i")?;
        for (on, name) in [
            (self.m, "m"),
            (self.a, "a"),
            (self.f, "f"),
            (self.d, "d"),
            (self.c, "c"),
        ] {
            if on {
                write!(f, "{name}")?;
            }
        }
        for (on, name) in [
            (self.zba, "_zba"),
            (self.zbb, "_zbb"),
            (self.zbc, "_zbc"),
            (self.zbs, "_zbs"),
            (self.zfh, "_zfh"),
        ] {
            if on {
                write!(f, "{name}")?;
            }
        }
        Ok(())
    }
}

/// Immutable per-simulator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Target word width.
    pub xlen: Xlen,
    /// Enabled extensions.
    #[serde(default = "ExtensionSet::all")]
    pub ext: ExtensionSet,
    /// Initial stack pointer for loaded images.
    #[serde(default = "Config::default_stack_addr")]
    pub stack_addr: u64,
}

impl Config {
    /// Creates a configuration with the given width and extensions and the
    /// default 64 MiB stack address.
    pub const fn new(xlen: Xlen, ext: ExtensionSet) -> Self {
        Self {
            xlen,
            ext: ext.normalized(),
            stack_addr: defaults::STACK_ADDR,
        }
    }

    const fn default_stack_addr() -> u64 {
        defaults::STACK_ADDR
    }
}

impl Default for Config {
    /// RV64 with every supported extension enabled.
    fn default() -> Self {
        Self::new(Xlen::Rv64, ExtensionSet::all())
    }
}
