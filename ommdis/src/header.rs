use crate::error::Error;

pub const HEADER_LEN: usize = 16;

/// The 16-byte OMM file header: eight packed little-endian words.
#[derive(Debug, Clone, Copy)]
pub struct Header {
    pub version: u16,
    pub id: u16,
    pub size: u16,
    pub org: u16,
    pub amperct: u16,
    pub kind: u16,
    pub res1: u16,
    pub res2: u16,
}

/// Half-open `[start, end)` range of module addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressSpace {
    pub start: u32,
    pub end: u32,
}

impl AddressSpace {
    pub fn contains(self, address: u32) -> bool {
        address >= self.start && address < self.end
    }
}

impl Header {
    /// Parse and sanity-check the header against the whole file image.
    /// Any failure is fatal before a single line of output.
    pub fn parse(data: &[u8]) -> Result<Header, Error> {
        // Smallest possible module: header, one terminator byte, sentinel word.
        if data.len() < HEADER_LEN + 3 {
            return Err(Error::NotOmm);
        }

        let word = |i: usize| u16::from_le_bytes([data[2 * i], data[2 * i + 1]]);
        let h = Header {
            version: word(0),
            id: word(1),
            size: word(2),
            org: word(3),
            amperct: word(4),
            kind: word(5),
            res1: word(6),
            res2: word(7),
        };

        if h.res1 != 0 || h.res2 != 0 || h.kind != 0 {
            return Err(Error::NotOmm);
        }
        if h.version > 1 {
            return Err(Error::NotOmm);
        }
        if h.size as usize + HEADER_LEN != data.len() {
            return Err(Error::NotOmm);
        }
        if h.amperct != 0 {
            let space = h.address_space();
            if h.amperct as u32 <= space.start || h.amperct as u32 >= space.end {
                return Err(Error::NotOmm);
            }
        }
        Ok(h)
    }

    pub fn address_space(&self) -> AddressSpace {
        AddressSpace {
            start: self.org as u32,
            end: self.org as u32 + self.size as u32,
        }
    }
}
