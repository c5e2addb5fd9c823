//! CRC64 class identity, bit-compatible with JaCoCo's `CRC64.classId`.

const POLY64REV: u64 = 0xd800_0000_0000_0000;

static LOOKUP: [u64; 256] = build_lookup();

const fn build_lookup() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut i = 0usize;
    while i < 256 {
        let mut v = i as u64;
        let mut j = 0;
        while j < 8 {
            v = if v & 1 == 1 { (v >> 1) ^ POLY64REV } else { v >> 1 };
            j += 1;
        }
        table[i] = v;
        i += 1;
    }
    table
}

pub fn class_id(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |sum, b| {
        let idx = ((sum ^ u64::from(*b)) & 0xff) as usize;
        (sum >> 8) ^ LOOKUP[idx]
    })
}
