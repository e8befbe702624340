//! Decoders for the flat buffers returned by Win32 table queries.
//!
//! Kept free of FFI so the record walking stays unit-testable on any
//! platform; `windows.rs` feeds it the raw bytes.

use crate::models::ProcessorTopology;

/// MIB_IFROW `dwType` values worth telling apart.
const IF_TYPE_ETHERNET_CSMACD: u32 = 6;
const IF_TYPE_PPP: u32 = 23;
const IF_TYPE_SOFTWARE_LOOPBACK: u32 = 24;
const IF_TYPE_IEEE80211: u32 = 71;

/// Maps an interface type code onto the symbolic name prefix the exclusion
/// filter is matched against.
pub fn iface_prefix(if_type: u32) -> &'static str {
    match if_type {
        IF_TYPE_ETHERNET_CSMACD => "en",
        IF_TYPE_PPP => "ppp",
        IF_TYPE_SOFTWARE_LOOPBACK => "lo",
        IF_TYPE_IEEE80211 => "wl",
        _ => "unk",
    }
}

// SYSTEM_LOGICAL_PROCESSOR_INFORMATION_EX layout (64-bit): u32 relationship,
// u32 self-declared byte size, then the PROCESSOR_RELATIONSHIP payload with
// its GROUP_AFFINITY array.
const RELATION_PROCESSOR_CORE: u32 = 0;
const RECORD_HEADER_LEN: usize = 8;
const GROUP_COUNT_OFFSET: usize = 30;
const GROUP_MASKS_OFFSET: usize = 32;
const GROUP_AFFINITY_LEN: usize = 16;

/// Tally over all "processor core" records of one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreRecordTally {
    /// Number of records tagged processor-core (one per physical core).
    pub core_records: u32,
    /// Population count accumulated across every group-affinity mask of
    /// those records.
    pub mask_bits: u32,
}

/// Walks a processor-relationship buffer. Records are variable-length; the
/// cursor advances by each record's self-declared size, and every access is
/// bounds-checked against the buffer. A declared size that runs past the
/// end (or below the header length) makes the whole buffer invalid.
pub fn decode_processor_records(buf: &[u8]) -> Option<CoreRecordTally> {
    let mut cursor = 0usize;
    let mut tally = CoreRecordTally {
        core_records: 0,
        mask_bits: 0,
    };
    while cursor < buf.len() {
        let relationship = read_u32(buf, cursor)?;
        let size = read_u32(buf, cursor + 4)? as usize;
        if size < RECORD_HEADER_LEN || size > buf.len() - cursor {
            return None;
        }
        if relationship == RELATION_PROCESSOR_CORE {
            tally.core_records += 1;
            let group_count = read_u16(buf, cursor + GROUP_COUNT_OFFSET)? as usize;
            for i in 0..group_count {
                let mask = read_u64(buf, cursor + GROUP_MASKS_OFFSET + i * GROUP_AFFINITY_LEN)?;
                tally.mask_bits += mask.count_ones();
            }
        }
        cursor += size;
    }
    Some(tally)
}

/// Physical is the record count; the logical figure is the record count
/// multiplied by the accumulated mask bits.
pub fn topology_from_tally(tally: CoreRecordTally) -> ProcessorTopology {
    ProcessorTopology {
        physical_cores: tally.core_records,
        logical_cores: tally.core_records * tally.mask_bits,
    }
}

fn read_u16(buf: &[u8], offset: usize) -> Option<u16> {
    buf.get(offset..offset + 2)
        .and_then(|b| b.try_into().ok())
        .map(u16::from_le_bytes)
}

fn read_u32(buf: &[u8], offset: usize) -> Option<u32> {
    buf.get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
}

fn read_u64(buf: &[u8], offset: usize) -> Option<u64> {
    buf.get(offset..offset + 8)
        .and_then(|b| b.try_into().ok())
        .map(u64::from_le_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds one relationship record with the given tag and affinity masks.
    fn record(relationship: u32, masks: &[u64]) -> Vec<u8> {
        let size = GROUP_MASKS_OFFSET + masks.len() * GROUP_AFFINITY_LEN;
        let mut buf = vec![0u8; size];
        buf[0..4].copy_from_slice(&relationship.to_le_bytes());
        buf[4..8].copy_from_slice(&(size as u32).to_le_bytes());
        buf[GROUP_COUNT_OFFSET..GROUP_COUNT_OFFSET + 2]
            .copy_from_slice(&(masks.len() as u16).to_le_bytes());
        for (i, mask) in masks.iter().enumerate() {
            let off = GROUP_MASKS_OFFSET + i * GROUP_AFFINITY_LEN;
            buf[off..off + 8].copy_from_slice(&mask.to_le_bytes());
        }
        buf
    }

    #[test]
    fn two_core_records_use_the_product_formula() {
        let mut buf = record(RELATION_PROCESSOR_CORE, &[0b1011]);
        buf.extend(record(RELATION_PROCESSOR_CORE, &[0b1011]));

        let tally = decode_processor_records(&buf).unwrap();
        assert_eq!(tally.core_records, 2);
        assert_eq!(tally.mask_bits, 6);

        let topology = topology_from_tally(tally);
        assert_eq!(topology.physical_cores, 2);
        // 2 cores * (3 + 3) mask bits.
        assert_eq!(topology.logical_cores, 12);
    }

    #[test]
    fn non_core_records_are_skipped() {
        let mut buf = record(2, &[0xff]); // RelationNumaNode
        buf.extend(record(RELATION_PROCESSOR_CORE, &[0b1]));

        let tally = decode_processor_records(&buf).unwrap();
        assert_eq!(tally.core_records, 1);
        assert_eq!(tally.mask_bits, 1);
    }

    #[test]
    fn multiple_group_masks_accumulate() {
        let buf = record(RELATION_PROCESSOR_CORE, &[0b11, 0b1111]);
        let tally = decode_processor_records(&buf).unwrap();
        assert_eq!(tally.mask_bits, 6);
    }

    #[test]
    fn truncated_record_is_rejected() {
        let mut buf = record(RELATION_PROCESSOR_CORE, &[0b1]);
        buf.truncate(buf.len() - 4);
        assert_eq!(decode_processor_records(&buf), None);
    }

    #[test]
    fn undersized_declared_length_is_rejected() {
        let mut buf = record(RELATION_PROCESSOR_CORE, &[0b1]);
        buf[4..8].copy_from_slice(&4u32.to_le_bytes());
        assert_eq!(decode_processor_records(&buf), None);
    }

    #[test]
    fn empty_buffer_decodes_to_zero() {
        let tally = decode_processor_records(&[]).unwrap();
        assert_eq!(tally.core_records, 0);
        assert_eq!(tally.mask_bits, 0);
    }

    #[test]
    fn iface_prefixes_cover_known_types() {
        assert_eq!(iface_prefix(6), "en");
        assert_eq!(iface_prefix(23), "ppp");
        assert_eq!(iface_prefix(24), "lo");
        assert_eq!(iface_prefix(71), "wl");
        assert_eq!(iface_prefix(131), "unk");
    }
}
