// Win32 metric readers (iphlpapi + sysinfoapi).

use super::win_tables;
use crate::error::ProbeError;
use crate::models::{IfaceByteCounters, PrefixFilter, Probed, ProcessorTopology};
use windows_sys::Win32::Foundation::ERROR_INSUFFICIENT_BUFFER;
use windows_sys::Win32::NetworkManagement::IpHelper::{GetIfTable, MIB_IFROW, MIB_IFTABLE};
use windows_sys::Win32::System::SystemInformation::{
    GetLogicalProcessorInformationEx, GetVersionExW, GlobalMemoryStatusEx, MEMORYSTATUSEX,
    OSVERSIONINFOW, RelationProcessorCore, SYSTEM_LOGICAL_PROCESSOR_INFORMATION_EX,
};

const NO_ERROR: u32 = 0;
const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub(super) fn read_counters(filter: &PrefixFilter) -> Result<IfaceByteCounters, ProbeError> {
    // First call sizes the table, second fills it. The Vec is the only
    // allocation and drops on every exit path.
    let mut size: u32 = 0;
    let status = unsafe { GetIfTable(std::ptr::null_mut(), &mut size, 0) };
    if status != NO_ERROR && status != ERROR_INSUFFICIENT_BUFFER {
        return Err(ProbeError::SysCall {
            call: "GetIfTable",
            code: status,
        });
    }
    let mut buf = vec![0u8; size as usize];
    let status = unsafe { GetIfTable(buf.as_mut_ptr() as *mut MIB_IFTABLE, &mut size, 0) };
    if status != NO_ERROR {
        return Err(ProbeError::SysCall {
            call: "GetIfTable",
            code: status,
        });
    }

    let table = buf.as_ptr() as *const MIB_IFTABLE;
    let count = unsafe { (*table).dwNumEntries } as usize;
    let rows = unsafe { (*table).table.as_ptr() };
    let mut totals = IfaceByteCounters::default();
    for i in 0..count {
        let row: &MIB_IFROW = unsafe { &*rows.add(i) };
        if filter.excludes(win_tables::iface_prefix(row.dwType)) {
            continue;
        }
        totals.bytes_sent += row.dwOutOctets as u64;
        totals.bytes_received += row.dwInOctets as u64;
    }
    Ok(totals)
}

pub(super) fn probe_cores() -> Probed<ProcessorTopology> {
    let mut len: u32 = 0;
    unsafe {
        GetLogicalProcessorInformationEx(RelationProcessorCore, std::ptr::null_mut(), &mut len)
    };
    if len == 0 {
        tracing::warn!(call = "GetLogicalProcessorInformationEx", "sizing call failed");
        return Probed::Defaulted;
    }
    let mut buf = vec![0u8; len as usize];
    let ok = unsafe {
        GetLogicalProcessorInformationEx(
            RelationProcessorCore,
            buf.as_mut_ptr() as *mut SYSTEM_LOGICAL_PROCESSOR_INFORMATION_EX,
            &mut len,
        )
    };
    if ok == 0 {
        tracing::warn!(call = "GetLogicalProcessorInformationEx", "query failed");
        return Probed::Defaulted;
    }
    match win_tables::decode_processor_records(&buf[..len as usize]) {
        Some(tally) => Probed::Value(win_tables::topology_from_tally(tally)),
        None => {
            tracing::warn!("processor relationship buffer malformed");
            Probed::Defaulted
        }
    }
}

pub(super) fn probe_total_memory_gib() -> Probed<f64> {
    match memory_status() {
        Some(status) => Probed::Value(status.ullTotalPhys as f64 / BYTES_PER_GIB),
        None => Probed::Defaulted,
    }
}

pub(super) fn probe_available_memory_gib() -> Probed<f64> {
    match memory_status() {
        Some(status) => Probed::Value(status.ullAvailPhys as f64 / BYTES_PER_GIB),
        None => Probed::Defaulted,
    }
}

fn memory_status() -> Option<MEMORYSTATUSEX> {
    let mut status: MEMORYSTATUSEX = unsafe { std::mem::zeroed() };
    status.dwLength = std::mem::size_of::<MEMORYSTATUSEX>() as u32;
    let ok = unsafe { GlobalMemoryStatusEx(&mut status) };
    if ok == 0 {
        tracing::warn!(call = "GlobalMemoryStatusEx", "memory probe failed");
        return None;
    }
    Some(status)
}

pub(super) fn probe_kernel_version() -> Probed<String> {
    let mut info: OSVERSIONINFOW = unsafe { std::mem::zeroed() };
    info.dwOSVersionInfoSize = std::mem::size_of::<OSVERSIONINFOW>() as u32;
    let ok = unsafe { GetVersionExW(&mut info) };
    if ok == 0 {
        tracing::warn!(call = "GetVersionExW", "version probe failed");
        return Probed::Defaulted;
    }
    Probed::Value(format!(
        "{}.{}.{}",
        info.dwMajorVersion, info.dwMinorVersion, info.dwBuildNumber
    ))
}
