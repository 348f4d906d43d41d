//! Open-file budget for the load stage, from the process `RLIMIT_NOFILE` (Unix).

/// Files one loader worker holds open at a time: the document it is reading.
pub const FDS_PER_LOADER: u64 = 1;

/// Share of the soft limit, in percent, that concurrent loads may use.
pub const FD_BUDGET_PERCENT: u64 = 80;

/// Soft limit on open file descriptors, or `None` when unlimited or unknown.
#[cfg(unix)]
pub fn soft_fd_limit() -> Option<u64> {
    let mut rlim = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // SAFETY: getrlimit only writes into the struct it is handed.
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut rlim) } != 0 {
        return None;
    }
    if rlim.rlim_cur == libc::RLIM_INFINITY {
        return None;
    }
    u64::try_from(rlim.rlim_cur).ok()
}

#[cfg(not(unix))]
pub fn soft_fd_limit() -> Option<u64> {
    None
}

/// How many loaders fit in `limit` open files. Never below one.
pub fn loaders_within(limit: u64) -> usize {
    let budget = limit.saturating_mul(FD_BUDGET_PERCENT) / 100;
    usize::try_from(budget / FDS_PER_LOADER)
        .unwrap_or(usize::MAX)
        .max(1)
}

/// Loader cap for this process, or `None` if the FD limit imposes none.
pub fn max_concurrent_loads() -> Option<usize> {
    soft_fd_limit().map(loaders_within)
}
