// src/collector/disk.rs
//! Free-space sampling for a single mount point via statfs(2).

use nix::sys::statfs::statfs as query_statfs;

use crate::error::FilesystemQueryError;

/// Byte counts derived from one filesystem statistics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageSample {
    /// Bytes available to unprivileged users.
    pub available: u64,
    pub total: u64,
    /// `total - available`. Reserved blocks count as used.
    pub used: u64,
}

impl StorageSample {
    /// Builds a sample from raw block counts.
    ///
    /// `blocks_available` is clamped to `blocks` so that `available <= total`
    /// holds even if a filesystem reports inconsistent counts.
    pub fn from_blocks(block_size: u64, blocks: u64, blocks_available: u64) -> Self {
        let blocks_available = blocks_available.min(blocks);
        let available = blocks_available.saturating_mul(block_size);
        let total = blocks.saturating_mul(block_size);

        Self {
            available,
            total,
            used: total - available,
        }
    }
}

/// Function to query block statistics for the filesystem containing `path`.
///
/// The OS error is returned unchanged together with the path. No retries.
pub fn statfs(path: &str) -> Result<StorageSample, FilesystemQueryError> {
    let stat = query_statfs(path).map_err(|source| FilesystemQueryError {
        path: path.to_string(),
        source,
    })?;

    Ok(StorageSample::from_blocks(
        stat.block_size() as u64,
        stat.blocks() as u64,
        stat.blocks_available() as u64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_blocks_multiplies_by_block_size() {
        let s = StorageSample::from_blocks(4096, 1000, 250);
        assert_eq!(s.available, 250 * 4096);
        assert_eq!(s.total, 1000 * 4096);
        assert_eq!(s.used, 750 * 4096);
    }

    #[test]
    fn test_from_blocks_grid() {
        for block_size in [1u64, 512, 4096, 65536] {
            for blocks in [0u64, 1, 7, 1 << 20, 1 << 32] {
                for blocks_available in [0, blocks / 3, blocks] {
                    let s = StorageSample::from_blocks(block_size, blocks, blocks_available);
                    assert_eq!(s.available, blocks_available * block_size);
                    assert_eq!(s.total, blocks * block_size);
                    assert_eq!(s.used, (blocks - blocks_available) * block_size);
                    assert!(s.available <= s.total);
                }
            }
        }
    }

    #[test]
    fn test_from_blocks_empty_filesystem() {
        let s = StorageSample::from_blocks(4096, 0, 0);
        assert_eq!(s, StorageSample { available: 0, total: 0, used: 0 });
    }

    #[test]
    fn test_from_blocks_clamps_available() {
        let s = StorageSample::from_blocks(512, 10, 20);
        assert_eq!(s.available, s.total);
        assert_eq!(s.used, 0);
    }
}
