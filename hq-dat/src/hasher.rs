use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha1::Digest;

use crate::error::DatError;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// Digests of a single file, in the lowercase fixed-width hex form used by
/// catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigests {
    pub size: u64,
    pub crc32: String,
    pub md5: String,
    pub sha1: String,
}

/// Compute CRC32, MD5 and SHA1 of a stream in a single pass, 64KB at a time.
pub fn hash_reader<R: Read>(reader: &mut R) -> Result<FileDigests, DatError> {
    let mut crc = crc32fast::Hasher::new();
    let mut sha = sha1::Sha1::new();
    let mut md5_ctx = md5::Context::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut size = 0u64;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        crc.update(&buf[..n]);
        sha.update(&buf[..n]);
        md5_ctx.consume(&buf[..n]);
        size += n as u64;
    }

    Ok(FileDigests {
        size,
        crc32: format!("{:08x}", crc.finalize()),
        md5: format!("{:x}", md5_ctx.compute()),
        sha1: format!("{:x}", sha.finalize()),
    })
}

/// Hash a file on disk.
pub fn hash_file(path: &Path) -> Result<FileDigests, DatError> {
    if !path.is_file() {
        return Err(DatError::NotFound(path.to_path_buf()));
    }
    let mut file = File::open(path)?;
    let digests = hash_reader(&mut file)?;
    log::debug!(
        "Hashed {} ({} bytes): crc32 {}",
        path.display(),
        digests.size,
        digests.crc32
    );
    Ok(digests)
}
