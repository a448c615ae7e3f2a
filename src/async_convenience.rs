//! Async convenience functions
//!
//! The codec itself is CPU bound, so these wrappers run it on the blocking
//! thread pool and keep the async executor free for I/O.

#[cfg(feature = "async")]
pub mod functions {
    use crate::{pack_block, unpack_block, CartPackError, Result, UnpackedBlock};
    use std::path::Path;
    use std::sync::Arc;

    fn join_error(err: tokio::task::JoinError) -> CartPackError {
        CartPackError::Io(std::io::Error::other(err))
    }

    /// Unpack the block at `offset` without blocking the executor.
    ///
    /// The image is shared rather than copied so many blocks of the same
    /// image can be unpacked concurrently.
    pub async fn unpack_block_async(
        image: Arc<Vec<u8>>,
        offset: usize,
    ) -> Result<UnpackedBlock> {
        tokio::task::spawn_blocking(move || unpack_block(&image, offset))
            .await
            .map_err(join_error)?
    }

    /// Pack raw asset bytes without blocking the executor.
    pub async fn pack_block_async(data: Vec<u8>) -> Result<Vec<u8>> {
        tokio::task::spawn_blocking(move || pack_block(&data))
            .await
            .map_err(join_error)?
    }

    /// Unpack one block from an image file and write the raw bytes out.
    ///
    /// Returns the unpacked length.
    pub async fn unpack_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        image_path: P1,
        output_path: P2,
        offset: usize,
    ) -> Result<usize> {
        let image = Arc::new(tokio::fs::read(image_path).await?);
        let block = unpack_block_async(image, offset).await?;
        tokio::fs::write(output_path, &block.data).await?;
        Ok(block.data.len())
    }

    /// Pack a raw file into a single block.
    ///
    /// Returns the packed length.
    pub async fn pack_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
    ) -> Result<usize> {
        let data = tokio::fs::read(input_path).await?;
        let packed = pack_block_async(data).await?;
        tokio::fs::write(output_path, &packed).await?;
        Ok(packed.len())
    }
}

#[cfg(feature = "async")]
pub use functions::*;
