//! Async batch processing module
//!
//! Unpacks or packs many blocks concurrently, bounded by a configurable
//! concurrency limit.

#[cfg(feature = "async")]
/// Concurrent block processing with a configurable concurrency limit
pub mod processor {
    use crate::async_convenience::{pack_block_async, unpack_block_async};
    use crate::{Result, UnpackedBlock};
    use futures::stream::{self, StreamExt, TryStreamExt};
    use std::sync::Arc;

    /// Concurrent block processor optimized for throughput
    #[derive(Debug, Clone)]
    pub struct AsyncBatchProcessor {
        concurrency_limit: usize,
    }

    impl AsyncBatchProcessor {
        /// Create a new batch processor with default settings
        pub fn new() -> Self {
            Self {
                concurrency_limit: num_cpus::get(),
            }
        }

        /// Set the concurrency limit
        pub fn with_concurrency(mut self, limit: usize) -> Self {
            self.concurrency_limit = limit;
            self
        }

        /// Unpack the blocks at `offsets` concurrently.
        ///
        /// Results carry their offset because completion order is not input
        /// order.
        pub async fn unpack_blocks(
            &self,
            image: Arc<Vec<u8>>,
            offsets: Vec<usize>,
        ) -> Result<Vec<(usize, UnpackedBlock)>> {
            log::debug!(
                "unpacking {} blocks, concurrency {}",
                offsets.len(),
                self.concurrency_limit
            );
            let results = stream::iter(offsets.into_iter().map(|offset| {
                let image = Arc::clone(&image);
                async move {
                    let block = unpack_block_async(image, offset).await?;
                    Ok::<_, crate::CartPackError>((offset, block))
                }
            }))
            .buffer_unordered(self.concurrency_limit)
            .try_collect()
            .await?;

            Ok(results)
        }

        /// Pack several raw buffers concurrently.
        ///
        /// Each result is paired with its index in `inputs`.
        pub async fn pack_blocks(
            &self,
            inputs: Vec<Vec<u8>>,
        ) -> Result<Vec<(usize, Vec<u8>)>> {
            log::debug!(
                "packing {} blocks, concurrency {}",
                inputs.len(),
                self.concurrency_limit
            );
            let results = stream::iter(inputs.into_iter().enumerate().map(
                |(index, data)| async move {
                    let packed = pack_block_async(data).await?;
                    Ok::<_, crate::CartPackError>((index, packed))
                },
            ))
            .buffer_unordered(self.concurrency_limit)
            .try_collect()
            .await?;

            Ok(results)
        }
    }

    impl Default for AsyncBatchProcessor {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(feature = "async")]
pub use processor::AsyncBatchProcessor;
