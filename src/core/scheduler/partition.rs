use crate::core::types::Chunk;

/// Split `identifiers` into at most `num_chunks` contiguous chunks.
///
/// Every chunk gets `len / n` identifiers and the last one also takes the
/// remainder. The chunk count never exceeds the identifier count, so no
/// chunk is empty, and a zero count is treated as one.
pub fn partition(identifiers: &[String], num_chunks: usize) -> Vec<Chunk> {
    if identifiers.is_empty() {
        return Vec::new();
    }

    let count = num_chunks.clamp(1, identifiers.len());
    let size = identifiers.len() / count;

    (0..count)
        .map(|i| {
            let start = i * size;
            let end = if i + 1 == count {
                identifiers.len()
            } else {
                start + size
            };
            Chunk {
                index: i + 1,
                identifiers: identifiers[start..end].to_vec(),
            }
        })
        .collect()
}
