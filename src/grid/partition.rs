//! Partitioning of a normalized axis into grid indices

/// Equal-width closed buckets covering [0, 1], each mapped to a grid index
///
/// Adjacent buckets share their boundary point. Lookups scan buckets in
/// construction order and the first match wins, so a coordinate sitting
/// exactly on a boundary resolves to the lower bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisPartition {
    buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bucket {
    start: f32,
    end: f32,
    index: usize,
}

impl AxisPartition {
    /// Build `bucket_count` buckets. Bucket `i` spans `[i/n, (i+1)/n]` and maps
    /// to index `i`, or `n - 1 - i` when `reversed`.
    pub fn new(bucket_count: usize, reversed: bool) -> Self {
        let n = bucket_count as f32;
        let buckets = (0..bucket_count)
            .map(|i| Bucket {
                start: i as f32 / n,
                end: (i + 1) as f32 / n,
                index: if reversed { bucket_count - 1 - i } else { i },
            })
            .collect();

        Self { buckets }
    }

    /// Grid index for a normalized coordinate, or `None` outside [0, 1]
    pub fn lookup(&self, coordinate: f32) -> Option<usize> {
        self.buckets
            .iter()
            .find(|b| b.start <= coordinate && coordinate <= b.end)
            .map(|b| b.index)
    }
}
