//! Partition of an image into bands and fork-join execution of them.
use std::ops::Range;
use std::thread;

use log::trace;

/// Returns count of threads that can be run in parallel on the machine,
/// or `1` if it can't be determined.
pub fn hardware_concurrency() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Splits `[0, extent)` into `num_bands` contiguous bands of near-equal size.
///
/// Returns `num_bands + 1` boundaries. Band `i` is
/// `boundaries[i]..boundaries[i + 1]`. Sizes of bands differ by one
/// at most, the first `extent % num_bands` bands are the bigger ones.
/// Some bands are empty if `extent < num_bands`.
/// Zero `num_bands` is treated as `1`.
///
/// ```
/// use fast_image_conv::split_range;
///
/// assert_eq!(split_range(10, 3), [0, 4, 7, 10]);
/// assert_eq!(split_range(2, 4), [0, 1, 2, 2, 2]);
/// ```
pub fn split_range(extent: u32, num_bands: usize) -> Vec<u32> {
    let num_bands = num_bands.max(1) as u64;
    let step = extent as u64 / num_bands;
    let modulo = extent as u64 % num_bands;
    let mut boundaries = Vec::with_capacity(num_bands as usize + 1);
    let mut start = 0;
    boundaries.push(start as u32);
    for i in 0..num_bands {
        start += step + (i < modulo) as u64;
        boundaries.push(start as u32);
    }
    boundaries
}

/// Returns iterator by non-empty bands defined by boundaries
/// from [split_range].
pub fn bands(boundaries: &[u32]) -> impl Iterator<Item = Range<u32>> + '_ {
    boundaries
        .windows(2)
        .map(|pair| pair[0]..pair[1])
        .filter(|band| !band.is_empty())
}

/// Splits rows into bands of rows.
///
/// Returns only non-empty bands with their ranges.
pub(crate) fn split_rows_into_bands<'a, R>(
    rows: &'a mut [R],
    boundaries: &[u32],
) -> Vec<(Range<u32>, &'a mut [R])> {
    let mut rest = rows;
    let mut res = Vec::with_capacity(boundaries.len().saturating_sub(1));
    for band in bands(boundaries) {
        // Image with zero width has no rows to split.
        let size = ((band.end - band.start) as usize).min(rest.len());
        let (band_rows, tail) = std::mem::take(&mut rest).split_at_mut(size);
        rest = tail;
        res.push((band, band_rows));
    }
    res
}

/// Splits every row into segments by bands of columns.
///
/// Returns only non-empty bands with segments of all rows belonging to them.
pub(crate) fn split_columns_into_bands<'a, P>(
    rows: Vec<&'a mut [P]>,
    boundaries: &[u32],
) -> Vec<(Range<u32>, Vec<&'a mut [P]>)> {
    let mut res: Vec<(Range<u32>, Vec<&'a mut [P]>)> = bands(boundaries)
        .map(|band| (band, Vec::with_capacity(rows.len())))
        .collect();
    for mut rest in rows {
        for (band, segments) in res.iter_mut() {
            let size = (band.end - band.start) as usize;
            let (segment, tail) = std::mem::take(&mut rest).split_at_mut(size);
            rest = tail;
            segments.push(segment);
        }
    }
    res
}

/// Runs `worker` for every job concurrently and returns after all
/// of them have finished.
///
/// A panic of any worker is propagated to the caller after all
/// other workers have finished.
pub(crate) fn fork_join<J, F>(jobs: Vec<J>, worker: F)
where
    J: Send,
    F: Fn(J) + Sync,
{
    trace!("Run {} bands", jobs.len());
    #[cfg(feature = "for_testing")]
    crate::testing::log_message(&format!("Run {} bands", jobs.len()));
    if jobs.len() == 1 {
        // Avoid spawning of a thread for single band.
        jobs.into_iter().for_each(worker);
        return;
    }
    let worker = &worker;
    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            rayon::scope(|s| {
                for job in jobs {
                    s.spawn(move |_| worker(job));
                }
            });
        } else {
            thread::scope(|s| {
                for job in jobs {
                    s.spawn(move || worker(job));
                }
            });
        }
    }
}
