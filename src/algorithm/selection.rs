//! Overlap scoring and tolerance-based candidate selection
//!
//! Each candidate is compared against the canvas over the strips its
//! placement shares with placed content. The cheapest candidate sets the
//! reference; one candidate within `(1 + tolerance)` of it is then drawn
//! uniformly so repeated placements do not settle into a periodic pattern.

use ndarray::ArrayView3;
use rand::Rng;

use crate::io::configuration::NO_OVERLAP_COST;
use crate::io::error::{Result, computation_error};
use crate::spatial::blocks::CandidateTile;
use crate::spatial::region::{self, Raster};
use crate::spatial::shape::{OverlapShape, Placement};

/// Sum of squared differences between `tile` and the canvas over the placement's overlap strips
///
/// `tile` is clipped to the placement rectangle first. Placements without
/// overlap score [`NO_OVERLAP_COST`].
///
/// # Errors
///
/// Returns an error if a strip falls outside the canvas or the tile
pub fn overlap_cost(
    canvas: &ArrayView3<'_, u8>,
    placement: &Placement,
    tile: &ArrayView3<'_, u8>,
) -> Result<u64> {
    if placement.shape == OverlapShape::None {
        return Ok(NO_OVERLAP_COST);
    }

    let clipped = region::view(tile, placement.tile_rect())?;
    let mut cost = 0;
    for strip in placement.strips() {
        let canvas_strip = region::view(canvas, strip.translate(placement.rect.x, placement.rect.y))?;
        let tile_strip = region::view(&clipped, strip)?;
        cost += region::sum_squared_difference(&canvas_strip, &tile_strip)?;
    }
    Ok(cost)
}

/// Score every candidate against the canvas, in candidate order
///
/// With more than one worker the candidates are split into contiguous chunks
/// scored on scoped threads. Results are concatenated in chunk order, so the
/// returned costs do not depend on the worker count.
///
/// # Errors
///
/// Returns an error if any candidate fails to score or a worker panics
pub fn score_candidates(
    canvas: &Raster,
    placement: &Placement,
    tiles: &[CandidateTile],
    workers: usize,
) -> Result<Vec<u64>> {
    let canvas = canvas.view();
    let score = |tile: &CandidateTile| overlap_cost(&canvas, placement, &tile.pixels());

    if workers <= 1 || tiles.len() <= 1 {
        return tiles.iter().map(score).collect();
    }

    let chunk_size = tiles.len().div_ceil(workers);
    let score = &score;
    crossbeam_utils::thread::scope(|scope| -> Result<Vec<u64>> {
        let handles: Vec<_> = tiles
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move |_| chunk.iter().map(score).collect::<Result<Vec<u64>>>()))
            .collect();

        let mut costs = Vec::with_capacity(tiles.len());
        for handle in handles {
            let chunk_costs = handle.join().map_err(|_panic| {
                computation_error("candidate scoring", &"scoring worker panicked")
            })??;
            costs.extend(chunk_costs);
        }
        Ok(costs)
    })
    .map_err(|_panic| computation_error("candidate scoring", &"scoring scope panicked"))?
}

/// Indices of candidates whose cost is within `(1 + tolerance)` of the minimum
///
/// Candidates are ordered by cost, then by index, so the result is stable for
/// equal costs.
pub fn eligible_candidates(costs: &[u64], tolerance: f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..costs.len()).collect();
    order.sort_by_key(|&i| (costs.get(i).copied().unwrap_or(u64::MAX), i));

    let Some(reference) = order.first().and_then(|&i| costs.get(i)).copied() else {
        return Vec::new();
    };
    let threshold = (1.0 + tolerance) * reference as f64;

    order
        .into_iter()
        .take_while(|&i| costs.get(i).is_some_and(|&cost| cost as f64 <= threshold))
        .collect()
}

/// Draw one candidate uniformly among the eligible ones
///
/// # Errors
///
/// Returns an error if `costs` is empty
pub fn select_candidate<R: Rng>(costs: &[u64], tolerance: f64, rng: &mut R) -> Result<usize> {
    let eligible = eligible_candidates(costs, tolerance);
    if eligible.is_empty() {
        return Err(computation_error(
            "candidate selection",
            &"no candidates were scored",
        ));
    }
    let pick = rng.random_range(0..eligible.len());
    eligible.get(pick).copied().ok_or_else(|| {
        computation_error("candidate selection", &format!("pick {pick} out of range"))
    })
}
