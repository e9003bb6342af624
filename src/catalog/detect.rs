//! Device model detection from screenshot dimensions.
//!
//! Detection runs in two tiers:
//!
//! 1. **Proportional**: the image is the exact resolution of a model, or a
//!    uniform rescale of it (both axes scaled by the same factor within a
//!    relative tolerance of 0.001). Candidates are scored by how far the scale
//!    is from 1:1, exact matches scoring 0.
//! 2. **Aspect ratio**: only reached when tier 1 finds nothing. Candidates are
//!    models whose height/width ratio is within 0.5% of the image's.
//!
//! Within a tier, candidates whose score is close to the best one are treated
//! as a tie, broken in favour of the preferred series and then catalog order.

use serde::Serialize;
use tracing::{debug, trace};

use super::{Catalog, DeviceSpec};

/// Series preferred when several models match equally well.
pub const DEFAULT_PREFERRED_SERIES: &str = "17";

/// Maximum relative difference between the two axis scales in tier 1.
const SCALE_TOLERANCE: f64 = 0.001;
/// Scores within this distance of the tier-1 best are ties.
const SCALE_TIE_WINDOW: f64 = 0.001;
/// Maximum relative aspect-ratio difference in tier 2.
const ASPECT_TOLERANCE: f64 = 0.005;
/// Scores within this distance of the tier-2 best are ties.
const ASPECT_TIE_WINDOW: f64 = 0.0001;

/// Which tier produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Exact resolution or a uniform rescale of it.
    Proportional,
    /// Same aspect ratio within tolerance.
    AspectRatio,
}

/// Outcome of a detection call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    /// Best matching model name, if any.
    pub best_match: Option<String>,
    /// Every candidate of the winning tier, in catalog order.
    pub all_matches: Vec<String>,
    /// Tier that produced the candidates.
    pub tier: Option<MatchTier>,
}

impl DetectionResult {
    /// Result for an image that matched nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub const fn is_match(&self) -> bool {
        self.best_match.is_some()
    }
}

struct Candidate<'a> {
    spec: &'a DeviceSpec,
    score: f64,
}

/// Detect the device model for an image of `width` x `height` pixels.
///
/// Landscape and portrait dimensions of the same device give identical
/// results. A zero dimension never matches.
pub fn detect_model(
    width: u32,
    height: u32,
    catalog: &Catalog,
    preferred_series: &str,
) -> DetectionResult {
    if width == 0 || height == 0 {
        debug!(width, height, "Empty image, skipping detection");
        return DetectionResult::none();
    }

    let (w, h) = if width > height {
        (height, width)
    } else {
        (width, height)
    };

    let proportional = proportional_candidates(w, h, catalog);
    if !proportional.is_empty() {
        debug!(
            width = w,
            height = h,
            candidates = proportional.len(),
            "Proportional match"
        );
        return resolve(
            &proportional,
            SCALE_TIE_WINDOW,
            preferred_series,
            MatchTier::Proportional,
        );
    }

    let by_aspect = aspect_candidates(w, h, catalog);
    if by_aspect.is_empty() {
        debug!(width = w, height = h, "No model matches image dimensions");
        return DetectionResult::none();
    }

    debug!(
        width = w,
        height = h,
        candidates = by_aspect.len(),
        "Aspect ratio match"
    );
    resolve(
        &by_aspect,
        ASPECT_TIE_WINDOW,
        preferred_series,
        MatchTier::AspectRatio,
    )
}

fn proportional_candidates(w: u32, h: u32, catalog: &Catalog) -> Vec<Candidate<'_>> {
    catalog
        .iter()
        .filter_map(|spec| {
            let (ew, eh) = spec.portrait_resolution;
            if (w, h) == (ew, eh) {
                trace!(model = spec.name, "Exact resolution");
                return Some(Candidate { spec, score: 0.0 });
            }

            let scale_w = f64::from(w) / f64::from(ew);
            let scale_h = f64::from(h) / f64::from(eh);
            let spread = (scale_w - scale_h).abs() / scale_w.max(scale_h);
            (spread < SCALE_TOLERANCE).then(|| {
                trace!(model = spec.name, scale = scale_w, "Uniform rescale");
                Candidate {
                    spec,
                    score: (scale_w - 1.0).abs(),
                }
            })
        })
        .collect()
}

fn aspect_candidates(w: u32, h: u32, catalog: &Catalog) -> Vec<Candidate<'_>> {
    let aspect = f64::from(h) / f64::from(w);
    catalog
        .iter()
        .filter_map(|spec| {
            let expected = spec.aspect_ratio();
            let diff = (aspect - expected).abs() / expected;
            (diff < ASPECT_TOLERANCE).then_some(Candidate { spec, score: diff })
        })
        .collect()
}

/// Pick the winner among `candidates` (non-empty, catalog order).
fn resolve(
    candidates: &[Candidate<'_>],
    tie_window: f64,
    preferred_series: &str,
    tier: MatchTier,
) -> DetectionResult {
    let best_score = candidates
        .iter()
        .map(|c| c.score)
        .fold(f64::INFINITY, f64::min);

    let tied: Vec<&Candidate<'_>> = candidates
        .iter()
        .filter(|c| (c.score - best_score).abs() < tie_window)
        .collect();

    let winner = if tied.len() > 1 {
        tied.iter()
            .find(|c| c.spec.series == preferred_series)
            .unwrap_or(&tied[0])
    } else {
        &tied[0]
    };

    DetectionResult {
        best_match: Some(winner.spec.name.to_string()),
        all_matches: candidates.iter().map(|c| c.spec.name.to_string()).collect(),
        tier: Some(tier),
    }
}
