//! Price-per-point and price-value analysis

use std::sync::OnceLock;

use crate::config::{PpadsBand, PriceValueCalibration};
use crate::models::{price_descriptor, PriceInput, PricePerPoint, PriceValueAnalysis};
use crate::types::{clamp, positive, round2};

/// Cost per rating point for purchase and retail price.
///
/// Both are `None` without a positive score. A price that is absent, zero
/// or negative yields `None` for that side only; prices are never negative
/// once they pass [`PriceInput::check`].
pub fn calculate_price_per_point(
    purchase_price: Option<f64>,
    retail_price: Option<f64>,
    final_score: Option<f64>,
) -> PricePerPoint {
    let Some(score) = positive(final_score) else {
        return PricePerPoint::default();
    };

    PricePerPoint {
        purchase_ppp: positive(purchase_price).map(|price| round2(price / score)),
        retail_ppp: positive(retail_price).map(|price| round2(price / score)),
    }
}

/// Band holding the price. Each band reaches up to the next band's
/// minimum, so prices between a listed max and the next min (2.995) stay
/// in the lower band. Only the last band honours its own max.
fn find_tier(bands: &[PpadsBand], price: f64) -> Option<u32> {
    bands
        .iter()
        .enumerate()
        .find(|(i, band)| match bands.get(i + 1) {
            Some(next) => price >= band.min && price < next.min,
            None => band.contains(price),
        })
        .map(|(_, band)| band.tier)
}

/// Analyzer over a set of calibration constants
#[derive(Debug, Clone, Copy)]
pub struct PriceValueAnalyzer<'a> {
    calibration: &'a PriceValueCalibration,
}

impl<'a> PriceValueAnalyzer<'a> {
    pub fn new(calibration: &'a PriceValueCalibration) -> Self {
        Self { calibration }
    }

    /// Tier value for a price already normalized to the reference volume
    pub fn lookup_ppads(&self, price_375: f64) -> u32 {
        find_tier(&self.calibration.bands, price_375).unwrap_or_else(|| {
            tracing::debug!(price_375, "price outside every PPADS band, using fallback tier");
            self.calibration.fallback_tier
        })
    }

    /// Rescale a container price to the reference volume
    pub fn normalize(&self, price: f64, volume_ml: f64) -> f64 {
        (price / volume_ml) * self.calibration.reference_volume_ml
    }

    /// Full price-value analysis. `volume_ml` must be positive; see
    /// [`PriceInput::check`].
    pub fn analyze(
        &self,
        purchase_price: f64,
        retail_price: f64,
        volume_ml: f64,
        total_score: f64,
    ) -> PriceValueAnalysis {
        let calibration = self.calibration;
        let reference = calibration.reference_volume_ml;

        let purchase_price_375 = self.normalize(purchase_price, volume_ml);
        let retail_price_375 = self.normalize(retail_price, volume_ml);

        let ppads = self.lookup_ppads(purchase_price_375);
        let rpads = self.lookup_ppads(retail_price_375);

        let purchase_price_score = (total_score * reference) / f64::from(ppads);
        let retail_price_score = (total_score * reference) / f64::from(rpads);

        let raw_multiplier = if purchase_price_375 > 0.0 {
            retail_price_375 / purchase_price_375
        } else {
            1.0
        };
        let value_multiplier = clamp(
            raw_multiplier,
            calibration.value_multiplier_min,
            calibration.value_multiplier_max,
        );

        let savings_percent = if retail_price_375 > 0.0 {
            ((retail_price_375 - purchase_price_375) / retail_price_375) * 100.0
        } else {
            0.0
        };

        let value_score = purchase_price_score * value_multiplier;

        let weights = calibration.composite_weights;
        let composite_price_value = weights.purchase * purchase_price_score
            + weights.retail * retail_price_score
            + weights.value * value_score;
        let normalized_composite = clamp(
            (composite_price_value / calibration.max_expected_composite) * 100.0,
            0.0,
            100.0,
        );

        PriceValueAnalysis {
            purchase_price_375,
            retail_price_375,
            ppads,
            rpads,
            purchase_price_score,
            retail_price_score,
            value_multiplier,
            savings_percent,
            value_score,
            composite_price_value,
            normalized_composite,
            descriptor: price_descriptor(purchase_price_score),
        }
    }

    pub fn analyze_input(&self, input: &PriceInput, total_score: f64) -> PriceValueAnalysis {
        self.analyze(
            input.purchase_price,
            input.retail_price,
            input.volume_ml,
            total_score,
        )
    }
}

fn default_calibration() -> &'static PriceValueCalibration {
    static CALIBRATION: OnceLock<PriceValueCalibration> = OnceLock::new();
    CALIBRATION.get_or_init(PriceValueCalibration::default)
}

/// PPADS tier for a reference-volume price using the built-in bands
pub fn lookup_ppads(price_375: f64) -> u32 {
    PriceValueAnalyzer::new(default_calibration()).lookup_ppads(price_375)
}

/// Price-value analysis with the built-in calibration
pub fn calculate_price_value(
    purchase_price: f64,
    retail_price: f64,
    volume_ml: f64,
    total_score: f64,
) -> PriceValueAnalysis {
    PriceValueAnalyzer::new(default_calibration()).analyze(
        purchase_price,
        retail_price,
        volume_ml,
        total_score,
    )
}
