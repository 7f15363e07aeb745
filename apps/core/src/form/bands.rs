//! Threshold tables.
//!
//! Each exercise maps its measurement through an ordered list of bands. Bands
//! are tried in order, every comparison is strict, the first match wins and a
//! catch-all outcome always exists.

use serde::Serialize;

/// A coaching tip with its quality score in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome {
    pub tip: &'static str,
    pub score: f64,
}

impl Outcome {
    pub const fn new(tip: &'static str, score: f64) -> Self {
        Self { tip, score }
    }
}

/// How a measurement is compared to a band bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// `measure < bound`
    Below,
    /// `measure > bound`
    Above,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub bound: f64,
    pub outcome: Outcome,
}

impl Band {
    pub const fn new(bound: f64, tip: &'static str, score: f64) -> Self {
        Self {
            bound,
            outcome: Outcome::new(tip, score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandTable {
    pub comparison: Comparison,
    pub bands: &'static [Band],
    pub otherwise: Outcome,
}

impl BandTable {
    /// Outcome for `measure`. NaN never matches a band.
    pub fn classify(&self, measure: f64) -> Outcome {
        self.classify_scaled(measure, 1.0)
    }

    /// Outcome for `measure` against bounds multiplied by `scale`
    pub fn classify_scaled(&self, measure: f64, scale: f64) -> Outcome {
        self.bands
            .iter()
            .find(|band| {
                let bound = band.bound * scale;
                match self.comparison {
                    Comparison::Below => measure < bound,
                    Comparison::Above => measure > bound,
                }
            })
            .map(|band| band.outcome)
            .unwrap_or(self.otherwise)
    }

    /// Every outcome this table can produce, bands first
    pub fn outcomes(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.bands
            .iter()
            .map(|band| band.outcome)
            .chain(std::iter::once(self.otherwise))
    }
}

/// Knee angle at hip/knee/ankle, degrees
pub const SQUAT: BandTable = BandTable {
    comparison: Comparison::Below,
    bands: &[
        Band::new(70.0, "Great depth! Keep your chest up and knees aligned with toes.", 0.9),
        Band::new(90.0, "Good form! Try to go a bit deeper for better results.", 0.8),
        Band::new(120.0, "Keep going lower! Your knees should be at 90 degrees.", 0.6),
    ],
    otherwise: Outcome::new("Stand up straight and prepare for the next squat.", 0.7),
};

/// Elbow angle at shoulder/elbow/wrist, degrees
pub const PUSH_UP: BandTable = BandTable {
    comparison: Comparison::Below,
    bands: &[
        Band::new(90.0, "Perfect form! Keep your body straight and controlled.", 0.9),
        Band::new(120.0, "Good! Lower yourself more for a complete push-up.", 0.8),
        Band::new(150.0, "Keep your elbows close to your body and go lower.", 0.6),
    ],
    otherwise: Outcome::new("Maintain a straight body line and prepare for the next rep.", 0.7),
};

/// Knee angle of the deeper leg, degrees
pub const LUNGE: BandTable = BandTable {
    comparison: Comparison::Below,
    bands: &[
        Band::new(80.0, "Excellent lunge depth! Keep your front knee over your ankle.", 0.9),
        Band::new(100.0, "Good form! Try to go deeper for maximum benefit.", 0.8),
        Band::new(
            130.0,
            "Lower your body more. Your front thigh should be parallel to the ground.",
            0.6,
        ),
    ],
    otherwise: Outcome::new("Step forward and lower into the lunge position.", 0.7),
};

/// Wrist spread, bounds expressed as multiples of shoulder width
pub const JUMPING_JACK: BandTable = BandTable {
    comparison: Comparison::Above,
    bands: &[
        Band::new(1.5, "Perfect jumping jack! Arms and legs are fully extended.", 0.9),
        Band::new(1.2, "Good form! Try to extend your arms and legs more.", 0.8),
    ],
    otherwise: Outcome::new(
        "Extend your arms overhead and legs apart for a proper jumping jack.",
        0.6,
    ),
};

/// Vertical shoulder-to-ankle deviation
pub const PLANK: BandTable = BandTable {
    comparison: Comparison::Below,
    bands: &[
        Band::new(20.0, "Perfect plank! Keep your body straight and core engaged.", 0.9),
        Band::new(40.0, "Good form! Keep your hips level and body straight.", 0.8),
    ],
    otherwise: Outcome::new(
        "Straighten your body. Keep your hips in line with shoulders and ankles.",
        0.6,
    ),
};

/// Difference between left and right knee heights
pub const MOUNTAIN_CLIMBER: BandTable = BandTable {
    comparison: Comparison::Above,
    bands: &[Band::new(
        30.0,
        "Great mountain climber! Keep alternating legs with good form.",
        0.9,
    )],
    otherwise: Outcome::new(
        "Alternate your legs more distinctly. Drive your knees toward your chest.",
        0.7,
    ),
};

/// Higher of the two knee heights
pub const HIGH_KNEES: BandTable = BandTable {
    comparison: Comparison::Above,
    bands: &[Band::new(50.0, "Excellent high knees! Keep driving your knees up high.", 0.9)],
    otherwise: Outcome::new("Lift your knees higher! Aim to bring them to waist level.", 0.7),
};

/// Knee angle below which a non-standing burpee is in its squat phase
pub const BURPEE_SQUAT_ANGLE: f64 = 90.0;
/// Knee angle above which a standing burpee has landed
pub const BURPEE_LANDING_ANGLE: f64 = 150.0;

pub const BURPEE_SQUAT: Outcome = Outcome::new("Great burpee squat! Now jump up explosively.", 0.9);
pub const BURPEE_LANDING: Outcome =
    Outcome::new("Perfect landing! Control your descent for the next rep.", 0.8);
pub const BURPEE_OTHERWISE: Outcome =
    Outcome::new("Squat down, jump up, and land softly for a complete burpee.", 0.7);

/// Score of the insufficient-data default
pub const INSUFFICIENT_DATA_SCORE: f64 = 0.5;
/// Score of the unsupported-exercise response
pub const UNSUPPORTED_EXERCISE_SCORE: f64 = 0.8;
