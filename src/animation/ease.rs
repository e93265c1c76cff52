use crate::foundation::error::{ChapterflowError, ChapterflowResult};

/// Easing functions used to map normalized tween progress.
///
/// The `power1`/`power2` families of motion libraries correspond to the quadratic and cubic
/// curves here; see [`Ease::parse`] for the accepted aliases. Serialized as its
/// [`Ease::name`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Overshooting ease-out; `overshoot` of 1.7 gives the familiar "pop".
    BackOut {
        /// Overshoot amount.
        overshoot: f64,
    },
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::BackOut { overshoot } => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
            }
        }
    }

    /// Parse an ease name, accepting both the variant names and motion-library aliases
    /// (`power1.inOut`, `power2`, `back.out(1.7)`, ...).
    pub fn parse(name: &str) -> ChapterflowResult<Self> {
        let raw = name.trim().to_ascii_lowercase();
        if raw.is_empty() {
            return Err(ChapterflowError::validation("ease name must be non-empty"));
        }

        if let Some(rest) = raw.strip_prefix("back.out") {
            let overshoot = match rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
                None if rest.is_empty() => 1.7,
                None => {
                    return Err(ChapterflowError::validation(format!(
                        "malformed back ease '{name}'"
                    )));
                }
                Some(arg) => arg.trim().parse::<f64>().map_err(|_| {
                    ChapterflowError::validation(format!("bad back overshoot in '{name}'"))
                })?,
            };
            return Ok(Self::BackOut { overshoot });
        }

        let ease = match raw.replace(['_', '-'], "").as_str() {
            "linear" | "none" => Self::Linear,
            "inquad" | "power1.in" => Self::InQuad,
            "outquad" | "power1" | "power1.out" => Self::OutQuad,
            "inoutquad" | "power1.inout" => Self::InOutQuad,
            "incubic" | "power2.in" => Self::InCubic,
            "outcubic" | "power2" | "power2.out" => Self::OutCubic,
            "inoutcubic" | "power2.inout" => Self::InOutCubic,
            other => {
                return Err(ChapterflowError::validation(format!(
                    "unknown ease '{other}'"
                )));
            }
        };
        Ok(ease)
    }
}

impl Ease {
    /// Canonical motion-library name, accepted back by [`Ease::parse`].
    pub fn name(self) -> String {
        match self {
            Self::Linear => "none".to_owned(),
            Self::InQuad => "power1.in".to_owned(),
            Self::OutQuad => "power1.out".to_owned(),
            Self::InOutQuad => "power1.inOut".to_owned(),
            Self::InCubic => "power2.in".to_owned(),
            Self::OutCubic => "power2.out".to_owned(),
            Self::InOutCubic => "power2.inOut".to_owned(),
            Self::BackOut { overshoot } => format!("back.out({overshoot})"),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = ChapterflowError;

    fn try_from(value: String) -> ChapterflowResult<Self> {
        Self::parse(&value)
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.name()
    }
}

impl Default for Ease {
    fn default() -> Self {
        Self::InOutQuad
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
