//! Hover tilt for project cards.

use crate::config::CardTiltConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltAngles {
    /// Degrees around the horizontal axis.
    pub rotate_x: f64,
    /// Degrees around the vertical axis.
    pub rotate_y: f64,
}

#[derive(Debug, Clone)]
pub struct CardTilt {
    config: CardTiltConfig,
}

impl CardTilt {
    pub fn new(config: CardTiltConfig) -> Self {
        Self { config }
    }

    /// `x`/`y` are relative to the card's top-left corner.
    pub fn angles(&self, x: f64, y: f64, width: f64, height: f64) -> TiltAngles {
        let center_x = width / 2.0;
        let center_y = height / 2.0;
        TiltAngles {
            rotate_x: (y - center_y) / self.config.divisor,
            rotate_y: (center_x - x) / self.config.divisor,
        }
    }

    pub fn transform_at(&self, x: f64, y: f64, width: f64, height: f64) -> String {
        let TiltAngles { rotate_x, rotate_y } = self.angles(x, y, width, height);
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) translateY(-{}px)",
            self.config.perspective_px, rotate_x, rotate_y, self.config.lift_px
        )
    }

    pub fn neutral(&self) -> String {
        format!(
            "perspective({}px) rotateX(0) rotateY(0) translateY(0)",
            self.config.perspective_px
        )
    }
}

impl Default for CardTilt {
    fn default() -> Self {
        Self::new(CardTiltConfig::default())
    }
}
