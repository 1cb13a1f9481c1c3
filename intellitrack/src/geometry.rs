use crate::error::RoiError;
use std::fmt;
use std::str::FromStr;

/// Axis-aligned box in pixel coordinates. `x`/`y` may be negative when a
/// tracked target drifts past the frame edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Result<Self, RoiError> {
        let bbox = Self {
            x,
            y,
            width,
            height,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// A box a quarter of each frame dimension, centered in the frame.
    pub fn centered(frame_width: usize, frame_height: usize) -> Result<Self, RoiError> {
        let width = (frame_width / 4) as u32;
        let height = (frame_height / 4) as u32;
        let x = (frame_width as i32 - width as i32) / 2;
        let y = (frame_height as i32 - height as i32) / 2;
        Self::new(x, y, width, height)
    }

    pub fn validate(&self) -> Result<(), RoiError> {
        if self.width == 0 || self.height == 0 {
            return Err(RoiError::Degenerate {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// True when the whole box lies inside a `frame_width` x `frame_height` frame.
    pub fn within(&self, frame_width: usize, frame_height: usize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x as i64 + self.width as i64 <= frame_width as i64
            && self.y as i64 + self.height as i64 <= frame_height as i64
    }

    pub fn moved_to(&self, x: i32, y: i32) -> Self {
        Self { x, y, ..*self }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for BoundingBox {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || RoiError::Parse(s.to_string());
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, width, height] = parts.as_slice() else {
            return Err(parse_error());
        };
        let x = x.parse().map_err(|_| parse_error())?;
        let y = y.parse().map_err(|_| parse_error())?;
        let width = width.parse().map_err(|_| parse_error())?;
        let height = height.parse().map_err(|_| parse_error())?;
        Self::new(x, y, width, height)
    }
}

/// Centroid displacement from the frame center, each axis in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetOffset {
    pub dx: f64,
    pub dy: f64,
}

#[cfg(test)]
mod tests {
    mod success {
        use crate::geometry::BoundingBox;

        #[test]
        fn parse_roi() {
            let bbox: BoundingBox = "10, 20,30,40".parse().unwrap();
            assert_eq!(bbox, BoundingBox::new(10, 20, 30, 40).unwrap());
            assert_eq!(bbox.to_string(), "10,20,30,40");
        }

        #[test]
        fn parse_negative_origin() {
            let bbox: BoundingBox = "-5,-8,10,10".parse().unwrap();
            assert_eq!(bbox.center(), (0.0, -3.0));
        }

        #[test]
        fn centered_quarter_box() {
            let bbox = BoundingBox::centered(640, 480).unwrap();
            assert_eq!(bbox, BoundingBox::new(240, 180, 160, 120).unwrap());
            assert_eq!(bbox.center(), (320.0, 240.0));
        }

        #[test]
        fn within_frame() {
            let bbox = BoundingBox::new(600, 440, 40, 40).unwrap();
            assert!(bbox.within(640, 480));
            assert!(!bbox.moved_to(601, 440).within(640, 480));
            assert!(!bbox.moved_to(-1, 0).within(640, 480));
        }
    }

    mod failure {
        use crate::error::RoiError;
        use crate::geometry::BoundingBox;

        #[test]
        fn zero_width_rejected() {
            assert_eq!(
                BoundingBox::new(10, 10, 0, 5),
                Err(RoiError::Degenerate {
                    width: 0,
                    height: 5
                })
            );
        }

        #[test]
        fn zero_area_parse_rejected() {
            let err = "1,2,3,0".parse::<BoundingBox>().unwrap_err();
            assert_eq!(
                err,
                RoiError::Degenerate {
                    width: 3,
                    height: 0
                }
            );
        }

        #[test]
        fn malformed_roi_rejected() {
            for input in ["1,2,3", "a,b,c,d", "1,2,-3,4", ""] {
                assert!(
                    matches!(input.parse::<BoundingBox>(), Err(RoiError::Parse(_))),
                    "{input}"
                );
            }
        }

        #[test]
        fn tiny_frame_has_no_centered_box() {
            assert!(BoundingBox::centered(3, 3).is_err());
        }
    }
}
