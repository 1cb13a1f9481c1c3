//! VISCA pan/tilt drive command (`8x 01 06 01 VV WW 0p 0t FF`), address 1.

use bytes::{BufMut, Bytes, BytesMut};
use num_enum::IntoPrimitive;

pub const PAN_SPEED_MAX: i32 = 0x18;
pub const TILT_SPEED_MAX: i32 = 0x14;
pub const PAN_TILT_DRIVE_LEN: usize = 9;

const ADDRESS: u8 = 0x81;
const COMMAND: u8 = 0x01;
const CATEGORY_PAN_TILTER: u8 = 0x06;
const PAN_TILT_DRIVE: u8 = 0x01;
const TERMINATOR: u8 = 0xFF;

#[derive(Debug, PartialEq, Eq, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum PanDirection {
    Left = 0x01,
    Right = 0x02,
    Stop = 0x03,
}

#[derive(Debug, PartialEq, Eq, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum TiltDirection {
    Up = 0x01,
    Down = 0x02,
    Stop = 0x03,
}

/// Signed pan/tilt velocity, positive panning right and tilting up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PtzCommand {
    pan_speed: i32,
    tilt_speed: i32,
    pan_direction: PanDirection,
    tilt_direction: TiltDirection,
}

impl PtzCommand {
    pub fn from_speeds(pan_speed: i32, tilt_speed: i32) -> Self {
        let pan_speed = pan_speed.clamp(-PAN_SPEED_MAX, PAN_SPEED_MAX);
        let tilt_speed = tilt_speed.clamp(-TILT_SPEED_MAX, TILT_SPEED_MAX);
        let pan_direction = match pan_speed {
            s if s > 0 => PanDirection::Right,
            s if s < 0 => PanDirection::Left,
            _ => PanDirection::Stop,
        };
        let tilt_direction = match tilt_speed {
            s if s > 0 => TiltDirection::Up,
            s if s < 0 => TiltDirection::Down,
            _ => TiltDirection::Stop,
        };
        Self {
            pan_speed,
            tilt_speed,
            pan_direction,
            tilt_direction,
        }
    }

    pub fn stop() -> Self {
        Self::from_speeds(0, 0)
    }

    pub fn pan_speed(&self) -> i32 {
        self.pan_speed
    }

    pub fn tilt_speed(&self) -> i32 {
        self.tilt_speed
    }

    pub fn pan_direction(&self) -> PanDirection {
        self.pan_direction
    }

    pub fn tilt_direction(&self) -> TiltDirection {
        self.tilt_direction
    }

    pub fn is_stop(&self) -> bool {
        self.pan_direction == PanDirection::Stop && self.tilt_direction == TiltDirection::Stop
    }

    // The magnitude never goes below 1; stopping is carried by the direction byte.
    fn pan_magnitude(&self) -> u8 {
        self.pan_speed.abs().clamp(1, PAN_SPEED_MAX) as u8
    }

    fn tilt_magnitude(&self) -> u8 {
        self.tilt_speed.abs().clamp(1, TILT_SPEED_MAX) as u8
    }

    pub fn packetize(&self, buf: &mut BytesMut) {
        buf.put_u8(ADDRESS);
        buf.put_u8(COMMAND);
        buf.put_u8(CATEGORY_PAN_TILTER);
        buf.put_u8(PAN_TILT_DRIVE);
        buf.put_u8(self.pan_magnitude());
        buf.put_u8(self.tilt_magnitude());
        buf.put_u8(self.pan_direction.into());
        buf.put_u8(self.tilt_direction.into());
        buf.put_u8(TERMINATOR);

        tracing::trace!(
            pan = self.pan_speed,
            tilt = self.tilt_speed,
            "Packetized pan/tilt drive"
        );
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(PAN_TILT_DRIVE_LEN);
        self.packetize(&mut buf);
        buf.freeze()
    }
}
