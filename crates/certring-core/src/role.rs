//! Display roles and their visual parameters.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};

/// How an item is presented relative to the focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// The focused item, front and center.
    Front,
    /// The item directly before the focus.
    LeftNeighbor,
    /// The item directly after the focus.
    RightNeighbor,
    /// Everything else.
    Hidden,
}

impl Role {
    /// Classify a signed offset from the focus.
    pub fn from_offset(offset: isize) -> Self {
        match offset {
            0 => Role::Front,
            -1 => Role::LeftNeighbor,
            1 => Role::RightNeighbor,
            _ => Role::Hidden,
        }
    }

    /// Whether the role occupies one of the three visible slots.
    pub fn is_visible(self) -> bool {
        self != Role::Hidden
    }

    /// Visual parameters for this role.
    pub fn style(self) -> &'static RoleStyle {
        RoleStyle::for_role(self)
    }
}

/// Visual parameters of a card in a given role.
///
/// Values are in the units of the reference layout: `x_shift` in pixels,
/// `rotate_y` in degrees, `blur` in pixels. Front ends scale them to their
/// own surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoleStyle {
    /// Horizontal displacement from the center.
    pub x_shift: i16,
    /// Scale factor relative to the natural card size.
    pub scale: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Stacking order; higher is drawn on top.
    pub z_index: u8,
    /// Rotation around the vertical axis.
    pub rotate_y: i16,
    /// Blur radius.
    pub blur: u8,
    /// Whether the card accepts activation.
    pub interactive: bool,
}

const FRONT: RoleStyle = RoleStyle {
    x_shift: 0,
    scale: 1.1,
    opacity: 1.0,
    z_index: 10,
    rotate_y: 0,
    blur: 0,
    interactive: true,
};

const LEFT_NEIGHBOR: RoleStyle = RoleStyle {
    x_shift: -450,
    scale: 0.75,
    opacity: 0.5,
    z_index: 5,
    rotate_y: 45,
    blur: 4,
    interactive: false,
};

const RIGHT_NEIGHBOR: RoleStyle = RoleStyle {
    x_shift: 450,
    scale: 0.75,
    opacity: 0.5,
    z_index: 5,
    rotate_y: -45,
    blur: 4,
    interactive: false,
};

const HIDDEN: RoleStyle = RoleStyle {
    x_shift: 0,
    scale: 0.75,
    opacity: 0.0,
    z_index: 5,
    rotate_y: 0,
    blur: 4,
    interactive: false,
};

impl RoleStyle {
    /// Look up the style for a role.
    pub const fn for_role(role: Role) -> &'static RoleStyle {
        match role {
            Role::Front => &FRONT,
            Role::LeftNeighbor => &LEFT_NEIGHBOR,
            Role::RightNeighbor => &RIGHT_NEIGHBOR,
            Role::Hidden => &HIDDEN,
        }
    }

    /// Scale relative to the front card (1.0 for the front card itself).
    pub fn relative_scale(&self) -> f32 {
        self.scale / FRONT.scale
    }
}
