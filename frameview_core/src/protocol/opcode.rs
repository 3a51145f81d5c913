// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire opcodes.

/// The command tag that starts every record of a binary stream.
///
/// The discriminants are the on-wire values and must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Opcode {
    /// Insert a frame.
    InsertFrame = 1,
    /// Insert a point.
    InsertPoint = 2,
    /// Insert a point set.
    InsertPoints = 3,
    /// Insert a segment.
    InsertLine = 4,
    /// Insert a segment set.
    InsertLines = 5,
    /// Insert a circle outline.
    InsertCircle = 6,
    /// Insert a set of circle outlines.
    InsertCircles = 7,
    /// Insert a filled circle.
    InsertFilledCircle = 8,
    /// Insert a set of filled circles.
    InsertFilledCircles = 9,
    /// Insert an arc outline.
    InsertArc = 10,
    /// Insert a set of arc outlines.
    InsertArcs = 11,
    /// Insert a filled arc.
    InsertFilledArc = 12,
    /// Insert a set of filled arcs.
    InsertFilledArcs = 13,
    /// Insert an open polyline.
    InsertPolyline = 14,
    /// Insert a polygon outline.
    InsertPolygon = 15,
    /// Insert a filled polygon.
    InsertFilledPolygon = 16,
    /// Insert a text label.
    InsertString = 17,
    /// Show or hide an object.
    SetObjectVisible = 18,
    /// Re-layer an object.
    SetObjectLayer = 19,
    /// Recolor an object.
    SetObjectColor = 20,
    /// Show or hide a frame.
    SetFrameVisible = 21,
    /// Re-layer a frame.
    SetFrameLayer = 22,
    /// Move a frame.
    SetFramePos = 23,
    /// Turn a frame.
    SetFrameAngle = 24,
    /// Move and turn a frame.
    SetFramePosAngle = 25,
    /// Remove a frame and its subtree.
    RemoveFrame = 26,
    /// Remove an object (or a direct sub-frame).
    RemoveObject = 27,
    /// Remove everything below a frame.
    EmptyFrame = 28,
}

impl Opcode {
    /// Every opcode, in wire order.
    pub const ALL: [Self; 28] = [
        Self::InsertFrame,
        Self::InsertPoint,
        Self::InsertPoints,
        Self::InsertLine,
        Self::InsertLines,
        Self::InsertCircle,
        Self::InsertCircles,
        Self::InsertFilledCircle,
        Self::InsertFilledCircles,
        Self::InsertArc,
        Self::InsertArcs,
        Self::InsertFilledArc,
        Self::InsertFilledArcs,
        Self::InsertPolyline,
        Self::InsertPolygon,
        Self::InsertFilledPolygon,
        Self::InsertString,
        Self::SetObjectVisible,
        Self::SetObjectLayer,
        Self::SetObjectColor,
        Self::SetFrameVisible,
        Self::SetFrameLayer,
        Self::SetFramePos,
        Self::SetFrameAngle,
        Self::SetFramePosAngle,
        Self::RemoveFrame,
        Self::RemoveObject,
        Self::EmptyFrame,
    ];

    /// Maps a wire value to its opcode.
    #[must_use]
    pub fn from_i32(value: i32) -> Option<Self> {
        let i = usize::try_from(value).ok()?.checked_sub(1)?;
        Self::ALL.get(i).copied()
    }

    /// Returns the wire value.
    #[inline]
    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self as i32
    }

    /// Returns the snake-case command name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InsertFrame => "insert_frame",
            Self::InsertPoint => "insert_point",
            Self::InsertPoints => "insert_points",
            Self::InsertLine => "insert_line",
            Self::InsertLines => "insert_lines",
            Self::InsertCircle => "insert_circle",
            Self::InsertCircles => "insert_circles",
            Self::InsertFilledCircle => "insert_f_circle",
            Self::InsertFilledCircles => "insert_f_circles",
            Self::InsertArc => "insert_circlearc",
            Self::InsertArcs => "insert_circlearcs",
            Self::InsertFilledArc => "insert_f_circlearc",
            Self::InsertFilledArcs => "insert_f_circlearcs",
            Self::InsertPolyline => "insert_polyline",
            Self::InsertPolygon => "insert_polygon",
            Self::InsertFilledPolygon => "insert_f_polygon",
            Self::InsertString => "insert_string",
            Self::SetObjectVisible => "set_object_visible",
            Self::SetObjectLayer => "set_object_layer",
            Self::SetObjectColor => "set_object_color",
            Self::SetFrameVisible => "set_frame_visible",
            Self::SetFrameLayer => "set_frame_layer",
            Self::SetFramePos => "set_frame_pos",
            Self::SetFrameAngle => "set_frame_ang",
            Self::SetFramePosAngle => "set_frame_pos_ang",
            Self::RemoveFrame => "remove_frame",
            Self::RemoveObject => "remove_object",
            Self::EmptyFrame => "empty_frame",
        }
    }
}

impl core::fmt::Display for Opcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_match_table_position() {
        for (i, op) in Opcode::ALL.iter().enumerate() {
            assert_eq!(Opcode::from_i32(op.to_i32()), Some(*op));
            assert_eq!(usize::try_from(op.to_i32()).ok(), Some(i + 1));
        }
    }

    #[test]
    fn spot_check_values() {
        assert_eq!(Opcode::InsertFrame.to_i32(), 1);
        assert_eq!(Opcode::InsertFilledCircle.to_i32(), 8);
        assert_eq!(Opcode::InsertString.to_i32(), 17);
        assert_eq!(Opcode::EmptyFrame.to_i32(), 28);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(Opcode::from_i32(0), None);
        assert_eq!(Opcode::from_i32(29), None);
        assert_eq!(Opcode::from_i32(-1), None);
        assert_eq!(Opcode::from_i32(i32::MIN), None);
    }
}
