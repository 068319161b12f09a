//! Layout options and the small enums they are built from.
//!
//! Option names follow the layered-layout vocabulary (`direction`, `edgeRouting`,
//! `spacingEdgeLabel`, ...) so a driver can hand over its JSON configuration unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    #[default]
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Down | Direction::Up)
    }

    pub fn is_horizontal(self) -> bool {
        !self.is_vertical()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeRouting {
    #[default]
    Orthogonal,
    Polyline,
    Splines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortSide {
    #[default]
    Undefined,
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortConstraints {
    #[default]
    Undefined,
    Free,
    FixedSide,
    FixedOrder,
    FixedRatio,
    FixedPos,
}

impl PortConstraints {
    pub fn is_side_fixed(self) -> bool {
        matches!(
            self,
            PortConstraints::FixedSide
                | PortConstraints::FixedOrder
                | PortConstraints::FixedRatio
                | PortConstraints::FixedPos
        )
    }

    pub fn is_pos_fixed(self) -> bool {
        matches!(self, PortConstraints::FixedRatio | PortConstraints::FixedPos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayerConstraint {
    #[default]
    None,
    First,
    FirstSeparate,
    Last,
    LastSeparate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeLabelPlacement {
    #[default]
    Center,
    Head,
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LabelSide {
    #[default]
    Unknown,
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeLabelSideSelection {
    AlwaysUp,
    #[default]
    AlwaysDown,
    DirectionUp,
    DirectionDown,
    /// Sides are chosen per target node so labels of converging edges do not overlap.
    Smart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalPlacement {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerticalPlacement {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Where a node's labels go relative to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeLabelPlacement {
    pub outside: bool,
    pub horizontal: HorizontalPlacement,
    pub vertical: VerticalPlacement,
}

impl NodeLabelPlacement {
    pub fn inside_center() -> Self {
        Self {
            outside: false,
            horizontal: HorizontalPlacement::Center,
            vertical: VerticalPlacement::Center,
        }
    }

    pub fn outside_left_center() -> Self {
        Self {
            outside: true,
            horizontal: HorizontalPlacement::Left,
            vertical: VerticalPlacement::Center,
        }
    }

    pub fn outside_right_center() -> Self {
        Self {
            outside: true,
            horizontal: HorizontalPlacement::Right,
            vertical: VerticalPlacement::Center,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub direction: Direction,
    pub edge_routing: EdgeRouting,
    pub spacing_node_node: f64,
    pub spacing_edge_label: f64,
    pub spacing_label_label: f64,
    /// Keep a bend point where a long-edge dummy used to be, even if the edge runs straight
    /// through it.
    pub unnecessary_bendpoints: bool,
    pub edge_label_side_selection: EdgeLabelSideSelection,
    /// Thickness given to edges created through [`LGraph::add_edge`](crate::LGraph::add_edge).
    pub default_edge_thickness: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Right,
            edge_routing: EdgeRouting::Orthogonal,
            spacing_node_node: 20.0,
            spacing_edge_label: 2.0,
            spacing_label_label: 0.0,
            unnecessary_bendpoints: false,
            edge_label_side_selection: EdgeLabelSideSelection::AlwaysDown,
            default_edge_thickness: 1.0,
        }
    }
}
