/// Lane positions within a 12-bit ROM word, MSB first
pub struct LaneInfo {
    pub index: usize,
    pub name: &'static str,
}

/// Lanes reserved per segment (even and odd pixel)
pub const LANES_PER_SEGMENT: usize = 2;

/// Lanes reserved per axis (both segments)
pub const LANES_PER_AXIS: usize = 4;

pub const LANE_MAP: &[LaneInfo] = &[
    LaneInfo {
        index: 0,
        name: "pixel even segment 0 axis A",
    },
    LaneInfo {
        index: 1,
        name: "pixel odd segment 0 axis A",
    },
    LaneInfo {
        index: 2,
        name: "pixel even segment 1 axis A",
    },
    LaneInfo {
        index: 3,
        name: "pixel odd segment 1 axis A",
    },
    LaneInfo {
        index: 4,
        name: "pixel even segment 0 axis B",
    },
    LaneInfo {
        index: 5,
        name: "pixel odd segment 0 axis B",
    },
    LaneInfo {
        index: 6,
        name: "pixel even segment 1 axis B",
    },
    LaneInfo {
        index: 7,
        name: "pixel odd segment 1 axis B",
    },
    LaneInfo {
        index: 8,
        name: "pixel even segment 0 axis C",
    },
    LaneInfo {
        index: 9,
        name: "pixel odd segment 0 axis C",
    },
    LaneInfo {
        index: 10,
        name: "pixel even segment 1 axis C",
    },
    LaneInfo {
        index: 11,
        name: "pixel odd segment 1 axis C",
    },
];

/// First lane used by a hit on `axis` in `segment`
pub fn lane_base(axis: usize, segment: usize) -> usize {
    LANES_PER_AXIS * axis + LANES_PER_SEGMENT * segment
}

pub fn get_lane_name(index: usize) -> String {
    LANE_MAP
        .iter()
        .find(|l| l.index == index)
        .map_or("unused", |l| l.name)
        .to_string()
}
