/// Pheromone markers an ant can leave on a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PheromoneKind {
    /// Left by returning ants; overwritten on deposit
    Regular,
    /// Left by foraging ants; overwritten on deposit
    Food,
    /// Left by ants heading home from a source that still had food; overwritten
    Rich,
    /// Left on every visit; accumulates
    Trail,
}

impl PheromoneKind {
    pub const ALL: [PheromoneKind; 4] = [
        PheromoneKind::Regular,
        PheromoneKind::Food,
        PheromoneKind::Rich,
        PheromoneKind::Trail,
    ];

    /// Whether repeated deposits add up instead of resetting the level
    #[inline]
    pub const fn accumulates(self) -> bool {
        matches!(self, PheromoneKind::Trail)
    }
}

/// Which pheromone layers exist
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PheromoneMode {
    /// A single generic layer, addressed as [`PheromoneKind::Regular`]
    Single,
    /// One layer per [`PheromoneKind`]
    Multiple,
}

impl PheromoneMode {
    pub const fn layer_count(self) -> usize {
        match self {
            PheromoneMode::Single => 1,
            PheromoneMode::Multiple => PheromoneKind::ALL.len(),
        }
    }

    /// Layer holding `kind`, or `None` when the mode has no such layer
    #[inline]
    pub const fn layer(self, kind: PheromoneKind) -> Option<usize> {
        match (self, kind) {
            (PheromoneMode::Single, PheromoneKind::Regular) => Some(0),
            (PheromoneMode::Single, _) => None,
            (PheromoneMode::Multiple, PheromoneKind::Regular) => Some(0),
            (PheromoneMode::Multiple, PheromoneKind::Food) => Some(1),
            (PheromoneMode::Multiple, PheromoneKind::Rich) => Some(2),
            (PheromoneMode::Multiple, PheromoneKind::Trail) => Some(3),
        }
    }

    /// Collapse a state marker onto the kinds this mode understands
    #[inline]
    pub const fn resolve(self, kind: PheromoneKind) -> PheromoneKind {
        match self {
            PheromoneMode::Single => PheromoneKind::Regular,
            PheromoneMode::Multiple => kind,
        }
    }
}
