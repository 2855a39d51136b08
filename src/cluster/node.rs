use crate::Vector;

/// A named point: either a data node or a centroid.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    identity: String,
    coordinates: Vector,
}

impl Node {
    pub fn new(identity: impl Into<String>, coordinates: Vector) -> Self {
        Self {
            identity: identity.into(),
            coordinates,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn coordinates(&self) -> &Vector {
        &self.coordinates
    }

    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }
}
