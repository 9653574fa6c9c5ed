use serde::{Deserialize, Serialize};

use super::{EdgeId, VertexId, Weight};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct DirectedWeightedEdge {
    id: EdgeId,
    tail: VertexId,
    head: VertexId,
    weight: Weight,
}

impl DirectedWeightedEdge {
    pub fn new(
        id: EdgeId,
        tail: VertexId,
        head: VertexId,
        weight: Weight,
    ) -> DirectedWeightedEdge {
        DirectedWeightedEdge {
            id,
            tail,
            head,
            weight,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn tail(&self) -> VertexId {
        self.tail
    }

    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn tailless(&self) -> DirectedTaillessWeightedEdge {
        DirectedTaillessWeightedEdge {
            id: self.id,
            head: self.head,
            weight: self.weight,
        }
    }

    pub fn headless(&self) -> DirectedHeadlessWeightedEdge {
        DirectedHeadlessWeightedEdge {
            id: self.id,
            tail: self.tail,
            weight: self.weight,
        }
    }
}

/// Edge stored in the adjacency list of its tail.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DirectedTaillessWeightedEdge {
    id: EdgeId,
    head: VertexId,
    weight: Weight,
}

impl DirectedTaillessWeightedEdge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn set_tail(&self, tail: VertexId) -> DirectedWeightedEdge {
        DirectedWeightedEdge::new(self.id, tail, self.head, self.weight)
    }
}

/// Edge stored in the adjacency list of its head.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DirectedHeadlessWeightedEdge {
    id: EdgeId,
    tail: VertexId,
    weight: Weight,
}

impl DirectedHeadlessWeightedEdge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn tail(&self) -> VertexId {
        self.tail
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn set_head(&self, head: VertexId) -> DirectedWeightedEdge {
        DirectedWeightedEdge::new(self.id, self.tail, head, self.weight)
    }
}
