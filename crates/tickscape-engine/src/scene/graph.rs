use super::{Color, NodeId, NodeKind, Transform, VisualNode};

/// Flat arena of visual nodes plus frame-wide presentation state.
///
/// Nodes are never removed; ids stay valid for the graph's lifetime.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<VisualNode>,
    pub background: Color,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            background: Color::black(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Adds a visible node and returns its id.
    pub fn spawn(&mut self, name: impl Into<String>, kind: NodeKind, transform: Transform) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let name = name.into();
        log::trace!("node {:?} spawned: {name}", id);

        self.nodes.push(VisualNode {
            name,
            kind,
            transform,
            visible: true,
        });
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut VisualNode> {
        self.nodes.get_mut(id.index())
    }

    #[inline]
    pub fn transform(&self, id: NodeId) -> Option<&Transform> {
        self.get(id).map(|n| &n.transform)
    }

    #[inline]
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.get_mut(id).map(|n| &mut n.transform)
    }

    /// Finds the first node with `name`.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(|i| NodeId(i as u32))
    }

    /// Iterates nodes in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &VisualNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_returns_sequential_ids() {
        let mut scene = SceneGraph::new();
        let a = scene.spawn("a", NodeKind::Group, Transform::IDENTITY);
        let b = scene.spawn("b", NodeKind::Group, Transform::IDENTITY);
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(b).map(|n| n.name.as_str()), Some("b"));
    }

    #[test]
    fn transform_mut_writes_through() {
        let mut scene = SceneGraph::new();
        let id = scene.spawn("box", NodeKind::Mesh { label: "box".into() }, Transform::IDENTITY);
        if let Some(t) = scene.transform_mut(id) {
            t.position = Vec3::new(1.0, 2.0, 3.0);
        }
        assert_eq!(scene.transform(id).map(|t| t.position), Some(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn find_by_name() {
        let mut scene = SceneGraph::new();
        scene.spawn("ground", NodeKind::Group, Transform::IDENTITY);
        let cat = scene.spawn("cat", NodeKind::Model { vertices: 3, faces: 1 }, Transform::IDENTITY);
        assert_eq!(scene.find("cat"), Some(cat));
        assert_eq!(scene.find("dog"), None);
    }

    #[test]
    fn iter_follows_spawn_order() {
        let mut scene = SceneGraph::new();
        for name in ["x", "y", "z"] {
            scene.spawn(name, NodeKind::Group, Transform::IDENTITY);
        }
        let names: Vec<_> = scene.iter().map(|(_, n)| n.name.clone()).collect();
        assert_eq!(names, ["x", "y", "z"]);
    }
}
